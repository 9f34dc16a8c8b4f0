//! Per-screen state machines.
//!
//! Every screen follows the same lifecycle: `Loading -> Ready` (or
//! `NotFound` on detail screens, or `Failed` with a static message). Fetches
//! are split into `begin_load` / `finish_load` so a shell can run the
//! blocking gateway call elsewhere; a result from a superseded load, or one
//! arriving after sign-out, is discarded without touching screen state.

mod appointment_detail;
mod appointment_form;
mod client_detail;
mod client_form;
mod client_list;
mod dashboard;
mod login;
mod session_note;
mod treatment_gallery;

pub use appointment_detail::{AppointmentDetailScreen, AppointmentView};
pub use appointment_form::AppointmentFormScreen;
pub use client_detail::{ClientDetailScreen, ClientOverview};
pub use client_form::{ClientFormMode, ClientFormScreen};
pub use client_list::{filter_clients, ClientListScreen};
pub use dashboard::{day_bounds, DashboardData, DashboardScreen, DashboardStats};
pub use login::LoginScreen;
pub use session_note::SessionNoteForm;
pub use treatment_gallery::{PhotoUploadForm, TreatmentGalleryScreen};

use crate::gateway::StoreError;
use crate::session::SessionContext;
use uuid::Uuid;

/// Static user-facing failure notices. Raw error payloads never reach the
/// user; details go to the log.
pub mod messages {
    pub const LOAD_FAILED: &str = "Something went wrong loading this screen. Please try again.";
    pub const SAVE_FAILED: &str = "Failed to save. Please try again.";
    pub const REQUIRED_FIELDS: &str = "Name and email are required.";
    pub const BOOK_FAILED: &str = "Failed to book appointment. Please try again.";
    pub const APPOINTMENT_INCOMPLETE: &str = "Date and treatment are required.";
    pub const NOTES_SAVE_FAILED: &str = "Failed to save session notes. Please try again.";
    pub const PHOTOS_INCOMPLETE: &str =
        "Please select both before and after images and set a treatment date.";
    pub const PHOTOS_SAVE_FAILED: &str = "Failed to upload photos. Please try again.";
    pub const LOGIN_FAILED: &str = "Sign-in failed. Check your email and password.";
}

/// Where a screen asks the shell to go next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    Login,
    ClientList,
    ClientDetail(Uuid),
    AppointmentDetail(Uuid),
}

/// Fetch lifecycle of a screen.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenState<T> {
    Loading,
    Ready(T),
    NotFound,
    Failed(&'static str),
}

impl<T> ScreenState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ScreenState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ScreenState::Ready(data) => Some(data),
            _ => None,
        }
    }
}

/// Monotonic load generation. A screen bumps it on every (re)load; only the
/// result carrying the current token may be applied.
#[derive(Debug, Default)]
pub struct FetchGuard {
    current: u64,
}

impl FetchGuard {
    pub fn begin(&mut self) -> u64 {
        self.current += 1;
        self.current
    }

    pub fn is_current(&self, token: u64) -> bool {
        token == self.current
    }
}

/// Applies a finished fetch. Stale results are dropped, a revoked session
/// redirects to login, `NotFound` lands in the screen's fallback navigation,
/// and any other failure becomes a terminal-but-retryable `Failed` state.
fn apply_fetch<T>(
    state: &mut ScreenState<T>,
    guard: &FetchGuard,
    token: u64,
    ctx: &SessionContext,
    outcome: Result<T, StoreError>,
    not_found_nav: Navigation,
) -> Navigation {
    if !guard.is_current(token) {
        return Navigation::Stay;
    }
    if ctx.revoked() {
        return Navigation::Login;
    }
    match outcome {
        Ok(data) => {
            *state = ScreenState::Ready(data);
            Navigation::Stay
        }
        Err(e) if e.is_not_found() => {
            *state = ScreenState::NotFound;
            not_found_nav
        }
        Err(e) => {
            tracing::error!("screen fetch failed: {}", e);
            *state = ScreenState::Failed(messages::LOAD_FAILED);
            Navigation::Stay
        }
    }
}
