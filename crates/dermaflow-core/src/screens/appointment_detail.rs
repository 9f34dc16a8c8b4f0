//! Appointment detail screen: the appointment plus its session note, if one
//! exists. The note (or its absence) is the `existing` input of the note form.

use super::{apply_fetch, FetchGuard, Navigation, ScreenState};
use crate::gateway::{Filter, Gateway, Query, StoreError};
use crate::records::{Appointment, SessionNote};
use crate::session::SessionContext;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentView {
    pub appointment: Appointment,
    pub note: Option<SessionNote>,
}

pub struct AppointmentDetailScreen {
    pub appointment_id: Uuid,
    pub state: ScreenState<AppointmentView>,
    guard: FetchGuard,
}

impl AppointmentDetailScreen {
    pub fn new(appointment_id: Uuid) -> Self {
        Self {
            appointment_id,
            state: ScreenState::Loading,
            guard: FetchGuard::default(),
        }
    }

    pub fn begin_load(&mut self) -> u64 {
        self.state = ScreenState::Loading;
        self.guard.begin()
    }

    pub fn fetch(gateway: &Gateway, appointment_id: Uuid) -> Result<AppointmentView, StoreError> {
        let appointment: Appointment = gateway.select_one(
            "appointments",
            &Query::new().filter(Filter::eq("id", appointment_id)),
        )?;
        let mut notes: Vec<SessionNote> = gateway.select(
            "session_notes",
            &Query::new()
                .filter(Filter::eq("appointment_id", appointment_id))
                .limit(1),
        )?;
        Ok(AppointmentView {
            appointment,
            note: if notes.is_empty() {
                None
            } else {
                Some(notes.remove(0))
            },
        })
    }

    pub fn finish_load(
        &mut self,
        token: u64,
        ctx: &SessionContext,
        outcome: Result<AppointmentView, StoreError>,
    ) -> Navigation {
        apply_fetch(
            &mut self.state,
            &self.guard,
            token,
            ctx,
            outcome,
            Navigation::ClientList,
        )
    }

    pub fn load(&mut self, gateway: &Gateway, ctx: &SessionContext) -> Navigation {
        let token = self.begin_load();
        let outcome = Self::fetch(gateway, self.appointment_id);
        self.finish_load(token, ctx, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::testutil;

    #[test]
    fn missing_appointment_navigates_away() {
        let (_watch, ctx) = testutil::signed_in();
        let mut screen = AppointmentDetailScreen::new(Uuid::new_v4());
        let token = screen.begin_load();
        let nav = screen.finish_load(token, &ctx, Err(StoreError::NotFound));
        assert_eq!(nav, Navigation::ClientList);
        assert_eq!(screen.state, ScreenState::NotFound);
    }
}
