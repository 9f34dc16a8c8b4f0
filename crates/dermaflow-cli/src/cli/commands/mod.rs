//! CLI command handlers. Each screen's command is in its own file.

mod add_client;
mod add_photos;
mod appointment;
mod book;
mod client;
mod clients;
mod dashboard;
mod edit_client;
mod login;
mod logout;
mod note;
mod photos;

pub use add_client::run_add_client;
pub use add_photos::run_add_photos;
pub use appointment::run_appointment;
pub use book::run_book;
pub use client::run_client;
pub use clients::run_clients;
pub use dashboard::run_dashboard;
pub use edit_client::run_edit_client;
pub use login::run_login;
pub use logout::run_logout;
pub use note::run_note;
pub use photos::run_photos;

use dermaflow_core::screens::Navigation;

/// Render the navigation outcomes shared by data screens.
pub(crate) fn describe_navigation(nav: Navigation) -> Option<String> {
    match nav {
        Navigation::Stay => None,
        Navigation::Login => {
            Some("Signed out. Run `dermaflow login <email>` to continue.".to_string())
        }
        Navigation::ClientList => Some("Returning to the client list (`dermaflow clients`).".to_string()),
        Navigation::ClientDetail(id) => Some(format!("View with `dermaflow client {}`.", id)),
        Navigation::AppointmentDetail(id) => {
            Some(format!("View with `dermaflow appointment {}`.", id))
        }
    }
}
