//! `dermaflow appointment <id>` – the appointment detail screen.

use super::describe_navigation;
use crate::cli::shell::Shell;
use anyhow::Result;
use dermaflow_core::screens::{AppointmentDetailScreen, ScreenState};
use uuid::Uuid;

pub async fn run_appointment(shell: &Shell, id: Uuid) -> Result<()> {
    let mut screen = AppointmentDetailScreen::new(id);
    let token = screen.begin_load();
    let gateway = shell.gateway.clone();
    let outcome =
        tokio::task::spawn_blocking(move || AppointmentDetailScreen::fetch(&gateway, id)).await?;
    let nav = screen.finish_load(token, &shell.ctx, outcome);

    match &screen.state {
        ScreenState::Ready(view) => {
            let appt = &view.appointment;
            println!("{}", appt.treatment);
            println!("  when:     {}", appt.date_time.format("%Y-%m-%d %H:%M"));
            println!("  duration: {} minutes", appt.duration);
            println!("  status:   {}", appt.status.as_str());
            if let Some(notes) = &appt.notes {
                println!("  notes:    {}", notes);
            }
            match &view.note {
                Some(note) => {
                    println!("\nSession note:");
                    println!("  {}", note.notes);
                    if note.consent_form_url.is_some() {
                        println!("  Consent form already uploaded.");
                    }
                }
                None => println!(
                    "\nNo session note yet. Add one with `dermaflow note {}`.",
                    appt.id
                ),
            }
        }
        ScreenState::NotFound => println!("Appointment not found."),
        ScreenState::Failed(message) => println!("{}", message),
        ScreenState::Loading => {}
    }

    if let Some(line) = describe_navigation(nav) {
        println!("{}", line);
    }
    Ok(())
}
