//! `dermaflow client <id>` – the client detail screen.

use super::describe_navigation;
use crate::cli::shell::Shell;
use anyhow::Result;
use dermaflow_core::screens::{ClientDetailScreen, ScreenState};
use uuid::Uuid;

pub async fn run_client(shell: &Shell, id: Uuid) -> Result<()> {
    let mut screen = ClientDetailScreen::new(id);
    let token = screen.begin_load();
    let gateway = shell.gateway.clone();
    let outcome =
        tokio::task::spawn_blocking(move || ClientDetailScreen::fetch(&gateway, id)).await?;
    let nav = screen.finish_load(token, &shell.ctx, outcome);

    match &screen.state {
        ScreenState::Ready(overview) => {
            let client = &overview.client;
            println!("{}", client.name);
            println!("  email: {}", client.email);
            println!("  phone: {}", client.phone.as_deref().unwrap_or("Not provided"));
            println!("  notes: {}", client.notes.as_deref().unwrap_or("No notes"));

            if overview.appointments.is_empty() {
                println!("\nNo appointments yet. Book one with `dermaflow book {}`.", client.id);
            } else {
                println!("\n{:<38} {:<22} {:<12} {}", "APPOINTMENT", "WHEN", "STATUS", "TREATMENT");
                for appt in &overview.appointments {
                    println!(
                        "{:<38} {:<22} {:<12} {}",
                        appt.id,
                        appt.date_time.format("%Y-%m-%d %H:%M"),
                        appt.status.as_str(),
                        appt.treatment
                    );
                }
            }
        }
        ScreenState::NotFound => println!("Client not found."),
        ScreenState::Failed(message) => println!("{}", message),
        ScreenState::Loading => {}
    }

    if let Some(line) = describe_navigation(nav) {
        println!("{}", line);
    }
    Ok(())
}
