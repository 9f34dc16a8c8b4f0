//! `dermaflow dashboard` – summary counts and upcoming appointments.

use super::describe_navigation;
use crate::cli::shell::Shell;
use anyhow::Result;
use chrono::Local;
use dermaflow_core::screens::{DashboardScreen, ScreenState};

pub async fn run_dashboard(shell: &Shell) -> Result<()> {
    let mut screen = DashboardScreen::new();
    let token = screen.begin_load();
    let gateway = shell.gateway.clone();
    let outcome =
        tokio::task::spawn_blocking(move || DashboardScreen::fetch(&gateway, Local::now())).await?;
    let nav = screen.finish_load(token, &shell.ctx, outcome);
    if let Some(line) = describe_navigation(nav) {
        println!("{}", line);
        return Ok(());
    }

    match &screen.state {
        ScreenState::Ready(data) => {
            println!("Clients:               {}", data.stats.total_clients);
            println!("Appointments today:    {}", data.stats.today_appointments);
            println!("Upcoming appointments: {}", data.stats.upcoming_appointments);
            println!("Photos (last 14 days): {}", data.stats.recent_photos);

            if data.upcoming.is_empty() {
                println!("\nNo upcoming appointments.");
            } else {
                println!("\n{:<22} {:<12} {:<24} {}", "WHEN", "STATUS", "CLIENT", "TREATMENT");
                for appt in &data.upcoming {
                    println!(
                        "{:<22} {:<12} {:<24} {}",
                        appt.date_time.format("%Y-%m-%d %H:%M"),
                        appt.status.as_str(),
                        appt.clients.name,
                        appt.treatment
                    );
                }
            }
        }
        ScreenState::Failed(message) => println!("{}", message),
        _ => {}
    }
    Ok(())
}
