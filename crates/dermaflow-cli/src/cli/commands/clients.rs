//! `dermaflow clients` – the client list screen.

use super::describe_navigation;
use crate::cli::shell::Shell;
use anyhow::Result;
use dermaflow_core::screens::{ClientListScreen, ScreenState};

pub async fn run_clients(shell: &Shell, search: Option<String>) -> Result<()> {
    let mut screen = ClientListScreen::new();
    screen.search = search.unwrap_or_default();

    let token = screen.begin_load();
    let gateway = shell.gateway.clone();
    let outcome = tokio::task::spawn_blocking(move || ClientListScreen::fetch(&gateway)).await?;
    let nav = screen.finish_load(token, &shell.ctx, outcome);
    if let Some(line) = describe_navigation(nav) {
        println!("{}", line);
        return Ok(());
    }

    match &screen.state {
        ScreenState::Ready(_) => {
            let visible = screen.visible();
            if visible.is_empty() {
                if screen.search.is_empty() {
                    println!("No clients yet. Add your first client with `dermaflow add-client`.");
                } else {
                    println!("No clients match your search criteria.");
                }
                return Ok(());
            }
            println!("{:<38} {:<24} {:<28} {}", "ID", "NAME", "EMAIL", "PHONE");
            for client in visible {
                println!(
                    "{:<38} {:<24} {:<28} {}",
                    client.id,
                    client.name,
                    client.email,
                    client.phone.as_deref().unwrap_or("-")
                );
            }
        }
        ScreenState::Failed(message) => println!("{}", message),
        _ => {}
    }
    Ok(())
}
