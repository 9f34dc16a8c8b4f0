//! `dermaflow add-client` – the client create form.

use super::describe_navigation;
use crate::cli::shell::Shell;
use anyhow::{anyhow, Result};
use dermaflow_core::screens::{messages, ClientFormScreen, Navigation};

pub async fn run_add_client(
    shell: &Shell,
    name: String,
    email: String,
    phone: Option<String>,
    notes: Option<String>,
) -> Result<()> {
    let mut form = ClientFormScreen::create();
    form.name = name;
    form.email = email;
    form.phone = phone.unwrap_or_default();
    form.notes = notes.unwrap_or_default();

    let gateway = shell.gateway.clone();
    let ctx = shell.ctx.clone();
    let (form, nav) = tokio::task::spawn_blocking(move || {
        let nav = form.submit(&gateway, &ctx);
        (form, nav)
    })
    .await?;

    match nav {
        Navigation::ClientDetail(id) => {
            println!("Added client {}.", id);
            if let Some(line) = describe_navigation(nav) {
                println!("{}", line);
            }
            Ok(())
        }
        Navigation::Login => {
            println!("{}", describe_navigation(nav).unwrap_or_default());
            Ok(())
        }
        _ => Err(anyhow!(form.error.unwrap_or(messages::SAVE_FAILED))),
    }
}
