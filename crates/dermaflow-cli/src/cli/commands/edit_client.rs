//! `dermaflow edit-client <id>` – the client edit form, pre-populated from
//! the stored record; only the given fields change.

use super::describe_navigation;
use crate::cli::shell::Shell;
use anyhow::{anyhow, Result};
use dermaflow_core::gateway::{Filter, Query};
use dermaflow_core::records::Client;
use dermaflow_core::screens::{messages, ClientFormScreen, Navigation};
use uuid::Uuid;

pub async fn run_edit_client(
    shell: &Shell,
    id: Uuid,
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    notes: Option<String>,
) -> Result<()> {
    let gateway = shell.gateway.clone();
    let fetched: Result<Client, _> = tokio::task::spawn_blocking(move || {
        gateway.select_one("clients", &Query::new().filter(Filter::eq("id", id)))
    })
    .await?;

    let client = match fetched {
        Ok(client) => client,
        Err(e) if e.is_not_found() => {
            println!("Client not found.");
            println!("{}", describe_navigation(Navigation::ClientList).unwrap_or_default());
            return Ok(());
        }
        Err(e) => {
            tracing::error!("loading client for edit failed: {}", e);
            return Err(anyhow!(messages::LOAD_FAILED));
        }
    };

    let mut form = ClientFormScreen::edit(&client);
    if let Some(name) = name {
        form.name = name;
    }
    if let Some(email) = email {
        form.email = email;
    }
    if let Some(phone) = phone {
        form.phone = phone;
    }
    if let Some(notes) = notes {
        form.notes = notes;
    }

    let gateway = shell.gateway.clone();
    let ctx = shell.ctx.clone();
    let (form, nav) = tokio::task::spawn_blocking(move || {
        let nav = form.submit(&gateway, &ctx);
        (form, nav)
    })
    .await?;

    match nav {
        Navigation::ClientDetail(id) => {
            println!("Saved client {}.", id);
            Ok(())
        }
        Navigation::Login => {
            println!("{}", describe_navigation(nav).unwrap_or_default());
            Ok(())
        }
        _ => Err(anyhow!(form.error.unwrap_or(messages::SAVE_FAILED))),
    }
}
