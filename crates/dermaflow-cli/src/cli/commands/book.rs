//! `dermaflow book <client-id>` – the appointment form. Bookings start as
//! pending; the reminder email is best-effort.

use super::describe_navigation;
use crate::cli::shell::Shell;
use anyhow::{anyhow, Result};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use dermaflow_core::gateway::{Filter, Query};
use dermaflow_core::notify::notifier_from_config;
use dermaflow_core::records::Client;
use dermaflow_core::screens::{messages, AppointmentFormScreen, Navigation};
use uuid::Uuid;

pub async fn run_book(
    shell: &Shell,
    client_id: Uuid,
    at: &str,
    treatment: String,
    duration: u32,
    notes: Option<String>,
) -> Result<()> {
    let date_time = parse_date_time(at)?;

    let gateway = shell.gateway.clone();
    let fetched: Result<Client, _> = tokio::task::spawn_blocking(move || {
        gateway.select_one("clients", &Query::new().filter(Filter::eq("id", client_id)))
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
            tracing::error!("loading client for booking failed: {}", e);
            return Err(anyhow!(messages::LOAD_FAILED));
        }
    };

    let mut form = AppointmentFormScreen::new(client.id, client.name, client.email);
    form.date_time = Some(date_time);
    form.treatment = treatment;
    form.duration = duration;
    form.notes = notes.unwrap_or_default();

    let gateway = shell.gateway.clone();
    let ctx = shell.ctx.clone();
    let email_cfg = shell.config.email.clone();
    let (form, nav) = tokio::task::spawn_blocking(move || {
        let notifier = email_cfg.as_ref().map(|cfg| notifier_from_config(cfg));
        let nav = form.submit(&gateway, &ctx, notifier.as_deref());
        (form, nav)
    })
    .await?;

    match nav {
        Navigation::AppointmentDetail(id) => {
            println!("Booked appointment {}.", id);
            if let Some(line) = describe_navigation(nav) {
                println!("{}", line);
            }
            Ok(())
        }
        Navigation::Login => {
            println!("{}", describe_navigation(nav).unwrap_or_default());
            Ok(())
        }
        _ => Err(anyhow!(form.error.unwrap_or(messages::BOOK_FAILED))),
    }
}

/// RFC 3339, or a naive `YYYY-MM-DDTHH:MM` read in the local zone.
fn parse_date_time(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Ok(t.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
        .map_err(|_| anyhow!("invalid date-time {:?}; use RFC 3339 or YYYY-MM-DDTHH:MM", s))?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|t| t.with_timezone(&Utc))
        .ok_or_else(|| anyhow!("date-time {:?} does not exist in the local zone", s))
}
