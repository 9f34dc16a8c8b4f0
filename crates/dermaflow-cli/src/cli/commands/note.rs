//! `dermaflow note <appointment-id>` – the session note form (upsert).

use super::describe_navigation;
use crate::cli::shell::Shell;
use anyhow::{anyhow, Result};
use dermaflow_core::media::CloudinaryUploader;
use dermaflow_core::screens::{messages, AppointmentDetailScreen, Navigation, SessionNoteForm};
use std::path::PathBuf;
use uuid::Uuid;

pub async fn run_note(
    shell: &Shell,
    appointment_id: Uuid,
    notes: Option<String>,
    consent: Option<PathBuf>,
) -> Result<()> {
    // The detail fetch provides the existing-note input for the form.
    let gateway = shell.gateway.clone();
    let fetched = tokio::task::spawn_blocking(move || {
        AppointmentDetailScreen::fetch(&gateway, appointment_id)
    })
    .await?;
    let view = match fetched {
        Ok(view) => view,
        Err(e) if e.is_not_found() => {
            println!("Appointment not found.");
            println!("{}", describe_navigation(Navigation::ClientList).unwrap_or_default());
            return Ok(());
        }
        Err(e) => {
            tracing::error!("loading appointment for note failed: {}", e);
            return Err(anyhow!(messages::LOAD_FAILED));
        }
    };

    let mut form = SessionNoteForm::new(
        view.appointment.client_id,
        view.appointment.id,
        view.note,
    );
    println!("Consent form: {}", form.consent_label());
    if let Some(notes) = notes {
        form.notes = notes;
    }
    form.consent_file = consent;

    let gateway = shell.gateway.clone();
    let ctx = shell.ctx.clone();
    let media_cfg = shell.config.media.clone();
    let (form, nav) = tokio::task::spawn_blocking(move || {
        let uploader = CloudinaryUploader::new(&media_cfg);
        let nav = form.save(&gateway, &ctx, &uploader);
        (form, nav)
    })
    .await?;

    if let Some(line) = describe_navigation(nav) {
        println!("{}", line);
        return Ok(());
    }
    if form.saved {
        println!("Session note saved.");
        println!("Consent form: {}", form.consent_label());
        Ok(())
    } else {
        Err(anyhow!(form.error.unwrap_or(messages::NOTES_SAVE_FAILED)))
    }
}
