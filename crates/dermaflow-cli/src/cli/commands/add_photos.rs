//! `dermaflow add-photos <client-id>` – upload a before/after pair.

use super::describe_navigation;
use crate::cli::shell::Shell;
use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use dermaflow_core::media::CloudinaryUploader;
use dermaflow_core::screens::{ScreenState, TreatmentGalleryScreen};
use std::path::PathBuf;
use uuid::Uuid;

pub async fn run_add_photos(
    shell: &Shell,
    client_id: Uuid,
    before: PathBuf,
    after: PathBuf,
    date: &str,
    notes: Option<String>,
) -> Result<()> {
    let treatment_date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| anyhow!("invalid date {:?}; use YYYY-MM-DD", date))?;

    let mut screen = TreatmentGalleryScreen::new(client_id);
    screen.state = ScreenState::Ready(Vec::new());
    screen.form.before_file = Some(before);
    screen.form.after_file = Some(after);
    screen.form.treatment_date = Some(treatment_date);
    screen.form.notes = notes.unwrap_or_default();

    let gateway = shell.gateway.clone();
    let ctx = shell.ctx.clone();
    let media_cfg = shell.config.media.clone();
    let (screen, nav) = tokio::task::spawn_blocking(move || {
        let uploader = CloudinaryUploader::new(&media_cfg);
        let nav = screen.submit(&gateway, &ctx, &uploader);
        (screen, nav)
    })
    .await?;

    if let Some(line) = describe_navigation(nav) {
        println!("{}", line);
        return Ok(());
    }
    match screen.form.error {
        None => {
            println!("Photos uploaded.");
            Ok(())
        }
        Some(message) => Err(anyhow!(message)),
    }
}
