//! `dermaflow photos <client-id>` – the treatment gallery, list side.

use super::describe_navigation;
use crate::cli::shell::Shell;
use anyhow::Result;
use dermaflow_core::screens::{ScreenState, TreatmentGalleryScreen};
use uuid::Uuid;

pub async fn run_photos(shell: &Shell, client_id: Uuid) -> Result<()> {
    let mut screen = TreatmentGalleryScreen::new(client_id);
    let token = screen.begin_load();
    let gateway = shell.gateway.clone();
    let outcome =
        tokio::task::spawn_blocking(move || TreatmentGalleryScreen::fetch(&gateway, client_id))
            .await?;
    let nav = screen.finish_load(token, &shell.ctx, outcome);
    if let Some(line) = describe_navigation(nav) {
        println!("{}", line);
        return Ok(());
    }

    match &screen.state {
        ScreenState::Ready(photos) if photos.is_empty() => {
            println!("No treatment photos yet. Add a pair with `dermaflow add-photos {}`.", client_id);
        }
        ScreenState::Ready(photos) => {
            for photo in photos {
                println!("{} ({})", photo.treatment_date, photo.id);
                println!("  before: {}", photo.before_url);
                println!("  after:  {}", photo.after_url);
                if let Some(notes) = &photo.notes {
                    println!("  notes:  {}", notes);
                }
            }
        }
        ScreenState::Failed(message) => println!("{}", message),
        _ => {}
    }
    Ok(())
}
