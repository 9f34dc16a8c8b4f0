//! `dermaflow logout` – revoke the token and clear the cached session.

use anyhow::Result;
use dermaflow_core::config::DermaConfig;
use dermaflow_core::gateway::Gateway;
use dermaflow_core::session::{self, AuthClient};

pub async fn run_logout(cfg: &DermaConfig) -> Result<()> {
    let Some(cached) = session::load_session() else {
        println!("Already signed out.");
        return Ok(());
    };

    // Server-side revocation is best effort; the local session goes either way.
    let gateway = Gateway::new(&cfg.store)?;
    let result = tokio::task::spawn_blocking(move || {
        AuthClient::new(&gateway).sign_out(&cached.access_token)
    })
    .await?;
    if let Err(e) = result {
        tracing::warn!("server-side sign-out failed: {}", e);
    }

    session::clear_session()?;
    println!("Signed out.");
    Ok(())
}
