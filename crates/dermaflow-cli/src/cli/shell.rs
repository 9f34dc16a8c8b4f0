//! Session guard for data screens: resolve the cached session, verify it
//! against the auth endpoint, and build the context screens receive.

use anyhow::Result;
use dermaflow_core::config::DermaConfig;
use dermaflow_core::gateway::Gateway;
use dermaflow_core::session::{self, AuthClient, SessionContext, SessionState, SessionWatch};

pub struct Shell {
    pub config: DermaConfig,
    pub gateway: Gateway,
    /// Held so later sign-out can broadcast to live screens.
    pub watch: SessionWatch,
    pub ctx: SessionContext,
}

/// Open the signed-in shell, or print the login hint and return None.
/// No data call is issued before the identity check passes.
pub async fn open(config: DermaConfig) -> Result<Option<Shell>> {
    let Some(session) = session::load_session() else {
        println!("You are signed out. Run `dermaflow login <email>` first.");
        return Ok(None);
    };

    let mut gateway = Gateway::new(&config.store)?;
    let probe = gateway.clone();
    let token = session.access_token.clone();
    let identity =
        tokio::task::spawn_blocking(move || AuthClient::new(&probe).current_identity(&token))
            .await??;

    let Some(identity) = identity else {
        tracing::info!("cached session no longer valid, clearing");
        session::clear_session()?;
        println!("Your session has expired. Run `dermaflow login <email>` again.");
        return Ok(None);
    };

    gateway.set_bearer(Some(session.access_token));
    let watch = SessionWatch::new(SessionState::SignedIn(identity.clone()));
    let ctx = SessionContext::new(identity, watch.subscribe());

    Ok(Some(Shell {
        config,
        gateway,
        watch,
        ctx,
    }))
}
