//! `dermaflow login <email>` – sign in and cache the session.

use anyhow::{anyhow, Result};
use dermaflow_core::config::DermaConfig;
use dermaflow_core::gateway::Gateway;
use dermaflow_core::screens::{messages, LoginScreen};
use dermaflow_core::session::{self, AuthClient};
use std::io::{BufRead, Write};

pub async fn run_login(cfg: &DermaConfig, email: String, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => prompt_password()?,
    };

    let gateway = Gateway::new(&cfg.store)?;
    let outcome = tokio::task::spawn_blocking(move || {
        let auth = AuthClient::new(&gateway);
        let mut screen = LoginScreen::new();
        screen.email = email;
        screen.password = password;
        let session = screen.submit(&auth);
        (session, screen.error)
    })
    .await?;

    match outcome {
        (Some(session), _) => {
            session::save_session(&session)?;
            let who = session.identity.email.as_deref().unwrap_or("user");
            println!("Signed in as {}.", who);
            Ok(())
        }
        (None, error) => Err(anyhow!(error.unwrap_or(messages::LOGIN_FAILED))),
    }
}

fn prompt_password() -> Result<String> {
    print!("Password: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
