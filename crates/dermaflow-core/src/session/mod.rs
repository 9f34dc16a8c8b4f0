//! Session / identity guard.
//!
//! Screens never touch the gateway without an identity: the CLI resolves the
//! persisted session, verifies it against the auth endpoint, and hands each
//! screen a `SessionContext`. A signed-out transition while a screen is live
//! is observed through the context and suppresses in-flight fetch results.

mod store;
mod watch;

pub use store::{
    clear_session, clear_session_at, load_session, load_session_from, save_session,
    save_session_to, session_path,
};
pub use watch::{SessionState, SessionWatch};

use crate::gateway::{classify_failure, Gateway, StoreError};
use crate::http::{self, Method};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated user, as the auth endpoint reports it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Identity {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// A signed-in session: access token plus the identity it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub identity: Identity,
}

#[derive(Debug, Deserialize)]
struct SignInResponse {
    access_token: String,
    user: Identity,
}

/// Auth calls against the hosted store, sharing the gateway's base and key.
pub struct AuthClient<'a> {
    gateway: &'a Gateway,
}

impl<'a> AuthClient<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    fn headers(&self, bearer: &str) -> Vec<(&'static str, String)> {
        vec![
            ("apikey", self.gateway.api_key().to_string()),
            ("Authorization", format!("Bearer {}", bearer)),
            ("Content-Type", "application/json".to_string()),
        ]
    }

    /// Password sign-in. Any failure is returned as a store error; the login
    /// screen folds it into a single static message.
    pub fn sign_in(&self, email: &str, password: &str) -> Result<Session, StoreError> {
        let url = self
            .gateway
            .endpoint("auth/v1/token?grant_type=password")?;
        let body = serde_json::to_vec(&serde_json::json!({
            "email": email,
            "password": password,
        }))?;
        let headers = self.headers(self.gateway.api_key());
        let response = http::request(Method::Post, url.as_str(), &headers, Some(&body))?;
        if !response.is_success() {
            return Err(classify_failure(response.status, &response.body));
        }
        let parsed: SignInResponse = response.json()?;
        Ok(Session {
            access_token: parsed.access_token,
            identity: parsed.user,
        })
    }

    /// Identity behind a token. An invalid or expired token is `None`, not an
    /// error, so the guard can redirect to login instead of surfacing a failure.
    pub fn current_identity(&self, access_token: &str) -> Result<Option<Identity>, StoreError> {
        let url = self.gateway.endpoint("auth/v1/user")?;
        let response =
            http::request(Method::Get, url.as_str(), &self.headers(access_token), None)?;
        if response.status == 401 || response.status == 403 {
            return Ok(None);
        }
        if !response.is_success() {
            return Err(classify_failure(response.status, &response.body));
        }
        Ok(Some(response.json()?))
    }

    /// Revoke the token server-side.
    pub fn sign_out(&self, access_token: &str) -> Result<(), StoreError> {
        let url = self.gateway.endpoint("auth/v1/logout")?;
        let response = http::request(
            Method::Post,
            url.as_str(),
            &self.headers(access_token),
            Some(b"{}"),
        )?;
        if !response.is_success() {
            return Err(classify_failure(response.status, &response.body));
        }
        Ok(())
    }
}

/// Identity handed to a screen at construction, plus the live sign-in state.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub identity: Identity,
    events: tokio::sync::watch::Receiver<SessionState>,
}

impl SessionContext {
    pub fn new(identity: Identity, events: tokio::sync::watch::Receiver<SessionState>) -> Self {
        Self { identity, events }
    }

    /// True once a signed-out transition has been broadcast. Screens check
    /// this before applying any fetch result.
    pub fn revoked(&self) -> bool {
        matches!(&*self.events.borrow(), SessionState::SignedOut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity {
            id: Uuid::new_v4(),
            email: Some("nurse@example.com".to_string()),
        }
    }

    #[test]
    fn context_tracks_sign_out() {
        let watch = SessionWatch::new(SessionState::SignedIn(identity()));
        let ctx = SessionContext::new(identity(), watch.subscribe());
        assert!(!ctx.revoked());
        watch.signed_out();
        assert!(ctx.revoked());
    }

    #[test]
    fn identity_payload_without_email() {
        let id: Identity =
            serde_json::from_str(r#"{"id":"5f7f2d3e-1df1-4f6a-b960-6d5b6f3a2c10"}"#).unwrap();
        assert!(id.email.is_none());
    }
}
