//! Login screen. The only screen reachable without an identity.

use super::messages;
use crate::session::{AuthClient, Session};

pub struct LoginScreen {
    pub email: String,
    pub password: String,
    pub submitting: bool,
    pub error: Option<&'static str>,
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginScreen {
    pub fn new() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            submitting: false,
            error: None,
        }
    }

    /// Attempt sign-in. Returns the session on success; on failure the form
    /// keeps its input and shows one static message, whatever the cause.
    pub fn submit(&mut self, auth: &AuthClient<'_>) -> Option<Session> {
        if self.submitting {
            return None;
        }
        if self.email.trim().is_empty() || self.password.is_empty() {
            self.error = Some(messages::LOGIN_FAILED);
            return None;
        }

        self.submitting = true;
        self.error = None;

        match auth.sign_in(self.email.trim(), &self.password) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!("sign-in failed: {}", e);
                self.submitting = false;
                self.error = Some(messages::LOGIN_FAILED);
                None
            }
        }
    }
}
