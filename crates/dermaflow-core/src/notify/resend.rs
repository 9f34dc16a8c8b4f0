//! Resend mail-send backing for the `Notifier` trait.

use super::{Notifier, NotifyError};
use crate::config::EmailConfig;
use crate::http::{self, Method};

const DEFAULT_BASE: &str = "https://api.resend.com";

#[derive(Debug, Clone)]
pub struct ResendNotifier {
    endpoint: String,
    api_key: String,
    from_address: String,
}

impl ResendNotifier {
    pub fn new(cfg: &EmailConfig) -> Self {
        let base = cfg.base_url.as_deref().unwrap_or(DEFAULT_BASE);
        Self {
            endpoint: format!("{}/emails", base.trim_end_matches('/')),
            api_key: cfg.api_key.clone(),
            from_address: cfg.from_address.clone(),
        }
    }
}

impl Notifier for ResendNotifier {
    fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), NotifyError> {
        let body = serde_json::json!({
            "from": self.from_address,
            "to": [to],
            "subject": subject,
            "html": html,
        });
        let headers = [
            ("Authorization", format!("Bearer {}", self.api_key)),
            ("Content-Type", "application/json".to_string()),
        ];
        let response = http::request(
            Method::Post,
            &self.endpoint,
            &headers,
            Some(body.to_string().as_bytes()),
        )?;
        if !response.is_success() {
            return Err(NotifyError::Status {
                provider: "resend",
                status: response.status,
            });
        }
        Ok(())
    }
}
