//! SendGrid mail-send backing for the `Notifier` trait.

use super::{Notifier, NotifyError};
use crate::config::EmailConfig;
use crate::http::{self, Method};

const DEFAULT_BASE: &str = "https://api.sendgrid.com";

#[derive(Debug, Clone)]
pub struct SendgridNotifier {
    endpoint: String,
    api_key: String,
    from_address: String,
}

impl SendgridNotifier {
    pub fn new(cfg: &EmailConfig) -> Self {
        let base = cfg.base_url.as_deref().unwrap_or(DEFAULT_BASE);
        Self {
            endpoint: format!("{}/v3/mail/send", base.trim_end_matches('/')),
            api_key: cfg.api_key.clone(),
            from_address: cfg.from_address.clone(),
        }
    }
}

impl Notifier for SendgridNotifier {
    fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), NotifyError> {
        let body = serde_json::json!({
            "personalizations": [{ "to": [{ "email": to }] }],
            "from": { "email": self.from_address },
            "subject": subject,
            "content": [{ "type": "text/html", "value": html }],
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
                provider: "sendgrid",
                status: response.status,
            });
        }
        Ok(())
    }
}
