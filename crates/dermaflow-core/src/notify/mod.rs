//! Notification adapter: transactional email behind one trait with two
//! provider backings, selected by configuration.
//!
//! Callers treat failure as non-fatal: the operation the email accompanies
//! (e.g. booking an appointment) must succeed independently of the send.

mod resend;
mod sendgrid;

pub use resend::ResendNotifier;
pub use sendgrid::SendgridNotifier;

use crate::config::{EmailConfig, EmailProvider};
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("transport: {0}")]
    Transport(#[from] curl::Error),
    #[error("{provider} returned HTTP {status}")]
    Status { provider: &'static str, status: u32 },
}

/// Transactional email send. Both providers honor the same contract.
pub trait Notifier {
    fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), NotifyError>;
}

/// Build the configured provider.
pub fn notifier_from_config(cfg: &EmailConfig) -> Box<dyn Notifier> {
    match cfg.provider {
        EmailProvider::Sendgrid => Box::new(SendgridNotifier::new(cfg)),
        EmailProvider::Resend => Box::new(ResendNotifier::new(cfg)),
    }
}

/// Subject and HTML body for an appointment reminder.
pub fn reminder_email(treatment: &str, date_time: DateTime<Utc>) -> (String, String) {
    let when = date_time.format("%B %-d, %Y at %H:%M");
    let subject = "Appointment Reminder".to_string();
    let html = format!(
        "<p>Your appointment for <strong>{}</strong> is on <strong>{}</strong>.</p>",
        treatment, when
    );
    (subject, html)
}
