//! Appointment booking form. New bookings are always `pending`; the reminder
//! email is best-effort and never fails the booking.

use super::{messages, Navigation};
use crate::gateway::Gateway;
use crate::notify::{reminder_email, Notifier};
use crate::records::{Appointment, NewAppointment};
use crate::session::SessionContext;
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub const DEFAULT_DURATION_MINUTES: u32 = 60;

pub struct AppointmentFormScreen {
    pub client_id: Uuid,
    pub client_name: String,
    pub client_email: String,
    pub date_time: Option<DateTime<Utc>>,
    pub treatment: String,
    pub duration: u32,
    pub notes: String,
    pub submitting: bool,
    pub error: Option<&'static str>,
}

impl AppointmentFormScreen {
    pub fn new(client_id: Uuid, client_name: String, client_email: String) -> Self {
        Self {
            client_id,
            client_name,
            client_email,
            date_time: None,
            treatment: String::new(),
            duration: DEFAULT_DURATION_MINUTES,
            notes: String::new(),
            submitting: false,
            error: None,
        }
    }

    /// Book the appointment. `notifier` is optional: reminders are disabled
    /// when no email provider is configured.
    pub fn submit(
        &mut self,
        gateway: &Gateway,
        ctx: &SessionContext,
        notifier: Option<&dyn Notifier>,
    ) -> Navigation {
        if self.submitting {
            return Navigation::Stay;
        }
        if ctx.revoked() {
            return Navigation::Login;
        }
        let Some(date_time) = self.date_time else {
            self.error = Some(messages::APPOINTMENT_INCOMPLETE);
            return Navigation::Stay;
        };
        if self.treatment.trim().is_empty() {
            self.error = Some(messages::APPOINTMENT_INCOMPLETE);
            return Navigation::Stay;
        }

        self.submitting = true;
        self.error = None;

        let payload = NewAppointment::new(
            self.client_id,
            date_time,
            self.treatment.trim().to_string(),
            self.duration,
            if self.notes.trim().is_empty() {
                None
            } else {
                Some(self.notes.trim().to_string())
            },
        );

        let created: Appointment = match gateway.insert("appointments", &payload) {
            Ok(row) => row,
            Err(e) => {
                tracing::error!("booking appointment failed: {}", e);
                self.submitting = false;
                self.error = Some(messages::BOOK_FAILED);
                return Navigation::Stay;
            }
        };

        // Reminder outcome never affects the booking.
        if let Some(notifier) = notifier {
            if !self.client_email.is_empty() {
                let (subject, html) = reminder_email(&created.treatment, created.date_time);
                if let Err(e) = notifier.send(&self.client_email, &subject, &html) {
                    tracing::warn!("reminder email failed, appointment kept: {}", e);
                }
            }
        }

        Navigation::AppointmentDetail(created.id)
    }
}
