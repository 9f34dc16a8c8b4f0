//! Typed records for the hosted store's tables.
//!
//! These mirror the `clients`, `appointments`, `session_notes`, and
//! `treatment_photos` tables. Insert/patch payloads are separate types so
//! server-owned fields (ids, timestamps) never appear in request bodies.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A clinic client. Never hard-deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Insert payload for `clients`.
#[derive(Debug, Clone, Serialize)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Update payload for `clients` (edit form writes the full editable set).
#[derive(Debug, Clone, Serialize)]
pub struct ClientPatch {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

/// Appointment lifecycle state, stored as a lowercase string.
/// Exactly one of the three at any time; transitions are not implemented here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(AppointmentStatus::Pending),
            "completed" => Some(AppointmentStatus::Completed),
            "cancelled" => Some(AppointmentStatus::Cancelled),
            _ => None,
        }
    }
}

/// A booked appointment for a client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: Uuid,
    pub client_id: Uuid,
    pub date_time: DateTime<Utc>,
    /// Free-text treatment label, e.g. "Botox", "Microdermabrasion".
    pub treatment: String,
    /// Duration in minutes.
    pub duration: u32,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
}

/// Column subset fetched for a client's appointment history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppointmentSummary {
    pub id: Uuid,
    pub date_time: DateTime<Utc>,
    pub treatment: String,
    pub status: AppointmentStatus,
}

/// Insert payload for `appointments`. New bookings are always pending.
#[derive(Debug, Clone, Serialize)]
pub struct NewAppointment {
    pub client_id: Uuid,
    pub date_time: DateTime<Utc>,
    pub treatment: String,
    pub duration: u32,
    pub status: AppointmentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewAppointment {
    pub fn new(
        client_id: Uuid,
        date_time: DateTime<Utc>,
        treatment: String,
        duration: u32,
        notes: Option<String>,
    ) -> Self {
        Self {
            client_id,
            date_time,
            treatment,
            duration,
            status: AppointmentStatus::Pending,
            notes,
        }
    }
}

/// Per-appointment treatment notes with an optional consent document.
/// At most one note exists per appointment (upsert semantics at the form).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionNote {
    pub id: Uuid,
    pub client_id: Uuid,
    pub appointment_id: Uuid,
    pub notes: String,
    pub consent_form_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for `session_notes`.
#[derive(Debug, Clone, Serialize)]
pub struct NewSessionNote {
    pub client_id: Uuid,
    pub appointment_id: Uuid,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consent_form_url: Option<String>,
}

/// Update payload for an existing session note.
#[derive(Debug, Clone, Serialize)]
pub struct SessionNotePatch {
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consent_form_url: Option<String>,
}

/// Before/after photo pair for a treatment. Both URLs are always present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreatmentPhoto {
    pub id: Uuid,
    pub client_id: Uuid,
    pub before_url: String,
    pub after_url: String,
    pub treatment_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for `treatment_photos`.
#[derive(Debug, Clone, Serialize)]
pub struct NewTreatmentPhoto {
    pub client_id: Uuid,
    pub before_url: String,
    pub after_url: String,
    pub treatment_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Client columns embedded in dashboard appointment rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientRef {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Upcoming appointment joined with its client, as shown on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpcomingAppointment {
    pub id: Uuid,
    pub date_time: DateTime<Utc>,
    pub treatment: String,
    pub status: AppointmentStatus,
    pub clients: ClientRef,
}
