//! Session note form: upsert with an optional consent document upload.
//!
//! At most one note exists per appointment. The `existing` input selects
//! update vs insert; after a successful insert the form holds the stored row
//! so a second save updates instead of duplicating.

use super::{messages, Navigation};
use crate::gateway::{Filter, Gateway, Query};
use crate::media::MediaUpload;
use crate::records::{NewSessionNote, SessionNote, SessionNotePatch};
use crate::session::SessionContext;
use std::path::PathBuf;
use uuid::Uuid;

pub struct SessionNoteForm {
    pub client_id: Uuid,
    pub appointment_id: Uuid,
    pub existing: Option<SessionNote>,
    pub notes: String,
    pub consent_file: Option<PathBuf>,
    pub saving: bool,
    pub saved: bool,
    pub error: Option<&'static str>,
}

impl SessionNoteForm {
    /// Pre-populates the notes text from an existing record.
    pub fn new(client_id: Uuid, appointment_id: Uuid, existing: Option<SessionNote>) -> Self {
        let notes = existing
            .as_ref()
            .map(|n| n.notes.clone())
            .unwrap_or_default();
        Self {
            client_id,
            appointment_id,
            existing,
            notes,
            consent_file: None,
            saving: false,
            saved: false,
            error: None,
        }
    }

    /// What the file prompt shows: a newly chosen file's name, or a marker
    /// that a consent form was uploaded previously, or an empty prompt.
    pub fn consent_label(&self) -> String {
        if let Some(file) = &self.consent_file {
            return file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.display().to_string());
        }
        if self
            .existing
            .as_ref()
            .is_some_and(|n| n.consent_form_url.is_some())
        {
            return "Consent form already uploaded".to_string();
        }
        "No file selected".to_string()
    }

    /// Save the note: upload the consent document first (if newly attached),
    /// then update or insert. An upload failure aborts the save with input
    /// intact.
    pub fn save(
        &mut self,
        gateway: &Gateway,
        ctx: &SessionContext,
        uploader: &dyn MediaUpload,
    ) -> Navigation {
        if self.saving {
            return Navigation::Stay;
        }
        if ctx.revoked() {
            return Navigation::Login;
        }

        self.saving = true;
        self.saved = false;
        self.error = None;

        let mut consent_form_url = self
            .existing
            .as_ref()
            .and_then(|n| n.consent_form_url.clone());
        if let Some(file) = &self.consent_file {
            match uploader.upload(file) {
                Ok(url) => consent_form_url = Some(url),
                Err(e) => {
                    tracing::error!("consent upload failed: {}", e);
                    self.saving = false;
                    self.error = Some(messages::NOTES_SAVE_FAILED);
                    return Navigation::Stay;
                }
            }
        }

        let result = match &self.existing {
            Some(note) => {
                let payload = SessionNotePatch {
                    notes: self.notes.clone(),
                    consent_form_url: consent_form_url.clone(),
                };
                gateway
                    .update(
                        "session_notes",
                        &Query::new().filter(Filter::eq("id", note.id)),
                        &payload,
                    )
                    .map(|_| {
                        let mut updated = note.clone();
                        updated.notes = self.notes.clone();
                        updated.consent_form_url = consent_form_url.clone();
                        updated
                    })
            }
            None => {
                let payload = NewSessionNote {
                    client_id: self.client_id,
                    appointment_id: self.appointment_id,
                    notes: self.notes.clone(),
                    consent_form_url: consent_form_url.clone(),
                };
                gateway.insert::<SessionNote, _>("session_notes", &payload)
            }
        };

        match result {
            Ok(stored) => {
                self.existing = Some(stored);
                self.consent_file = None;
                self.saving = false;
                self.saved = true;
                Navigation::Stay
            }
            Err(e) => {
                tracing::error!("saving session note failed: {}", e);
                self.saving = false;
                self.error = Some(messages::NOTES_SAVE_FAILED);
                Navigation::Stay
            }
        }
    }
}
