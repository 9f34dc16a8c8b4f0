//! Client create/edit form.

use super::{messages, Navigation};
use crate::gateway::{Filter, Gateway, Query};
use crate::records::{Client, ClientPatch, NewClient};
use crate::session::SessionContext;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientFormMode {
    Create,
    Edit(Uuid),
}

pub struct ClientFormScreen {
    pub mode: ClientFormMode,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub notes: String,
    /// True while a mutation is in flight; the submit control is disabled.
    pub submitting: bool,
    pub error: Option<&'static str>,
}

impl ClientFormScreen {
    pub fn create() -> Self {
        Self {
            mode: ClientFormMode::Create,
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            notes: String::new(),
            submitting: false,
            error: None,
        }
    }

    /// Edit form pre-populated from the fetched record.
    pub fn edit(client: &Client) -> Self {
        Self {
            mode: ClientFormMode::Edit(client.id),
            name: client.name.clone(),
            email: client.email.clone(),
            phone: client.phone.clone().unwrap_or_default(),
            notes: client.notes.clone().unwrap_or_default(),
            submitting: false,
            error: None,
        }
    }

    fn optional(value: &str) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Submit the form. On success navigates to the client's detail screen;
    /// on failure the control is re-enabled and input is left intact.
    pub fn submit(&mut self, gateway: &Gateway, ctx: &SessionContext) -> Navigation {
        if self.submitting {
            return Navigation::Stay;
        }
        if ctx.revoked() {
            return Navigation::Login;
        }
        if self.name.trim().is_empty() || self.email.trim().is_empty() {
            self.error = Some(messages::REQUIRED_FIELDS);
            return Navigation::Stay;
        }

        self.submitting = true;
        self.error = None;

        let result = match self.mode {
            ClientFormMode::Create => {
                let payload = NewClient {
                    name: self.name.trim().to_string(),
                    email: self.email.trim().to_string(),
                    phone: Self::optional(&self.phone),
                    notes: Self::optional(&self.notes),
                };
                gateway
                    .insert::<Client, _>("clients", &payload)
                    .map(|created| created.id)
            }
            ClientFormMode::Edit(id) => {
                let payload = ClientPatch {
                    name: self.name.trim().to_string(),
                    email: self.email.trim().to_string(),
                    phone: Self::optional(&self.phone),
                    notes: Self::optional(&self.notes),
                };
                gateway
                    .update("clients", &Query::new().filter(Filter::eq("id", id)), &payload)
                    .map(|_| id)
            }
        };

        match result {
            Ok(id) => Navigation::ClientDetail(id),
            Err(e) => {
                tracing::error!("saving client failed: {}", e);
                self.submitting = false;
                self.error = Some(messages::SAVE_FAILED);
                Navigation::Stay
            }
        }
    }
}
