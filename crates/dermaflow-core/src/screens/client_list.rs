//! Client list screen: one unfiltered fetch, search applied client-side.

use super::{apply_fetch, FetchGuard, Navigation, ScreenState};
use crate::gateway::{Gateway, Query, StoreError};
use crate::records::Client;
use crate::session::SessionContext;

pub struct ClientListScreen {
    pub state: ScreenState<Vec<Client>>,
    /// Live search term; filtering is pure and re-runs on every render.
    pub search: String,
    guard: FetchGuard,
}

impl Default for ClientListScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientListScreen {
    pub fn new() -> Self {
        Self {
            state: ScreenState::Loading,
            search: String::new(),
            guard: FetchGuard::default(),
        }
    }

    pub fn begin_load(&mut self) -> u64 {
        self.state = ScreenState::Loading;
        self.guard.begin()
    }

    pub fn fetch(gateway: &Gateway) -> Result<Vec<Client>, StoreError> {
        gateway.select("clients", &Query::new().order_asc("name"))
    }

    pub fn finish_load(
        &mut self,
        token: u64,
        ctx: &SessionContext,
        outcome: Result<Vec<Client>, StoreError>,
    ) -> Navigation {
        apply_fetch(&mut self.state, &self.guard, token, ctx, outcome, Navigation::Stay)
    }

    /// Mount: fetch and apply in one step (CLI shell path).
    pub fn load(&mut self, gateway: &Gateway, ctx: &SessionContext) -> Navigation {
        let token = self.begin_load();
        let outcome = Self::fetch(gateway);
        self.finish_load(token, ctx, outcome)
    }

    /// The rows the current search term leaves visible.
    pub fn visible(&self) -> Vec<&Client> {
        match self.state.ready() {
            Some(clients) => filter_clients(clients, &self.search),
            None => Vec::new(),
        }
    }
}

/// Case-insensitive substring match across name, email, and phone.
pub fn filter_clients<'a>(clients: &'a [Client], term: &str) -> Vec<&'a Client> {
    if term.is_empty() {
        return clients.iter().collect();
    }
    let needle = term.to_lowercase();
    clients
        .iter()
        .filter(|c| {
            c.name.to_lowercase().contains(&needle)
                || c.email.to_lowercase().contains(&needle)
                || c.phone
                    .as_deref()
                    .is_some_and(|p| p.to_lowercase().contains(&needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn client(name: &str, email: &str, phone: Option<&str>) -> Client {
        Client {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.map(str::to_string),
            notes: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn roster() -> Vec<Client> {
        vec![
            client("Ada Smith", "ada@example.com", Some("555-0101")),
            client("Grace Jones", "grace@clinic.org", None),
            client("Mary Adams", "mary@example.com", Some("555-0199")),
        ]
    }

    #[test]
    fn empty_term_keeps_everything() {
        let clients = roster();
        assert_eq!(filter_clients(&clients, "").len(), 3);
    }

    #[test]
    fn matches_name_email_and_phone_case_insensitively() {
        let clients = roster();
        let by_name: Vec<_> = filter_clients(&clients, "GRACE")
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(by_name, vec!["Grace Jones"]);

        let by_email = filter_clients(&clients, "clinic.org");
        assert_eq!(by_email.len(), 1);

        let by_phone = filter_clients(&clients, "0199");
        assert_eq!(by_phone[0].name, "Mary Adams");
    }

    #[test]
    fn substring_spans_multiple_fields() {
        let clients = roster();
        // "ada" hits Ada Smith's name and Mary Adams' name/email.
        let hits: Vec<_> = filter_clients(&clients, "ada")
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(hits, vec!["Ada Smith", "Mary Adams"]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let clients = roster();
        let once: Vec<Client> = filter_clients(&clients, "ada").into_iter().cloned().collect();
        let twice: Vec<Client> = filter_clients(&once, "ada").into_iter().cloned().collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn no_match_yields_empty() {
        let clients = roster();
        assert!(filter_clients(&clients, "zz-no-such").is_empty());
    }
}
