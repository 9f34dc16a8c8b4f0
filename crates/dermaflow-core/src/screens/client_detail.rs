//! Client detail screen: the client record plus appointment history.

use super::{apply_fetch, FetchGuard, Navigation, ScreenState};
use crate::gateway::{Filter, Gateway, Query, StoreError};
use crate::records::{AppointmentSummary, Client};
use crate::session::SessionContext;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientOverview {
    pub client: Client,
    /// Newest first.
    pub appointments: Vec<AppointmentSummary>,
}

pub struct ClientDetailScreen {
    pub client_id: Uuid,
    pub state: ScreenState<ClientOverview>,
    guard: FetchGuard,
}

impl ClientDetailScreen {
    pub fn new(client_id: Uuid) -> Self {
        Self {
            client_id,
            state: ScreenState::Loading,
            guard: FetchGuard::default(),
        }
    }

    pub fn begin_load(&mut self) -> u64 {
        self.state = ScreenState::Loading;
        self.guard.begin()
    }

    pub fn fetch(gateway: &Gateway, client_id: Uuid) -> Result<ClientOverview, StoreError> {
        let client: Client =
            gateway.select_one("clients", &Query::new().filter(Filter::eq("id", client_id)))?;
        let appointments: Vec<AppointmentSummary> = gateway.select(
            "appointments",
            &Query::new()
                .columns("id,date_time,treatment,status")
                .filter(Filter::eq("client_id", client_id))
                .order_desc("date_time"),
        )?;
        Ok(ClientOverview {
            client,
            appointments,
        })
    }

    pub fn finish_load(
        &mut self,
        token: u64,
        ctx: &SessionContext,
        outcome: Result<ClientOverview, StoreError>,
    ) -> Navigation {
        // A missing id sends the user back to the list screen.
        apply_fetch(
            &mut self.state,
            &self.guard,
            token,
            ctx,
            outcome,
            Navigation::ClientList,
        )
    }

    pub fn load(&mut self, gateway: &Gateway, ctx: &SessionContext) -> Navigation {
        let token = self.begin_load();
        let outcome = Self::fetch(gateway, self.client_id);
        self.finish_load(token, ctx, outcome)
    }
}
