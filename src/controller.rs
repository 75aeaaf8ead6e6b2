// File: src/controller.rs
// Network side of the app: owns the client, turns Actions into requests and
// reports what the server returned as AppEvents.
use crate::action::{Action, AppEvent};
use crate::client::PartyClient;
use crate::error::ApiError;
use crate::model::{Party, PartyId};
use log::{error, info, warn};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

pub struct Controller {
    client: PartyClient,
    events: UnboundedSender<AppEvent>,
}

impl Controller {
    pub fn new(client: PartyClient, events: UnboundedSender<AppEvent>) -> Self {
        Self { client, events }
    }

    /// Initial load, then one action at a time until `Quit` or the sender goes away.
    pub async fn run(self, mut actions: UnboundedReceiver<Action>) {
        self.load_all().await;
        self.emit(AppEvent::Ready);

        while let Some(action) = actions.recv().await {
            if action == Action::Quit {
                break;
            }
            self.handle(action).await;
        }
    }

    /// Fetches parties, rsvps and guests concurrently. A failure only leaves
    /// its own slot untouched.
    pub async fn load_all(&self) {
        let (parties, rsvps, guests) = futures::join!(
            self.client.list_parties(),
            self.client.list_rsvps(),
            self.client.list_guests()
        );

        match parties {
            Ok(p) => self.emit(AppEvent::PartiesLoaded(p)),
            Err(e) => error!("Failed to load parties: {}", e),
        }
        match rsvps {
            Ok(r) => self.emit(AppEvent::RsvpsLoaded(r)),
            Err(e) => error!("Failed to load rsvps: {}", e),
        }
        match guests {
            Ok(g) => self.emit(AppEvent::GuestsLoaded(g)),
            Err(e) => error!("Failed to load guests: {}", e),
        }
    }

    pub async fn handle(&self, action: Action) {
        match action {
            Action::SelectParty(id) => self.fetch_party(id, AppEvent::PartySelected).await,

            Action::CreateParty(fields) => {
                let outcome = self.client.create_party(&fields).await;
                if !settled(outcome, &format!("create party {:?}", fields.name)) {
                    return;
                }
                // The create response is ignored; the new entry shows up on re-list.
                self.reload_parties().await;
            }

            Action::UpdateParty { id, fields } => {
                let outcome = self.client.update_party(id, &fields).await;
                if !settled(outcome, &format!("update party {}", id)) {
                    return;
                }
                self.reload_parties().await;
                // Dropped by the store unless party `id` is still the selection.
                self.fetch_party(id, AppEvent::PartyRefreshed).await;
            }

            Action::DeleteParty(id) => {
                let outcome = self.client.delete_party(id).await;
                if !settled(outcome, &format!("delete party {}", id)) {
                    return;
                }
                self.emit(AppEvent::SelectionCleared);
                self.reload_parties().await;
            }

            Action::Refresh { selected } => {
                self.load_all().await;
                if let Some(id) = selected {
                    self.fetch_party(id, AppEvent::PartyRefreshed).await;
                }
            }

            Action::Quit => {}
        }
    }

    async fn reload_parties(&self) {
        match self.client.list_parties().await {
            Ok(parties) => self.emit(AppEvent::PartiesLoaded(parties)),
            Err(e) => error!("Failed to load parties: {}", e),
        }
    }

    async fn fetch_party(&self, id: PartyId, wrap: fn(Party) -> AppEvent) {
        match self.client.get_party(id).await {
            Ok(party) => self.emit(wrap(party)),
            Err(e) => error!("Failed to load party {}: {}", id, e),
        }
    }

    fn emit(&self, event: AppEvent) {
        // The UI may already be gone during shutdown.
        let _ = self.events.send(event);
    }
}

/// Whether a mutation reached the server. A non-2xx answer still did, so its
/// follow-up re-fetches run; only transport, timeout and encoding failures
/// skip them.
fn settled(outcome: Result<(), ApiError>, what: &str) -> bool {
    match outcome {
        Ok(()) => {
            info!("Done: {}", what);
            true
        }
        Err(ApiError::Status(status)) => {
            warn!("Server answered {} to {}", status, what);
            true
        }
        Err(e) => {
            error!("Failed to {}: {}", what, e);
            false
        }
    }
}
