use crate::action::AppEvent;
use crate::model::{Guest, Party, PartyId, Rsvp};

/// The data half of the application state: what the server last told us.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartyStore {
    pub parties: Vec<Party>,
    /// Fetched by id on its own, so it may be missing from `parties`.
    pub selected: Option<Party>,
    pub rsvps: Vec<Rsvp>,
    pub guests: Vec<Guest>,
}

impl PartyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_id(&self) -> Option<PartyId> {
        self.selected.as_ref().map(|p| p.id)
    }

    pub fn is_selected(&self, id: PartyId) -> bool {
        self.selected_id() == Some(id)
    }

    /// Guests holding an rsvp for `party_id`, in guest-list order.
    pub fn guests_at(&self, party_id: PartyId) -> Vec<&Guest> {
        self.guests
            .iter()
            .filter(|guest| {
                self.rsvps
                    .iter()
                    .any(|rsvp| rsvp.guest_id == guest.id && rsvp.event_id == party_id)
            })
            .collect()
    }

    /// Applies a server result. Returns true when the selection changed identity.
    pub fn apply(&mut self, event: AppEvent) -> bool {
        let before = self.selected_id();
        match event {
            AppEvent::PartiesLoaded(parties) => self.parties = parties,
            AppEvent::PartySelected(party) => self.selected = Some(party),
            AppEvent::PartyRefreshed(party) => {
                if before == Some(party.id) {
                    self.selected = Some(party);
                }
            }
            AppEvent::SelectionCleared => self.selected = None,
            AppEvent::RsvpsLoaded(rsvps) => self.rsvps = rsvps,
            AppEvent::GuestsLoaded(guests) => self.guests = guests,
            AppEvent::Ready => {}
        }
        before != self.selected_id()
    }
}
