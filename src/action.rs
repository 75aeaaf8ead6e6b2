// Messages between the UI loop and the controller.
use crate::model::{Guest, Party, PartyFields, PartyId, Rsvp};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Navigation (Fetch specific)
    SelectParty(PartyId),

    // CRUD
    CreateParty(PartyFields),
    UpdateParty {
        id: PartyId,
        fields: PartyFields,
    },
    DeleteParty(PartyId),

    // Lifecycle
    Refresh { selected: Option<PartyId> },
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    PartiesLoaded(Vec<Party>),
    PartySelected(Party),
    /// Re-fetched after an update; only replaces a selection with the same id.
    PartyRefreshed(Party),
    SelectionCleared,
    RsvpsLoaded(Vec<Rsvp>),
    GuestsLoaded(Vec<Guest>),
    /// The startup fetches have all finished, successfully or not.
    Ready,
}
