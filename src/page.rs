//! View builders: pure functions from [`AppState`] to a [`Page`] tree.
//!
//! Nothing in here touches the terminal. Every interactive element carries the
//! [`Command`] it runs, so key handling resolves handlers from the tree that was
//! last rendered rather than from ad-hoc state.

use crate::model::PartyId;
use crate::state::{AppState, Command, Focus, FormField, InputMode, PartyForm};
use crate::store::PartyStore;

pub const TITLE: &str = "Party Planner";
pub const PROMPT: &str = "Please select a party to learn more.";

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub title: &'static str,
    pub loading: bool,
    pub party_list: PartyList,
    pub details: Details,
    pub new_party: NewPartyForm,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartyList {
    pub heading: &'static str,
    pub focused: bool,
    pub rows: Vec<PartyRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartyRow {
    pub id: PartyId,
    pub label: String,
    pub selected: bool,
    /// Under the list cursor.
    pub highlighted: bool,
    pub on_select: Command,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Details {
    pub heading: &'static str,
    pub focused: bool,
    pub body: DetailsBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailsBody {
    Prompt(&'static str),
    Party(Box<PartyPanel>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartyPanel {
    pub title: String,
    /// Machine-readable date, as stored.
    pub datetime: String,
    pub date: String,
    pub location: String,
    pub description: String,
    pub guests: GuestList,
    pub edit_form: FormView,
    pub edit_button: Button,
    pub delete_button: Button,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GuestList {
    pub names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPartyForm {
    pub heading: &'static str,
    pub focused: bool,
    pub form: FormView,
    pub submit: Button,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormView {
    pub hidden: bool,
    pub inputs: Vec<InputView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Date,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputView {
    pub field: FormField,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub kind: InputKind,
    pub value: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub label: &'static str,
    pub on_click: Command,
}

/// Rebuilds the whole tree from scratch.
pub fn render(state: &AppState) -> Page {
    Page {
        title: TITLE,
        loading: state.loading,
        party_list: party_list(state),
        details: selected_party(state),
        new_party: new_party_form(state),
    }
}

pub fn party_list(state: &AppState) -> PartyList {
    let rows = state
        .store
        .parties
        .iter()
        .enumerate()
        .map(|(idx, party)| PartyRow {
            id: party.id,
            label: party.name.clone(),
            selected: state.store.is_selected(party.id),
            highlighted: idx == state.cursor,
            on_select: Command::SelectParty(party.id),
        })
        .collect();

    PartyList {
        heading: "Upcoming Parties",
        focused: state.focus == Focus::Parties,
        rows,
    }
}

pub fn selected_party(state: &AppState) -> Details {
    let body = match &state.store.selected {
        None => DetailsBody::Prompt(PROMPT),
        Some(party) => DetailsBody::Party(Box::new(PartyPanel {
            title: format!("{} #{}", party.name, party.id),
            datetime: party.date.clone(),
            date: party.display_date().to_string(),
            location: party.location.clone(),
            description: party.description.clone(),
            guests: guest_list(&state.store, party.id),
            edit_form: form_view(
                &state.edit_form,
                state.mode == InputMode::EditingParty,
                !state.edit_open,
            ),
            edit_button: Button {
                label: if state.edit_open { "Save" } else { "Edit" },
                on_click: Command::ToggleEdit,
            },
            delete_button: Button {
                label: "Delete",
                on_click: Command::DeleteParty(party.id),
            },
        })),
    };

    Details {
        heading: "Party Details",
        focused: state.focus == Focus::Details,
        body,
    }
}

pub fn new_party_form(state: &AppState) -> NewPartyForm {
    NewPartyForm {
        heading: "Add A New Party",
        focused: state.focus == Focus::NewParty,
        form: form_view(
            &state.new_form,
            state.mode == InputMode::CreatingParty,
            false,
        ),
        submit: Button {
            label: "Add New Party",
            on_click: Command::SubmitNewParty,
        },
    }
}

pub fn guest_list(store: &PartyStore, party_id: PartyId) -> GuestList {
    GuestList {
        names: store
            .guests_at(party_id)
            .into_iter()
            .map(|g| g.name.clone())
            .collect(),
    }
}

fn form_view(form: &PartyForm, editing: bool, hidden: bool) -> FormView {
    let inputs = FormField::ALL
        .iter()
        .map(|&field| InputView {
            field,
            label: field.label(),
            placeholder: field.placeholder(),
            kind: if field == FormField::Date {
                InputKind::Date
            } else {
                InputKind::Text
            },
            value: form.value(field).to_string(),
            active: editing && form.active == field,
        })
        .collect();
    FormView { hidden, inputs }
}

impl Page {
    /// The handler bound to the row under the cursor.
    pub fn highlighted_row(&self) -> Option<Command> {
        self.party_list
            .rows
            .iter()
            .find(|row| row.highlighted)
            .map(|row| row.on_select)
    }

    pub fn panel(&self) -> Option<&PartyPanel> {
        match &self.details.body {
            DetailsBody::Party(panel) => Some(&**panel),
            DetailsBody::Prompt(_) => None,
        }
    }
}
