// File: src/state.rs
use crate::action::{Action, AppEvent};
use crate::error::InvalidDate;
use crate::model::{Party, PartyFields, PartyId};
use crate::store::PartyStore;
use log::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Parties,
    Details,
    NewParty,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Parties => Focus::Details,
            Focus::Details => Focus::NewParty,
            Focus::NewParty => Focus::Parties,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Parties => Focus::NewParty,
            Focus::Details => Focus::Parties,
            Focus::NewParty => Focus::Details,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    EditingParty,
    CreatingParty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Date,
    Description,
    Location,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Date,
        FormField::Description,
        FormField::Location,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Date => "Date",
            FormField::Description => "Description",
            FormField::Location => "Location",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::Date => "YYYY-MM-DD",
            other => other.label(),
        }
    }

    pub fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Date,
            FormField::Date => FormField::Description,
            FormField::Description => FormField::Location,
            FormField::Location => FormField::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Name => FormField::Location,
            FormField::Date => FormField::Name,
            FormField::Description => FormField::Date,
            FormField::Location => FormField::Description,
        }
    }
}

/// Raw input values of a party form, as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartyForm {
    pub name: String,
    pub date: String,
    pub description: String,
    pub location: String,
    pub active: FormField,
}

impl PartyForm {
    pub fn from_party(party: &Party) -> Self {
        Self {
            name: party.name.clone(),
            date: party.date.clone(),
            description: party.description.clone(),
            location: party.location.clone(),
            active: FormField::Name,
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Date => &self.date,
            FormField::Description => &self.description,
            FormField::Location => &self.location,
        }
    }

    fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Date => &mut self.date,
            FormField::Description => &mut self.description,
            FormField::Location => &mut self.location,
        }
    }

    pub fn push(&mut self, c: char) {
        let field = self.active;
        self.value_mut(field).push(c);
    }

    pub fn backspace(&mut self) {
        let field = self.active;
        self.value_mut(field).pop();
    }

    pub fn to_fields(&self) -> Result<PartyFields, InvalidDate> {
        PartyFields::from_inputs(&self.name, &self.date, &self.description, &self.location)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Handlers bound to rendered elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SelectParty(PartyId),
    /// Edit when the form is collapsed, Save when it is open.
    ToggleEdit,
    DeleteParty(PartyId),
    SubmitNewParty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub store: PartyStore,
    pub loading: bool,

    // UI State
    pub focus: Focus,
    pub mode: InputMode,
    pub cursor: usize,

    // Inputs
    pub edit_open: bool,
    pub edit_form: PartyForm,
    pub new_form: PartyForm,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            store: PartyStore::new(),
            loading: true,
            focus: Focus::Parties,
            mode: InputMode::Normal,
            cursor: 0,
            edit_open: false,
            edit_form: PartyForm::default(),
            new_form: PartyForm::default(),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: AppEvent) {
        if event == AppEvent::Ready {
            self.loading = false;
            return;
        }
        if self.store.apply(event) {
            self.close_edit();
        }
        self.clamp_cursor();
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.store.parties.len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(len - 1);
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self
            .cursor
            .min(self.store.parties.len().saturating_sub(1));
    }

    pub fn refresh_action(&self) -> Action {
        Action::Refresh {
            selected: self.store.selected_id(),
        }
    }

    pub fn start_creating(&mut self) {
        self.focus = Focus::NewParty;
        self.mode = InputMode::CreatingParty;
    }

    /// Esc: collapses the edit form, or leaves the new-party form with its values intact.
    pub fn cancel_input(&mut self) {
        match self.mode {
            InputMode::EditingParty => self.close_edit(),
            InputMode::CreatingParty => self.mode = InputMode::Normal,
            InputMode::Normal => {}
        }
    }

    pub fn active_form_mut(&mut self) -> Option<&mut PartyForm> {
        match self.mode {
            InputMode::EditingParty => Some(&mut self.edit_form),
            InputMode::CreatingParty => Some(&mut self.new_form),
            InputMode::Normal => None,
        }
    }

    fn close_edit(&mut self) {
        self.edit_open = false;
        if self.mode == InputMode::EditingParty {
            self.mode = InputMode::Normal;
        }
    }

    /// Runs a bound handler. Returns the request to hand to the controller, if any.
    pub fn run_command(&mut self, command: Command) -> Option<Action> {
        match command {
            Command::SelectParty(id) => Some(Action::SelectParty(id)),
            Command::ToggleEdit => {
                let party = self.store.selected.as_ref()?;
                let id = party.id;
                if !self.edit_open {
                    self.edit_form = PartyForm::from_party(party);
                    self.edit_open = true;
                    self.focus = Focus::Details;
                    self.mode = InputMode::EditingParty;
                    return None;
                }
                match self.edit_form.to_fields() {
                    Ok(fields) => {
                        self.close_edit();
                        Some(Action::UpdateParty { id, fields })
                    }
                    Err(e) => {
                        warn!("Not saving party {}: {}", id, e);
                        None
                    }
                }
            }
            Command::DeleteParty(id) => Some(Action::DeleteParty(id)),
            Command::SubmitNewParty => match self.new_form.to_fields() {
                Ok(fields) => {
                    self.new_form.reset();
                    if self.mode == InputMode::CreatingParty {
                        self.mode = InputMode::Normal;
                    }
                    Some(Action::CreateParty(fields))
                }
                Err(e) => {
                    warn!("Not creating party: {}", e);
                    None
                }
            },
        }
    }
}
