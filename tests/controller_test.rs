use mockito::{Matcher, Mock, ServerGuard};
use party_planner::action::{Action, AppEvent};
use party_planner::client::PartyClient;
use party_planner::controller::Controller;
use party_planner::model::PartyFields;
use party_planner::page::{self, DetailsBody};
use party_planner::state::{AppState, Command};
use serde_json::{Value, json};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};

const COHORT: &str = "/api/test-cohort";

struct Harness {
    server: ServerGuard,
    controller: Controller,
    events: UnboundedReceiver<AppEvent>,
    state: AppState,
    // Held so every registered route stays live for the whole test.
    mocks: Vec<Mock>,
}

impl Harness {
    async fn new() -> Self {
        let server = mockito::Server::new_async().await;
        let client = PartyClient::new(
            &format!("{}{}", server.url(), COHORT),
            false,
            Duration::from_secs(5),
        )
        .unwrap();
        let (tx, events) = mpsc::unbounded_channel();
        Self {
            server,
            controller: Controller::new(client, tx),
            events,
            state: AppState::new(),
            mocks: Vec::new(),
        }
    }

    async fn get(&mut self, p: &str, data: Value) {
        let mock = self
            .server
            .mock("GET", format!("{}{}", COHORT, p).as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "data": data }).to_string())
            .create_async()
            .await;
        self.mocks.push(mock);
    }

    /// Drains everything the controller reported into the app state.
    fn pump(&mut self) -> Vec<AppEvent> {
        let mut seen = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            seen.push(event.clone());
            self.state.apply(event);
        }
        seen
    }

    async fn dispatch(&mut self, action: Action) -> Vec<AppEvent> {
        self.controller.handle(action).await;
        self.pump()
    }
}

fn launch() -> Value {
    json!({"id": 1, "name": "Launch", "date": "2025-01-01T00:00:00Z",
           "description": "Kickoff", "location": "Roof"})
}

#[tokio::test]
async fn selecting_party_renders_only_its_guests() {
    let mut h = Harness::new().await;
    h.get("/events", json!([launch()])).await;
    h.get("/rsvps", json!([{"guestId": 9, "eventId": 1}, {"guestId": 10, "eventId": 2}]))
        .await;
    h.get("/guests", json!([{"id": 9, "name": "Ada"}, {"id": 10, "name": "Grace"}]))
        .await;
    h.get("/events/1", launch()).await;

    h.controller.load_all().await;
    h.pump();
    assert_eq!(h.state.store.parties.len(), 1);

    let command = page::render(&h.state).highlighted_row().unwrap();
    let action = h.state.run_command(command).unwrap();
    assert_eq!(action, Action::SelectParty(1));
    h.dispatch(action).await;

    let rendered = page::render(&h.state);
    let panel = rendered.panel().expect("a party is selected");
    assert_eq!(panel.title, "Launch #1");
    assert_eq!(panel.date, "2025-01-01");
    assert_eq!(panel.location, "Roof");
    assert_eq!(panel.description, "Kickoff");
    assert_eq!(panel.guests.names, vec!["Ada".to_string()]);
    assert!(rendered.party_list.rows[0].selected);
}

#[tokio::test]
async fn created_party_appears_after_relist() {
    let mut h = Harness::new().await;
    let fields = PartyFields::from_inputs("Picnic", "2025-07-04", "Blankets", "Park").unwrap();

    let post = h
        .server
        .mock("POST", format!("{}/events", COHORT).as_str())
        .match_body(Matcher::Json(serde_json::to_value(&fields).unwrap()))
        .with_status(201)
        .with_body(json!({"data": {"id": 5}}).to_string())
        .create_async()
        .await;
    h.get(
        "/events",
        json!([launch(), {"id": 5, "name": "Picnic", "date": "2025-07-04T00:00:00.000Z",
                          "description": "Blankets", "location": "Park"}]),
    )
    .await;

    let events = h.dispatch(Action::CreateParty(fields.clone())).await;
    post.assert_async().await;
    assert!(matches!(events.as_slice(), [AppEvent::PartiesLoaded(_)]));
    assert!(h.state.store.parties.iter().any(|p| p.matches(&fields)));
    assert!(
        page::render(&h.state)
            .party_list
            .rows
            .iter()
            .any(|r| r.label == "Picnic")
    );
}

#[tokio::test]
async fn deleting_clears_selection_and_shows_prompt() {
    let mut h = Harness::new().await;
    h.get("/events/1", launch()).await;
    h.dispatch(Action::SelectParty(1)).await;
    assert_eq!(h.state.store.selected_id(), Some(1));

    let delete = h
        .server
        .mock("DELETE", format!("{}/events/1", COHORT).as_str())
        .with_status(204)
        .create_async()
        .await;
    h.get("/events", json!([])).await;

    let panel = page::render(&h.state).panel().cloned().unwrap();
    let action = h.state.run_command(panel.delete_button.on_click).unwrap();
    let events = h.dispatch(action).await;

    delete.assert_async().await;
    assert_eq!(
        events,
        vec![AppEvent::SelectionCleared, AppEvent::PartiesLoaded(vec![])]
    );
    assert_eq!(h.state.store.selected, None);
    assert_eq!(
        page::render(&h.state).details.body,
        DetailsBody::Prompt(page::PROMPT)
    );
}

#[tokio::test]
async fn edit_then_save_sends_displayed_fields_and_refetches() {
    let mut h = Harness::new().await;
    h.get("/events/1", launch()).await;
    h.dispatch(Action::SelectParty(1)).await;

    assert_eq!(h.state.run_command(Command::ToggleEdit), None);
    let action = h.state.run_command(Command::ToggleEdit).unwrap();

    let put = h
        .server
        .mock("PUT", format!("{}/events/1", COHORT).as_str())
        .match_body(Matcher::Json(json!({
            "name": "Launch",
            "date": "2025-01-01T00:00:00.000Z",
            "description": "Kickoff",
            "location": "Roof",
        })))
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;
    h.get("/events", json!([launch()])).await;

    let events = h.dispatch(action).await;
    put.assert_async().await;
    assert_eq!(events.len(), 2);
    assert!(matches!(events[1], AppEvent::PartyRefreshed(ref p) if p.id == 1));
    assert_eq!(h.state.store.selected_id(), Some(1));
}

#[tokio::test]
async fn failed_startup_fetch_leaves_only_its_slot_empty() {
    let mut h = Harness::new().await;
    h.get("/events", json!([launch()])).await;
    let _rsvps = h
        .server
        .mock("GET", format!("{}/rsvps", COHORT).as_str())
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;
    h.get("/guests", json!([{"id": 9, "name": "Ada"}])).await;

    let (actions_tx, actions_rx) = mpsc::unbounded_channel();
    actions_tx.send(Action::Quit).unwrap();

    let Harness {
        controller,
        mut events,
        mut state,
        server: _server,
        mocks: _mocks,
    } = h;
    controller.run(actions_rx).await;

    let mut seen = Vec::new();
    while let Ok(event) = events.try_recv() {
        seen.push(event.clone());
        state.apply(event);
    }

    assert_eq!(seen.last(), Some(&AppEvent::Ready));
    assert!(!state.loading);
    assert_eq!(state.store.parties.len(), 1);
    assert_eq!(state.store.guests.len(), 1);
    assert!(state.store.rsvps.is_empty());
}

#[tokio::test]
async fn quit_waits_for_queued_mutation() {
    let mut h = Harness::new().await;
    h.get("/events", json!([])).await;
    h.get("/rsvps", json!([])).await;
    h.get("/guests", json!([])).await;
    let post = h
        .server
        .mock("POST", format!("{}/events", COHORT).as_str())
        .with_status(201)
        .with_body("{}")
        .create_async()
        .await;

    let (actions_tx, actions_rx) = mpsc::unbounded_channel();
    let fields = PartyFields::from_inputs("Picnic", "2025-07-04", "", "Park").unwrap();
    actions_tx.send(Action::CreateParty(fields)).unwrap();
    actions_tx.send(Action::Quit).unwrap();

    let Harness {
        controller,
        mut events,
        server: _server,
        mocks: _mocks,
        ..
    } = h;
    controller.run(actions_rx).await;

    post.assert_async().await;
    let mut seen = Vec::new();
    while let Ok(event) = events.try_recv() {
        seen.push(event);
    }
    // Startup slots, Ready, then the re-list that follows the create.
    assert_eq!(seen.len(), 5);
    assert_eq!(seen[3], AppEvent::Ready);
    assert!(matches!(seen[4], AppEvent::PartiesLoaded(_)));
}

#[tokio::test]
async fn unreachable_server_skips_mutation_follow_up() {
    let client =
        PartyClient::new("http://127.0.0.1:1/api/x", false, Duration::from_secs(5)).unwrap();
    let (tx, mut events) = mpsc::unbounded_channel();
    let controller = Controller::new(client, tx);

    controller.handle(Action::DeleteParty(3)).await;
    controller
        .handle(Action::CreateParty(
            PartyFields::from_inputs("Picnic", "2025-07-04", "", "Park").unwrap(),
        ))
        .await;

    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn delete_of_missing_party_still_clears_and_relists() {
    let mut h = Harness::new().await;
    h.get("/events/1", launch()).await;
    h.dispatch(Action::SelectParty(1)).await;

    let delete = h
        .server
        .mock("DELETE", format!("{}/events/1", COHORT).as_str())
        .with_status(404)
        .with_body(json!({"error": "not found"}).to_string())
        .create_async()
        .await;
    h.get("/events", json!([])).await;

    let events = h.dispatch(Action::DeleteParty(1)).await;
    delete.assert_async().await;
    assert_eq!(
        events,
        vec![AppEvent::SelectionCleared, AppEvent::PartiesLoaded(vec![])]
    );
    assert_eq!(
        page::render(&h.state).details.body,
        DetailsBody::Prompt(page::PROMPT)
    );
}

#[tokio::test]
async fn rejected_update_still_relists_and_refetches() {
    let mut h = Harness::new().await;
    h.get("/events/1", launch()).await;
    h.dispatch(Action::SelectParty(1)).await;

    let put = h
        .server
        .mock("PUT", format!("{}/events/1", COHORT).as_str())
        .with_status(500)
        .create_async()
        .await;
    h.get("/events", json!([launch()])).await;

    let fields = PartyFields::from_inputs("Launch", "2025-01-01", "Kickoff", "Roof").unwrap();
    let events = h.dispatch(Action::UpdateParty { id: 1, fields }).await;
    put.assert_async().await;
    assert!(matches!(
        events.as_slice(),
        [AppEvent::PartiesLoaded(_), AppEvent::PartyRefreshed(_)]
    ));
}

#[tokio::test]
async fn update_of_unselected_party_leaves_selection_alone() {
    let mut h = Harness::new().await;
    h.get("/events/1", launch()).await;
    h.get(
        "/events/2",
        json!({"id": 2, "name": "Retro", "date": "2025-02-01T00:00:00Z",
               "description": "", "location": "Online"}),
    )
    .await;
    h.dispatch(Action::SelectParty(1)).await;

    let _put = h
        .server
        .mock("PUT", format!("{}/events/2", COHORT).as_str())
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;
    h.get("/events", json!([launch()])).await;

    let fields = PartyFields::from_inputs("Retro", "2025-02-01", "", "Online").unwrap();
    h.dispatch(Action::UpdateParty { id: 2, fields }).await;
    let selected = h.state.store.selected.as_ref().unwrap();
    assert_eq!((selected.id, selected.name.as_str()), (1, "Launch"));
}

#[tokio::test]
async fn refresh_reloads_everything_and_selected_party() {
    let mut h = Harness::new().await;
    h.get("/events", json!([launch()])).await;
    h.get("/rsvps", json!([])).await;
    h.get("/guests", json!([])).await;
    h.get("/events/1", launch()).await;
    h.dispatch(Action::SelectParty(1)).await;

    let refresh = h.state.refresh_action();
    assert_eq!(refresh, Action::Refresh { selected: Some(1) });
    let events = h.dispatch(refresh).await;
    assert_eq!(events.len(), 4);
    assert!(matches!(events[3], AppEvent::PartyRefreshed(_)));
}
