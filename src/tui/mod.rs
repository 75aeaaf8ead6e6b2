// File: src/tui/mod.rs
pub mod input;
pub mod view;

use crate::action::{Action, AppEvent};
use crate::client::PartyClient;
use crate::config::Config;
use crate::controller::Controller;
use crate::page;
use crate::state::AppState;

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::{Stream, StreamExt};
use log::{info, warn};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// How long a request still in flight at quit gets to finish.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(3);

pub async fn run(config: Config) -> Result<()> {
    let api_url = config.api_url();
    let client = PartyClient::new(
        &api_url,
        config.allow_insecure_certs,
        config.request_timeout(),
    )
    .with_context(|| format!("Could not set up a client for {}", api_url))?;
    info!("Using API at {}", client.api_url());

    let (action_tx, action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<AppEvent>();
    let mut worker = tokio::spawn(Controller::new(client, event_tx).run(action_rx));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    // Consumes the action sender, so the controller also stops on error.
    let result = event_loop(
        &mut terminal,
        EventStream::new(),
        AppState::new(),
        action_tx,
        event_rx,
    )
    .await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    match tokio::time::timeout(SHUTDOWN_GRACE, &mut worker).await {
        Ok(Ok(())) => info!("Controller stopped"),
        Ok(Err(e)) => warn!("Controller task failed: {}", e),
        Err(_) => {
            warn!("Abandoning a request still in flight after {:?}", SHUTDOWN_GRACE);
            worker.abort();
        }
    }
    result
}

/// Redraws after every key or batch of controller events. Returns on quit or
/// when the terminal's event stream ends.
async fn event_loop<B, K>(
    terminal: &mut Terminal<B>,
    mut keys: K,
    mut state: AppState,
    actions: UnboundedSender<Action>,
    mut events: UnboundedReceiver<AppEvent>,
) -> Result<()>
where
    B: Backend,
    K: Stream<Item = io::Result<Event>> + Unpin,
{
    loop {
        let page = page::render(&state);
        terminal.draw(|f| view::draw(f, &page, state.mode))?;

        tokio::select! {
            Some(event) = events.recv() => {
                state.apply(event);
                while let Ok(event) = events.try_recv() {
                    state.apply(event);
                }
            }
            maybe_key = keys.next() => {
                let Some(terminal_event) = maybe_key else {
                    return Ok(());
                };
                if let Event::Key(key) = terminal_event?
                    && key.kind == KeyEventKind::Press
                {
                    match input::handle_key(&mut state, key) {
                        Some(Action::Quit) => {
                            let _ = actions.send(Action::Quit);
                            return Ok(());
                        }
                        Some(action) => {
                            let _ = actions.send(action);
                        }
                        None => {}
                    }
                }
            }
        }
    }
}
