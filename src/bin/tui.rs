//! # Resolutions TUI
//!
//! Terminal client for the resolutions backend.
//!
//! Usage: `cargo run --bin resolutions-tui`

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info, warn};
use ratatui::prelude::*;
use std::fs::OpenOptions;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

use resolutions::api::{ApiClient, ResolutionUpdate};
use resolutions::core::Config;
use resolutions::features::reminders::{start_polling, PollerHandle, ReminderStore};
use resolutions::tui::event::{map_key_event, ApiEvent};
use resolutions::tui::{App, Event, EventHandler, InputMode, Request};

/// TUI refresh rate
const TICK_RATE: Duration = Duration::from_millis(250);

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging()?;

    let config = Config::from_env()?;
    info!("Starting resolutions TUI against {}", config.api_base_url);

    let client = ApiClient::from_config(&config).context("Failed to build HTTP client")?;
    let mut poller = start_polling(Arc::new(client.clone()), ReminderStore::new(), config.poll_interval());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(poller.store().subscribe(), config.dismiss_policy);
    let (mut events, event_tx) = EventHandler::new(TICK_RATE);

    let result = run_app(&mut terminal, &mut app, &mut events, &event_tx, &client, &poller).await;

    // Stop polling before the terminal goes away
    if poller.is_running() {
        poller.stop();
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        error!("Application error: {}", e);
        return Err(e);
    }

    info!("Resolutions TUI shutdown complete");
    Ok(())
}

/// Log to `RESOLUTIONS_LOG_FILE` when set; stderr is hidden behind the TUI
fn init_logging() -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));

    if let Ok(path) = std::env::var("RESOLUTIONS_LOG_FILE") {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {}", path))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
    event_tx: &UnboundedSender<Event>,
    client: &ApiClient,
    poller: &PollerHandle,
) -> Result<()> {
    for request in app.startup_requests() {
        dispatch(request, client, event_tx, poller);
    }

    loop {
        // Draw UI
        terminal.draw(|frame| {
            resolutions::tui::ui::render(frame, app);
        })?;

        // Handle events
        let requests = match events.next().await {
            Some(Event::Key(key)) => {
                let action = map_key_event(key, app.input_mode == InputMode::Editing);
                app.handle_action(action)
            }
            Some(Event::Api(api_event)) => app.handle_api_event(api_event),
            Some(Event::Tick) => {
                app.sync_reminders();
                Vec::new()
            }
            Some(Event::Resize(_, _)) => Vec::new(),
            None => break,
        };

        for request in requests {
            dispatch(request, client, event_tx, poller);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Run a request in the background and post its result back as an event
fn dispatch(
    request: Request,
    client: &ApiClient,
    event_tx: &UnboundedSender<Event>,
    poller: &PollerHandle,
) {
    if request == Request::RefreshReminders {
        if !poller.refresh() {
            warn!("Reminder refresh requested but the poller is not running");
        }
        return;
    }

    let client = client.clone();
    let tx = event_tx.clone();
    tokio::spawn(async move {
        if let Some(event) = perform(request, &client).await {
            // Receiver is gone once the UI has shut down
            let _ = tx.send(Event::Api(event));
        }
    });
}

async fn perform(request: Request, client: &ApiClient) -> Option<ApiEvent> {
    fn outcome<T>(result: resolutions::ApiResult<T>) -> Result<T, String> {
        result.map_err(|e| e.to_string())
    }

    let event = match request {
        Request::LoadResolutions => {
            ApiEvent::ResolutionsLoaded(outcome(client.list_resolutions().await))
        }
        Request::LoadSummary => {
            ApiEvent::SummaryLoaded(outcome(client.get_dashboard_summary().await))
        }
        Request::LoadDetail(id) => ApiEvent::DetailLoaded {
            id,
            result: outcome(client.get_resolution(id).await),
        },
        Request::CreateResolution(body) => {
            ApiEvent::ResolutionCreated(outcome(client.create_resolution(&body).await))
        }
        Request::CreateCheckIn { resolution_id, body } => ApiEvent::CheckInCreated {
            id: resolution_id,
            result: outcome(client.create_check_in(resolution_id, &body).await),
        },
        Request::UpdateStatus { id, status } => {
            let update = ResolutionUpdate {
                status: Some(status),
                ..Default::default()
            };
            ApiEvent::StatusUpdated {
                id,
                status,
                result: outcome(client.update_resolution(id, &update).await),
            }
        }
        Request::DeleteResolution(id) => ApiEvent::ResolutionDeleted {
            id,
            result: outcome(client.delete_resolution(id).await),
        },
        Request::SaveReminder { resolution_id, body } => ApiEvent::ReminderSaved {
            id: resolution_id,
            result: outcome(client.update_reminder(resolution_id, &body).await),
        },
        // Handled by the poller
        Request::RefreshReminders => return None,
    };
    Some(event)
}
