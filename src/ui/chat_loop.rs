//! Main chat event loop
//!
//! One task reads terminal events, stream tasks report replies over a
//! channel, and this loop is the only place that touches the session.

use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};

use ratatui::crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::core::chat_stream::{reset_remote, ChatStreamService, StreamError, StreamMessage};
use crate::core::session::ChatSession;
use crate::ui::app::{App, ChatOptions, KeyOutcome};
use crate::ui::renderer::ui;

#[derive(Debug)]
pub enum UiEvent {
    Crossterm(Event),
    ResetFinished(Result<(), StreamError>),
}

type ChatTerminal = Terminal<CrosstermBackend<io::Stdout>>;

fn try_draw_frame(
    app: &mut App,
    terminal: &mut ChatTerminal,
    request_redraw: &mut bool,
    last_draw: &mut Instant,
    frame_duration: Duration,
) -> io::Result<()> {
    if !*request_redraw {
        return Ok(());
    }

    let now = Instant::now();
    if now.duration_since(*last_draw) < frame_duration {
        return Ok(());
    }

    terminal.draw(|f| ui(f, app))?;
    *last_draw = now;
    *request_redraw = false;
    Ok(())
}

struct EventProcessingOutcome {
    events_processed: bool,
    request_redraw: bool,
    exit_requested: bool,
}

fn process_ui_events(
    app: &mut App,
    event_rx: &mut mpsc::UnboundedReceiver<UiEvent>,
    event_tx: &mpsc::UnboundedSender<UiEvent>,
    stream_service: &ChatStreamService,
) -> EventProcessingOutcome {
    let mut outcome = EventProcessingOutcome {
        events_processed: false,
        request_redraw: false,
        exit_requested: false,
    };

    while let Ok(ev) = event_rx.try_recv() {
        outcome.events_processed = true;
        match ev {
            UiEvent::Crossterm(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                match app.handle_key(key) {
                    KeyOutcome::Ignored => {}
                    KeyOutcome::Redraw => outcome.request_redraw = true,
                    KeyOutcome::Send(params) => {
                        stream_service.spawn_stream(params);
                        app.export_html();
                        outcome.request_redraw = true;
                    }
                    KeyOutcome::Reset => {
                        spawn_reset(&app.session, event_tx.clone());
                        outcome.request_redraw = true;
                    }
                    KeyOutcome::Quit => {
                        app.session.cancel_stream();
                        outcome.exit_requested = true;
                        break;
                    }
                }
            }
            UiEvent::Crossterm(Event::Paste(text)) => {
                if app.handle_paste(&text) {
                    outcome.request_redraw = true;
                }
            }
            UiEvent::Crossterm(Event::Resize(_, _)) => outcome.request_redraw = true,
            UiEvent::Crossterm(_) => {}
            UiEvent::ResetFinished(result) => {
                app.session.complete_reset(result);
                app.status = Some("Conversation reset".to_string());
                app.scroll_offset = 0;
                app.auto_scroll = true;
                app.export_html();
                outcome.request_redraw = true;
            }
        }
    }

    outcome
}

/// Fire the remote reset; the loop clears local state when it reports back.
fn spawn_reset(session: &ChatSession, event_tx: mpsc::UnboundedSender<UiEvent>) {
    let client = session.client().clone();
    let base_url = session.base_url().to_string();
    tokio::spawn(async move {
        let result = reset_remote(&client, &base_url).await;
        let _ = event_tx.send(UiEvent::ResetFinished(result));
    });
}

fn process_stream_updates(
    app: &mut App,
    rx: &mut mpsc::UnboundedReceiver<(StreamMessage, u64)>,
) -> bool {
    let mut changed = false;
    while let Ok((message, stream_id)) = rx.try_recv() {
        changed |= app.session.apply(message, stream_id);
    }
    if changed {
        app.export_html();
    }
    changed
}

pub async fn run_chat(session: ChatSession, options: ChatOptions) -> Result<(), Box<dyn Error>> {
    info!(
        base_url = session.base_url(),
        model = session.model_name(),
        "Starting chat session"
    );
    let mut app = App::new(session, options);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Channel for streaming updates with stream ID
    let (stream_service, mut rx) = ChatStreamService::new();

    // Channel for async event processing
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<UiEvent>();

    // Spawn async event reader task
    let event_reader_handle = {
        let event_tx = event_tx.clone();
        tokio::spawn(async move {
            loop {
                // Use a short timeout to prevent blocking
                if let Ok(true) = event::poll(Duration::from_millis(10)) {
                    match event::read() {
                        Ok(ev) => {
                            if event_tx.send(UiEvent::Crossterm(ev)).is_err() {
                                break;
                            }
                        }
                        Err(err) => {
                            debug!(error = %err, "Failed to read terminal event");
                            continue;
                        }
                    }
                } else {
                    tokio::task::yield_now().await;
                }
            }
        })
    };

    // Drawing cadence control
    const MAX_FPS: u64 = 60;
    let frame_duration = Duration::from_millis(1000 / MAX_FPS);
    let mut last_draw = Instant::now() - frame_duration;
    let mut request_redraw = true;

    let result: Result<(), Box<dyn Error>> = loop {
        if let Err(err) = try_draw_frame(
            &mut app,
            &mut terminal,
            &mut request_redraw,
            &mut last_draw,
            frame_duration,
        ) {
            break Err(err.into());
        }

        let event_outcome = process_ui_events(&mut app, &mut event_rx, &event_tx, &stream_service);
        if event_outcome.exit_requested {
            break Ok(());
        }
        if event_outcome.request_redraw {
            request_redraw = true;
        }

        let received_any = process_stream_updates(&mut app, &mut rx);
        if received_any {
            request_redraw = true;
        }

        // Keep the activity indicator moving
        if app.is_busy() {
            request_redraw = true;
        }

        let idle = !event_outcome.events_processed && !received_any;
        if idle {
            tokio::time::sleep(Duration::from_millis(16)).await; // ~60 FPS when idle
        }
    };

    event_reader_handle.abort();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    result
}
