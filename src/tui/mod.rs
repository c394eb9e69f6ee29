//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the session,
//! and translates keyboard events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event loop
//!
//! One thread owns the `Session` and is its only mutator. Network requests
//! run on tokio tasks and report back through an `mpsc` channel as
//! `Action::AnswerReceived`, which the loop drains between frames.
//!
//! ## Redraw Strategy
//!
//! - **Waiting**: draws every ~80ms so the thinking dots animate.
//! - **Idle**: sleeps up to 500ms and only redraws on events.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::answer::{AnswerService, HttpAnswerService};
use crate::core::config::ResolvedConfig;
use crate::core::{Action, Effect, Session, update};
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const ANIMATION_TICK: Duration = Duration::from_millis(80);
const IDLE_TICK: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of the session)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
    /// Answer Service address, shown in the header and landing page
    pub endpoint: String,
}

impl TuiState {
    pub fn new(endpoint: String) -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
            endpoint,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

/// Puts the terminal back into cooked mode when dropped, including when the
/// loop bails out early with `?`.
struct TerminalRestoreGuard {
    restore: fn(),
}

impl TerminalRestoreGuard {
    fn new() -> Self {
        Self {
            restore: ratatui::restore,
        }
    }
}

impl Drop for TerminalRestoreGuard {
    fn drop(&mut self) {
        (self.restore)();
    }
}

/// Applies one TUI event to the session. Returns `true` when the app should quit.
fn handle_event(
    event: TuiEvent,
    session: &mut Session,
    tui: &mut TuiState,
    service: &Arc<dyn AnswerService>,
    tx: &mpsc::Sender<Action>,
) -> bool {
    let action = match event {
        TuiEvent::Resize => return false,
        TuiEvent::Quit | TuiEvent::ForceQuit => Action::Quit,
        TuiEvent::DismissError => Action::DismissError,
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown
        | TuiEvent::ScrollToBottom => {
            tui.message_list.handle_event(&event);
            return false;
        }
        _ => match tui.input_box.handle_event(&event) {
            Some(InputEvent::Edited(text)) => Action::InputChanged(text),
            Some(InputEvent::Submit(text)) => Action::Submit(text),
            None => return false,
        },
    };

    let quit = dispatch(action, session, service, tx);
    tui.input_box.sync(session.pending_input());
    quit
}

/// Runs the reducer and performs the effect it asks for.
fn dispatch(
    action: Action,
    session: &mut Session,
    service: &Arc<dyn AnswerService>,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match update(session, action) {
        Effect::Quit => true,
        Effect::Ask(query) => {
            spawn_request(service.clone(), query, tx.clone());
            false
        }
        Effect::None => false,
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let service: Arc<dyn AnswerService> = Arc::new(HttpAnswerService::new(config.base_url.clone()));
    info!("Using answer service {} at {}", service.name(), config.base_url);

    let mut session = Session::new();
    let mut tui = TuiState::new(config.base_url);

    let mut terminal = ratatui::init();
    let _restore_guard = TerminalRestoreGuard::new();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = session.is_waiting();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, session.view(), &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating { ANIMATION_TICK } else { IDLE_TICK };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_event(event, &mut session, &mut tui, &service, &tx) {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }

        // Apply results from background requests
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if dispatch(action, &mut session, &service, &tx) {
                should_quit = true;
            }
            tui.input_box.sync(session.pending_input());
        }

        if should_quit {
            break;
        }
    }

    if session.is_waiting() {
        warn!("Exiting with a request still outstanding");
    }
    info!("Session ended after {} messages", session.history().len());
    Ok(())
}

fn spawn_request(service: Arc<dyn AnswerService>, query: String, tx: mpsc::Sender<Action>) {
    info!("Spawning answer request via {}", service.name());
    tokio::spawn(async move {
        let started = Instant::now();
        let result = service.ask(&query).await;
        debug!(
            "Answer request finished in {}ms (ok={})",
            started.elapsed().as_millis(),
            result.is_ok()
        );
        if tx.send(Action::AnswerReceived(result)).is_err() {
            warn!("Failed to deliver answer: receiver dropped");
        }
    });
}
