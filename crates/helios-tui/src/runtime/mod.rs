//! TUI runtime: owns the terminal, runs the event loop, executes effects.
//!
//! This is the Elm runtime boundary. The reducer stays pure and returns
//! effects; every side effect happens here or in `handlers`.
//!
//! Async results come back through an inbox channel. Handlers send
//! `UiEvent`s to `inbox_tx`, and the loop drains `inbox_rx` every frame.

mod handlers;

use std::future::Future;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use helios_core::api::BackendClient;
use helios_core::config::{Config, RealtimeConfig};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::terminal::{self, HeliosTerminal};
use crate::{render, update};

pub(crate) type UiEventSender = mpsc::UnboundedSender<UiEvent>;
type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;

/// Frame interval while something is in flight (spinner animation).
pub const FRAME_DURATION: Duration = Duration::from_millis(50);

/// Poll interval when idle.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(250);

/// Full-screen TUI runtime.
///
/// Terminal state is restored on drop and on panic.
pub struct TuiRuntime {
    terminal: HeliosTerminal,
    pub state: AppState,
    client: BackendClient,
    realtime: RealtimeConfig,
    /// Parent of every realtime subscription; cancelled on quit.
    subscriptions: CancellationToken,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    last_tick: Instant,
}

impl TuiRuntime {
    pub fn new(config: &Config) -> Result<Self> {
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        Ok(Self {
            terminal,
            state: AppState::new(config),
            client: BackendClient::new(config.backend.clone()),
            realtime: config.realtime.clone(),
            subscriptions: CancellationToken::new(),
            inbox_tx,
            inbox_rx,
            last_tick: Instant::now(),
        })
    }

    /// Runs the event loop until the reducer asks to quit.
    pub fn run(&mut self) -> Result<()> {
        tracing::info!(variant = %self.state.tui.variant, "session started");
        self.dispatch_event(UiEvent::Mounted);

        let result = self.event_loop();
        self.subscriptions.cancel();
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.tui.should_quit {
            let events = self.collect_events()?;

            for event in events {
                // Anything but an idle tick changes what is on screen.
                dirty |= !matches!(event, UiEvent::Tick) || self.state.tui.is_busy();
                self.dispatch_event(event);
            }

            if dirty && !self.state.tui.should_quit {
                self.terminal.draw(|frame| render::render(&self.state, frame))?;
                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    /// Collects terminal input, inbox results, and the frame tick.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let tick_interval = if self.state.tui.is_busy() {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Block until the next tick only when there is nothing to process.
        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn dispatch_event(&mut self, event: UiEvent) {
        let effects = update::update(&mut self.state, event);
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns a handler and forwards the event it returns to the inbox.
    fn spawn_effect<F, Fut>(&self, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(f().await);
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        tracing::debug!(?effect, "executing effect");
        let client = self.client.clone();
        match effect {
            UiEffect::Quit => {
                self.subscriptions.cancel();
                self.state.tui.should_quit = true;
            }
            UiEffect::CreatePlayer { username } => {
                self.spawn_effect(move || handlers::create_player(client, username));
            }
            UiEffect::SendChat {
                player_id,
                npc_id,
                message,
            } => {
                self.spawn_effect(move || {
                    handlers::send_chat(client, player_id, npc_id, message)
                });
            }
            UiEffect::SendSceneDialogue {
                player_id,
                character_id,
                message,
            } => {
                self.spawn_effect(move || {
                    handlers::send_scene_dialogue(client, player_id, character_id, message)
                });
            }
            UiEffect::SubscribeStatus { player_id } => {
                if !self.realtime.is_enabled() {
                    tracing::info!("realtime not configured; status pushes disabled");
                    return;
                }
                let config = self.realtime.clone();
                let cancel = self.subscriptions.child_token();
                let inbox = self.inbox_tx.clone();
                self.spawn_effect(move || {
                    handlers::subscribe_status(config, player_id, cancel, inbox)
                });
            }
            UiEffect::EnterEchoChamber { player_id } => {
                self.spawn_effect(move || handlers::enter_echo_chamber(client, player_id));
            }
            UiEffect::ResolveEchoChamber { player_id, choice } => {
                self.spawn_effect(move || {
                    handlers::resolve_echo_chamber(client, player_id, choice)
                });
            }
            UiEffect::CreateSceneCharacter { profile } => {
                self.spawn_effect(move || handlers::create_scene_character(client, profile));
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        self.subscriptions.cancel();
        let _ = terminal::restore_terminal();
    }
}
