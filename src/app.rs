//! The game loop controller: owns the simulation state and drives it
//! from a single tokio task.
//!
//! Ticks, key events, rendering and shutdown are serialized through one
//! `select!` loop, so the simulation state is only ever touched from one
//! execution context and needs no locking. The tick timer is a pinned
//! `Sleep` re-armed after each tick with the current speed, which is what
//! lets the interval shrink as the score climbs; while the game is over
//! the timer arm is guarded off entirely, so no stray tick can fire
//! between a collision and a restart.

use std::io::{stderr, Stderr};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::time::{interval, sleep, Instant};

use crate::game::{Action, Direction, GameConfig, GameEngine, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

pub struct App {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input: InputHandler,
    should_quit: bool,
    /// Last direction key seen since the previous tick; consumed at the
    /// tick boundary, so between ticks the last request wins
    pending_direction: Option<Direction>,
    render_fps: u64,
}

impl App {
    pub fn new(config: GameConfig, render_fps: u64) -> Self {
        let grid_size = config.grid_size;
        let mut engine = GameEngine::new(config);
        let state = engine.reset();

        Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(grid_size),
            input: InputHandler::new(),
            should_quit: false,
            pending_direction: None,
            render_fps,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_loop(&mut terminal).await;

        // Restore the terminal even if the loop errored
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        let mut event_stream = EventStream::new();

        let frame_ms = (1000 / self.render_fps.max(1)).max(1);
        let mut render_timer = interval(Duration::from_millis(frame_ms));

        // The simulation tick. Re-armed after each tick rather than a
        // fixed interval, because the speed ramp changes the cadence.
        let tick = sleep(Duration::from_millis(self.state.speed_ms));
        tokio::pin!(tick);

        loop {
            tokio::select! {
                // Key events arrive whenever; they only stage state the
                // next tick reads
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        if self.handle_event(event) {
                            // A restart gets its first tick immediately
                            tick.as_mut().reset(Instant::now());
                        }
                    }
                }

                // Simulation tick; cold while the game is over
                () = &mut tick, if self.state.is_running() => {
                    self.advance_tick();
                    // Schedule the next tick only after this one's work
                    // is done, at whatever speed it left behind
                    tick.as_mut()
                        .reset(Instant::now() + Duration::from_millis(self.state.speed_ms));
                }

                // Render frame, decoupled from the simulation cadence
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Returns true if a restart happened and the tick timer should be
    /// re-armed for an immediate first tick.
    fn handle_event(&mut self, event: Event) -> bool {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return false;
            }

            match self.input.handle_key_event(key) {
                KeyAction::GameAction(Action::Move(dir)) => {
                    // Accepted in any status; irrelevant requests are
                    // swept away by the reset on restart
                    self.pending_direction = Some(dir);
                }
                KeyAction::GameAction(Action::Continue) => {}
                KeyAction::Restart => {
                    // A restart while running is a no-op
                    if !self.state.is_running() {
                        self.reset_game();
                        return true;
                    }
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }

        false
    }

    fn advance_tick(&mut self) {
        let action = self
            .pending_direction
            .take()
            .map(Action::Move)
            .unwrap_or(Action::Continue);

        let result = self.engine.step(&mut self.state, action);

        if result.terminated && result.info.collision_type.is_some() {
            self.metrics.record_game_over(self.state.score);
        }
    }

    fn reset_game(&mut self) {
        self.state = self.engine.reset();
        self.metrics.record_restart();
        self.pending_direction = None;
    }

    fn cleanup_terminal(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
