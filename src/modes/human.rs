use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::{MissedTickBehavior, interval};
use tracing::info;

use crate::game::{Action, GameEngine, GameState, Scheduler, TickOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// How often the clock is sampled and the screen redrawn
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    scheduler: Scheduler,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(mut engine: GameEngine) -> Self {
        let scheduler = Scheduler::new(engine.config());
        let renderer = Renderer::new(engine.config().block_size);
        let metrics = GameMetrics::new(scheduler.interval());
        let state = engine.init_game();

        Self {
            engine,
            state,
            scheduler,
            metrics,
            renderer,
            input_handler: InputHandler::new(),
            should_quit: false,
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

        info!(
            width = self.state.grid_width,
            height = self.state.grid_height,
            "game started"
        );

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        info!(episodes = self.metrics.episode, "game closed");
        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut frame_timer = interval(FRAME_INTERVAL);
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Sample the clock, tick if due, redraw
                _ = frame_timer.tick() => {
                    self.on_frame(Instant::now());
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
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

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            match self.input_handler.handle_key_event(key) {
                KeyAction::GameAction(action) => self.apply_action(action),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
    }

    fn apply_action(&mut self, action: Action) {
        match action {
            Action::Move(direction) => self.state.set_direction(direction),
            Action::Speed(change) => {
                self.scheduler.adjust_speed(change);
                self.metrics.tick_interval = self.scheduler.interval();
            }
        }
    }

    /// Advance the game if the scheduler says a tick is due at `now`
    fn on_frame(&mut self, now: Instant) -> Option<TickOutcome> {
        self.metrics.update();

        if !self.scheduler.should_tick(now, self.state.running) {
            return None;
        }

        let outcome = self.engine.tick(&mut self.state);
        if let TickOutcome::Collided { .. } = outcome {
            self.metrics.on_episode_reset();
        }
        Some(outcome)
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
