use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{info, warn};

use crate::game::{GameConfig, GameEngine, GameSnapshot, StepOutcome};
use crate::input::{InputHandler, InputIntent};
use crate::render::Renderer;
use crate::tick::TickDriver;

/// Interactive session: one engine, one game clock, keyboard and mouse input
pub struct HumanMode {
    engine: GameEngine,
    ticker: TickDriver,
    input: InputHandler,
    renderer: Renderer,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        let ticker = TickDriver::new(config.tick_interval());
        let input = InputHandler::new(&config);

        Self {
            engine: GameEngine::new(config),
            ticker,
            input,
            renderer: Renderer::new(),
            should_quit: false,
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.engine.snapshot()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        info!(
            board_size = self.engine.config().board_size,
            tick_ms = self.ticker.period().as_millis() as u64,
            "session started"
        );

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        self.ticker.stop();
        let cleanup = self.cleanup_terminal(&mut terminal);
        info!(
            score = self.engine.state().score,
            ticks = self.ticker.ticks(),
            "session ended"
        );

        result.and(cleanup)
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Redraw at ~30 FPS, independent of the game clock
        let mut render_timer = interval(Duration::from_millis(33));
        render_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        self.ticker.start();

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(&event),
                        Some(Err(err)) => {
                            return Err(err).context("Failed to read terminal event");
                        }
                        None => self.should_quit = true,
                    }
                }

                _ = self.ticker.tick() => {
                    self.on_tick();
                }

                _ = render_timer.tick() => {
                    let snapshot = self.engine.snapshot();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &snapshot);
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

    /// Funnel one terminal event into the engine
    pub fn handle_event(&mut self, event: &Event) {
        let intent = self.input.handle_event(event);
        self.apply_intent(intent);
    }

    pub fn apply_intent(&mut self, intent: InputIntent) {
        match intent {
            InputIntent::Steer(direction) => self.engine.set_direction(direction),
            InputIntent::Restart => self.reset_game(),
            InputIntent::Quit => self.should_quit = true,
            InputIntent::None => {}
        }
    }

    /// One game clock tick
    pub fn on_tick(&mut self) -> StepOutcome {
        self.engine.step()
    }

    fn reset_game(&mut self) {
        self.engine.reset();
        if self.ticker.is_running() {
            self.ticker.restart();
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        if let Err(err) = disable_raw_mode() {
            warn!(%err, "failed to disable raw mode");
        }
        execute!(
            terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
