use std::future;
use std::io::{Stderr, stderr};
use std::pin::Pin;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use tokio::time::{Sleep, interval, sleep};
use tracing::{debug, info};

use crate::game::{GameConfig, GameController, Notification, ScheduledTick, TickId};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::TerminalRenderer;

type Controller<B> = GameController<TerminalRenderer<B>>;

/// Host timer armed for the controller's pending tick
struct ArmedTick {
    id: TickId,
    sleep: Pin<Box<Sleep>>,
}

/// Interactive game in the terminal
pub struct PlayMode {
    config: GameConfig,
    metrics: GameMetrics,
    input_handler: InputHandler,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate().context("Invalid game configuration")?;

        Ok(Self {
            config,
            metrics: GameMetrics::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
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

        let mut controller =
            match GameController::new(self.config.clone(), TerminalRenderer::new(terminal)) {
                Ok(controller) => controller,
                Err(e) => {
                    disable_raw_mode().ok();
                    execute!(std::io::stderr(), LeaveAlternateScreen).ok();
                    return Err(e).context("Failed to create game");
                }
            };

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut controller).await;

        // Cleanup terminal
        self.cleanup_terminal(controller.renderer_mut().terminal_mut())?;

        result
    }

    async fn run_game_loop(
        &mut self,
        controller: &mut Controller<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut armed: Option<ArmedTick> = None;

        // Elapsed time in the HUD moves even between ticks
        let mut hud_timer = interval(Duration::from_millis(250));

        self.refresh_hud(controller)?;

        loop {
            sync_timer(&mut armed, controller.pending_tick());

            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(controller, event);
                    }
                }

                // Game logic tick
                id = wait_for_tick(&mut armed) => {
                    armed = None;
                    let outcome = controller.tick(id);
                    debug!(?outcome, "Tick");
                }

                _ = hud_timer.tick() => {
                    self.metrics.update();
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!("Quitting");
                break;
            }

            self.refresh_hud(controller)?;
        }

        Ok(())
    }

    fn handle_event<B: Backend>(&mut self, controller: &mut Controller<B>, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            let action = self.input_handler.handle_key_event(key);
            self.handle_action(controller, action);
        }
    }

    fn handle_action<B: Backend>(&mut self, controller: &mut Controller<B>, action: KeyAction) {
        match action {
            KeyAction::GameCommand(command) => {
                debug!(?command, "Command");
                controller.handle(command);
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    /// Apply pending notifications to the metrics and HUD, then redraw
    fn refresh_hud<B: Backend>(&mut self, controller: &mut Controller<B>) -> Result<()> {
        for notification in controller.drain_notifications() {
            match notification {
                Notification::Started => self.metrics.on_run_start(),
                Notification::Idle => self.metrics.on_reset(),
                Notification::GameOver { final_score, .. } => self.metrics.on_run_end(final_score),
                Notification::ScoreChanged(_) => {}
            }
            controller.renderer_mut().hud_mut().apply(notification);
        }

        let hud = controller.renderer_mut().hud_mut();
        hud.high_score = self.metrics.high_score;
        hud.elapsed = self.metrics.format_time();

        controller
            .renderer_mut()
            .refresh()
            .context("Failed to draw frame")
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

/// Keep exactly one host timer, matching the controller's pending tick
fn sync_timer(armed: &mut Option<ArmedTick>, pending: Option<ScheduledTick>) {
    match pending {
        Some(tick) if armed.as_ref().map(|a| a.id) != Some(tick.id) => {
            *armed = Some(ArmedTick {
                id: tick.id,
                sleep: Box::pin(sleep(tick.delay)),
            });
        }
        Some(_) => {}
        None => *armed = None,
    }
}

async fn wait_for_tick(armed: &mut Option<ArmedTick>) -> TickId {
    match armed {
        Some(tick) => {
            tick.sleep.as_mut().await;
            tick.id
        }
        None => future::pending().await,
    }
}
