use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use crate::game::{GameConfig, GameEngine, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Redraw period, roughly 30 FPS
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

pub struct PlayMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    paused: bool,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let renderer = Renderer::new(&config);
        let mut engine = GameEngine::new(config);
        let state = engine.new_game().context("Failed to start a game")?;

        Ok(Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer,
            input_handler: InputHandler::new(),
            paused: false,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;

        // Run game loop, then restore the terminal whatever happened
        let result = match setup_terminal() {
            Ok(mut terminal) => self.run_game_loop(&mut terminal).await,
            Err(err) => Err(err),
        };
        let restored = restore_terminal();

        info!(
            apples = self.metrics.apples_eaten,
            best_length = self.metrics.best_length,
            resets = self.metrics.resets(),
            "session over"
        );
        first_error(result, restored)
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.engine.config().tick_interval());
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut render_timer = interval(RENDER_INTERVAL);
        render_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event)?,
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    if !self.paused {
                        self.update_game()?;
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics, self.paused);
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

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Turn(direction) => {
                    if !self.paused {
                        self.engine.steer(&mut self.state, direction);
                    }
                }
                KeyAction::TogglePause => {
                    self.paused = !self.paused;
                    if self.paused {
                        self.metrics.pause();
                    } else {
                        self.metrics.resume();
                    }
                    debug!(paused = self.paused, "pause toggled");
                }
                KeyAction::Restart => {
                    self.reset_game()?;
                }
                KeyAction::Quit => {
                    info!("quit requested");
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    fn update_game(&mut self) -> Result<()> {
        let length_before = self.state.snake.len();
        let result = self
            .engine
            .step(&mut self.state)
            .context("Game step failed")?;

        let reached = if result.reset.is_some() {
            length_before
        } else {
            self.state.snake.len()
        };
        self.metrics.on_step(&result, reached);

        Ok(())
    }

    fn reset_game(&mut self) -> Result<()> {
        self.state = self.engine.new_game().context("Failed to restart the game")?;
        self.metrics.on_game_start();
        self.paused = false;
        Ok(())
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stderr>>> {
    let mut stderr = stderr();
    execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.hide_cursor().context("Failed to hide cursor")?;
    terminal.clear().context("Failed to clear terminal")?;
    Ok(terminal)
}

/// Best-effort teardown: every step runs even if an earlier one fails
fn restore_terminal() -> Result<()> {
    let raw = disable_raw_mode().context("Failed to disable raw mode");
    let screen = execute!(stderr(), LeaveAlternateScreen, Show)
        .context("Failed to leave alternate screen");
    raw.and(screen)
}

/// The game loop's error wins over a teardown error, which is only logged
fn first_error(result: Result<()>, cleanup: Result<()>) -> Result<()> {
    match (result, cleanup) {
        (Err(err), Err(cleanup_err)) => {
            warn!(error = %cleanup_err, "terminal restore failed");
            Err(err)
        }
        (Err(err), Ok(())) => Err(err),
        (Ok(()), cleanup) => cleanup,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Position};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_game_initialization() {
        let mode = PlayMode::new(GameConfig::small()).unwrap();
        assert_eq!(mode.state.snake.len(), 1);
        assert_eq!(mode.state.score, 0);
        assert!(!mode.paused);
    }

    #[test]
    fn test_turn_is_buffered() {
        let mut mode = PlayMode::new(GameConfig::small()).unwrap();
        mode.state.snake.direction = Direction::Right;

        mode.handle_event(key(KeyCode::Up)).unwrap();
        assert_eq!(mode.state.snake.next_direction, Some(Direction::Up));
        assert_eq!(mode.state.snake.direction, Direction::Right);

        // reversal is ignored
        mode.state.snake.next_direction = None;
        mode.handle_event(key(KeyCode::Left)).unwrap();
        assert_eq!(mode.state.snake.next_direction, None);
    }

    #[test]
    fn test_pause_blocks_steering() {
        let mut mode = PlayMode::new(GameConfig::small()).unwrap();
        mode.state.snake.direction = Direction::Right;

        mode.handle_event(key(KeyCode::Char(' '))).unwrap();
        assert!(mode.paused);
        mode.handle_event(key(KeyCode::Down)).unwrap();
        assert_eq!(mode.state.snake.next_direction, None);

        mode.handle_event(key(KeyCode::Char(' '))).unwrap();
        assert!(!mode.paused);
    }

    #[test]
    fn test_pause_stops_the_clock() {
        let mut mode = PlayMode::new(GameConfig::small()).unwrap();

        mode.handle_event(key(KeyCode::Char(' '))).unwrap();
        assert!(mode.metrics.is_paused());
        std::thread::sleep(Duration::from_millis(200));
        mode.handle_event(key(KeyCode::Char(' '))).unwrap();
        assert!(!mode.metrics.is_paused());

        mode.metrics.update();
        assert!(mode.metrics.elapsed_time < Duration::from_millis(150));
    }

    #[test]
    fn test_best_length_tracks_occupied_cells() {
        let mut mode = PlayMode::new(GameConfig::small()).unwrap();
        let head = mode.state.snake.head();
        let direction = mode.state.snake.direction;
        mode.state.apple.position = head.moved_in_direction(direction, 10, 10);

        // the body only catches up with the target on the next move
        mode.update_game().unwrap();
        assert_eq!(mode.state.snake.len(), 1);
        assert_eq!(mode.metrics.best_length, 1);

        mode.update_game().unwrap();
        assert_eq!(mode.metrics.best_length, mode.state.snake.len());
        assert_eq!(mode.metrics.best_length, 2);
    }

    #[test]
    fn test_loop_error_wins_over_teardown_error() {
        let err = first_error(Err(anyhow::anyhow!("loop")), Err(anyhow::anyhow!("restore")))
            .unwrap_err();
        assert_eq!(err.to_string(), "loop");

        let err = first_error(Ok(()), Err(anyhow::anyhow!("restore"))).unwrap_err();
        assert_eq!(err.to_string(), "restore");

        assert!(first_error(Ok(()), Ok(())).is_ok());
    }

    #[test]
    fn test_update_records_apples() {
        let mut mode = PlayMode::new(GameConfig::small()).unwrap();
        let head = mode.state.snake.head();
        let direction = mode.state.snake.direction;
        mode.state.apple.position = head.moved_in_direction(direction, 10, 10);

        mode.update_game().unwrap();
        assert_eq!(mode.metrics.apples_eaten, 1);
    }

    #[test]
    fn test_game_reset() {
        let mut mode = PlayMode::new(GameConfig::small()).unwrap();
        mode.state.score = 10;
        mode.state.snake.positions.push(Position::new(0, 0));
        mode.handle_event(key(KeyCode::Char('r'))).unwrap();
        assert_eq!(mode.state.score, 0);
        assert_eq!(mode.state.snake.len(), 1);
    }

    #[test]
    fn test_quit_key() {
        let mut mode = PlayMode::new(GameConfig::small()).unwrap();
        mode.handle_event(key(KeyCode::Char('q'))).unwrap();
        assert!(mode.should_quit);
    }
}
