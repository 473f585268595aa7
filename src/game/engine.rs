use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use tracing::{debug, info, warn};

use super::{
    action::Direction,
    config::GameConfig,
    error::GameError,
    state::{Apple, GameState, Position, Snake},
};

/// Why the snake was sent back to a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetReason {
    /// The head ran into the body
    SelfCollision,
    /// The snake covered every cell of the grid
    BoardFull,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StepResult {
    /// Whether the snake ate the apple this step
    pub ate_apple: bool,
    /// Set when this step ended the run
    pub reset: Option<ResetReason>,
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a fresh game: a one-cell snake in the center and an apple on a free cell
    pub fn new_game(&mut self) -> Result<GameState, GameError> {
        let (width, height) = (self.config.grid_width, self.config.grid_height);
        let center = Position::new((width / 2) as i32, (height / 2) as i32);

        let snake = Snake::new(
            center,
            Direction::random(&mut self.rng),
            self.config.snake_color,
        );
        let apple = Apple::new(center, self.config.apple_color);

        let mut state = GameState::new(snake, apple, width, height);
        self.place_apple(&mut state)?;

        info!(
            width,
            height,
            direction = ?state.snake.direction,
            apple = ?state.apple.position,
            "new game"
        );
        Ok(state)
    }

    /// Buffer a turn requested by the player. Reversals are ignored.
    pub fn steer(&self, state: &mut GameState, direction: Direction) -> bool {
        let accepted = state.snake.request_direction(direction);
        if !accepted {
            debug!(heading = ?state.snake.direction, requested = ?direction, "turn rejected");
        }
        accepted
    }

    /// Execute one tick of the game
    pub fn step(&mut self, state: &mut GameState) -> Result<StepResult, GameError> {
        state.snake.advance(state.grid_width, state.grid_height);
        state.snake.update_direction();
        state.steps += 1;

        if state.snake.head_hits_body() {
            self.reset_snake(state, ResetReason::SelfCollision)?;
            return Ok(StepResult {
                ate_apple: false,
                reset: Some(ResetReason::SelfCollision),
            });
        }

        if state.is_board_full() {
            self.reset_snake(state, ResetReason::BoardFull)?;
            return Ok(StepResult {
                ate_apple: false,
                reset: Some(ResetReason::BoardFull),
            });
        }

        let ate_apple = state.snake.head() == state.apple.position;
        if ate_apple {
            state.snake.grow();
            state.score += 1;
            self.place_apple(state)?;
            debug!(
                length = state.snake.length,
                score = state.score,
                "apple eaten"
            );
        }

        Ok(StepResult {
            ate_apple,
            reset: None,
        })
    }

    /// Move the apple to a cell chosen uniformly among those the snake does not cover
    pub fn place_apple(&mut self, state: &mut GameState) -> Result<Position, GameError> {
        let free = state.free_cells();
        let Some(&position) = free.choose(&mut self.rng) else {
            warn!(
                width = state.grid_width,
                height = state.grid_height,
                "no free cell for the apple"
            );
            return Err(GameError::NoFreeCell {
                width: state.grid_width,
                height: state.grid_height,
            });
        };

        state.apple.position = position;
        debug!(apple = ?position, free = free.len(), "apple placed");
        Ok(position)
    }

    /// Send the snake back to the center as a single cell and relocate the apple
    pub fn reset_snake(
        &mut self,
        state: &mut GameState,
        reason: ResetReason,
    ) -> Result<(), GameError> {
        info!(
            ?reason,
            length = state.snake.len(),
            score = state.score,
            steps = state.steps,
            "snake reset"
        );

        let center = state.center();
        let direction = Direction::random(&mut self.rng);
        state.snake.reset(center, direction);
        state.score = 0;
        state.resets += 1;
        self.place_apple(state)?;
        Ok(())
    }
}
