//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The grid is a torus: the snake leaves one edge and re-enters on the opposite one.

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::{CELL_SIZE, GameConfig, MAX_GRID_SIDE, Rgb, SCREEN_HEIGHT, SCREEN_WIDTH};
pub use engine::{GameEngine, ResetReason, StepResult};
pub use error::{ConfigError, GameError};
pub use state::{Apple, GameState, Position, Snake};
