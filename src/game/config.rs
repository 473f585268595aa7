use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::error::ConfigError;

/// Width of the reference play surface in pixels
pub const SCREEN_WIDTH: usize = 640;
/// Height of the reference play surface in pixels
pub const SCREEN_HEIGHT: usize = 480;
/// Side of one grid cell in pixels
pub const CELL_SIZE: usize = 20;
/// Largest accepted grid width or height, in cells
pub const MAX_GRID_SIDE: usize = 1024;

/// An RGB color, serialized as `[r, g, b]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    pub const CYAN: Rgb = Rgb(93, 216, 228);
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub grid_width: usize,
    /// Height of the game grid in cells
    pub grid_height: usize,
    /// Snake moves per second
    pub speed: u32,
    /// Fixed RNG seed; a fresh entropy seed is used when absent
    pub seed: Option<u64>,

    pub apple_color: Rgb,
    pub snake_color: Rgb,
    pub border_color: Rgb,
    pub background_color: Rgb,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: SCREEN_WIDTH / CELL_SIZE,
            grid_height: SCREEN_HEIGHT / CELL_SIZE,
            speed: 10,
            seed: None,
            apple_color: Rgb::RED,
            snake_color: Rgb::GREEN,
            border_color: Rgb::CYAN,
            background_color: Rgb::BLACK,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small seeded grid for testing
    pub fn small() -> Self {
        Self {
            seed: Some(42),
            ..Self::new(10, 10)
        }
    }

    /// Load a (possibly partial) configuration from a TOML file.
    ///
    /// Missing keys fall back to [`GameConfig::default`]. The result is not
    /// validated so that command-line overrides can still be applied.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check that the grid can hold a snake and an apple and that the game can tick
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "grid must be non-empty, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if self.grid_width > MAX_GRID_SIDE || self.grid_height > MAX_GRID_SIDE {
            return Err(ConfigError::Invalid(format!(
                "grid {}x{} is too large (max {MAX_GRID_SIDE} cells per side)",
                self.grid_width, self.grid_height
            )));
        }
        if self.total_cells() < 2 {
            return Err(ConfigError::Invalid(
                "grid needs at least two cells (one for the snake, one for the apple)".into(),
            ));
        }
        if self.speed == 0 {
            return Err(ConfigError::Invalid("speed must be at least 1".into()));
        }
        Ok(())
    }

    pub fn total_cells(&self) -> usize {
        self.grid_width * self.grid_height
    }

    /// Time between two snake moves
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.speed.max(1)
    }
}
