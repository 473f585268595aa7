use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the game rules
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// Every cell is covered by the snake, so the apple has nowhere to go
    #[error("no free cell left for the apple on a {width}x{height} grid")]
    NoFreeCell { width: usize, height: usize },
}

/// Errors raised while loading or validating a [`GameConfig`](super::GameConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}
