//! Torus Snake - single-screen Snake on a wrapping grid
//!
//! This library provides:
//! - Core game logic (game module)
//! - Keyboard translation (input module)
//! - TUI rendering (render module)
//! - Session counters (metrics module)
//! - The interactive game loop (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
