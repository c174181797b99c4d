//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies:
//! the grid state, the per-tick transition and the tick scheduler.

pub mod action;
pub mod config;
pub mod engine;
pub mod scheduler;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction, SpeedChange};
pub use config::{ConfigError, GameConfig};
pub use engine::{GameEngine, TickOutcome};
pub use scheduler::Scheduler;
pub use state::{GameState, Position, Snake};
