//! Grid Snake - a terminal snake game on a wrap-around grid
//!
//! This library provides:
//! - Core game logic: state, per-tick transition and tick scheduling (game module)
//! - Keyboard mapping (input module)
//! - Draw list and TUI rendering (render module)
//! - The interactive frame loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
