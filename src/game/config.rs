use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest accepted grid side, in cells
pub const MAX_GRID_DIMENSION: usize = 1000;

/// Largest accepted block size, in pixels
pub const MAX_BLOCK_SIZE: u32 = 1000;

/// Reasons a configuration cannot be played
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("initial snake length must be at least 1")]
    EmptySnake,

    #[error("grid {width}x{height} cannot hold a starting snake of length {length}")]
    GridTooSmall {
        width: usize,
        height: usize,
        length: usize,
    },

    #[error("grid {width}x{height} exceeds the {max}x{max} limit")]
    GridTooLarge {
        width: usize,
        height: usize,
        max: usize,
    },

    #[error("block size must be between 1 and {max} pixels, got {size}")]
    BlockSize { size: u32, max: u32 },

    #[error("tick step must be positive")]
    ZeroTickStep,

    #[error("tick interval bounds are inconsistent: min {min}ms, default {default}ms, max {max}ms")]
    TickBounds { min: u64, default: u64, max: u64 },
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Edge length of one cell on the drawing surface, in pixels
    pub block_size: u32,

    // Tick rate
    /// Starting interval between ticks
    pub tick_interval_ms: u64,
    /// Fastest allowed interval
    pub min_tick_interval_ms: u64,
    /// Slowest allowed interval
    pub max_tick_interval_ms: u64,
    /// Amount one speed key press changes the interval by
    pub tick_step_ms: u64,

    /// Re-roll food that lands on the snake
    pub food_avoids_snake: bool,
    /// Reject reversals of the last completed move rather than of the latest request
    pub guard_double_turn: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            initial_snake_length: 3,
            block_size: 25,
            tick_interval_ms: 200,
            min_tick_interval_ms: 50,
            max_tick_interval_ms: 1000,
            tick_step_ms: 25,
            food_avoids_snake: false,
            guard_double_turn: false,
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

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {:?}", path))
    }

    /// Check that the configuration describes a playable game.
    ///
    /// The starting snake lies horizontally to the left of the grid centre,
    /// so the left half of the grid must fit every body cell behind the head.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_snake_length == 0 {
            return Err(ConfigError::EmptySnake);
        }
        if self.grid_width == 0
            || self.grid_height == 0
            || self.grid_width / 2 + 1 < self.initial_snake_length
        {
            return Err(ConfigError::GridTooSmall {
                width: self.grid_width,
                height: self.grid_height,
                length: self.initial_snake_length,
            });
        }
        if self.grid_width > MAX_GRID_DIMENSION || self.grid_height > MAX_GRID_DIMENSION {
            return Err(ConfigError::GridTooLarge {
                width: self.grid_width,
                height: self.grid_height,
                max: MAX_GRID_DIMENSION,
            });
        }
        if self.block_size == 0 || self.block_size > MAX_BLOCK_SIZE {
            return Err(ConfigError::BlockSize {
                size: self.block_size,
                max: MAX_BLOCK_SIZE,
            });
        }
        if self.tick_step_ms == 0 {
            return Err(ConfigError::ZeroTickStep);
        }
        if self.min_tick_interval_ms == 0
            || self.min_tick_interval_ms > self.tick_interval_ms
            || self.tick_interval_ms > self.max_tick_interval_ms
        {
            return Err(ConfigError::TickBounds {
                min: self.min_tick_interval_ms,
                default: self.tick_interval_ms,
                max: self.max_tick_interval_ms,
            });
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn min_tick_interval(&self) -> Duration {
        Duration::from_millis(self.min_tick_interval_ms)
    }

    pub fn max_tick_interval(&self) -> Duration {
        Duration::from_millis(self.max_tick_interval_ms)
    }

    pub fn tick_step(&self) -> Duration {
        Duration::from_millis(self.tick_step_ms)
    }

    /// Size of the drawing surface in pixels
    pub fn surface_size(&self) -> (u32, u32) {
        (
            self.grid_width as u32 * self.block_size,
            self.grid_height as u32 * self.block_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.initial_snake_length, 3);
        assert_eq!(config.tick_interval(), Duration::from_millis(200));
        assert_eq!(config.surface_size(), (500, 500));
        assert!(!config.food_avoids_snake);
        assert!(!config.guard_double_turn);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 12);
        assert_eq!(config.block_size, 25);
    }

    #[test]
    fn test_grid_too_small() {
        let config = GameConfig::new(3, 3);
        assert_eq!(
            config.validate(),
            Err(ConfigError::GridTooSmall {
                width: 3,
                height: 3,
                length: 3
            })
        );

        // Smallest width that fits three cells left of centre
        assert_eq!(GameConfig::new(4, 1).validate(), Ok(()));

        // A one-cell snake still needs a grid to move on
        let config = GameConfig {
            grid_width: 0,
            initial_snake_length: 1,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::GridTooSmall {
                width: 0,
                height: 20,
                length: 1
            })
        );
        let config = GameConfig {
            grid_height: 0,
            initial_snake_length: 1,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GridTooSmall { .. })
        ));
    }

    #[test]
    fn test_oversized_surface_rejected() {
        let config = GameConfig::new(MAX_GRID_DIMENSION + 1, 20);
        assert_eq!(
            config.validate(),
            Err(ConfigError::GridTooLarge {
                width: MAX_GRID_DIMENSION + 1,
                height: 20,
                max: MAX_GRID_DIMENSION
            })
        );
        assert_eq!(
            GameConfig::new(MAX_GRID_DIMENSION, MAX_GRID_DIMENSION).validate(),
            Ok(())
        );

        let config = GameConfig {
            block_size: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::BlockSize {
                size: 0,
                max: MAX_BLOCK_SIZE
            })
        );
        let config = GameConfig {
            block_size: MAX_BLOCK_SIZE + 1,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::BlockSize { .. })));

        // Largest accepted surface still fits in u32
        let config = GameConfig {
            grid_width: MAX_GRID_DIMENSION,
            grid_height: MAX_GRID_DIMENSION,
            block_size: MAX_BLOCK_SIZE,
            ..Default::default()
        };
        assert_eq!(config.surface_size(), (1_000_000, 1_000_000));
    }

    #[test]
    fn test_tick_bounds_rejected() {
        let config = GameConfig {
            tick_interval_ms: 20,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TickBounds { .. })
        ));

        let config = GameConfig {
            tick_step_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTickStep));
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "grid_width": 30, "tick_interval_ms": 150 }}"#).unwrap();

        let config = GameConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.grid_width, 30);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.tick_interval_ms, 150);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = GameConfig::from_json_file(&dir.path().join("absent.json"));
        assert!(result.is_err());
    }
}
