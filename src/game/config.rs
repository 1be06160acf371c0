use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::state::Position;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square, wrapping grid
    pub board_size: usize,
    /// Where the one-segment snake starts
    pub initial_head: Position,
    /// Where the first food item sits
    pub initial_food: Position,
    pub initial_direction: Direction,
    /// Period between two game steps
    pub tick_interval_ms: u64,
    /// Minimum dominant-axis travel, in pixels, for a pointer drag to count as a swipe
    pub swipe_threshold: f32,
    /// When false, a direction opposite the current one is ignored
    pub allow_reversal: bool,
    /// Seed for food placement; random when unset
    pub seed: Option<u64>,

    // Terminal pointer input
    /// Pixel width assumed for one terminal column
    pub cell_width_px: f32,
    /// Pixel height assumed for one terminal row
    pub cell_height_px: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 15,
            initial_head: Position::new(7, 7),
            initial_food: Position::new(5, 5),
            initial_direction: Direction::Right,
            tick_interval_ms: 200,
            swipe_threshold: 50.0,
            allow_reversal: true,
            seed: None,
            cell_width_px: 10.0,
            cell_height_px: 20.0,
        }
    }
}

impl GameConfig {
    /// Default configuration on a board of a different size, with the snake
    /// centered and the food two cells up and to the left of it
    pub fn with_board_size(board_size: usize) -> Self {
        let center = (board_size / 2) as i32;
        let food = (center - 2).max(0);
        Self {
            board_size,
            initial_head: Position::new(center, center),
            initial_food: Position::new(food, food),
            ..Default::default()
        }
    }

    /// Read a JSON configuration file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size < 2 || self.board_size > i32::MAX as usize {
            return Err(ConfigError::BoardSize(self.board_size));
        }
        if !self.initial_head.is_within(self.board_size) {
            return Err(ConfigError::OutOfBounds {
                what: "initial_head",
                position: self.initial_head,
                board_size: self.board_size,
            });
        }
        if !self.initial_food.is_within(self.board_size) {
            return Err(ConfigError::OutOfBounds {
                what: "initial_food",
                position: self.initial_food,
                board_size: self.board_size,
            });
        }
        if self.initial_food == self.initial_head {
            return Err(ConfigError::FoodOnSnake(self.initial_food));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if !is_positive(self.swipe_threshold) {
            return Err(ConfigError::SwipeThreshold(self.swipe_threshold));
        }
        if !is_positive(self.cell_width_px) || !is_positive(self.cell_height_px) {
            return Err(ConfigError::CellSize {
                width: self.cell_width_px,
                height: self.cell_height_px,
            });
        }
        Ok(())
    }
}

/// False for NaN as well as zero and below
fn is_positive(value: f32) -> bool {
    value > 0.0
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Board size must be at least 2, got {0}")]
    BoardSize(usize),

    #[error("{what} {position:?} lies outside a {board_size}x{board_size} board")]
    OutOfBounds {
        what: &'static str,
        position: Position,
        board_size: usize,
    },

    #[error("Initial food {0:?} overlaps the initial snake")]
    FoodOnSnake(Position),

    #[error("Tick interval must be non-zero")]
    ZeroTickInterval,

    #[error("Swipe threshold must be positive, got {0}")]
    SwipeThreshold(f32),

    #[error("Pointer cell size must be positive, got {width}x{height}")]
    CellSize { width: f32, height: f32 },
}
