use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use super::{
    config::GameConfig,
    direction::Direction,
    state::{GameSnapshot, GameState, Position, Snake},
};

/// Above this share of the board covered by snake, food is drawn from the
/// enumerated free cells instead of by rejection sampling.
const DENSE_BOARD_PERCENT: usize = 80;

/// What a single call to [`GameEngine::step`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The snake advanced one cell
    Moved,
    /// The snake advanced onto the food, grew and scored
    Ate,
    /// The snake ran into itself; the game is now over
    Collided,
    /// The game was already over, nothing changed
    Halted,
}

/// The game engine that owns the state and handles all game logic
pub struct GameEngine {
    config: GameConfig,
    state: GameState,
    rng: ChaCha8Rng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        let state = Self::initial_state(&config);

        Self {
            config,
            state,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Start from an arbitrary state, e.g. a mid-game position
    pub fn with_state(config: GameConfig, state: GameState) -> Self {
        let mut engine = Self::new(config);
        engine.state = state;
        engine
    }

    fn initial_state(config: &GameConfig) -> GameState {
        GameState::new(
            Snake::new(config.initial_head),
            config.initial_food,
            config.initial_direction,
            config.board_size,
        )
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.game_over
    }

    /// Record the direction for the next step. The last call before a step wins.
    pub fn set_direction(&mut self, direction: Direction) {
        if !self.config.allow_reversal && self.state.direction.is_opposite(direction) {
            debug!(?direction, current = ?self.state.direction, "ignoring reversal");
            return;
        }
        if self.state.direction != direction {
            debug!(?direction, "direction changed");
        }
        self.state.direction = direction;
    }

    /// Reset the game to initial state
    pub fn reset(&mut self) {
        info!(final_score = self.state.score, "game reset");
        self.state = Self::initial_state(&self.config);
    }

    /// Advance the game by exactly one cell
    pub fn step(&mut self) -> StepOutcome {
        if self.state.game_over {
            return StepOutcome::Halted;
        }

        let new_head = self
            .state
            .snake
            .head()
            .wrapped_step(self.state.direction, self.state.board_size);
        let ate_food = new_head == self.state.food;
        let next = self.state.snake.advanced(new_head, ate_food);

        if next.collides_with_body(new_head) {
            self.state.game_over = true;
            info!(score = self.state.score, head = ?new_head, "snake bit itself, game over");
            return StepOutcome::Collided;
        }

        self.state.snake = next;

        if ate_food {
            self.state.score += 1;
            match self.spawn_food() {
                Some(food) => self.state.food = food,
                None => warn!("board is full, food left in place"),
            }
            debug!(score = self.state.score, food = ?self.state.food, "food eaten");
            StepOutcome::Ate
        } else {
            StepOutcome::Moved
        }
    }

    /// Pick a uniformly random cell not covered by the snake
    fn spawn_food(&mut self) -> Option<Position> {
        let size = self.state.board_size;
        let cells = size * size;
        let snake = &self.state.snake;

        if snake.len() >= cells {
            return None;
        }

        if snake.len() * 100 <= cells * DENSE_BOARD_PERCENT {
            loop {
                let x = self.rng.gen_range(0..size) as i32;
                let y = self.rng.gen_range(0..size) as i32;
                let pos = Position::new(x, y);

                if !snake.occupies(pos) {
                    return Some(pos);
                }
            }
        }

        let free: Vec<Position> = (0..size as i32)
            .flat_map(|y| (0..size as i32).map(move |x| Position::new(x, y)))
            .filter(|pos| !snake.occupies(*pos))
            .collect();
        let index = self.rng.gen_range(0..free.len());
        Some(free[index])
    }
}
