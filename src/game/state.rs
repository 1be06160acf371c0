use serde::{Deserialize, Serialize};

use super::direction::Direction;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move by one cell in `direction`, wrapping both axes onto a
    /// `board_size` x `board_size` torus.
    pub fn wrapped_step(&self, direction: Direction, board_size: usize) -> Self {
        let size = board_size as i32;
        let (dx, dy) = direction.delta();
        Self {
            x: (self.x + dx).rem_euclid(size),
            y: (self.y + dy).rem_euclid(size),
        }
    }

    pub fn is_within(&self, board_size: usize) -> bool {
        let size = board_size as i32;
        (0..size).contains(&self.x) && (0..size).contains(&self.y)
    }
}

/// The snake in the game. Never empty: every constructor requires a head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    /// Body segments, with head at index 0
    body: Vec<Position>,
}

impl Snake {
    /// Create a single-segment snake
    pub fn new(head: Position) -> Self {
        Self { body: vec![head] }
    }

    /// Build a snake from head-first segments. Returns `None` for an empty list.
    pub fn from_segments(body: Vec<Position>) -> Option<Self> {
        if body.is_empty() {
            None
        } else {
            Some(Self { body })
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// All segments, head first
    pub fn segments(&self) -> &[Position] {
        &self.body
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// The snake after its head moves to `new_head`. The tail is kept when
    /// `grow` is set and dropped otherwise.
    pub fn advanced(&self, new_head: Position, grow: bool) -> Snake {
        let keep = if grow {
            self.body.len()
        } else {
            self.body.len() - 1
        };

        let mut body = Vec::with_capacity(keep + 1);
        body.push(new_head);
        body.extend_from_slice(&self.body[..keep]);
        Snake { body }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; `new`, `from_segments` and `advanced` all keep the head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Complete game state, owned by one [`GameEngine`](super::GameEngine)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub direction: Direction,
    pub board_size: usize,
    pub score: u32,
    pub game_over: bool,
}

impl GameState {
    pub fn new(snake: Snake, food: Position, direction: Direction, board_size: usize) -> Self {
        Self {
            snake,
            food,
            direction,
            board_size,
            score: 0,
            game_over: false,
        }
    }

    /// Owned copy of what a renderer needs
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            snake: self.snake.segments().to_vec(),
            food: self.food,
            board_size: self.board_size,
            score: self.score,
            game_over: self.game_over,
        }
    }
}

/// Read-only view handed across the render boundary after every step and reset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub snake: Vec<Position>,
    pub food: Position,
    pub board_size: usize,
    pub score: u32,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_step_moves_one_cell() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.wrapped_step(Direction::Right, 15), Position::new(6, 5));
        assert_eq!(pos.wrapped_step(Direction::Left, 15), Position::new(4, 5));
        assert_eq!(pos.wrapped_step(Direction::Down, 15), Position::new(5, 6));
        assert_eq!(pos.wrapped_step(Direction::Up, 15), Position::new(5, 4));
    }

    #[test]
    fn test_wrapped_step_wraps_every_edge() {
        assert_eq!(
            Position::new(0, 7).wrapped_step(Direction::Left, 15),
            Position::new(14, 7)
        );
        assert_eq!(
            Position::new(14, 7).wrapped_step(Direction::Right, 15),
            Position::new(0, 7)
        );
        assert_eq!(
            Position::new(3, 0).wrapped_step(Direction::Up, 15),
            Position::new(3, 14)
        );
        assert_eq!(
            Position::new(3, 14).wrapped_step(Direction::Down, 15),
            Position::new(3, 0)
        );
    }

    #[test]
    fn test_bounds_checking() {
        assert!(Position::new(0, 0).is_within(15));
        assert!(Position::new(14, 14).is_within(15));
        assert!(!Position::new(-1, 0).is_within(15));
        assert!(!Position::new(15, 0).is_within(15));
        assert!(!Position::new(0, 15).is_within(15));
    }

    #[test]
    fn test_snake_advance_without_growing() {
        let snake =
            Snake::from_segments(vec![Position::new(5, 5), Position::new(4, 5)]).unwrap();

        let moved = snake.advanced(Position::new(6, 5), false);
        assert_eq!(moved.segments(), vec![Position::new(6, 5), Position::new(5, 5)]);
    }

    #[test]
    fn test_snake_advance_with_growing() {
        let snake = Snake::new(Position::new(7, 7));

        let grown = snake.advanced(Position::new(8, 7), true);
        assert_eq!(grown.segments(), vec![Position::new(8, 7), Position::new(7, 7)]);
        assert_eq!(grown.len(), 2);
    }

    #[test]
    fn test_collision_detection() {
        let snake = Snake::from_segments(vec![
            Position::new(5, 5),
            Position::new(4, 5),
            Position::new(3, 5),
        ])
        .unwrap();
        assert!(!snake.collides_with_body(Position::new(5, 5))); // head
        assert!(snake.collides_with_body(Position::new(4, 5))); // body
        assert!(!snake.collides_with_body(Position::new(10, 10))); // empty
    }

    #[test]
    fn test_empty_segments_rejected() {
        assert!(Snake::from_segments(Vec::new()).is_none());
    }

    #[test]
    fn test_advancing_single_segment_keeps_head() {
        let mut snake = Snake::new(Position::new(0, 0));
        for x in 1..20 {
            snake = snake.advanced(Position::new(x, 0), false);
            assert_eq!(snake.len(), 1);
            assert!(!snake.is_empty());
            assert_eq!(snake.head(), Position::new(x, 0));
        }
    }

    #[test]
    fn test_snapshot_copies_render_fields() {
        let mut state = GameState::new(
            Snake::new(Position::new(7, 7)),
            Position::new(5, 5),
            Direction::Right,
            15,
        );
        state.score = 3;

        let snapshot = state.snapshot();
        assert_eq!(snapshot.snake, vec![Position::new(7, 7)]);
        assert_eq!(snapshot.head(), Some(Position::new(7, 7)));
        assert_eq!(snapshot.food, Position::new(5, 5));
        assert_eq!(snapshot.score, 3);
        assert!(!snapshot.game_over);
    }
}
