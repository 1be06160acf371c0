//! Input normalization: keyboard keys and pointer swipes both become a
//! [`Direction`](crate::game::Direction) for the engine.

pub mod handler;
pub mod swipe;

pub use handler::{InputHandler, InputIntent};
pub use swipe::{PointerPosition, SwipeHandler, SwipeTracker, classify, dispatch};
