//! Torus Snake - Snake on a wrapping grid
//!
//! This library provides:
//! - Core game logic (game module), free of I/O
//! - Keyboard and swipe input normalization (input module)
//! - A fixed-period game clock (tick module)
//! - Terminal rendering (render module) and the interactive session (modes module)

pub mod game;
pub mod input;
pub mod modes;
pub mod render;
pub mod tick;
