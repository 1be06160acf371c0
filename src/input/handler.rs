use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use tracing::trace;

use super::swipe::{PointerPosition, SwipeTracker};
use crate::game::{Direction, GameConfig};

/// What the session should do in response to a terminal event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputIntent {
    Steer(Direction),
    Restart,
    Quit,
    None,
}

/// Turns raw terminal events into intents. Keys map directly; left-button
/// mouse drags go through a [`SwipeTracker`].
pub struct InputHandler {
    swipe: SwipeTracker,
    cell_width_px: f32,
    cell_height_px: f32,
}

impl InputHandler {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            swipe: SwipeTracker::new(config.swipe_threshold),
            cell_width_px: config.cell_width_px,
            cell_height_px: config.cell_height_px,
        }
    }

    pub fn handle_event(&mut self, event: &Event) -> InputIntent {
        match event {
            Event::Key(key) => self.handle_key_event(*key),
            Event::Mouse(mouse) => self.handle_mouse_event(*mouse),
            Event::FocusLost => {
                self.swipe.cancel();
                InputIntent::None
            }
            _ => InputIntent::None,
        }
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> InputIntent {
        // Held keys repeat; releases are ignored
        if key.kind == KeyEventKind::Release {
            return InputIntent::None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return InputIntent::Quit;
        }

        match key.code {
            KeyCode::Up => InputIntent::Steer(Direction::Up),
            KeyCode::Down => InputIntent::Steer(Direction::Down),
            KeyCode::Left => InputIntent::Steer(Direction::Left),
            KeyCode::Right => InputIntent::Steer(Direction::Right),

            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'w' => InputIntent::Steer(Direction::Up),
                's' => InputIntent::Steer(Direction::Down),
                'a' => InputIntent::Steer(Direction::Left),
                'd' => InputIntent::Steer(Direction::Right),
                'r' => InputIntent::Restart,
                'q' => InputIntent::Quit,
                _ => InputIntent::None,
            },

            KeyCode::Esc => InputIntent::Quit,
            _ => InputIntent::None,
        }
    }

    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) -> InputIntent {
        let position = PointerPosition::from_cell(
            mouse.column,
            mouse.row,
            self.cell_width_px,
            self.cell_height_px,
        );

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.swipe.touch_start(position);
                InputIntent::None
            }
            MouseEventKind::Drag(MouseButton::Left) => self
                .swipe
                .touch_move(position)
                .map_or(InputIntent::None, InputIntent::Steer),
            MouseEventKind::Up(MouseButton::Left) => {
                if self.swipe.is_tracking() {
                    trace!("pointer released before a swipe registered");
                }
                self.swipe.cancel();
                InputIntent::None
            }
            _ => InputIntent::None,
        }
    }
}
