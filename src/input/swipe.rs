//! Pointer swipe recognition
//!
//! A gesture is a start point and an end point in screen pixels (y grows
//! downward). The dominant axis decides between horizontal and vertical, and
//! the gesture only counts when travel along that axis exceeds the threshold.

use tracing::trace;

use crate::game::{Direction, GameEngine};

/// Default minimum travel, in pixels, along the dominant axis
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 50.0;

/// A pointer location in screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPosition {
    pub x: f32,
    pub y: f32,
}

impl PointerPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Approximate pixel position of a terminal cell
    pub fn from_cell(column: u16, row: u16, cell_width_px: f32, cell_height_px: f32) -> Self {
        Self {
            x: f32::from(column) * cell_width_px,
            y: f32::from(row) * cell_height_px,
        }
    }
}

/// Receivers of recognized swipes. Every callback defaults to doing nothing.
pub trait SwipeHandler {
    fn on_swipe_up(&mut self) {}
    fn on_swipe_down(&mut self) {}
    fn on_swipe_left(&mut self) {}
    fn on_swipe_right(&mut self) {}
}

impl SwipeHandler for GameEngine {
    fn on_swipe_up(&mut self) {
        self.set_direction(Direction::Up);
    }

    fn on_swipe_down(&mut self) {
        self.set_direction(Direction::Down);
    }

    fn on_swipe_left(&mut self) {
        self.set_direction(Direction::Left);
    }

    fn on_swipe_right(&mut self) {
        self.set_direction(Direction::Right);
    }
}

/// Route a recognized swipe to the matching callback
pub fn dispatch<H: SwipeHandler + ?Sized>(direction: Direction, handler: &mut H) {
    match direction {
        Direction::Up => handler.on_swipe_up(),
        Direction::Down => handler.on_swipe_down(),
        Direction::Left => handler.on_swipe_left(),
        Direction::Right => handler.on_swipe_right(),
    }
}

/// Classify a finished gesture. Returns `None` below the threshold.
pub fn classify(start: PointerPosition, end: PointerPosition, threshold: f32) -> Option<Direction> {
    let delta_x = start.x - end.x;
    let delta_y = start.y - end.y;
    let is_horizontal = delta_x.abs() > delta_y.abs();

    if is_horizontal && delta_x.abs() > threshold {
        if delta_x > 0.0 {
            Some(Direction::Left)
        } else {
            Some(Direction::Right)
        }
    } else if !is_horizontal && delta_y.abs() > threshold {
        if delta_y > 0.0 {
            Some(Direction::Up)
        } else {
            Some(Direction::Down)
        }
    } else {
        None
    }
}

/// Gesture buffer for one pointer. The start point is held while the
/// pointer travels; the first move that crosses the threshold fires and
/// clears it, so each press yields at most one swipe.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: f32,
    start: Option<PointerPosition>,
}

impl SwipeTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            start: None,
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    /// Pointer went down. Any unfinished gesture is dropped.
    pub fn touch_start(&mut self, position: PointerPosition) {
        self.start = Some(position);
    }

    /// Pointer moved. Fires once travel from the start point exceeds the
    /// threshold; shorter travel keeps the gesture open.
    pub fn touch_move(&mut self, position: PointerPosition) -> Option<Direction> {
        let start = self.start?;

        let swipe = classify(start, position, self.threshold);
        trace!(?start, end = ?position, ?swipe, "gesture evaluated");
        if swipe.is_some() {
            self.start = None;
        }
        swipe
    }

    /// Like [`touch_move`](Self::touch_move), but hands the result straight to `handler`
    pub fn touch_move_with<H: SwipeHandler + ?Sized>(
        &mut self,
        position: PointerPosition,
        handler: &mut H,
    ) -> Option<Direction> {
        let swipe = self.touch_move(position)?;
        dispatch(swipe, handler);
        Some(swipe)
    }

    /// Pointer released or the gesture was interrupted
    pub fn cancel(&mut self) {
        self.start = None;
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameConfig;

    #[derive(Default)]
    struct Recorder {
        fired: Vec<Direction>,
    }

    impl SwipeHandler for Recorder {
        fn on_swipe_up(&mut self) {
            self.fired.push(Direction::Up);
        }
        fn on_swipe_down(&mut self) {
            self.fired.push(Direction::Down);
        }
        fn on_swipe_left(&mut self) {
            self.fired.push(Direction::Left);
        }
        fn on_swipe_right(&mut self) {
            self.fired.push(Direction::Right);
        }
    }

    fn at(x: f32, y: f32) -> PointerPosition {
        PointerPosition::new(x, y)
    }

    #[test]
    fn test_vertical_drag_down() {
        assert_eq!(
            classify(at(0.0, 0.0), at(0.0, 100.0), DEFAULT_SWIPE_THRESHOLD),
            Some(Direction::Down)
        );
    }

    #[test]
    fn test_sub_threshold_drag_is_ignored() {
        assert_eq!(
            classify(at(0.0, 0.0), at(0.0, 10.0), DEFAULT_SWIPE_THRESHOLD),
            None
        );
        // Exactly at the threshold does not count either
        assert_eq!(
            classify(at(0.0, 0.0), at(50.0, 0.0), DEFAULT_SWIPE_THRESHOLD),
            None
        );
    }

    #[test]
    fn test_sign_convention() {
        let t = DEFAULT_SWIPE_THRESHOLD;
        assert_eq!(classify(at(100.0, 0.0), at(0.0, 0.0), t), Some(Direction::Left));
        assert_eq!(classify(at(0.0, 0.0), at(100.0, 0.0), t), Some(Direction::Right));
        assert_eq!(classify(at(0.0, 100.0), at(0.0, 0.0), t), Some(Direction::Up));
        assert_eq!(classify(at(0.0, 0.0), at(0.0, 100.0), t), Some(Direction::Down));
    }

    #[test]
    fn test_dominant_axis_wins() {
        let t = DEFAULT_SWIPE_THRESHOLD;
        assert_eq!(classify(at(0.0, 0.0), at(90.0, 60.0), t), Some(Direction::Right));
        assert_eq!(classify(at(0.0, 0.0), at(-60.0, -90.0), t), Some(Direction::Up));
        // A perfect diagonal counts as vertical
        assert_eq!(classify(at(0.0, 0.0), at(80.0, 80.0), t), Some(Direction::Down));
    }

    #[test]
    fn test_long_minor_axis_does_not_rescue_short_major_axis() {
        // Horizontal dominates but only travels 40px: vertical is never considered
        assert_eq!(
            classify(at(0.0, 0.0), at(40.0, 30.0), DEFAULT_SWIPE_THRESHOLD),
            None
        );
    }

    #[test]
    fn test_tracker_fires_once_per_gesture() {
        let mut tracker = SwipeTracker::default();
        let mut recorder = Recorder::default();

        tracker.touch_start(at(0.0, 0.0));
        assert_eq!(
            tracker.touch_move_with(at(0.0, 100.0), &mut recorder),
            Some(Direction::Down)
        );
        assert!(!tracker.is_tracking());

        // Further movement in the same gesture has no start to compare against
        assert_eq!(tracker.touch_move_with(at(0.0, 300.0), &mut recorder), None);
        assert_eq!(recorder.fired, vec![Direction::Down]);
    }

    #[test]
    fn test_short_moves_keep_gesture_open() {
        let mut tracker = SwipeTracker::default();

        tracker.touch_start(at(0.0, 0.0));
        assert_eq!(tracker.touch_move(at(0.0, 10.0)), None);
        assert_eq!(tracker.touch_move(at(0.0, 50.0)), None);
        assert!(tracker.is_tracking());

        assert_eq!(tracker.touch_move(at(0.0, 60.0)), Some(Direction::Down));
        assert!(!tracker.is_tracking());
    }

    #[test]
    fn test_gradual_drag_fires_once() {
        let mut tracker = SwipeTracker::default();
        let mut recorder = Recorder::default();

        tracker.touch_start(at(200.0, 100.0));
        for step in 1..=15 {
            tracker.touch_move_with(at(200.0 - 10.0 * step as f32, 100.0), &mut recorder);
        }
        tracker.cancel();

        assert_eq!(recorder.fired, vec![Direction::Left]);
    }

    #[test]
    fn test_released_short_drag_fires_nothing() {
        let mut tracker = SwipeTracker::default();

        tracker.touch_start(at(0.0, 0.0));
        assert_eq!(tracker.touch_move(at(0.0, 10.0)), None);
        tracker.cancel();
        assert!(!tracker.is_tracking());
        assert_eq!(tracker.touch_move(at(0.0, 200.0)), None);
    }

    #[test]
    fn test_new_gesture_starts_fresh() {
        let mut tracker = SwipeTracker::new(20.0);

        tracker.touch_start(at(0.0, 0.0));
        assert_eq!(tracker.touch_move(at(-30.0, 0.0)), Some(Direction::Left));

        tracker.touch_start(at(500.0, 500.0));
        assert_eq!(tracker.touch_move(at(500.0, 470.0)), Some(Direction::Up));
    }

    #[test]
    fn test_cancel_drops_gesture() {
        let mut tracker = SwipeTracker::default();

        tracker.touch_start(at(0.0, 0.0));
        tracker.cancel();
        assert_eq!(tracker.touch_move(at(0.0, 100.0)), None);
    }

    #[test]
    fn test_from_cell_scales_to_pixels() {
        let pos = PointerPosition::from_cell(6, 3, 10.0, 20.0);
        assert_eq!(pos, at(60.0, 60.0));
    }

    #[test]
    fn test_swipe_steers_engine() {
        let mut engine = GameEngine::new(GameConfig::default());
        let mut tracker = SwipeTracker::default();

        tracker.touch_start(at(0.0, 200.0));
        tracker.touch_move_with(at(0.0, 0.0), &mut engine);

        assert_eq!(engine.state().direction, Direction::Up);
    }

    #[test]
    fn test_default_callbacks_are_noops() {
        struct OnlyLeft(u32);
        impl SwipeHandler for OnlyLeft {
            fn on_swipe_left(&mut self) {
                self.0 += 1;
            }
        }

        let mut handler = OnlyLeft(0);
        for direction in Direction::ALL {
            dispatch(direction, &mut handler);
        }
        assert_eq!(handler.0, 1);
    }
}
