//! Input model: a level-triggered state snapshot plus a queued event stream.
//!
//! Two consumers with different needs share this module:
//!
//! - **Polled state** (`is_held`, `pointer_position`, `pointer_held`) serves
//!   microgames that react to a key or button being *down* right now, like
//!   hold-to-pet or hold-space-to-freeze.
//!
//! - **Queued events** (`push_*` / `drain_events`) serve the session phase
//!   handlers: discrete presses must be delivered exactly once, in order, to
//!   whichever phase is current when the frame processes them. The queue is
//!   drained once per frame before any timed transition runs, so a press can
//!   never be observed by two phases.

use std::collections::{HashSet, VecDeque};

/// Logical keys the arcade cares about. Anything else a platform keyboard can
/// produce maps to `Other`, which still matters: one microgame punishes every
/// key that is not `G`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Tab,
    Space,
    Escape,
    F3,
    G,
    Other,
}

/// A discrete input occurrence, delivered once to the current phase handler.
/// Pointer coordinates are in logical pixels of the draw surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerPressed { x: f32, y: f32 },
    PointerReleased { x: f32, y: f32 },
    KeyPressed(Key),
}

pub struct InputState {
    held: HashSet<Key>,
    pointer_held: bool,
    pointer_in_window: bool,
    pointer_x: f32,
    pointer_y: f32,
    prev_pointer_x: f32,
    prev_pointer_y: f32,
    events: VecDeque<InputEvent>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
            pointer_held: false,
            // Until the platform says otherwise, assume the cursor is over
            // the window; a premature "outside" reading would be observable.
            pointer_in_window: true,
            pointer_x: 0.0,
            pointer_y: 0.0,
            prev_pointer_x: 0.0,
            prev_pointer_y: 0.0,
            events: VecDeque::new(),
        }
    }

    pub fn push_key_down(&mut self, key: Key) {
        // OS key repeat re-sends key-down while held; only the first edge
        // becomes an event.
        if self.held.insert(key) {
            self.events.push_back(InputEvent::KeyPressed(key));
        }
    }

    pub fn push_key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn push_pointer_down(&mut self) {
        if !self.pointer_held {
            self.pointer_held = true;
            self.events.push_back(InputEvent::PointerPressed {
                x: self.pointer_x,
                y: self.pointer_y,
            });
        }
    }

    pub fn push_pointer_up(&mut self) {
        if self.pointer_held {
            self.pointer_held = false;
            self.events.push_back(InputEvent::PointerReleased {
                x: self.pointer_x,
                y: self.pointer_y,
            });
        }
    }

    pub fn push_pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer_x = x;
        self.pointer_y = y;
        self.pointer_in_window = true;
    }

    /// The cursor left the window client area. Move events stop arriving at
    /// the boundary, so this is the only signal that the pointer is gone.
    pub fn push_pointer_left(&mut self) {
        self.pointer_in_window = false;
    }

    pub fn push_pointer_entered(&mut self) {
        self.pointer_in_window = true;
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn pointer_held(&self) -> bool {
        self.pointer_held
    }

    pub fn pointer_in_window(&self) -> bool {
        self.pointer_in_window
    }

    pub fn pointer_position(&self) -> (f32, f32) {
        (self.pointer_x, self.pointer_y)
    }

    /// Distance the pointer travelled since the last `end_frame`. Used for
    /// "is the pointer moving" checks without every game tracking its own
    /// previous position.
    pub fn pointer_travel(&self) -> f32 {
        let dx = self.pointer_x - self.prev_pointer_x;
        let dy = self.pointer_y - self.prev_pointer_y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Take all events queued since the previous drain, in arrival order.
    pub fn drain_events(&mut self) -> Vec<InputEvent> {
        self.events.drain(..).collect()
    }

    pub fn end_frame(&mut self) {
        self.prev_pointer_x = self.pointer_x;
        self.prev_pointer_y = self.pointer_y;
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_down_sets_held_and_queues_event() {
        let mut input = InputState::new();
        input.push_key_down(Key::Space);
        assert!(input.is_held(Key::Space));
        assert_eq!(
            input.drain_events(),
            vec![InputEvent::KeyPressed(Key::Space)]
        );
    }

    #[test]
    fn key_repeat_does_not_queue_twice() {
        let mut input = InputState::new();
        input.push_key_down(Key::G);
        input.push_key_down(Key::G);
        assert_eq!(input.drain_events().len(), 1);
    }

    #[test]
    fn key_up_clears_held_without_event() {
        let mut input = InputState::new();
        input.push_key_down(Key::Tab);
        input.push_key_up(Key::Tab);
        assert!(!input.is_held(Key::Tab));
        assert_eq!(input.drain_events().len(), 1);
    }

    #[test]
    fn pointer_press_captures_current_position() {
        let mut input = InputState::new();
        input.push_pointer_moved(120.0, 40.0);
        input.push_pointer_down();
        assert!(input.pointer_held());
        assert_eq!(
            input.drain_events(),
            vec![InputEvent::PointerPressed { x: 120.0, y: 40.0 }]
        );
    }

    #[test]
    fn pointer_release_queues_event_once() {
        let mut input = InputState::new();
        input.push_pointer_down();
        input.push_pointer_up();
        input.push_pointer_up();
        let events = input.drain_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[1], InputEvent::PointerReleased { .. }));
        assert!(!input.pointer_held());
    }

    #[test]
    fn pointer_presence_tracks_leave_and_reenter() {
        let mut input = InputState::new();
        assert!(input.pointer_in_window());
        input.push_pointer_left();
        assert!(!input.pointer_in_window());
        input.push_pointer_entered();
        assert!(input.pointer_in_window());
        input.push_pointer_left();
        // A move event implies the cursor is back over the window even if
        // the enter notification was missed.
        input.push_pointer_moved(10.0, 10.0);
        assert!(input.pointer_in_window());
    }

    #[test]
    fn drain_empties_the_queue() {
        let mut input = InputState::new();
        input.push_key_down(Key::Enter);
        assert_eq!(input.drain_events().len(), 1);
        assert!(input.drain_events().is_empty());
    }

    #[test]
    fn pointer_travel_resets_at_end_frame() {
        let mut input = InputState::new();
        input.push_pointer_moved(3.0, 4.0);
        assert!((input.pointer_travel() - 5.0).abs() < f32::EPSILON);
        input.end_frame();
        assert_eq!(input.pointer_travel(), 0.0);
        input.push_pointer_moved(3.0, 10.0);
        assert!((input.pointer_travel() - 6.0).abs() < f32::EPSILON);
    }

    #[test]
    fn events_preserve_arrival_order() {
        let mut input = InputState::new();
        input.push_key_down(Key::Up);
        input.push_pointer_down();
        input.push_key_down(Key::Enter);
        let events = input.drain_events();
        assert_eq!(events[0], InputEvent::KeyPressed(Key::Up));
        assert!(matches!(events[1], InputEvent::PointerPressed { .. }));
        assert_eq!(events[2], InputEvent::KeyPressed(Key::Enter));
    }
}
