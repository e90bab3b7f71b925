//=========================================================================
// State Tracker
//=========================================================================
//
// Input state with per-frame delta tracking.
//
// Architecture:
//   InputEvent → process_events() → HashSet (keys/buttons held) → query
//
// Frame lifecycle: clear() → process_events() → finalize_frame() → query
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, MouseButton};

//=== StateTracker ========================================================

/// Tracks persistent state (held keys, cursor) and per-frame deltas.
pub struct StateTracker {
    //--- Persistent State (survives frame boundary) ----------------------
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    mouse_position: Option<(f32, f32)>,

    //--- Frame Deltas (reset each frame via clear()) --------------------
    keys_pressed: HashSet<KeyCode>,
    keys_released: HashSet<KeyCode>,
    buttons_pressed: HashSet<MouseButton>,
    buttons_released: HashSet<MouseButton>,
    mouse_moved: bool,
    last_mouse_position: Option<(f32, f32)>,
}

impl StateTracker {
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            buttons_down: HashSet::new(),
            mouse_position: None,
            keys_pressed: HashSet::new(),
            keys_released: HashSet::new(),
            buttons_pressed: HashSet::new(),
            buttons_released: HashSet::new(),
            mouse_moved: false,
            last_mouse_position: None,
        }
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears frame-specific deltas.
    pub fn clear(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.mouse_moved = false;
        self.last_mouse_position = self.mouse_position;
    }

    /// Applies a batch of events.
    pub fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    /// Finalizes frame calculations.
    pub fn finalize_frame(&mut self) {
        self.mouse_moved = self.mouse_position != self.last_mouse_position;
    }

    //--- Internal Helpers -------------------------------------------------

    fn process_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown { key } => {
                // Held keys repeat; only the first down counts as a press
                if self.keys_down.insert(key) {
                    self.keys_pressed.insert(key);
                }
            }
            InputEvent::KeyUp { key } => {
                if self.keys_down.remove(&key) {
                    self.keys_released.insert(key);
                }
            }
            InputEvent::MouseButtonDown { button } => {
                if self.buttons_down.insert(button) {
                    self.buttons_pressed.insert(button);
                }
            }
            InputEvent::MouseButtonUp { button } => {
                if self.buttons_down.remove(&button) {
                    self.buttons_released.insert(button);
                }
            }
            InputEvent::MouseMoved { x, y } => {
                self.mouse_position = Some((x, y));
            }
            InputEvent::MouseLeft => {
                self.mouse_position = None;
            }
            InputEvent::Unidentified => {}
        }
    }

    //=====================================================================
    // Query API - Keyboard
    //=====================================================================

    /// `true` only on the frame the key went down.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// `true` while the key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// `true` only on the frame the key went up.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    /// `true` if any key went down this frame.
    pub fn any_key_pressed(&self) -> bool {
        !self.keys_pressed.is_empty()
    }

    //=====================================================================
    // Query API - Mouse
    //=====================================================================

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.buttons_released.contains(&button)
    }

    /// Cursor position in canvas pixels, `None` while outside the canvas.
    pub fn mouse_position(&self) -> Option<(f32, f32)> {
        self.mouse_position
    }

    /// `true` if the cursor moved (or entered/left) this frame.
    pub fn mouse_moved(&self) -> bool {
        self.mouse_moved
    }
}

//--- Trait Implementations -----------------------------------------------

impl Default for StateTracker {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //--- Test Helpers -----------------------------------------------------

    fn frame(tracker: &mut StateTracker, events: &[InputEvent]) {
        tracker.clear();
        tracker.process_events(events);
        tracker.finalize_frame();
    }

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key }
    }

    fn key_up(key: KeyCode) -> InputEvent {
        InputEvent::KeyUp { key }
    }

    //=====================================================================
    // Keyboard Tests
    //=====================================================================

    #[test]
    fn key_pressed_only_on_transition_frame() {
        let mut tracker = StateTracker::new();

        frame(&mut tracker, &[key_down(KeyCode::Enter)]);
        assert!(tracker.is_key_pressed(KeyCode::Enter));
        assert!(tracker.is_key_down(KeyCode::Enter));

        frame(&mut tracker, &[]);
        assert!(!tracker.is_key_pressed(KeyCode::Enter));
        assert!(tracker.is_key_down(KeyCode::Enter));

        frame(&mut tracker, &[key_up(KeyCode::Enter)]);
        assert!(!tracker.is_key_down(KeyCode::Enter));
        assert!(tracker.is_key_released(KeyCode::Enter));
    }

    #[test]
    fn repeated_key_down_is_not_a_new_press() {
        let mut tracker = StateTracker::new();

        frame(&mut tracker, &[key_down(KeyCode::ArrowDown)]);
        frame(&mut tracker, &[key_down(KeyCode::ArrowDown)]);

        assert!(!tracker.is_key_pressed(KeyCode::ArrowDown));
        assert!(!tracker.any_key_pressed());
    }

    #[test]
    fn press_and_release_in_one_frame() {
        let mut tracker = StateTracker::new();

        frame(&mut tracker, &[key_down(KeyCode::Escape), key_up(KeyCode::Escape)]);

        assert!(tracker.is_key_pressed(KeyCode::Escape));
        assert!(tracker.is_key_released(KeyCode::Escape));
        assert!(!tracker.is_key_down(KeyCode::Escape));
    }

    //=====================================================================
    // Mouse Tests
    //=====================================================================

    #[test]
    fn button_press_is_one_frame() {
        let mut tracker = StateTracker::new();
        let down = InputEvent::MouseButtonDown { button: MouseButton::Left };

        frame(&mut tracker, &[down]);
        assert!(tracker.is_button_pressed(MouseButton::Left));

        frame(&mut tracker, &[]);
        assert!(!tracker.is_button_pressed(MouseButton::Left));
        assert!(tracker.is_button_down(MouseButton::Left));

        frame(&mut tracker, &[InputEvent::MouseButtonUp { button: MouseButton::Left }]);
        assert!(tracker.is_button_released(MouseButton::Left));
    }

    #[test]
    fn mouse_position_and_movement() {
        let mut tracker = StateTracker::new();
        assert_eq!(tracker.mouse_position(), None);

        frame(&mut tracker, &[InputEvent::MouseMoved { x: 10.0, y: 20.0 }]);
        assert_eq!(tracker.mouse_position(), Some((10.0, 20.0)));
        assert!(tracker.mouse_moved());

        frame(&mut tracker, &[]);
        assert!(!tracker.mouse_moved());

        frame(&mut tracker, &[InputEvent::MouseLeft]);
        assert_eq!(tracker.mouse_position(), None);
        assert!(tracker.mouse_moved());
    }

    #[test]
    fn unidentified_events_are_ignored() {
        let mut tracker = StateTracker::new();
        frame(&mut tracker, &[InputEvent::Unidentified]);
        assert!(!tracker.any_key_pressed());
        assert!(!tracker.mouse_moved());
    }
}
