//=========================================================================
// Input Processor
//=========================================================================
//
// Converts platform-specific Winit events into engine InputEvents.
//
// Architecture:
//   Winit Events → InputProcessor → InputEvent (engine type) → InputBuffer
//
// Keys the menus never read are filtered (returns None). Cursor positions
// arrive already mapped to canvas pixels; a cursor outside the canvas is
// reported as `MouseLeft`.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::ElementState,
    event::{KeyEvent, MouseButton as WinitMouseButton},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::event::{InputEvent, KeyCode, MouseButton};

//=== InputProcessor ======================================================

/// Converts Winit events to engine InputEvents.
pub(crate) struct InputProcessor {
    cursor_inside: bool,
}

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self { cursor_inside: false }
    }

    //--- Event Processing -------------------------------------------------

    /// Converts Winit KeyEvent to InputEvent (filters unmapped keys).
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Option<InputEvent> {
        let key_code = match key_event.physical_key {
            PhysicalKey::Code(code) => KeyCode::from(code),
            _ => return None,
        };

        if matches!(key_code, KeyCode::Unidentified) {
            return None;
        }

        Some(create_key_input_event(key_code, key_event.state))
    }

    /// Converts Winit mouse button event to InputEvent.
    pub(crate) fn process_mouse_button(
        &self,
        button: WinitMouseButton,
        state: ElementState,
    ) -> InputEvent {
        let button = MouseButton::from(button);

        match state {
            ElementState::Pressed => InputEvent::MouseButtonDown { button },
            ElementState::Released => InputEvent::MouseButtonUp { button },
        }
    }

    /// Converts a cursor position in canvas pixels (`None` when outside
    /// the canvas). Returns `None` for a repeated leave.
    pub(crate) fn process_cursor(&mut self, canvas_pos: Option<(f32, f32)>) -> Option<InputEvent> {
        match canvas_pos {
            Some((x, y)) => {
                self.cursor_inside = true;
                Some(InputEvent::MouseMoved { x, y })
            }
            None if self.cursor_inside => {
                self.cursor_inside = false;
                Some(InputEvent::MouseLeft)
            }
            None => None,
        }
    }
}

//--- Internal Helpers ----------------------------------------------------

fn create_key_input_event(key: KeyCode, state: ElementState) -> InputEvent {
    match state {
        ElementState::Pressed => InputEvent::KeyDown { key },
        ElementState::Released => InputEvent::KeyUp { key },
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Converts Winit physical key codes to engine key codes.
///
/// Only navigation keys are mapped; everything else is `Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Arrows -------------------------------------------------------

            ArrowUp => KeyCode::ArrowUp,
            ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight,

            //--- Special ------------------------------------------------------

            Space => KeyCode::Space,
            Enter | NumpadEnter => KeyCode::Enter,
            Escape => KeyCode::Escape,
            Tab => KeyCode::Tab,
            Backspace => KeyCode::Backspace,
            F1 => KeyCode::F1,
            F11 => KeyCode::F11,

            //--- Unmapped (return Unidentified) -------------------------------

            _ => KeyCode::Unidentified,
        }
    }
}

/// Converts Winit mouse buttons to engine buttons.
///
/// Left/Right/Middle mapped directly; Back/Forward/Other → Other.
impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
