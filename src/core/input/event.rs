//=========================================================================
// Input Event Types
//=========================================================================
//
// Portable representation of the keyboard and mouse input the menus use.
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    StateTracker (per-frame pressed/held/released)
//         ↓
//    States (hover, click, navigation)
// ```
//
// Mouse coordinates are canvas pixels, already mapped from window space
// by the platform layer.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::hash::{Hash, Hasher};

//=== MouseButton =========================================================

/// Physical mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,

    /// Side buttons and anything else.
    Other,
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the key location, not the character produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Navigation -------------------------------------------------------
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Confirmation / Cancel --------------------------------------------
    Enter,
    Space,
    Escape,
    Backspace,
    Tab,

    //--- Debug Toggles ----------------------------------------------------
    F1,
    F11,

    /// Keys the menus do not handle.
    Unidentified,
}

//=== InputEvent ==========================================================

/// Low-level input event from the platform layer.
///
/// # Equality & Hashing Semantics
///
/// Events compare by kind and key/button. `MouseMoved` events are equal
/// regardless of coordinates so that a set keeps only the latest one.
///
/// ```text
/// KeyDown{Enter}  == KeyDown{Enter}     ✓
/// KeyDown{Enter}  == KeyUp{Enter}       ✗
/// MouseMoved{..}  == MouseMoved{..}     ✓ (always equal)
/// ```
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    KeyDown { key: KeyCode },
    KeyUp { key: KeyCode },
    MouseButtonDown { button: MouseButton },
    MouseButtonUp { button: MouseButton },

    /// Cursor moved, in canvas pixels (top-left origin).
    MouseMoved { x: f32, y: f32 },

    /// Cursor left the canvas area.
    MouseLeft,

    /// Ignored by the tracker.
    Unidentified,
}

//--- Trait Implementations -----------------------------------------------

impl PartialEq for InputEvent {
    fn eq(&self, other: &Self) -> bool {
        use InputEvent::*;
        match (self, other) {
            (KeyDown { key: a }, KeyDown { key: b }) => a == b,
            (KeyUp { key: a }, KeyUp { key: b }) => a == b,
            (MouseButtonDown { button: a }, MouseButtonDown { button: b }) => a == b,
            (MouseButtonUp { button: a }, MouseButtonUp { button: b }) => a == b,
            (MouseMoved { .. }, MouseMoved { .. }) => true,
            (MouseLeft, MouseLeft) => true,
            (Unidentified, Unidentified) => true,
            _ => false,
        }
    }
}

impl Eq for InputEvent {}

/// Coordinates are not hashed, consistent with equality.
impl Hash for InputEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::KeyDown { key } | Self::KeyUp { key } => key.hash(state),
            Self::MouseButtonDown { button } | Self::MouseButtonUp { button } => {
                button.hash(state)
            }
            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
