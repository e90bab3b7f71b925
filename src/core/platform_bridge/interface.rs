//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Message types exchanged between the platform and core threads.
//
// Direction:
//   platform → core : PlatformEvent (input batches, close request)
//   core → platform : CoreEvent     (cursor, title, exit)
//   core → platform : FrameSlot     (finished canvas, newest only)
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::event::InputEvent;
use crate::resources::{CursorArt, CursorKind};

//=== PlatformEvent =======================================================

/// Events sent from platform to core.
#[derive(Debug, Clone)]
pub enum PlatformEvent {
    /// Batched input events for a frame.
    Inputs {
        discrete: Vec<InputEvent>,
        continuous: Vec<InputEvent>,
    },

    /// Window close requested.
    WindowClosed,
}

//=== CoreEvent ===========================================================

/// Events sent from core to platform.
#[derive(Debug, Clone)]
pub enum CoreEvent {
    /// Cursor sprites to install, sent once at startup.
    CursorArt(Vec<CursorArt>),

    /// Cursor change.
    SetCursor(CursorKind),

    /// Window title change.
    SetTitle(String),

    /// The core loop has stopped; close the window.
    Exit,
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    #[error("Event loop creation failed: {0}")]
    EventLoopCreation(String),

    /// Event loop execution error.
    #[error("Event loop error: {0}")]
    EventLoopExecution(String),

    /// Pixel buffer could not be created or presented.
    #[error("Presentation failed: {0}")]
    Presentation(String),
}
