//=========================================================================
// Input System
//=========================================================================
//
// Folds the input batches received from the platform into per-frame
// input state that states query during update.
//
// Frame lifecycle:
//   process_frame(batches) → clear() → process_events() × N → finalize_frame()
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
mod state_tracker;

//=== Public API ==========================================================

pub use event::{InputEvent, KeyCode, MouseButton};
pub use state_tracker::StateTracker;

use log::trace;

//=== InputSystem =========================================================

/// Owns the [`StateTracker`] and advances it once per tick.
#[derive(Default)]
pub struct InputSystem {
    tracker: StateTracker,
}

impl InputSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies every batch collected this tick, in arrival order.
    pub fn process_frame(&mut self, batches: &[Vec<InputEvent>]) {
        self.tracker.clear();
        for batch in batches {
            trace!(target: "core", "Input batch: {} events", batch.len());
            self.tracker.process_events(batch);
        }
        self.tracker.finalize_frame();
    }

    /// Input state for the current tick.
    pub fn state(&self) -> &StateTracker {
        &self.tracker
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
