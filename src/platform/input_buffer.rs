//=========================================================================
// Input Buffer
//
// Collects input events between two frame boundaries, split into two
// categories: discrete and continuous.
//
// Responsibilities:
// - Keep discrete inputs (keys, buttons) in arrival order
// - Drop consecutive duplicates (OS key repeat)
// - Coalesce pointer updates down to the latest one
// - Hand both lists over in one `drain()`
//
// Notes:
// The buffer is reused across frames; draining keeps its capacity.
//=========================================================================

//=== Standard Library Imports ============================================
use std::collections::HashSet;

//=== Internal Modules ====================================================
use crate::core::input::event::InputEvent;

//=== InputBuffer Struct ==================================================
//
// - `discrete`: one-shot inputs, order significant
// - `continuous`: last-known pointer state (MouseMoved or MouseLeft)
//
pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    continuous: HashSet<InputEvent>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        const DISCRETE_BASE: usize = 128;
        const CONTINUOUS_BASE: usize = 4;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            continuous: HashSet::with_capacity(CONTINUOUS_BASE),
        }
    }

    //--- Continuous Event Handling ---------------------------------------
    //
    // The latest pointer event replaces any earlier one, including the
    // opposite kind: leaving after moving reports only the leave.
    //
    pub fn push_continuous(&mut self, event: InputEvent) {
        match event {
            InputEvent::MouseMoved { .. } => {
                self.continuous.remove(&InputEvent::MouseLeft);
            }
            InputEvent::MouseLeft => {
                self.continuous.remove(&InputEvent::MouseMoved { x: 0.0, y: 0.0 });
            }
            _ => {}
        }
        self.continuous.replace(event);
    }

    //--- Discrete Event Handling -----------------------------------------
    //
    // Duplicate consecutive events are ignored to prevent flooding.
    //
    pub fn push_discrete(&mut self, event: InputEvent) {
        if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    //--- Drain ------------------------------------------------------------
    //
    // Returns this frame's events, or `None` if nothing was buffered.
    //
    pub fn drain(&mut self) -> Option<(Vec<InputEvent>, Vec<InputEvent>)> {
        if self.is_empty() {
            return None;
        }
        let discrete = self.discrete.drain(..).collect();
        let continuous = self.continuous.drain().collect();
        Some((discrete, continuous))
    }

    //--- Utilities --------------------------------------------------------

    pub fn len(&self) -> usize {
        self.discrete.len() + self.continuous.len()
    }

    pub fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
