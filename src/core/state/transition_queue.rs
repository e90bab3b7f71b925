//=========================================================================
// Transition Queue
//=========================================================================
//
// Stack operations requested by a state during its update.
//
// The owning StateStack applies the queue right after the requesting
// state returns, so a push is visible on the very next update.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use super::State;

//=== StateTransition =====================================================

/// A single state stack operation.
pub enum StateTransition {
    /// Adds a new state to the top of the stack.
    Push(Box<dyn State>),

    /// Removes the top state.
    Pop,

    /// Pops the top state and pushes another in its place.
    Replace(Box<dyn State>),

    /// Removes every state from the stack.
    Clear,
}

impl fmt::Debug for StateTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Push(state) => write!(f, "Push({})", state.name()),
            Self::Pop => f.write_str("Pop"),
            Self::Replace(state) => write!(f, "Replace({})", state.name()),
            Self::Clear => f.write_str("Clear"),
        }
    }
}

//=== TransitionQueue =====================================================

/// FIFO of pending [`StateTransition`]s.
#[derive(Debug, Default)]
pub struct TransitionQueue {
    queue: Vec<StateTransition>,
}

impl TransitionQueue {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Queues a transition for the owning stack.
    pub fn push(&mut self, transition: StateTransition) {
        self.queue.push(transition);
    }

    //--- Shorthands -------------------------------------------------------

    pub fn push_state(&mut self, state: Box<dyn State>) {
        self.push(StateTransition::Push(state));
    }

    pub fn pop_state(&mut self) {
        self.push(StateTransition::Pop);
    }

    pub fn replace_state(&mut self, state: Box<dyn State>) {
        self.push(StateTransition::Replace(state));
    }

    //--- Queries ----------------------------------------------------------

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Takes all transitions, leaving the queue empty.
    pub fn take(&mut self) -> Vec<StateTransition> {
        std::mem::take(&mut self.queue)
    }
}
