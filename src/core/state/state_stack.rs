//=========================================================================
// State Stack
//=========================================================================
//
// Owns a stack of states and routes update/render to its top.
//
// Transitions requested by the top state are applied as soon as its
// update returns, within the same frame. Lifecycle hooks run on every
// push (on_enter) and pop (on_exit).
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{State, StateContext, StateTransition, TransitionQueue};
use crate::core::input::StateTracker;
use crate::render::Surface;
use crate::resources::Resources;

//=== StackStatus =========================================================

/// Result of routing a frame to the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackStatus {
    /// The top state handled the call.
    Active,

    /// Nothing on the stack; the owner must push a state.
    Empty,
}

//=== StateStack ==========================================================

/// Stack of polymorphic states. Only the top receives update/render.
#[derive(Default)]
pub struct StateStack {
    label: &'static str,
    states: Vec<Box<dyn State>>,
    pending: TransitionQueue,
}

impl StateStack {
    //--- Construction -----------------------------------------------------

    /// Creates an empty stack. `label` prefixes log lines.
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            states: Vec::new(),
            pending: TransitionQueue::new(),
        }
    }

    //--- Direct Operations ------------------------------------------------

    /// Pushes `state` and runs its `on_enter`.
    pub fn push(&mut self, state: Box<dyn State>, resources: &mut Resources) {
        debug!(target: "state", "[{}] push {}", self.label, state.name());
        self.states.push(state);
        if let Some(top) = self.states.last_mut() {
            top.on_enter(resources);
        }
    }

    /// Pops the top state, running its `on_exit`.
    pub fn pop(&mut self, resources: &mut Resources) -> Option<Box<dyn State>> {
        let mut state = self.states.pop()?;
        debug!(target: "state", "[{}] pop {}", self.label, state.name());
        state.on_exit(resources);
        Some(state)
    }

    /// Pops every state, top first.
    pub fn clear(&mut self, resources: &mut Resources) {
        while self.pop(resources).is_some() {}
    }

    //--- Frame Routing ----------------------------------------------------

    /// Updates the top state, then applies the transitions it queued.
    pub fn update(
        &mut self,
        resources: &mut Resources,
        input: &StateTracker,
        dt: f32,
    ) -> StackStatus {
        let Some(top) = self.states.last_mut() else {
            return StackStatus::Empty;
        };

        let mut ctx = StateContext {
            resources: &mut *resources,
            input,
            transitions: &mut self.pending,
        };
        top.update(&mut ctx, dt);

        self.apply_transitions(resources);
        StackStatus::Active
    }

    /// Renders the top state.
    pub fn render(&self, target: &mut Surface, resources: &Resources) -> StackStatus {
        match self.states.last() {
            Some(top) => {
                top.render(target, resources);
                StackStatus::Active
            }
            None => StackStatus::Empty,
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn top(&self) -> Option<&dyn State> {
        self.states.last().map(|state| state.as_ref())
    }

    /// Name of the top state, if any.
    pub fn top_name(&self) -> Option<&'static str> {
        self.top().map(|state| state.name())
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    //--- Internal Helpers -------------------------------------------------

    fn apply_transitions(&mut self, resources: &mut Resources) {
        for transition in self.pending.take() {
            match transition {
                StateTransition::Push(state) => self.push(state, resources),
                StateTransition::Pop => {
                    if self.pop(resources).is_none() {
                        warn!(target: "state", "[{}] pop on empty stack ignored", self.label);
                    }
                }
                StateTransition::Replace(state) => {
                    if self.pop(resources).is_none() {
                        warn!(target: "state", "[{}] replace on empty stack, pushing", self.label);
                    }
                    self.push(state, resources);
                }
                StateTransition::Clear => {
                    debug!(target: "state", "[{}] clear", self.label);
                    self.clear(resources);
                }
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
