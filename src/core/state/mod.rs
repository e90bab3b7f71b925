//=========================================================================
// State System
//=========================================================================
//
// Hierarchical, stack-based game states.
//
// Architecture:
//   StateStack
//     ├─ states: Vec<Box<dyn State>>   (top = last)
//     └─ pending: TransitionQueue
//
//   A state may own its own StateStack of substates and delegate its
//   update/render to that stack's top.
//
// Flow:
//   update() → top.update(ctx) → apply queued transitions (same frame)
//   render() → top.render(target)
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::StateTracker;
use crate::render::Surface;
use crate::resources::Resources;

//=== Module Declarations =================================================

mod state_stack;
mod transition_queue;

//=== Public API ==========================================================

pub use state_stack::{StackStatus, StateStack};
pub use transition_queue::{StateTransition, TransitionQueue};

//=== StateContext ========================================================

/// Everything a state may touch during `update`.
pub struct StateContext<'a> {
    /// Shared collaborators (assets, audio, cursor, canvas size).
    pub resources: &'a mut Resources,

    /// Input state for the current frame.
    pub input: &'a StateTracker,

    /// Operations on the stack that owns the updating state.
    pub transitions: &'a mut TransitionQueue,
}

//=== State Trait =========================================================

/// A unit of interactive behavior on a [`StateStack`].
///
/// Only `update`, `render` and `name` are required:
///
/// ```rust
/// # use greedy_gardens::core::state::{State, StateContext};
/// # use greedy_gardens::render::Surface;
/// # use greedy_gardens::resources::Resources;
/// struct Idle;
///
/// impl State for Idle {
///     fn update(&mut self, _ctx: &mut StateContext, _dt: f32) {}
///     fn render(&self, _target: &mut Surface, _resources: &Resources) {}
///     fn name(&self) -> &'static str { "Idle" }
/// }
/// ```
pub trait State {
    /// Called right after the state is pushed.
    fn on_enter(&mut self, _resources: &mut Resources) {}

    /// Called right after the state is popped.
    fn on_exit(&mut self, _resources: &mut Resources) {}

    /// Advances the state by `dt` seconds.
    fn update(&mut self, ctx: &mut StateContext, dt: f32);

    /// Draws the state onto `target`.
    fn render(&self, target: &mut Surface, resources: &Resources);

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}
