//=========================================================================
// Global Systems
//=========================================================================
//
// Container for engine-level systems with logic.
//
// Holds the input system and the root state stack, and refills the stack
// from the bootstrap factory whenever it runs empty.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use super::GlobalContext;
use crate::core::input::{InputEvent, InputSystem};
use crate::core::state::{State, StateStack};
use crate::error::GameError;
use crate::render::BLACK;
use crate::resources::Resources;

//=== Bootstrap ===========================================================

/// Produces the state pushed onto an empty root stack.
pub type Bootstrap = Box<dyn FnMut(&mut Resources) -> Result<Box<dyn State>, GameError>>;

//=== GlobalSystems =======================================================

/// Container for engine-level logic systems.
///
/// # Available Systems
///
/// - `input`: folds platform input into per-frame state
/// - `root`: the top-level state stack
pub struct GlobalSystems {
    pub input: InputSystem,
    pub root: StateStack,
    bootstrap: Bootstrap,
}

impl GlobalSystems {
    pub fn new(bootstrap: Bootstrap) -> Self {
        Self {
            input: InputSystem::new(),
            root: StateStack::new("root"),
            bootstrap,
        }
    }

    //--- Update Loop ------------------------------------------------------

    /// Advances one frame.
    ///
    /// # Processing Pipeline
    ///
    /// 1. **Input Processing**: folds this tick's batches into input state
    /// 2. **Bootstrap**: pushes the initial state if the root stack is empty
    /// 3. **State Update**: updates the top state, applying its transitions
    ///
    /// # Errors
    ///
    /// Returns the bootstrap factory's error; nothing else fails.
    pub fn update(
        &mut self,
        context: &mut GlobalContext,
        batches: &[Vec<InputEvent>],
        dt: f32,
    ) -> Result<(), GameError> {
        // 1. Process input events into state
        self.input.process_frame(batches);

        // 2. Refill an empty stack
        if self.root.is_empty() {
            let state = (self.bootstrap)(&mut context.resources)?;
            info!(target: "state", "Bootstrapping root stack with {}", state.name());
            self.root.push(state, &mut context.resources);
        }

        // 3. Update the top state
        self.root.update(&mut context.resources, self.input.state(), dt);
        Ok(())
    }

    /// Clears the canvas and renders the top state into it.
    pub fn render(&self, context: &mut GlobalContext) {
        context.canvas.fill(BLACK);
        self.root.render(&mut context.canvas, &context.resources);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
