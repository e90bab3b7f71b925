//=========================================================================
// Global Context
//=========================================================================
//
// Shared data owned by the core loop and lent to states.
//
// Contains:
// - resources: assets, audio, cursor, rng, canvas size
// - canvas: the low-resolution frame states render into
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::render::{Surface, BLACK};
use crate::resources::Resources;

//=== GlobalContext =======================================================

/// Data states read and write, separate from the systems that drive them.
pub struct GlobalContext {
    /// Collaborators shared by every state.
    pub resources: Resources,

    /// Frame target, sized to the canvas and cleared every render.
    pub canvas: Surface,
}

impl GlobalContext {
    pub fn new(resources: Resources) -> Self {
        let (width, height) = resources.canvas_size();
        Self {
            resources,
            canvas: Surface::filled(width, height, BLACK),
        }
    }
}
