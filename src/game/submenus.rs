//=========================================================================
// Menu Submenus
//=========================================================================
//
// Placeholder screens reached from the title. They draw nothing over the
// menu background and return to the title on Escape.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::input::KeyCode;
use crate::core::state::{State, StateContext};
use crate::render::Surface;
use crate::resources::{CursorKind, Resources};

//=== SubmenuKind =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmenuKind {
    Play,
    Records,
    Settings,
}

//=== Submenu =============================================================

pub struct Submenu {
    kind: SubmenuKind,
}

impl Submenu {
    pub fn new(kind: SubmenuKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> SubmenuKind {
        self.kind
    }
}

impl State for Submenu {
    fn update(&mut self, ctx: &mut StateContext, _dt: f32) {
        ctx.resources.set_cursor(CursorKind::Normal);

        if ctx.input.is_key_pressed(KeyCode::Escape) {
            debug!(target: "menu", "Leaving {}", self.name());
            ctx.transitions.pop_state();
        }
    }

    fn render(&self, _target: &mut Surface, _resources: &Resources) {}

    fn name(&self) -> &'static str {
        match self.kind {
            SubmenuKind::Play => "Menu_Play",
            SubmenuKind::Records => "Menu_Records",
            SubmenuKind::Settings => "Menu_Settings",
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
