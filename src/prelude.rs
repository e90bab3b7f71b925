//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use greedy_gardens::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder, GameConfig};
pub use crate::error::GameError;

// State system
pub use crate::core::state::{State, StateContext, StateStack};

// Tweening
pub use crate::core::tween::{BagRef, Easing, Prop, PropertyBag, TweenEngine, TweenSpec};

// Input
pub use crate::core::input::{KeyCode, MouseButton, StateTracker};

// Rendering and collaborators
pub use crate::render::{Anchor, Surface};
pub use crate::resources::{CursorKind, LoadMode, Resources};
