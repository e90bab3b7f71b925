//=========================================================================
// Tween Module
//=========================================================================
//
// Time-based interpolation of numeric properties.
//
// Components:
// - easing:       curve functions and the `Easing` selector
// - property_bag: shared key/value targets (`BagRef`)
// - engine:       `TweenEngine`, advanced once per frame by its owner
//
//=========================================================================

//=== Module Declarations =================================================

pub mod easing;
pub mod engine;
pub mod property_bag;

//=== Public API ==========================================================

pub use easing::{Easing, UnknownEasing};
pub use engine::{TweenEngine, TweenHandle, TweenId, TweenSpec};
pub use property_bag::{BagRef, Prop, PropertyBag};

use thiserror::Error;

//=== TweenError ==========================================================

/// Failure to register or drive a tween.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TweenError {
    /// The target bag does not declare this key.
    #[error("property bag has no `{0}` key")]
    MissingKey(Prop),

    /// The target bag was dropped before registration.
    #[error("property bag was dropped before the tween was registered")]
    DeadBag,

    /// Negative or non-finite duration or delay.
    #[error("invalid tween {what}: {value}")]
    InvalidTiming { what: &'static str, value: f32 },
}
