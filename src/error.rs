//=========================================================================
// Game Errors
//=========================================================================
//
// Top-level error for fallible construction on the core thread.
//
// Cosmetic failures (missing art, unplayable audio) never reach this
// type; they are logged and degraded where they happen.
//
//=========================================================================

use crate::core::platform_bridge::PlatformError;
use crate::core::tween::TweenError;
use crate::resources::{AssetError, AudioError};

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    Tween(#[from] TweenError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Audio(#[from] AudioError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error("could not create initial state: {0}")]
    Bootstrap(String),
}
