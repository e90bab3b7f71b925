//=========================================================================
// Render Module
//=========================================================================
//
// Software compositing on RGBA surfaces.
//
// Components:
// - surface: `Surface`, anchored blits, scaling, pixelation
// - effects: silhouette, long shadow, outline, color shading
//
//=========================================================================

//=== Module Declarations =================================================

pub mod effects;
pub mod surface;

//=== Public API ==========================================================

pub use effects::{ShadowDirection, color_darken, color_lighten};
pub use surface::{Anchor, Color, Surface, BLACK, TRANSPARENT, WHITE};
