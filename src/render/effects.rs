//=========================================================================
// Surface Effects
//=========================================================================
//
// Cosmetic filters used to decorate labels and logos.
//
// All effects return new surfaces. Invalid parameters degrade to a
// no-op with a warning; none of these calls can fail.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::str::FromStr;

use image::Rgba;
use log::warn;

//=== Internal Dependencies ===============================================

use super::surface::{Anchor, Color, Surface, TRANSPARENT};

//=== Colors ==============================================================

/// Moves `color` toward black by `factor` (0 = unchanged, 1 = black).
pub fn color_darken(color: Color, factor: f32) -> Color {
    lerp_color(color, Rgba([0, 0, 0, 255]), factor)
}

/// Moves `color` toward white by `factor` (0 = unchanged, 1 = white).
pub fn color_lighten(color: Color, factor: f32) -> Color {
    lerp_color(color, Rgba([255, 255, 255, 255]), factor)
}

fn lerp_color(from: Color, to: Color, factor: f32) -> Color {
    let t = factor.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8;
    Rgba([
        mix(from[0], to[0]),
        mix(from[1], to[1]),
        mix(from[2], to[2]),
        mix(from[3], to[3]),
    ])
}

//=== Shadow Direction ====================================================

/// One of the eight directions a long shadow can extend toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShadowDirection {
    TopLeft,
    Top,
    TopRight,
    Left,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl ShadowDirection {
    /// Unit step of the shadow.
    pub fn vector(self) -> (i32, i32) {
        match self {
            Self::TopLeft => (-1, -1),
            Self::Top => (0, -1),
            Self::TopRight => (1, -1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::BottomLeft => (-1, 1),
            Self::Bottom => (0, 1),
            Self::BottomRight => (1, 1),
        }
    }

    /// Parses `name` and returns its vector, or `(0, 0)` with a warning.
    pub fn vector_or_zero(name: &str) -> (i32, i32) {
        match name.parse::<ShadowDirection>() {
            Ok(direction) => direction.vector(),
            Err(e) => {
                warn!(target: "render", "{}, shadow skipped", e);
                (0, 0)
            }
        }
    }
}

/// Returned for a direction name outside the eight known ones.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid long shadow direction `{0}`")]
pub struct InvalidDirection(pub String);

impl FromStr for ShadowDirection {
    type Err = InvalidDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top-left" => Ok(Self::TopLeft),
            "top" => Ok(Self::Top),
            "top-right" => Ok(Self::TopRight),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "bottom-left" => Ok(Self::BottomLeft),
            "bottom" => Ok(Self::Bottom),
            "bottom-right" => Ok(Self::BottomRight),
            other => Err(InvalidDirection(other.to_string())),
        }
    }
}

impl fmt::Display for ShadowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TopLeft => "top-left",
            Self::Top => "top",
            Self::TopRight => "top-right",
            Self::Left => "left",
            Self::Right => "right",
            Self::BottomLeft => "bottom-left",
            Self::Bottom => "bottom",
            Self::BottomRight => "bottom-right",
        };
        f.write_str(name)
    }
}

//=== Effects =============================================================

/// Every visible pixel painted `color`, every other pixel transparent.
pub fn silhouette(surface: &Surface, color: Color) -> Surface {
    surface.map_pixels(|px| if px[3] > 0 { color } else { TRANSPARENT })
}

/// Luma-only copy, alpha preserved.
pub fn grayscale(surface: &Surface) -> Surface {
    surface.map_pixels(|px| {
        let luma = (0.299 * f32::from(px[0]) + 0.587 * f32::from(px[1]) + 0.114 * f32::from(px[2]))
            .round() as u8;
        Rgba([luma, luma, luma, px[3]])
    })
}

/// Extrudes a solid-color copy of `surface` `distance` steps along
/// `vector`, drawn behind the original.
///
/// The result grows by `distance` along each axis the vector moves on.
/// A `(0, 0)` vector returns the surface unchanged.
pub fn long_shadow(surface: &Surface, vector: (i32, i32), distance: u32, color: Color) -> Surface {
    let (vx, vy) = vector;
    if (vx, vy) == (0, 0) || distance == 0 {
        return surface.clone();
    }

    let d = distance as i32;
    let pad_x = vx.unsigned_abs() * distance;
    let pad_y = vy.unsigned_abs() * distance;
    let mut out = Surface::new(surface.width() + pad_x, surface.height() + pad_y);

    // Keep the original inside the canvas for up/left shadows
    let base = (if vx < 0 { d } else { 0 }, if vy < 0 { d } else { 0 });
    let shape = silhouette(surface, color);

    for i in 1..=d {
        out.blit(&shape, (base.0 + vx * i, base.1 + vy * i), Anchor::TopLeft);
    }
    out.blit(surface, base, Anchor::TopLeft);
    out
}

/// Surrounds `surface` with a `distance`-pixel border of `color`.
///
/// With `no_corner`, only the axis-aligned offsets are stamped, which
/// leaves the diagonal corners open.
pub fn outline(surface: &Surface, distance: u32, color: Color, no_corner: bool) -> Surface {
    if distance == 0 {
        return surface.clone();
    }

    let d = distance as i32;
    let mut out = Surface::new(surface.width() + 2 * distance, surface.height() + 2 * distance);
    let shape = silhouette(surface, color);

    if no_corner {
        for delta in (-d..=d).filter(|&k| k != 0) {
            out.blit(&shape, (delta + d, d), Anchor::TopLeft);
            out.blit(&shape, (d, delta + d), Anchor::TopLeft);
        }
    } else {
        for dx in -d..=d {
            for dy in -d..=d {
                if (dx, dy) != (0, 0) {
                    out.blit(&shape, (dx + d, dy + d), Anchor::TopLeft);
                }
            }
        }
    }

    out.blit(surface, (d, d), Anchor::TopLeft);
    out
}

/// Label decoration: bottom long shadow in a darker shade, then outline.
pub fn decorate_label(label: &Surface, distance: u32, shadow: Color, border: Color) -> Surface {
    let shadowed = long_shadow(label, ShadowDirection::Bottom.vector(), distance, shadow);
    outline(&shadowed, distance, border, false)
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::surface::{BLACK, WHITE};

    const RED: Color = Rgba([255, 0, 0, 255]);
    const BLUE: Color = Rgba([0, 0, 255, 255]);

    fn dot() -> Surface {
        Surface::filled(1, 1, RED)
    }

    //--- Colors -----------------------------------------------------------

    #[test]
    fn darken_and_lighten_hit_extremes() {
        assert_eq!(color_darken(RED, 1.0), BLACK);
        assert_eq!(color_lighten(RED, 1.0), WHITE);
        assert_eq!(color_darken(RED, 0.0), RED);
        assert_eq!(color_darken(Rgba([200, 100, 50, 255]), 0.5), Rgba([100, 50, 25, 255]));
    }

    //--- Directions -------------------------------------------------------

    #[test]
    fn direction_names_parse() {
        assert_eq!("bottom".parse::<ShadowDirection>(), Ok(ShadowDirection::Bottom));
        assert_eq!("top-left".parse::<ShadowDirection>(), Ok(ShadowDirection::TopLeft));
        assert_eq!(ShadowDirection::BottomRight.to_string(), "bottom-right");
    }

    #[test]
    fn invalid_direction_degrades_to_zero_vector() {
        assert_eq!(ShadowDirection::vector_or_zero("diagonal"), (0, 0));
        assert_eq!(ShadowDirection::vector_or_zero("left"), (-1, 0));
    }

    //--- Silhouette -------------------------------------------------------

    #[test]
    fn silhouette_recolors_visible_pixels_only() {
        let mut s = Surface::new(2, 1);
        s.image_mut().put_pixel(0, 0, RED);

        let out = silhouette(&s, BLUE);

        assert_eq!(out.pixel(0, 0), Some(BLUE));
        assert_eq!(out.pixel(1, 0), Some(TRANSPARENT));
    }

    //--- Long Shadow ------------------------------------------------------

    #[test]
    fn bottom_shadow_extends_below() {
        let out = long_shadow(&dot(), (0, 1), 2, BLUE);

        assert_eq!(out.size(), (1, 3));
        assert_eq!(out.pixel(0, 0), Some(RED));
        assert_eq!(out.pixel(0, 1), Some(BLUE));
        assert_eq!(out.pixel(0, 2), Some(BLUE));
    }

    #[test]
    fn top_left_shadow_keeps_original_visible() {
        let out = long_shadow(&dot(), (-1, -1), 1, BLUE);

        assert_eq!(out.size(), (2, 2));
        assert_eq!(out.pixel(1, 1), Some(RED));
        assert_eq!(out.pixel(0, 0), Some(BLUE));
    }

    #[test]
    fn zero_vector_shadow_is_identity() {
        assert_eq!(long_shadow(&dot(), (0, 0), 3, BLUE), dot());
    }

    //--- Outline ----------------------------------------------------------

    #[test]
    fn outline_with_corners_fills_ring() {
        let out = outline(&dot(), 1, BLUE, false);

        assert_eq!(out.size(), (3, 3));
        assert_eq!(out.pixel(1, 1), Some(RED));
        assert_eq!(out.pixel(0, 0), Some(BLUE));
        assert_eq!(out.pixel(2, 1), Some(BLUE));
    }

    #[test]
    fn outline_without_corners_leaves_diagonals_open() {
        let out = outline(&dot(), 1, BLUE, true);

        assert_eq!(out.pixel(0, 0), Some(TRANSPARENT));
        assert_eq!(out.pixel(1, 0), Some(BLUE));
        assert_eq!(out.pixel(0, 1), Some(BLUE));
    }

    #[test]
    fn decorate_grows_by_shadow_and_border() {
        let label = Surface::filled(4, 2, WHITE);
        let out = decorate_label(&label, 2, BLUE, BLACK);
        assert_eq!(out.size(), (4 + 4, 2 + 2 + 4));
    }

    #[test]
    fn grayscale_keeps_alpha() {
        let s = Surface::filled(1, 1, Rgba([255, 0, 0, 77]));
        let g = grayscale(&s);
        let px = g.pixel(0, 0).unwrap();
        assert_eq!(px[0], px[1]);
        assert_eq!(px[3], 77);
    }
}
