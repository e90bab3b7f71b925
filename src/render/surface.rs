//=========================================================================
// Surface
//=========================================================================
//
// RGBA pixel buffer with anchored, alpha-blended blitting.
//
// Blit positions are resolved against one of nine anchor points of the
// source rectangle, then clipped to the destination. Blending is
// source-over with an extra per-blit opacity multiplier.
//
//=========================================================================

//=== External Dependencies ===============================================

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

//=== Color ===============================================================

/// 8-bit RGBA color.
pub type Color = Rgba<u8>;

pub const TRANSPARENT: Color = Rgba([0, 0, 0, 0]);
pub const BLACK: Color = Rgba([0, 0, 0, 255]);
pub const WHITE: Color = Rgba([255, 255, 255, 255]);

//=== Anchor ==============================================================

/// Point of the source rectangle that a blit position refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Anchor {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Center,
    MidTop,
    MidBottom,
    MidLeft,
    MidRight,
}

impl Anchor {
    /// Top-left corner of a `size` rectangle whose anchor point is `pos`.
    pub fn origin(self, pos: (i32, i32), size: (u32, u32)) -> (i32, i32) {
        let (x, y) = pos;
        let (w, h) = (size.0 as i32, size.1 as i32);
        match self {
            Anchor::TopLeft => (x, y),
            Anchor::TopRight => (x - w, y),
            Anchor::BottomLeft => (x, y - h),
            Anchor::BottomRight => (x - w, y - h),
            Anchor::Center => (x - w / 2, y - h / 2),
            Anchor::MidTop => (x - w / 2, y),
            Anchor::MidBottom => (x - w / 2, y - h),
            Anchor::MidLeft => (x, y - h / 2),
            Anchor::MidRight => (x - w, y - h / 2),
        }
    }
}

//=== Surface =============================================================

/// Owned RGBA image used for every layer, sprite and the canvas itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    image: RgbaImage,
}

impl Surface {
    //--- Construction -----------------------------------------------------

    /// Fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, color),
        }
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    //--- Accessors --------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Pixel at `(x, y)`, `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.image.get_pixel_checked(x, y).copied()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Raw RGBA8 bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    //--- Drawing ----------------------------------------------------------

    pub fn fill(&mut self, color: Color) {
        for pixel in self.image.pixels_mut() {
            *pixel = color;
        }
    }

    /// Draws `src` with its `anchor` point at `pos`.
    pub fn blit(&mut self, src: &Surface, pos: (i32, i32), anchor: Anchor) {
        self.blit_alpha(src, pos, anchor, u8::MAX);
    }

    /// Like [`blit`](Self::blit) with an extra opacity multiplier.
    ///
    /// `alpha == 0` draws nothing.
    pub fn blit_alpha(&mut self, src: &Surface, pos: (i32, i32), anchor: Anchor, alpha: u8) {
        if alpha == 0 || src.is_empty() || self.is_empty() {
            return;
        }

        let (ox, oy) = anchor.origin(pos, src.size());
        let (dw, dh) = (self.width() as i32, self.height() as i32);
        let (sw, sh) = (src.width() as i32, src.height() as i32);

        // Clip source range to the destination
        let x0 = (-ox).max(0);
        let y0 = (-oy).max(0);
        let x1 = sw.min(dw - ox);
        let y1 = sh.min(dh - oy);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        for sy in y0..y1 {
            for sx in x0..x1 {
                let source = *src.image.get_pixel(sx as u32, sy as u32);
                let target = self.image.get_pixel_mut((ox + sx) as u32, (oy + sy) as u32);
                blend(target, source, alpha);
            }
        }
    }

    //--- Transforms -------------------------------------------------------

    /// Nearest-neighbour scale by independent factors.
    ///
    /// Sizes are truncated; a factor that yields a zero dimension returns
    /// an empty surface.
    pub fn scale_by(&self, fx: f32, fy: f32) -> Surface {
        let width = (self.width() as f32 * fx.max(0.0)) as u32;
        let height = (self.height() as f32 * fy.max(0.0)) as u32;
        self.scaled_to(width, height)
    }

    /// Nearest-neighbour scale to an exact size.
    pub fn scaled_to(&self, width: u32, height: u32) -> Surface {
        if width == 0 || height == 0 || self.is_empty() {
            return Surface::new(width, height);
        }
        if (width, height) == self.size() {
            return self.clone();
        }
        Surface::from_image(imageops::resize(&self.image, width, height, FilterType::Nearest))
    }

    /// Scales down by `factor` and back up to the original size.
    pub fn pixelate(&self, factor: u32) -> Surface {
        if factor <= 1 || self.is_empty() {
            return self.clone();
        }
        let small_w = (self.width() / factor).max(1);
        let small_h = (self.height() / factor).max(1);
        self.scaled_to(small_w, small_h)
            .scaled_to(self.width(), self.height())
    }

    /// Copies a sub-rectangle, clipped to the surface bounds.
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> Surface {
        Surface::from_image(imageops::crop_imm(&self.image, x, y, width, height).to_image())
    }

    /// Returns a copy with every pixel passed through `f`.
    pub fn map_pixels(&self, mut f: impl FnMut(Color) -> Color) -> Surface {
        let mut out = self.clone();
        for pixel in out.image.pixels_mut() {
            *pixel = f(*pixel);
        }
        out
    }
}

//--- Internal Helpers ----------------------------------------------------

/// Source-over blend of `src` onto `dst`, scaled by `opacity`.
fn blend(dst: &mut Color, src: Color, opacity: u8) {
    let sa = u32::from(src[3]) * u32::from(opacity) / 255;
    if sa == 0 {
        return;
    }
    if sa == 255 {
        *dst = Rgba([src[0], src[1], src[2], 255]);
        return;
    }

    let inv = 255 - sa;
    let da = u32::from(dst[3]) * inv / 255;
    let out_a = sa + da;

    for c in 0..3 {
        let value = (u32::from(src[c]) * sa + u32::from(dst[c]) * da) / out_a;
        dst[c] = value as u8;
    }
    dst[3] = out_a as u8;
}

//=========================================================================
// Unit Tests
//=========================================================================
