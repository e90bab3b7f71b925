//=========================================================================
// Menu Background Layers
//=========================================================================
//
// Horizontally scrolling parallax strips and vertically animated
// landscape bands.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::tween::{BagRef, Prop};
use crate::render::{Anchor, Surface};

//=== ParallaxLayer =======================================================

/// Image tiled across the target and scrolled left at a fixed speed.
pub struct ParallaxLayer {
    image: Surface,
    x_offset: f32,
    speed: f32,
}

impl ParallaxLayer {
    /// `speed` is in pixels per second.
    pub fn new(image: Surface, speed: f32) -> Self {
        Self {
            image,
            x_offset: 0.0,
            speed,
        }
    }

    pub fn x_offset(&self) -> f32 {
        self.x_offset
    }

    /// Scrolls left, snapping back to zero after a full image width.
    pub fn update(&mut self, dt: f32) {
        self.x_offset -= self.speed * dt;
        if self.x_offset.abs() > self.image.width() as f32 {
            self.x_offset = 0.0;
        }
    }

    /// Tiles enough copies to cover the target plus one spare.
    pub fn render(&self, target: &mut Surface) {
        let tile = self.image.width();
        if tile == 0 {
            return;
        }

        let copies = target.width().div_ceil(tile) + 1;
        let offset = self.x_offset.round() as i32;
        for i in 0..copies {
            let x = (tile * i) as i32 + offset;
            target.blit(&self.image, (x, 0), Anchor::TopLeft);
        }
    }
}

//=== LandscapeLayer ======================================================

/// Full-width band drawn at the tweened `y_offset` of its bag.
pub struct LandscapeLayer {
    image: Surface,
    props: BagRef,
}

impl LandscapeLayer {
    pub fn new(image: Surface, props: BagRef) -> Self {
        Self { image, props }
    }

    pub fn props(&self) -> &BagRef {
        &self.props
    }

    pub fn y_offset(&self) -> f32 {
        self.props.borrow().get_or(Prop::YOffset, 0.0)
    }

    pub fn render(&self, target: &mut Surface) {
        let y = self.y_offset().round() as i32;
        target.blit(&self.image, (0, y), Anchor::TopLeft);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
