//=========================================================================
// Wind
//=========================================================================
//
// Animated gust that drifts across the menu background.
//
// A gust enters past the left edge at a random height and speed, loops
// its frames while moving right, and deactivates once it has fully left
// through the right edge. All gusts share one property bag whose
// `y_offset` is tweened during boot-up.
//
//=========================================================================

//=== Standard Library ====================================================

use std::rc::Rc;

//=== External Dependencies ===============================================

use rand::Rng;

//=== Internal Dependencies ===============================================

use crate::core::spawner::Entity;
use crate::core::tween::{BagRef, Prop};
use crate::render::{Anchor, Surface};

//=== Wind ================================================================

pub struct Wind {
    frames: Rc<[Surface]>,
    props: BagRef,
    x: f32,
    y: f32,
    speed: f32,
    age: f32,
    right_edge: f32,
    active: bool,
}

impl Wind {
    /// Animation rate in frames per second.
    pub const FPS: f32 = 12.0;
    pub const MIN_SPEED: f32 = 120.0;
    pub const MAX_SPEED: f32 = 260.0;

    /// Share of the canvas height, from the top, a gust may start in.
    pub const BAND: f32 = 0.6;

    /// Places a new gust just off the left edge of a `canvas` sized area.
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        frames: Rc<[Surface]>,
        props: BagRef,
        canvas: (u32, u32),
    ) -> Self {
        let width = frames.first().map_or(0, Surface::width) as f32;
        let band = canvas.1 as f32 * Self::BAND;

        Self {
            x: -width,
            y: rng.random_range(0.0..=band),
            speed: rng.random_range(Self::MIN_SPEED..=Self::MAX_SPEED),
            age: 0.0,
            right_edge: canvas.0 as f32,
            active: true,
            frames,
            props,
        }
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Index of the frame shown at the current age.
    pub fn frame_index(&self) -> usize {
        if self.frames.is_empty() {
            return 0;
        }
        (self.age * Self::FPS) as usize % self.frames.len()
    }
}

impl Entity for Wind {
    fn update(&mut self, dt: f32) {
        self.x += self.speed * dt;
        self.age += dt;
        if self.x > self.right_edge {
            self.active = false;
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn render(&self, target: &mut Surface) {
        let Some(frame) = self.frames.get(self.frame_index()) else {
            return;
        };
        let y_offset = self.props.borrow().get_or(Prop::YOffset, 0.0);
        let pos = (self.x.round() as i32, (self.y + y_offset).round() as i32);
        target.blit(frame, pos, Anchor::TopLeft);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tween::PropertyBag;
    use crate::render::{TRANSPARENT, WHITE};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    //--- Test Helpers -----------------------------------------------------

    fn frames(count: usize) -> Rc<[Surface]> {
        (0..count).map(|_| Surface::filled(4, 2, WHITE)).collect()
    }

    fn offset_bag(y: f32) -> BagRef {
        PropertyBag::new().with(Prop::YOffset, y).shared()
    }

    //=====================================================================
    // Spawn Tests
    //=====================================================================

    #[test]
    fn spawns_off_left_edge_in_upper_band() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let wind = Wind::spawn(&mut rng, frames(2), offset_bag(0.0), (100, 50));
            let (x, y) = wind.position();

            assert_eq!(x, -4.0);
            assert!((0.0..=30.0).contains(&y), "y = {}", y);
            assert!((Wind::MIN_SPEED..=Wind::MAX_SPEED).contains(&wind.speed()));
            assert!(wind.is_active());
        }
    }

    //=====================================================================
    // Lifecycle Tests
    //=====================================================================

    #[test]
    fn deactivates_after_crossing_right_edge() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut wind = Wind::spawn(&mut rng, frames(1), offset_bag(0.0), (100, 50));

        // Slowest gust needs under a second to cross 104 px
        let mut elapsed = 0.0;
        while wind.is_active() && elapsed < 2.0 {
            wind.update(0.1);
            elapsed += 0.1;
        }
        assert!(!wind.is_active());
        assert!(wind.position().0 > 100.0);
    }

    #[test]
    fn frames_cycle_at_fixed_rate() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut wind = Wind::spawn(&mut rng, frames(3), offset_bag(0.0), (10_000, 50));

        assert_eq!(wind.frame_index(), 0);
        wind.update(1.0 / Wind::FPS + 0.001);
        assert_eq!(wind.frame_index(), 1);
        wind.update(2.0 / Wind::FPS);
        assert_eq!(wind.frame_index(), 0);
    }

    //=====================================================================
    // Render Tests
    //=====================================================================

    #[test]
    fn render_applies_shared_offset() {
        let mut rng = StdRng::seed_from_u64(9);
        let props = offset_bag(1000.0);
        let mut wind = Wind::spawn(&mut rng, frames(1), props.clone(), (8, 1));

        // Move fully on screen
        wind.update(4.0 / wind.speed());

        let mut target = Surface::new(8, 8);
        wind.render(&mut target);
        assert_eq!(target.pixel(0, 0), Some(TRANSPARENT));

        props.borrow_mut().set(Prop::YOffset, 0.0).unwrap();
        wind.render(&mut target);
        assert_eq!(target.pixel(1, 0), Some(WHITE));
    }

    #[test]
    fn no_frames_renders_nothing() {
        let mut rng = StdRng::seed_from_u64(2);
        let wind = Wind::spawn(&mut rng, frames(0), offset_bag(0.0), (8, 8));
        let mut target = Surface::new(8, 8);
        wind.render(&mut target);
        assert_eq!(target.pixel(0, 0), Some(TRANSPARENT));
    }
}
