//=========================================================================
// Entity Spawner
//=========================================================================
//
// Rate-driven stochastic spawning with per-frame culling.
//
// Per frame:
//   1. update every entity, drop the inactive ones (same pass)
//   2. spawn floor(rate * dt) entities
//   3. spawn one more with probability frac(rate * dt)
//
// The Bernoulli remainder keeps the expected rate correct at any frame
// rate without carrying state between frames.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;
use rand::Rng;

//=== Internal Dependencies ===============================================

use crate::render::Surface;

//=== Entity Trait ========================================================

/// Short-lived object owned by an [`EntitySpawner`].
pub trait Entity {
    /// Advances position and lifecycle by `dt` seconds.
    fn update(&mut self, dt: f32);

    /// `false` once the entity should be removed.
    fn is_active(&self) -> bool;

    /// Draws the entity onto `target`.
    fn render(&self, target: &mut Surface);
}

//=== EntitySpawner =======================================================

/// Owns a list of entities and spawns new ones at `rate` per second.
pub struct EntitySpawner<T: Entity> {
    rate: f32,
    entities: Vec<T>,
}

impl<T: Entity> EntitySpawner<T> {
    //--- Construction -----------------------------------------------------

    /// # Panics
    ///
    /// Panics if `rate` is negative or not finite.
    pub fn new(rate: f32) -> Self {
        assert!(
            rate.is_finite() && rate >= 0.0,
            "Spawn rate must be a non-negative number, got {}",
            rate
        );
        Self {
            rate,
            entities: Vec::new(),
        }
    }

    //--- Spawning ---------------------------------------------------------

    /// Number of entities to spawn for a frame of `dt` seconds.
    pub fn spawn_count<R: Rng + ?Sized>(&self, dt: f32, rng: &mut R) -> usize {
        let spawn_rate = self.rate * dt.max(0.0);
        let guaranteed = spawn_rate.floor();
        let remainder = f64::from(spawn_rate - guaranteed);

        let extra = remainder > 0.0 && rng.random_bool(remainder.min(1.0));
        guaranteed as usize + usize::from(extra)
    }

    /// Runs one frame: update and cull, then spawn via `factory`.
    ///
    /// Returns the number of entities spawned this frame.
    pub fn update<R, F>(&mut self, dt: f32, rng: &mut R, mut factory: F) -> usize
    where
        R: Rng + ?Sized,
        F: FnMut(&mut R) -> T,
    {
        let before = self.entities.len();
        self.entities.retain_mut(|entity| {
            entity.update(dt);
            entity.is_active()
        });
        let culled = before - self.entities.len();

        let count = self.spawn_count(dt, rng);
        for _ in 0..count {
            let entity = factory(rng);
            self.entities.push(entity);
        }

        if culled > 0 || count > 0 {
            trace!(
                target: "core",
                "Spawner: +{} -{} ({} alive)",
                count,
                culled,
                self.entities.len()
            );
        }

        count
    }

    //--- Rendering --------------------------------------------------------

    /// Draws every live entity in spawn order.
    pub fn render(&self, target: &mut Surface) {
        for entity in &self.entities {
            entity.render(target);
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn entities(&self) -> &[T] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
