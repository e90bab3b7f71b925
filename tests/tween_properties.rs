//! Property-based tests for the animation and spawning primitives.
//!
//! 1. Every easing curve pins both endpoints.
//! 2. A tween holds its start value until its delay has elapsed.
//! 3. A finished tween sits exactly on its end value, whatever the step.
//! 4. A completion event fires exactly once, and never before the end.
//! 5. The spawner emits floor(rate*dt) or one more per frame, none at dt=0.

use greedy_gardens::core::spawner::{Entity, EntitySpawner};
use greedy_gardens::core::tween::{Easing, Prop, PropertyBag, TweenEngine, TweenSpec};
use greedy_gardens::render::Surface;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Helpers ─────────────────────────────────────────────────────────────

fn easing_strategy() -> impl Strategy<Value = Easing> {
    proptest::sample::select(Easing::ALL.to_vec())
}

struct Dot;

impl Entity for Dot {
    fn update(&mut self, _dt: f32) {}

    fn is_active(&self) -> bool {
        true
    }

    fn render(&self, _target: &mut Surface) {}
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Easing endpoints
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn easing_pins_endpoints(easing in easing_strategy()) {
        prop_assert_eq!(easing.apply(0.0), 0.0, "{} at 0", easing);
        prop_assert_eq!(easing.apply(1.0), 1.0, "{} at 1", easing);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Start value holds through the delay
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn value_holds_during_delay(
        start in -500.0f32..500.0,
        end in -500.0f32..500.0,
        delay in 0.5f32..5.0,
        steps in 1usize..50,
    ) {
        let bag = PropertyBag::new().with(Prop::Alpha, start).shared();
        let mut tweens: TweenEngine<()> = TweenEngine::new();
        tweens.animate(TweenSpec::new(&bag, Prop::Alpha, end, 1.0).delay(delay)).unwrap();

        // Stop short of the delay
        let dt = delay * 0.9 / steps as f32;
        for _ in 0..steps {
            tweens.advance(dt);
        }
        prop_assert_eq!(bag.borrow().get(Prop::Alpha), Some(start));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. End value is exact
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn finished_tween_lands_exactly(
        start in -500.0f32..500.0,
        end in -500.0f32..500.0,
        duration in 0.0f32..4.0,
        delay in 0.0f32..2.0,
        dt in 0.001f32..0.3,
        easing in easing_strategy(),
    ) {
        let bag = PropertyBag::new().with(Prop::Scale, start).shared();
        let mut tweens: TweenEngine<()> = TweenEngine::new();
        tweens
            .animate(TweenSpec::new(&bag, Prop::Scale, end, duration).delay(delay).easing(easing))
            .unwrap();

        let steps = ((delay + duration) / dt).ceil() as usize + 2;
        for _ in 0..steps {
            tweens.advance(dt);
        }
        prop_assert_eq!(bag.borrow().get(Prop::Scale), Some(end));
        prop_assert!(tweens.is_idle());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Completion fires once, at the end
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn completion_fires_once_at_end(
        duration in 0.1f32..3.0,
        delay in 0.0f32..2.0,
        dt in 0.005f32..0.25,
    ) {
        let bag = PropertyBag::new().with(Prop::YOffset, 0.0).shared();
        let mut tweens = TweenEngine::new();
        tweens
            .animate(TweenSpec::new(&bag, Prop::YOffset, -500.0, duration).delay(delay))
            .unwrap()
            .on_complete("done");

        let steps = ((delay + duration) / dt).ceil() as usize + 10;
        let mut fired = 0;
        for _ in 0..steps {
            let events = tweens.advance(dt);
            if !events.is_empty() {
                prop_assert_eq!(bag.borrow().get(Prop::YOffset), Some(-500.0));
            }
            fired += events.len();
        }
        prop_assert_eq!(fired, 1);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Spawn counts
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn spawn_count_is_floor_or_one_more(
        rate in 0.0f32..50.0,
        dt in 0.0f32..1.0,
        seed in any::<u64>(),
    ) {
        let spawner: EntitySpawner<Dot> = EntitySpawner::new(rate);
        let mut rng = StdRng::seed_from_u64(seed);

        let floor = (rate * dt).floor() as usize;
        let count = spawner.spawn_count(dt, &mut rng);
        prop_assert!(count == floor || count == floor + 1, "rate={} dt={} count={}", rate, dt, count);
    }

    #[test]
    fn zero_dt_never_spawns(rate in 0.0f32..1000.0, seed in any::<u64>()) {
        let mut spawner: EntitySpawner<Dot> = EntitySpawner::new(rate);
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..20 {
            prop_assert_eq!(spawner.update(0.0, &mut rng, |_| Dot), 0);
        }
        prop_assert_eq!(spawner.len(), 0);
    }
}
