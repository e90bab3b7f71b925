//=========================================================================
// Tween Engine
//=========================================================================
//
// Owns the active tweens of one state and advances them once per frame.
//
// Architecture:
//   animate(TweenSpec) ──> Vec<Tween<E>> ──advance(dt)──> bag writes
//                                 │
//                                 └──> completed: Vec<E> (returned)
//
// Completion "callbacks" are typed events handed back to the owner after
// the pass over the active list has finished. Nothing the owner does in
// response can disturb the iteration that produced them.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{debug, error, trace};

//=== Internal Dependencies ===============================================

use super::easing::Easing;
use super::property_bag::{BagRef, Prop, PropertyBag};
use super::TweenError;

//=== TweenId =============================================================

/// Stable identifier of a registered tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(u64);

//=== TweenSpec ===========================================================

/// Parameters of a tween, assembled before registration.
///
/// ```
/// use greedy_gardens::core::tween::{Easing, Prop, PropertyBag, TweenEngine, TweenSpec};
///
/// let bag = PropertyBag::new().with(Prop::Alpha, 0.0).shared();
/// let mut tweens = TweenEngine::<()>::new();
///
/// tweens
///     .animate(TweenSpec::new(&bag, Prop::Alpha, 255.0, 2.0)
///         .easing(Easing::OutCubic)
///         .delay(1.75))
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct TweenSpec {
    bag: Weak<RefCell<PropertyBag>>,
    prop: Prop,
    end: f32,
    duration: f32,
    delay: f32,
    easing: Easing,
}

impl TweenSpec {
    /// Tween `prop` of `bag` to `end` over `duration` seconds.
    ///
    /// Defaults: no delay, linear easing.
    pub fn new(bag: &BagRef, prop: Prop, end: f32, duration: f32) -> Self {
        Self {
            bag: Rc::downgrade(bag),
            prop,
            end,
            duration,
            delay: 0.0,
            easing: Easing::Linear,
        }
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Seconds to wait before the tween starts writing.
    pub fn delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }
}

//=== Tween ===============================================================

/// Outcome of advancing one tween by one frame.
enum Step {
    Running,
    Finished,
    Orphaned,
}

struct Tween<E> {
    id: TweenId,
    bag: Weak<RefCell<PropertyBag>>,
    prop: Prop,
    start: f32,
    end: f32,
    duration: f32,
    delay: f32,
    elapsed: f32,
    easing: Easing,
    on_complete: Option<E>,
}

impl<E> Tween<E> {
    fn step(&mut self, dt: f32) -> Step {
        let Some(bag) = self.bag.upgrade() else {
            return Step::Orphaned;
        };

        self.elapsed += dt;
        if self.elapsed < self.delay {
            return Step::Running;
        }

        let active = self.elapsed - self.delay;
        let (value, finished) = if active >= self.duration {
            (self.end, true)
        } else {
            let progress = (active / self.duration).clamp(0.0, 1.0);
            (self.start + (self.end - self.start) * self.easing.apply(progress), false)
        };

        if let Err(e) = bag.borrow_mut().set(self.prop, value) {
            error!(target: "tween", "Tween {:?} lost its target: {}", self.id, e);
            return Step::Orphaned;
        }

        if finished {
            Step::Finished
        } else {
            Step::Running
        }
    }
}

//=== TweenHandle =========================================================

/// Returned by [`TweenEngine::animate`]; attaches a completion event.
pub struct TweenHandle<'a, E> {
    engine: &'a mut TweenEngine<E>,
    id: TweenId,
}

impl<E> TweenHandle<'_, E> {
    pub fn id(&self) -> TweenId {
        self.id
    }

    /// Sets the event emitted when this tween completes.
    ///
    /// Replaces any previously attached event.
    pub fn on_complete(self, event: E) -> TweenId {
        self.engine.set_on_complete(self.id, event);
        self.id
    }
}

//=== TweenEngine =========================================================

/// Collection of active tweens, advanced once per frame.
///
/// `E` is the completion event type, usually an enum owned by the state
/// that registers the tweens.
pub struct TweenEngine<E> {
    tweens: Vec<Tween<E>>,
    next_id: u64,
}

impl<E> TweenEngine<E> {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self {
            tweens: Vec::new(),
            next_id: 0,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a tween.
    ///
    /// The start value is read from the bag **now**, not when the delay
    /// runs out. Two tweens scheduled on the same key therefore both start
    /// from the value present at registration time.
    ///
    /// # Errors
    ///
    /// - [`TweenError::InvalidTiming`] for a negative or non-finite
    ///   duration or delay
    /// - [`TweenError::DeadBag`] if the target bag was already dropped
    /// - [`TweenError::MissingKey`] if the bag does not declare the key
    pub fn animate(&mut self, spec: TweenSpec) -> Result<TweenHandle<'_, E>, TweenError> {
        validate_timing("duration", spec.duration)?;
        validate_timing("delay", spec.delay)?;

        let bag = spec.bag.upgrade().ok_or(TweenError::DeadBag)?;
        let start = bag
            .borrow()
            .get(spec.prop)
            .ok_or(TweenError::MissingKey(spec.prop))?;

        let id = TweenId(self.next_id);
        self.next_id += 1;

        trace!(
            target: "tween",
            "Tween {:?}: {} {} -> {} over {}s after {}s ({})",
            id,
            spec.prop,
            start,
            spec.end,
            spec.duration,
            spec.delay,
            spec.easing
        );

        self.tweens.push(Tween {
            id,
            bag: spec.bag,
            prop: spec.prop,
            start,
            end: spec.end,
            duration: spec.duration,
            delay: spec.delay,
            elapsed: 0.0,
            easing: spec.easing,
            on_complete: None,
        });

        Ok(TweenHandle { engine: self, id })
    }

    /// Attaches (or replaces) the completion event of an active tween.
    ///
    /// Returns `false` if the tween is no longer active.
    pub fn set_on_complete(&mut self, id: TweenId, event: E) -> bool {
        match self.tweens.iter_mut().find(|t| t.id == id) {
            Some(tween) => {
                tween.on_complete = Some(event);
                true
            }
            None => false,
        }
    }

    //--- Frame Advance ----------------------------------------------------

    /// Advances every active tween by `dt` seconds.
    ///
    /// Finished tweens write their exact end value and are removed.
    /// Returns the completion events of the tweens that finished this
    /// frame, in registration order. Tweens whose bag has been dropped are
    /// discarded without emitting anything.
    pub fn advance(&mut self, dt: f32) -> Vec<E> {
        let mut completed = Vec::new();

        self.tweens.retain_mut(|tween| match tween.step(dt) {
            Step::Running => true,
            Step::Finished => {
                trace!(target: "tween", "Tween {:?} finished", tween.id);
                if let Some(event) = tween.on_complete.take() {
                    completed.push(event);
                }
                false
            }
            Step::Orphaned => {
                debug!(target: "tween", "Tween {:?} discarded: target bag dropped", tween.id);
                false
            }
        });

        completed
    }

    //--- Cancellation -----------------------------------------------------

    /// Removes a tween without emitting its completion event.
    pub fn cancel(&mut self, id: TweenId) -> bool {
        let before = self.tweens.len();
        self.tweens.retain(|t| t.id != id);
        before != self.tweens.len()
    }

    /// Removes every tween targeting `bag`. Returns how many were removed.
    pub fn cancel_bag(&mut self, bag: &BagRef) -> usize {
        let target = Rc::as_ptr(bag);
        let before = self.tweens.len();
        self.tweens.retain(|t| !std::ptr::eq(t.bag.as_ptr(), target));
        before - self.tweens.len()
    }

    /// Removes all tweens without emitting any events.
    pub fn clear(&mut self) {
        self.tweens.clear();
    }

    //--- Queries ----------------------------------------------------------

    pub fn is_active(&self, id: TweenId) -> bool {
        self.tweens.iter().any(|t| t.id == id)
    }

    pub fn active_count(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_idle(&self) -> bool {
        self.tweens.is_empty()
    }
}

impl<E> Default for TweenEngine<E> {
    fn default() -> Self {
        Self::new()
    }
}

//--- Internal Helpers ----------------------------------------------------

fn validate_timing(what: &'static str, value: f32) -> Result<(), TweenError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TweenError::InvalidTiming { what, value })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Done {
        Fade,
        Other,
    }

    fn alpha_bag(value: f32) -> BagRef {
        PropertyBag::new().with(Prop::Alpha, value).shared()
    }

    fn alpha(bag: &BagRef) -> f32 {
        bag.borrow().get(Prop::Alpha).unwrap()
    }

    //=====================================================================
    // Timing
    //=====================================================================

    #[test]
    fn delayed_fade_follows_timeline() {
        let bag = alpha_bag(0.0);
        let mut tweens = TweenEngine::new();
        tweens
            .animate(TweenSpec::new(&bag, Prop::Alpha, 255.0, 2.0).delay(1.75))
            .unwrap()
            .on_complete(Done::Fade);

        assert!(tweens.advance(1.0).is_empty());
        assert_eq!(alpha(&bag), 0.0);

        assert!(tweens.advance(1.75).is_empty());
        let mid = alpha(&bag);
        assert!(mid > 0.0 && mid < 255.0, "mid-tween alpha was {mid}");

        assert_eq!(tweens.advance(1.0), vec![Done::Fade]);
        assert_eq!(alpha(&bag), 255.0);
        assert!(tweens.is_idle());
    }

    #[test]
    fn value_equals_start_when_delay_just_elapsed() {
        let bag = alpha_bag(40.0);
        let mut tweens = TweenEngine::<Done>::new();
        tweens
            .animate(TweenSpec::new(&bag, Prop::Alpha, 200.0, 1.0)
                .easing(Easing::OutElastic)
                .delay(0.5))
            .unwrap();

        tweens.advance(0.5);
        assert_eq!(alpha(&bag), 40.0);
    }

    #[test]
    fn overshooting_curve_still_lands_on_end_value() {
        let bag = PropertyBag::new().with(Prop::Scale, 0.5).shared();
        let mut tweens = TweenEngine::<Done>::new();
        tweens
            .animate(TweenSpec::new(&bag, Prop::Scale, 1.0, 0.5).easing(Easing::OutElastic))
            .unwrap();

        for _ in 0..7 {
            tweens.advance(0.1);
        }
        assert_eq!(bag.borrow().get(Prop::Scale), Some(1.0));
    }

    #[test]
    fn start_value_is_captured_at_registration() {
        let bag = alpha_bag(0.0);
        let mut tweens = TweenEngine::<Done>::new();

        tweens.animate(TweenSpec::new(&bag, Prop::Alpha, 100.0, 1.0)).unwrap();
        tweens
            .animate(TweenSpec::new(&bag, Prop::Alpha, 200.0, 1.0).delay(1.0))
            .unwrap();

        tweens.advance(1.5);

        // Second tween started from 0 (value at registration), not 100.
        assert_eq!(alpha(&bag), 100.0);
    }

    #[test]
    fn zero_duration_completes_once_delay_elapses() {
        let bag = alpha_bag(0.0);
        let mut tweens = TweenEngine::new();
        tweens
            .animate(TweenSpec::new(&bag, Prop::Alpha, 255.0, 0.0).delay(0.25))
            .unwrap()
            .on_complete(Done::Fade);

        assert!(tweens.advance(0.125).is_empty());
        assert_eq!(tweens.advance(0.125), vec![Done::Fade]);
        assert_eq!(alpha(&bag), 255.0);
    }

    //=====================================================================
    // Completion Events
    //=====================================================================

    #[test]
    fn completion_fires_exactly_once() {
        let bag = alpha_bag(0.0);
        let mut tweens = TweenEngine::new();
        tweens
            .animate(TweenSpec::new(&bag, Prop::Alpha, 10.0, 0.5))
            .unwrap()
            .on_complete(Done::Fade);

        let mut fired = Vec::new();
        for _ in 0..10 {
            fired.extend(tweens.advance(0.25));
        }
        assert_eq!(fired, vec![Done::Fade]);
    }

    #[test]
    fn completion_not_fired_before_end() {
        let bag = alpha_bag(0.0);
        let mut tweens = TweenEngine::new();
        tweens
            .animate(TweenSpec::new(&bag, Prop::Alpha, 10.0, 1.0))
            .unwrap()
            .on_complete(Done::Fade);

        assert!(tweens.advance(0.75).is_empty());
        assert!(alpha(&bag) < 10.0);
    }

    #[test]
    fn on_complete_replaces_previous_event() {
        let bag = alpha_bag(0.0);
        let mut tweens = TweenEngine::new();
        let id = tweens
            .animate(TweenSpec::new(&bag, Prop::Alpha, 10.0, 0.5))
            .unwrap()
            .on_complete(Done::Other);

        assert!(tweens.set_on_complete(id, Done::Fade));
        assert_eq!(tweens.advance(1.0), vec![Done::Fade]);
        assert!(!tweens.set_on_complete(id, Done::Other));
    }

    #[test]
    fn events_are_returned_in_registration_order() {
        let a = alpha_bag(0.0);
        let b = alpha_bag(0.0);
        let mut tweens = TweenEngine::new();
        tweens
            .animate(TweenSpec::new(&a, Prop::Alpha, 1.0, 0.5))
            .unwrap()
            .on_complete(Done::Other);
        tweens
            .animate(TweenSpec::new(&b, Prop::Alpha, 1.0, 0.25))
            .unwrap()
            .on_complete(Done::Fade);

        assert_eq!(tweens.advance(1.0), vec![Done::Other, Done::Fade]);
    }

    //=====================================================================
    // Cancellation & Liveness
    //=====================================================================

    #[test]
    fn cancel_removes_without_event() {
        let bag = alpha_bag(0.0);
        let mut tweens = TweenEngine::new();
        let id = tweens
            .animate(TweenSpec::new(&bag, Prop::Alpha, 10.0, 1.0))
            .unwrap()
            .on_complete(Done::Fade);

        tweens.advance(0.5);
        let frozen = alpha(&bag);

        assert!(tweens.cancel(id));
        assert!(!tweens.is_active(id));
        assert!(tweens.advance(1.0).is_empty());
        assert_eq!(alpha(&bag), frozen);
        assert!(!tweens.cancel(id));
    }

    #[test]
    fn cancel_bag_only_touches_that_bag() {
        let a = alpha_bag(0.0);
        let b = alpha_bag(0.0);
        let mut tweens = TweenEngine::<Done>::new();
        tweens.animate(TweenSpec::new(&a, Prop::Alpha, 1.0, 1.0)).unwrap();
        tweens.animate(TweenSpec::new(&a, Prop::Alpha, 2.0, 1.0).delay(1.0)).unwrap();
        tweens.animate(TweenSpec::new(&b, Prop::Alpha, 1.0, 1.0)).unwrap();

        assert_eq!(tweens.cancel_bag(&a), 2);
        assert_eq!(tweens.active_count(), 1);
    }

    #[test]
    fn dropped_bag_discards_tween_silently() {
        let bag = alpha_bag(0.0);
        let mut tweens = TweenEngine::new();
        tweens
            .animate(TweenSpec::new(&bag, Prop::Alpha, 10.0, 1.0))
            .unwrap()
            .on_complete(Done::Fade);

        drop(bag);

        assert!(tweens.advance(2.0).is_empty());
        assert!(tweens.is_idle());
    }

    #[test]
    fn clear_drops_everything() {
        let bag = alpha_bag(0.0);
        let mut tweens = TweenEngine::<Done>::new();
        tweens.animate(TweenSpec::new(&bag, Prop::Alpha, 10.0, 1.0)).unwrap();
        tweens.clear();
        assert_eq!(tweens.active_count(), 0);
    }

    //=====================================================================
    // Validation
    //=====================================================================

    #[test]
    fn missing_key_is_rejected() {
        let bag = alpha_bag(0.0);
        let mut tweens = TweenEngine::<Done>::new();
        let result = tweens.animate(TweenSpec::new(&bag, Prop::Scale, 1.0, 1.0));
        assert_eq!(result.err(), Some(TweenError::MissingKey(Prop::Scale)));
        assert!(tweens.is_idle());
    }

    #[test]
    fn negative_timing_is_rejected() {
        let bag = alpha_bag(0.0);
        let mut tweens = TweenEngine::<Done>::new();

        let result = tweens.animate(TweenSpec::new(&bag, Prop::Alpha, 1.0, -1.0));
        assert!(matches!(result, Err(TweenError::InvalidTiming { what: "duration", .. })));

        let result = tweens.animate(TweenSpec::new(&bag, Prop::Alpha, 1.0, 1.0).delay(f32::NAN));
        assert!(matches!(result, Err(TweenError::InvalidTiming { what: "delay", .. })));
    }

    #[test]
    fn dead_bag_is_rejected_at_registration() {
        let bag = alpha_bag(0.0);
        let spec = TweenSpec::new(&bag, Prop::Alpha, 1.0, 1.0);
        drop(bag);

        let mut tweens = TweenEngine::<Done>::new();
        assert_eq!(tweens.animate(spec).err(), Some(TweenError::DeadBag));
    }

    #[test]
    fn last_registered_tween_wins_on_shared_key() {
        let bag = alpha_bag(0.0);
        let mut tweens = TweenEngine::<Done>::new();
        tweens.animate(TweenSpec::new(&bag, Prop::Alpha, 100.0, 1.0)).unwrap();
        tweens.animate(TweenSpec::new(&bag, Prop::Alpha, 50.0, 1.0)).unwrap();

        tweens.advance(2.0);
        assert_eq!(alpha(&bag), 50.0);
    }
}
