//=========================================================================
// Property Bag
//=========================================================================
//
// Named numeric fields driving a visual element (alpha, scale, offsets).
//
// Ownership:
//   State ──owns──> Rc<RefCell<PropertyBag>> (BagRef)
//   Tween ──weak──> Weak<RefCell<PropertyBag>>
//
// Keys are fixed at construction. Writing a key the bag was not built
// with is an error, never an implicit insert.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

//=== Internal Dependencies ===============================================

use super::TweenError;

//=== Prop ================================================================

/// Animatable property key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prop {
    /// Opacity, 0 (transparent) to 255 (opaque).
    Alpha,

    /// Uniform scale factor (1.0 = native size).
    Scale,

    /// Horizontal pixel offset.
    XOffset,

    /// Vertical pixel offset.
    YOffset,
}

impl fmt::Display for Prop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Prop::Alpha => "alpha",
            Prop::Scale => "scale",
            Prop::XOffset => "x_offset",
            Prop::YOffset => "y_offset",
        };
        f.write_str(name)
    }
}

//=== PropertyBag =========================================================

/// Shared handle to a property bag.
pub type BagRef = Rc<RefCell<PropertyBag>>;

/// Mapping from [`Prop`] to its current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyBag {
    values: HashMap<Prop, f32>,
}

impl PropertyBag {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style key declaration.
    pub fn with(mut self, prop: Prop, value: f32) -> Self {
        self.values.insert(prop, value);
        self
    }

    /// Wraps the bag for sharing with tweens.
    pub fn shared(self) -> BagRef {
        Rc::new(RefCell::new(self))
    }

    /// Returns the value of `prop`, or `None` if the bag has no such key.
    pub fn get(&self, prop: Prop) -> Option<f32> {
        self.values.get(&prop).copied()
    }

    /// Returns the value of `prop`, falling back to `default` when absent.
    pub fn get_or(&self, prop: Prop, default: f32) -> f32 {
        self.get(prop).unwrap_or(default)
    }

    /// Overwrites an existing key.
    ///
    /// # Errors
    ///
    /// [`TweenError::MissingKey`] if the bag was not built with `prop`.
    pub fn set(&mut self, prop: Prop, value: f32) -> Result<(), TweenError> {
        match self.values.get_mut(&prop) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(TweenError::MissingKey(prop)),
        }
    }

    /// Returns `true` if the bag declares `prop`.
    pub fn contains(&self, prop: Prop) -> bool {
        self.values.contains_key(&prop)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
