//=========================================================================
// Easing Curves
//=========================================================================
//
// Pure functions mapping normalized time to normalized progress.
//
// Every curve satisfies ease(0) == 0 and ease(1) == 1. Overshooting
// curves (elastic, back) leave [0, 1] strictly between the endpoints.
// Callers clamp `t` before evaluating.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

//=== Curve Functions =====================================================

pub fn linear(t: f32) -> f32 {
    t
}

pub fn ease_in_quad(t: f32) -> f32 {
    t * t
}

pub fn ease_out_quad(t: f32) -> f32 {
    let inv = 1.0 - t;
    1.0 - inv * inv
}

pub fn ease_in_out_quad(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        let k = -2.0 * t + 2.0;
        1.0 - k * k / 2.0
    }
}

pub fn ease_in_cubic(t: f32) -> f32 {
    t * t * t
}

pub fn ease_out_cubic(t: f32) -> f32 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let k = -2.0 * t + 2.0;
        1.0 - k * k * k / 2.0
    }
}

pub fn ease_out_quint(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(5)
}

pub fn ease_out_circ(t: f32) -> f32 {
    let k = t - 1.0;
    (1.0 - k * k).max(0.0).sqrt()
}

/// Damped sine settling on 1 after overshooting it.
pub fn ease_out_elastic(t: f32) -> f32 {
    const C4: f32 = (2.0 * PI) / 3.0;

    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else {
        2f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * C4).sin() + 1.0
    }
}

pub fn ease_out_back(t: f32) -> f32 {
    const C1: f32 = 1.70158;
    const C3: f32 = C1 + 1.0;

    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let k = t - 1.0;
    1.0 + C3 * k * k * k + C1 * k * k
}

//=== Easing ==============================================================

/// Named easing curve.
///
/// `Copy` so tween specs can carry it by value. Use [`Easing::apply`] to
/// evaluate; endpoints are pinned so `apply(0.0) == 0.0` and
/// `apply(1.0) == 1.0` hold exactly for every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Easing {
    #[default]
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    OutQuint,
    OutCirc,
    OutElastic,
    OutBack,
}

impl Easing {
    /// Every curve, in declaration order.
    pub const ALL: [Easing; 11] = [
        Easing::Linear,
        Easing::InQuad,
        Easing::OutQuad,
        Easing::InOutQuad,
        Easing::InCubic,
        Easing::OutCubic,
        Easing::InOutCubic,
        Easing::OutQuint,
        Easing::OutCirc,
        Easing::OutElastic,
        Easing::OutBack,
    ];

    /// Evaluates the curve at `t`.
    pub fn apply(self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        self.function()(t)
    }

    /// Returns the raw curve function.
    pub fn function(self) -> fn(f32) -> f32 {
        match self {
            Easing::Linear => linear,
            Easing::InQuad => ease_in_quad,
            Easing::OutQuad => ease_out_quad,
            Easing::InOutQuad => ease_in_out_quad,
            Easing::InCubic => ease_in_cubic,
            Easing::OutCubic => ease_out_cubic,
            Easing::InOutCubic => ease_in_out_cubic,
            Easing::OutQuint => ease_out_quint,
            Easing::OutCirc => ease_out_circ,
            Easing::OutElastic => ease_out_elastic,
            Easing::OutBack => ease_out_back,
        }
    }

    /// Canonical camel-case name (`easeOutCubic`).
    pub fn name(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::InQuad => "easeInQuad",
            Easing::OutQuad => "easeOutQuad",
            Easing::InOutQuad => "easeInOutQuad",
            Easing::InCubic => "easeInCubic",
            Easing::OutCubic => "easeOutCubic",
            Easing::InOutCubic => "easeInOutCubic",
            Easing::OutQuint => "easeOutQuint",
            Easing::OutCirc => "easeOutCirc",
            Easing::OutElastic => "easeOutElastic",
            Easing::OutBack => "easeOutBack",
        }
    }
}

//--- Trait Implementations -----------------------------------------------

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when an easing name does not match any known curve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown easing curve `{0}`")]
pub struct UnknownEasing(pub String);

/// Accepts `easeOutCubic`, `ease_out_cubic`, `ease-out-cubic` and
/// `OutCubic`, case-insensitively.
impl FromStr for Easing {
    type Err = UnknownEasing;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        let normalized = normalized.strip_prefix("ease").unwrap_or(&normalized);

        Easing::ALL
            .into_iter()
            .find(|easing| {
                let canonical = easing.name().to_lowercase();
                let canonical = canonical.strip_prefix("ease").unwrap_or(&canonical);
                canonical == normalized
            })
            .ok_or_else(|| UnknownEasing(s.to_string()))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
