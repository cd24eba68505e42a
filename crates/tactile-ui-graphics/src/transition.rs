//! Transition descriptions attached to visual state changes.
//!
//! A [`TransitionSpec`] says which properties animate toward their new value
//! and over how long, mirroring a CSS `transition` declaration such as
//! `transform 0.6s, opacity 0.6s`.

use std::ops::BitOr;

/// Timing curves for transitions, using the CSS keyword curves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    /// CSS `ease`, the default curve for transitions.
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Arbitrary `cubic-bezier(x1, y1, x2, y2)`.
    CubicBezier(f32, f32, f32, f32),
}

impl Default for Easing {
    fn default() -> Self {
        Easing::Ease
    }
}

impl Easing {
    /// Map a linear progress fraction in [0, 1] to eased progress.
    pub fn transform(&self, fraction: f32) -> f32 {
        match *self {
            Easing::Linear => fraction.clamp(0.0, 1.0),
            Easing::Ease => cubic_bezier(0.25, 0.1, 0.25, 1.0, fraction),
            Easing::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, fraction),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, fraction),
        }
    }
}

fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    let curve = |a: f32, b: f32, c: f32, t: f32| ((a * t + b) * t + c) * t;
    let slope = |a: f32, b: f32, c: f32, t: f32| (3.0 * a * t + 2.0 * b) * t + c;

    // Newton-Raphson on x(t) = fraction, bisection when the slope flattens.
    let mut t = fraction;
    for _ in 0..8 {
        let error = curve(ax, bx, cx, t) - fraction;
        if error.abs() < 1e-6 {
            return curve(ay, by, cy, t);
        }
        let d = slope(ax, bx, cx, t);
        if d.abs() < 1e-6 {
            break;
        }
        t = (t - error / d).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    t = fraction;
    for _ in 0..20 {
        let x = curve(ax, bx, cx, t);
        if (x - fraction).abs() < 1e-6 {
            break;
        }
        if x > fraction {
            hi = t;
        } else {
            lo = t;
        }
        t = 0.5 * (lo + hi);
    }
    curve(ay, by, cy, t)
}

/// Set of visual properties a transition applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TransitionProperties(u8);

impl TransitionProperties {
    pub const NONE: Self = Self(0);
    pub const OPACITY: Self = Self(1 << 0);
    pub const TRANSFORM: Self = Self(1 << 1);
    pub const ALL: Self = Self(Self::OPACITY.0 | Self::TRANSFORM.0);

    pub fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl BitOr for TransitionProperties {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

/// How a visual state change is animated by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionSpec {
    pub properties: TransitionProperties,
    pub duration_millis: u64,
    pub easing: Easing,
}

impl TransitionSpec {
    pub fn new(properties: TransitionProperties, duration_millis: u64) -> Self {
        Self {
            properties,
            duration_millis,
            easing: Easing::Ease,
        }
    }

    pub fn opacity(duration_millis: u64) -> Self {
        Self::new(TransitionProperties::OPACITY, duration_millis)
    }

    pub fn transform(duration_millis: u64) -> Self {
        Self::new(TransitionProperties::TRANSFORM, duration_millis)
    }

    pub fn all(duration_millis: u64) -> Self {
        Self::new(TransitionProperties::ALL, duration_millis)
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn applies_to(&self, property: TransitionProperties) -> bool {
        self.properties.contains(property)
    }
}

#[cfg(test)]
#[path = "tests/transition_tests.rs"]
mod tests;
