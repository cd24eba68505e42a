//! Sampling of in-flight transitions.
//!
//! Controllers only describe where an element should end up and how to get
//! there. A rendering adapter keeps one [`TransitionTimeline`] per element,
//! retargets it whenever a new [`VisualState`] is applied and samples it
//! every frame to get the presented values.

use tactile_ui_graphics::{Transform, TransitionProperties, TransitionSpec, VisualState};

/// Types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for Transform {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        Transform {
            translate_x: self.translate_x.lerp(&target.translate_x, fraction),
            translate_y: self.translate_y.lerp(&target.translate_y, fraction),
            scale: self.scale.lerp(&target.scale, fraction),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionTimeline {
    from: VisualState,
    to: VisualState,
    started_at_millis: u64,
}

impl TransitionTimeline {
    /// A timeline at rest on `initial`.
    pub fn new(initial: VisualState, now_millis: u64) -> Self {
        Self {
            from: initial,
            to: initial,
            started_at_millis: now_millis,
        }
    }

    pub fn target(&self) -> VisualState {
        self.to
    }

    /// Starts moving toward `target` from whatever is presented at
    /// `now_millis`. Properties the target's transition does not cover jump
    /// straight to their new value.
    pub fn retarget(&mut self, target: VisualState, now_millis: u64) {
        self.from = self.sample(now_millis);
        self.to = target;
        self.started_at_millis = now_millis;
    }

    /// Linear progress in [0, 1] of the current transition.
    pub fn progress(&self, now_millis: u64) -> f32 {
        let Some(spec) = self.to.transition else {
            return 1.0;
        };
        if spec.duration_millis == 0 {
            return 1.0;
        }
        let elapsed = now_millis.saturating_sub(self.started_at_millis);
        (elapsed as f32 / spec.duration_millis as f32).clamp(0.0, 1.0)
    }

    pub fn is_running(&self, now_millis: u64) -> bool {
        self.to.transition.is_some() && self.progress(now_millis) < 1.0
    }

    /// The presented state at `now_millis`.
    pub fn sample(&self, now_millis: u64) -> VisualState {
        let Some(spec) = self.to.transition else {
            return self.to;
        };
        let eased = spec.easing.transform(self.progress(now_millis));
        VisualState {
            opacity: animated(
                &spec,
                TransitionProperties::OPACITY,
                eased,
                self.from.opacity,
                self.to.opacity,
            ),
            transform: animated(
                &spec,
                TransitionProperties::TRANSFORM,
                eased,
                self.from.transform,
                self.to.transform,
            ),
            transition: self.to.transition,
        }
    }
}

fn animated<T: Lerp + Copy>(
    spec: &TransitionSpec,
    property: TransitionProperties,
    eased: f32,
    from: T,
    to: T,
) -> T {
    if spec.applies_to(property) {
        from.lerp(&to, eased)
    } else {
        to
    }
}

#[cfg(test)]
#[path = "tests/timeline_tests.rs"]
mod tests;
