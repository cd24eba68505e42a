//! Interaction configuration shared by the ripple, swipe and fade controllers.
//!
//! Distances are in logical pixels and durations in milliseconds.

use std::fmt;

use tactile_ui_graphics::{Color, ColorParseError};

/// Minimum absolute horizontal offset, in logical pixels, for a released drag
/// to count as a dismiss. Offsets equal to the threshold cancel.
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 100.0;

/// Distance a dismissed item travels off-screen, in logical pixels, along the
/// drag direction.
pub const DEFAULT_EXIT_DISTANCE: f32 = 500.0;

/// Length of the dismiss animation. The delete callback fires once it ends.
pub const DEFAULT_EXIT_DURATION_MS: u64 = 300;

/// Length of the spring-back animation after a cancelled drag.
pub const DEFAULT_CANCEL_DURATION_MS: u64 = 300;

/// Length of the mount fade-in.
pub const DEFAULT_FADE_DURATION_MS: u64 = 400;

/// Lifetime of a single ripple, from insertion to removal.
pub const DEFAULT_RIPPLE_DURATION_MS: u64 = 600;

/// Opacity a ripple starts at before it expands and fades out.
pub const RIPPLE_INITIAL_OPACITY: f32 = 0.75;

/// Scale a ripple reaches at the end of its expansion, relative to a circle
/// whose diameter is the element's larger dimension.
pub const RIPPLE_TARGET_SCALE: f32 = 2.0;

/// Default feedback tint, `rgba(255, 255, 255, 0.5)`.
pub const DEFAULT_RIPPLE_COLOR: Color = Color(1.0, 1.0, 1.0, 0.5);

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    InvalidThreshold(f32),
    InvalidExitDistance(f32),
    InvalidColor(ColorParseError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidThreshold(value) => {
                write!(f, "swipe threshold must be finite and >= 0, got {value}")
            }
            ConfigError::InvalidExitDistance(value) => {
                write!(f, "exit distance must be finite and > 0, got {value}")
            }
            ConfigError::InvalidColor(err) => write!(f, "ripple color: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidColor(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ColorParseError> for ConfigError {
    fn from(err: ColorParseError) -> Self {
        ConfigError::InvalidColor(err)
    }
}

/// All recognised interaction options. Immutable once handed to a controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InteractionConfig {
    pub ripple_color: Color,
    pub swipe_threshold: f32,
    pub exit_distance: f32,
    pub exit_duration_millis: u64,
    pub cancel_duration_millis: u64,
    pub fade_duration_millis: u64,
    pub ripple_duration_millis: u64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            ripple_color: DEFAULT_RIPPLE_COLOR,
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            exit_distance: DEFAULT_EXIT_DISTANCE,
            exit_duration_millis: DEFAULT_EXIT_DURATION_MS,
            cancel_duration_millis: DEFAULT_CANCEL_DURATION_MS,
            fade_duration_millis: DEFAULT_FADE_DURATION_MS,
            ripple_duration_millis: DEFAULT_RIPPLE_DURATION_MS,
        }
    }
}

impl InteractionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ripple_color(mut self, color: Color) -> Self {
        self.ripple_color = color;
        self
    }

    /// Sets the ripple tint from CSS notation, e.g. `rgba(255,255,255,0.4)`.
    pub fn with_ripple_color_css(self, color: &str) -> Result<Self, ConfigError> {
        let color = Color::parse_css(color)?;
        Ok(self.with_ripple_color(color))
    }

    pub fn with_swipe_threshold(mut self, threshold: f32) -> Self {
        self.swipe_threshold = threshold;
        self
    }

    pub fn with_exit_distance(mut self, distance: f32) -> Self {
        self.exit_distance = distance;
        self
    }

    pub fn with_exit_duration(mut self, millis: u64) -> Self {
        self.exit_duration_millis = millis;
        self
    }

    pub fn with_cancel_duration(mut self, millis: u64) -> Self {
        self.cancel_duration_millis = millis;
        self
    }

    pub fn with_fade_duration(mut self, millis: u64) -> Self {
        self.fade_duration_millis = millis;
        self
    }

    pub fn with_ripple_duration(mut self, millis: u64) -> Self {
        self.ripple_duration_millis = millis;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.swipe_threshold.is_finite() || self.swipe_threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold(self.swipe_threshold));
        }
        if !self.exit_distance.is_finite() || self.exit_distance <= 0.0 {
            return Err(ConfigError::InvalidExitDistance(self.exit_distance));
        }
        Ok(())
    }

    pub fn ripple(&self) -> RippleConfig {
        RippleConfig {
            color: self.ripple_color,
            duration_millis: self.ripple_duration_millis,
            ..RippleConfig::default()
        }
    }

    pub fn swipe(&self) -> SwipeConfig {
        SwipeConfig {
            threshold: self.swipe_threshold,
            exit_distance: self.exit_distance,
            exit_duration_millis: self.exit_duration_millis,
            cancel_duration_millis: self.cancel_duration_millis,
        }
    }

    pub fn fade(&self) -> FadeConfig {
        FadeConfig {
            duration_millis: self.fade_duration_millis,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RippleConfig {
    pub color: Color,
    pub duration_millis: u64,
    pub initial_opacity: f32,
    pub target_scale: f32,
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            color: DEFAULT_RIPPLE_COLOR,
            duration_millis: DEFAULT_RIPPLE_DURATION_MS,
            initial_opacity: RIPPLE_INITIAL_OPACITY,
            target_scale: RIPPLE_TARGET_SCALE,
        }
    }
}

impl RippleConfig {
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeConfig {
    pub threshold: f32,
    pub exit_distance: f32,
    pub exit_duration_millis: u64,
    pub cancel_duration_millis: u64,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        InteractionConfig::default().swipe()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeConfig {
    pub duration_millis: u64,
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            duration_millis: DEFAULT_FADE_DURATION_MS,
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
