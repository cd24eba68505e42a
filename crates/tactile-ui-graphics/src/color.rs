//! Color representation and CSS color parsing

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color(pub f32, pub f32, pub f32, pub f32);

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self(r, g, b, 1.0)
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self(r, g, b, a)
    }

    pub const fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    pub const fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba_u8(r, g, b, 255)
    }

    pub fn r(&self) -> f32 {
        self.0
    }

    pub fn g(&self) -> f32 {
        self.1
    }

    pub fn b(&self) -> f32 {
        self.2
    }

    pub fn a(&self) -> f32 {
        self.3
    }

    pub fn with_alpha(&self, alpha: f32) -> Self {
        Self(self.0, self.1, self.2, alpha)
    }

    /// Parses the CSS color notations used for feedback tints:
    /// `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` and `rgba(r, g, b, a)`.
    ///
    /// Channel values in the functional forms are 0..=255 and alpha is 0..=1.
    pub fn parse_css(input: &str) -> Result<Self, ColorParseError> {
        let text = input.trim();
        if let Some(hex) = text.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ColorParseError::new(input));
        }

        let lower = text.to_ascii_lowercase();
        let (args, expect_alpha) = if let Some(rest) = lower.strip_prefix("rgba") {
            (rest, true)
        } else if let Some(rest) = lower.strip_prefix("rgb") {
            (rest, false)
        } else {
            return Err(ColorParseError::new(input));
        };

        let args = args
            .trim()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| ColorParseError::new(input))?;
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        let expected = if expect_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return Err(ColorParseError::new(input));
        }

        let mut channels = [0.0f32; 3];
        for (slot, part) in channels.iter_mut().zip(&parts) {
            let value: f32 = part.parse().map_err(|_| ColorParseError::new(input))?;
            if !(0.0..=255.0).contains(&value) {
                return Err(ColorParseError::new(input));
            }
            *slot = value / 255.0;
        }
        let alpha = if expect_alpha {
            let value: f32 = parts[3].parse().map_err(|_| ColorParseError::new(input))?;
            if !(0.0..=1.0).contains(&value) {
                return Err(ColorParseError::new(input));
            }
            value
        } else {
            1.0
        };

        Ok(Self(channels[0], channels[1], channels[2], alpha))
    }

    // Common color constants
    pub const BLACK: Color = Color(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Color = Color(0.0, 0.0, 0.0, 0.0);
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut out = [0u8; 3];
            for (slot, c) in out.iter_mut().zip(hex.chars()) {
                let digit = c.to_digit(16)? as u8;
                *slot = digit * 17;
            }
            Some(Color::from_rgb_u8(out[0], out[1], out[2]))
        }
        6 => Some(Color::from_rgb_u8(
            byte(&hex[0..2])?,
            byte(&hex[2..4])?,
            byte(&hex[4..6])?,
        )),
        8 => Some(Color::from_rgba_u8(
            byte(&hex[0..2])?,
            byte(&hex[2..4])?,
            byte(&hex[4..6])?,
            byte(&hex[6..8])?,
        )),
        _ => None,
    }
}

/// Error returned by [`Color::parse_css`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorParseError {
    input: String,
}

impl ColorParseError {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized color `{}`", self.input)
    }
}

impl std::error::Error for ColorParseError {}

#[cfg(test)]
#[path = "tests/color_tests.rs"]
mod tests;
