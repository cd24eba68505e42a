//! Typed visual state applied to a surface and to its child layers.

use crate::{Color, Rect, TransitionSpec};

/// 2D transform applied around the element's center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translate_x: f32,
    pub translate_y: f32,
    pub scale: f32,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translate_x: 0.0,
        translate_y: 0.0,
        scale: 1.0,
    };

    pub fn translate_x(offset: f32) -> Self {
        Self {
            translate_x: offset,
            ..Self::IDENTITY
        }
    }

    pub fn scale(scale: f32) -> Self {
        Self {
            scale,
            ..Self::IDENTITY
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// What a rendering adapter needs to present an element: opacity, transform
/// and the transition (if any) used to move from the previous state.
///
/// `transition: None` means the change is applied immediately.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualState {
    pub opacity: f32,
    pub transform: Transform,
    pub transition: Option<TransitionSpec>,
}

impl VisualState {
    pub const IDENTITY: VisualState = VisualState {
        opacity: 1.0,
        transform: Transform::IDENTITY,
        transition: None,
    };

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_translation_x(mut self, offset: f32) -> Self {
        self.transform.translate_x = offset;
        self
    }

    pub fn with_transition(mut self, transition: TransitionSpec) -> Self {
        self.transition = Some(transition);
        self
    }

    pub fn without_transition(mut self) -> Self {
        self.transition = None;
        self
    }
}

impl Default for VisualState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerShape {
    Rect,
    Circle,
}

/// A transient child layer inserted into a surface, such as a ripple circle.
///
/// `bounds` are relative to the owning element's origin. Layers never take
/// part in hit testing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerStyle {
    pub bounds: Rect,
    pub shape: LayerShape,
    pub color: Color,
    pub visual: VisualState,
}

impl LayerStyle {
    pub fn circle(bounds: Rect, color: Color, visual: VisualState) -> Self {
        Self {
            bounds,
            shape: LayerShape::Circle,
            color,
            visual,
        }
    }

    pub fn with_visual(mut self, visual: VisualState) -> Self {
        self.visual = visual;
        self
    }
}
