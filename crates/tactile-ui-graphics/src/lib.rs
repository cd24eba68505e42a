//! Pure math/data for drawing & visual state in Tactile
//!
//! This crate contains geometry primitives, color definitions, the typed
//! visual state applied to surfaces and the transition/easing descriptions
//! that accompany it.

mod color;
mod geometry;
mod transition;
mod visual;

pub use color::*;
pub use geometry::*;
pub use transition::*;
pub use visual::*;

pub mod prelude {
    pub use crate::color::Color;
    pub use crate::geometry::{Point, Rect, Size};
    pub use crate::transition::{Easing, TransitionProperties, TransitionSpec};
    pub use crate::visual::{LayerShape, LayerStyle, Transform, VisualState};
}
