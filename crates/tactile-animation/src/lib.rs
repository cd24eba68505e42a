//! Animation helpers for Tactile
//!
//! [`FadeTransition`] fades an element in once when it mounts.
//! [`TransitionTimeline`] lets a rendering adapter compute what an element
//! looks like part way through a transition.

mod fade;
mod timeline;

pub use fade::{FadeSession, FadeTransition};
pub use timeline::{Lerp, TransitionTimeline};
