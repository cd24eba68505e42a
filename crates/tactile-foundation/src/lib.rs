//! Pointer input and interaction controllers for Tactile
//!
//! - [`input`] routes pointer events to element-scoped and global listeners.
//! - [`Ripple`] and [`RippleButton`] give click feedback.
//! - [`SwipeToDismiss`] turns a horizontal drag into a dismissal.

pub mod input;

mod button;
mod ripple;
mod swipe;

pub use button::{RippleButton, RIPPLE_BUTTON_COLOR};
pub use input::{
    ElementId, ListenerGuard, ListenerId, ListenerScope, PointerButton, PointerButtons,
    PointerDispatcher, PointerEvent, PointerEventKind, PointerId,
};
pub use ripple::{Ripple, RippleInstance};
pub use swipe::{GestureSession, SwipeDirection, SwipeOutcome, SwipePhase, SwipeToDismiss};

pub mod prelude {
    pub use crate::button::RippleButton;
    pub use crate::input::prelude::*;
    pub use crate::ripple::Ripple;
    pub use crate::swipe::{SwipeOutcome, SwipePhase, SwipeToDismiss};
}
