//! Core runtime for Tactile interaction behaviors.
//!
//! The host event loop owns a [`Runtime`] and drives it: it runs animation
//! frames with [`Runtime::run_frame`] and moves time forward with
//! [`Runtime::advance_to`]. Controllers schedule deferred work through a
//! [`FrameClock`] and mutate their element through a [`Surface`].

mod config;
mod frame_clock;
mod lifecycle;
mod platform;
mod runtime;
mod sequence;
mod surface;

pub use config::*;
pub use frame_clock::{FrameCallbackRegistration, FrameClock, TimerRegistration};
pub use lifecycle::Lifecycle;
pub use platform::{Clock, ManualClock, MonotonicClock};
pub use runtime::{FrameCallbackId, Runtime, RuntimeHandle, TimerId};
pub use sequence::{CancelToken, Sequence, SequenceHandle};
pub use surface::{LayerId, Surface, SurfaceError, SurfaceResultExt};

pub use tactile_ui_graphics as graphics;

pub mod prelude {
    pub use crate::config::InteractionConfig;
    pub use crate::frame_clock::FrameClock;
    pub use crate::lifecycle::Lifecycle;
    pub use crate::runtime::{Runtime, RuntimeHandle};
    pub use crate::sequence::{Sequence, SequenceHandle};
    pub use crate::surface::{LayerId, Surface, SurfaceError};
}
