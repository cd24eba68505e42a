//! Testing utilities and harness for Tactile

pub mod robot;
pub mod robot_assertions;
pub mod surface;

pub use robot::{GestureRobot, TestElement};
pub use surface::{RecordingSurface, SurfaceEvent, SurfaceProbe};

pub mod prelude {
    pub use crate::robot::*;
    pub use crate::robot_assertions;
    pub use crate::surface::*;
}
