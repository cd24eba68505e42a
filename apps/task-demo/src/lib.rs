//! Headless demo application for the Tactile interaction controllers.
//!
//! A two screen task manager: ripple buttons for navigation, theme and
//! counter, a fade on every screen mount and swipe-to-dismiss task items.
//! The scene is a stand-in renderer so the demo runs from a terminal and
//! under `cargo test`.

pub mod app;
pub mod model;
pub mod scene;
pub mod script;
pub mod theme;

pub use app::App;
pub use model::{Action, AppState, Screen, Task, TaskId, TaskList};
pub use script::Step;
