pub mod dispatcher;
pub mod types;

pub use dispatcher::{ElementId, ListenerGuard, ListenerId, ListenerScope, PointerDispatcher};
pub use types::{PointerButton, PointerButtons, PointerEvent, PointerEventKind, PointerId};

pub mod prelude {
    pub use super::dispatcher::{ElementId, ListenerScope, PointerDispatcher};
    pub use super::types::{PointerEvent, PointerEventKind};
}
