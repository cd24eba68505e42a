/// Mount lifecycle hooks a host calls on the controllers bound to an element.
///
/// `on_mount` runs once when the element enters the tree, `on_update` on
/// every later render of the same instance and `on_unmount` when it leaves.
/// Implementations must tolerate `on_unmount` being called more than once.
pub trait Lifecycle {
    fn on_mount(&mut self);

    fn on_update(&mut self) {}

    fn on_unmount(&mut self);
}
