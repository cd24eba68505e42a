//! Pointer event routing.
//!
//! Platform integrations enqueue pointer events with [`PointerDispatcher::push`]
//! (or deliver them right away with [`PointerDispatcher::dispatch`]) together
//! with the element that was hit. Listeners are scoped either to one element
//! or to the whole document.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashMap};
use smallvec::SmallVec;

use super::types::{PointerEvent, PointerEventKind, PointerId};

/// An element that can be the target of pointer events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerScope {
    /// Fires only for events targeting this element.
    Element(ElementId),
    /// Fires for every event, whatever it targets.
    Global,
}

type Handler = Rc<dyn Fn(&PointerEvent)>;

struct ListenerEntry {
    scope: ListenerScope,
    kind: PointerEventKind,
    handler: Handler,
}

struct DispatcherInner {
    next_element: Cell<u64>,
    next_listener: Cell<u64>,
    listeners: RefCell<IndexMap<ListenerId, ListenerEntry, FxBuildHasher>>,
    queue: RefCell<VecDeque<(Option<ElementId>, PointerEvent)>>,
    pressed: RefCell<FxHashMap<PointerId, Option<ElementId>>>,
}

/// Shared pointer dispatcher. Clones refer to the same listener table.
#[derive(Clone)]
pub struct PointerDispatcher {
    inner: Rc<DispatcherInner>,
}

impl Default for PointerDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerDispatcher {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(DispatcherInner {
                next_element: Cell::new(1),
                next_listener: Cell::new(1),
                listeners: RefCell::new(IndexMap::default()),
                queue: RefCell::new(VecDeque::new()),
                pressed: RefCell::new(FxHashMap::default()),
            }),
        }
    }

    pub fn allocate_element(&self) -> ElementId {
        let id = self.inner.next_element.get();
        self.inner.next_element.set(id + 1);
        ElementId(id)
    }

    pub fn add_listener(
        &self,
        scope: ListenerScope,
        kind: PointerEventKind,
        handler: impl Fn(&PointerEvent) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.inner.next_listener.get());
        self.inner.next_listener.set(id.0 + 1);
        self.inner.listeners.borrow_mut().insert(
            id,
            ListenerEntry {
                scope,
                kind,
                handler: Rc::new(handler),
            },
        );
        log::trace!("listener {:?} added for {kind:?} on {scope:?}", id);
        id
    }

    /// Returns `false` when the listener was never added or is already gone.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        // shift_remove keeps the remaining listeners in registration order.
        self.inner.listeners.borrow_mut().shift_remove(&id).is_some()
    }

    /// Adds a listener that is removed when the returned guard is released
    /// or dropped.
    pub fn listen(
        &self,
        scope: ListenerScope,
        kind: PointerEventKind,
        handler: impl Fn(&PointerEvent) + 'static,
    ) -> ListenerGuard {
        let id = self.add_listener(scope, kind, handler);
        ListenerGuard {
            dispatcher: Rc::downgrade(&self.inner),
            id: Cell::new(Some(id)),
        }
    }

    pub fn is_registered(&self, id: ListenerId) -> bool {
        self.inner.listeners.borrow().contains_key(&id)
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    pub fn listener_count_for(&self, scope: ListenerScope) -> usize {
        self.inner
            .listeners
            .borrow()
            .values()
            .filter(|entry| entry.scope == scope)
            .count()
    }

    /// Queues an event for the next [`flush`](Self::flush).
    pub fn push(&self, target: Option<ElementId>, event: PointerEvent) {
        self.inner.queue.borrow_mut().push_back((target, event));
    }

    pub fn has_pending_events(&self) -> bool {
        !self.inner.queue.borrow().is_empty()
    }

    /// Dispatches queued events in order, including any queued by handlers
    /// while flushing. Returns the number of handler invocations.
    pub fn flush(&self) -> usize {
        let mut invoked = 0;
        loop {
            let next = self.inner.queue.borrow_mut().pop_front();
            let Some((target, event)) = next else {
                break;
            };
            invoked += self.dispatch(target, event);
        }
        invoked
    }

    /// Delivers `event` to the listeners of `target` and then to global
    /// listeners, each group in registration order. A listener removed by an
    /// earlier handler does not fire. An up on the element that received the
    /// matching down is followed by a click on that element.
    pub fn dispatch(&self, target: Option<ElementId>, event: PointerEvent) -> usize {
        let mut invoked = self.deliver(target, &event);
        match event.kind {
            PointerEventKind::Down => {
                self.inner.pressed.borrow_mut().insert(event.id, target);
            }
            PointerEventKind::Up => {
                let pressed = self.inner.pressed.borrow_mut().remove(&event.id);
                if let (Some(Some(down_target)), Some(up_target)) = (pressed, target) {
                    if down_target == up_target {
                        let click = event.as_kind(PointerEventKind::Click);
                        invoked += self.deliver(Some(up_target), &click);
                    }
                }
            }
            PointerEventKind::Move | PointerEventKind::Click => {}
        }
        invoked
    }

    fn deliver(&self, target: Option<ElementId>, event: &PointerEvent) -> usize {
        let matching: SmallVec<[ListenerId; 8]> = {
            let listeners = self.inner.listeners.borrow();
            let scoped = listeners.iter().filter(|(_, entry)| {
                entry.kind == event.kind
                    && target.is_some_and(|target| entry.scope == ListenerScope::Element(target))
            });
            let global = listeners.iter().filter(|(_, entry)| {
                entry.kind == event.kind && entry.scope == ListenerScope::Global
            });
            scoped.chain(global).map(|(id, _)| *id).collect()
        };

        let mut invoked = 0;
        for id in matching {
            let handler = self
                .inner
                .listeners
                .borrow()
                .get(&id)
                .map(|entry| Rc::clone(&entry.handler));
            if let Some(handler) = handler {
                handler(event);
                invoked += 1;
            }
        }
        if invoked > 0 {
            log::trace!(
                "{:?} at ({}, {}) reached {invoked} listeners",
                event.kind,
                event.position.x,
                event.position.y
            );
        }
        invoked
    }
}

impl fmt::Debug for PointerDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerDispatcher")
            .field("listeners", &self.listener_count())
            .field("queued", &self.inner.queue.borrow().len())
            .finish()
    }
}

/// Owns one registered listener and removes it exactly once.
#[must_use = "dropping the guard removes the listener"]
pub struct ListenerGuard {
    dispatcher: Weak<DispatcherInner>,
    id: Cell<Option<ListenerId>>,
}

impl ListenerGuard {
    pub fn id(&self) -> Option<ListenerId> {
        self.id.get()
    }

    pub fn is_active(&self) -> bool {
        self.id.get().is_some()
    }

    /// Removes the listener. Returns `true` only on the call that actually
    /// removed it.
    pub fn release(&self) -> bool {
        let Some(id) = self.id.take() else {
            return false;
        };
        let Some(inner) = self.dispatcher.upgrade() else {
            return false;
        };
        let removed = inner.listeners.borrow_mut().shift_remove(&id).is_some();
        if !removed {
            log::warn!("listener {id:?} was already removed from the dispatcher");
        }
        removed
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard").field("id", &self.id.get()).finish()
    }
}

#[cfg(test)]
#[path = "tests/dispatcher_tests.rs"]
mod tests;
