//! Horizontal swipe-to-dismiss for list items.
//!
//! A press on the item starts a drag. While dragging, the item follows the
//! pointer horizontally with no transition. On release the live offset is
//! compared with the threshold: past it the item slides off-screen and
//! fades, then `on_delete` fires; otherwise it springs back to rest.
//!
//! Move and up are tracked with global listeners so the drag keeps working
//! when the pointer leaves the item. They exist only while dragging.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tactile_core::{
    FrameClock, Lifecycle, Sequence, SequenceHandle, Surface, SurfaceResultExt, SwipeConfig,
};
use tactile_ui_graphics::{TransitionSpec, VisualState};

use crate::input::{
    ElementId, ListenerGuard, ListenerScope, PointerDispatcher, PointerEvent, PointerEventKind,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipePhase {
    Idle,
    Dragging,
    /// Release decided to dismiss. Only observable while the release is
    /// being handled.
    Committing,
    /// Release decided to spring back. Only observable while the release is
    /// being handled.
    Cancelling,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    fn sign(self) -> f32 {
        match self {
            SwipeDirection::Left => -1.0,
            SwipeDirection::Right => 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeOutcome {
    Committed { direction: SwipeDirection },
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSession {
    pub start_x: f32,
    /// Horizontal distance from `start_x` as of the latest move.
    pub offset: f32,
    pub status: SwipePhase,
}

impl GestureSession {
    const IDLE: GestureSession = GestureSession {
        start_x: 0.0,
        offset: 0.0,
        status: SwipePhase::Idle,
    };
}

impl Default for GestureSession {
    fn default() -> Self {
        Self::IDLE
    }
}

/// Global move/up listeners owned by a drag. Dropping releases both.
struct DragListeners {
    moved: ListenerGuard,
    up: ListenerGuard,
}

impl DragListeners {
    fn release(self) {
        self.moved.release();
        self.up.release();
    }
}

/// What the item is doing after a release.
enum Settle {
    None,
    /// Sliding out; the sequence fires `on_delete`.
    Dismissing(SequenceHandle),
    /// Springing back; the sequence clears the transition.
    Restoring(SequenceHandle),
    /// `on_delete` has fired. The item ignores further input.
    Dismissed,
}

struct SwipeInner<S: Surface> {
    surface: S,
    clock: FrameClock,
    dispatcher: PointerDispatcher,
    element: ElementId,
    config: SwipeConfig,
    on_delete: Rc<dyn Fn()>,
    session: GestureSession,
    drag: Option<DragListeners>,
    press: Option<ListenerGuard>,
    settle: Settle,
    last_outcome: Option<SwipeOutcome>,
    disposed: bool,
}

type Shared<S> = Rc<RefCell<SwipeInner<S>>>;

/// Drag-to-dismiss controller for one list item.
pub struct SwipeToDismiss<S: Surface + 'static> {
    inner: Shared<S>,
}

impl<S: Surface + 'static> SwipeToDismiss<S> {
    pub fn new(
        dispatcher: &PointerDispatcher,
        element: ElementId,
        clock: FrameClock,
        surface: S,
        config: SwipeConfig,
        on_delete: impl Fn() + 'static,
    ) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SwipeInner {
                surface,
                clock,
                dispatcher: dispatcher.clone(),
                element,
                config,
                on_delete: Rc::new(on_delete),
                session: GestureSession::IDLE,
                drag: None,
                press: None,
                settle: Settle::None,
                last_outcome: None,
                disposed: false,
            })),
        }
    }

    /// Registers the press listener on the item. Binding an element that is
    /// not attached registers nothing.
    pub fn bind(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.disposed || inner.press.is_some() {
            return;
        }
        if !inner.surface.is_attached() {
            log::trace!("swipe bind: {} detached, skipping", inner.element);
            return;
        }
        let weak = Rc::downgrade(&self.inner);
        let press = inner.dispatcher.listen(
            ListenerScope::Element(inner.element),
            PointerEventKind::Down,
            move |event| with_live(&weak, |this| Self::pointer_down(this, event)),
        );
        inner.press = Some(press);
    }

    pub fn session(&self) -> GestureSession {
        self.inner.borrow().session
    }

    pub fn phase(&self) -> SwipePhase {
        self.inner.borrow().session.status
    }

    pub fn offset(&self) -> f32 {
        self.inner.borrow().session.offset
    }

    pub fn last_outcome(&self) -> Option<SwipeOutcome> {
        self.inner.borrow().last_outcome
    }

    /// The item is sliding out or springing back after a release.
    pub fn is_settling(&self) -> bool {
        matches!(
            self.inner.borrow().settle,
            Settle::Dismissing(_) | Settle::Restoring(_)
        )
    }

    pub fn is_dismissed(&self) -> bool {
        matches!(self.inner.borrow().settle, Settle::Dismissed)
    }

    /// Global move/up listeners are registered.
    pub fn is_tracking(&self) -> bool {
        self.inner.borrow().drag.is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.borrow().disposed
    }

    /// Releases every listener and cancels any pending settle step, including
    /// a pending `on_delete`. Safe to call more than once.
    pub fn dispose(&self) {
        let (press, drag, settle) = {
            let mut inner = self.inner.borrow_mut();
            if inner.disposed {
                return;
            }
            inner.disposed = true;
            inner.session = GestureSession::IDLE;
            (
                inner.press.take(),
                inner.drag.take(),
                std::mem::replace(&mut inner.settle, Settle::None),
            )
        };
        if let Some(press) = press {
            press.release();
        }
        if let Some(drag) = drag {
            drag.release();
        }
        drop(settle);
        log::debug!("swipe disposed");
    }

    fn pointer_down(this: &Shared<S>, event: &PointerEvent) {
        let mut guard = this.borrow_mut();
        let inner = &mut *guard;
        if inner.disposed {
            return;
        }
        if inner.session.status == SwipePhase::Dragging {
            log::trace!("swipe: press while dragging ignored");
            return;
        }
        match &inner.settle {
            Settle::Dismissing(_) | Settle::Dismissed => {
                log::trace!("swipe: press on a dismissed item ignored");
                return;
            }
            Settle::Restoring(_) | Settle::None => {}
        }
        if !event.position.is_finite() {
            log::trace!("swipe: non-finite press ignored");
            return;
        }
        if !inner.surface.is_attached() {
            log::trace!("swipe press: {} detached, skipping", inner.element);
            return;
        }

        // A new drag supersedes a spring-back in progress.
        let restoring = std::mem::replace(&mut inner.settle, Settle::None);

        let weak = Rc::downgrade(this);
        let moved = inner.dispatcher.listen(
            ListenerScope::Global,
            PointerEventKind::Move,
            move |event| with_live(&weak, |this| Self::pointer_move(this, event)),
        );
        let weak = Rc::downgrade(this);
        let up = inner.dispatcher.listen(
            ListenerScope::Global,
            PointerEventKind::Up,
            move |event| with_live(&weak, |this| Self::pointer_up(this, event)),
        );
        inner.drag = Some(DragListeners { moved, up });
        inner.session = GestureSession {
            start_x: event.position.x,
            offset: 0.0,
            status: SwipePhase::Dragging,
        };
        drop(guard);
        drop(restoring);
        log::debug!("swipe drag started at x={}", event.position.x);
    }

    fn pointer_move(this: &Shared<S>, event: &PointerEvent) {
        let mut inner = this.borrow_mut();
        if inner.session.status != SwipePhase::Dragging {
            return;
        }
        if !event.position.is_finite() {
            log::trace!("swipe: non-finite move ignored");
            return;
        }
        let offset = event.position.x - inner.session.start_x;
        inner.session.offset = offset;
        inner
            .surface
            .apply(VisualState::IDENTITY.with_translation_x(offset))
            .or_noop("swipe move");
        log::trace!("swipe offset {offset}");
    }

    fn pointer_up(this: &Shared<S>, _event: &PointerEvent) {
        let mut guard = this.borrow_mut();
        let inner = &mut *guard;
        if inner.session.status != SwipePhase::Dragging {
            return;
        }
        // Decided from the offset recorded by the latest move, not from the
        // release position.
        let offset = inner.session.offset;
        let config = inner.config;

        let outcome = if offset.abs() > config.threshold {
            let direction = if offset > 0.0 {
                SwipeDirection::Right
            } else {
                SwipeDirection::Left
            };
            inner.session.status = SwipePhase::Committing;
            let exit = VisualState::IDENTITY
                .with_translation_x(direction.sign() * config.exit_distance)
                .with_opacity(0.0)
                .with_transition(TransitionSpec::all(config.exit_duration_millis));
            inner.surface.apply(exit).or_noop("swipe commit");

            let weak = Rc::downgrade(this);
            let dismissal = Sequence::new(inner.clock.clone(), "swipe-dismiss")
                .after(config.exit_duration_millis, move || {
                    with_live(&weak, Self::finish_dismiss)
                })
                .start();
            inner.settle = Settle::Dismissing(dismissal);
            log::debug!("swipe committed {direction:?} at offset {offset}");
            SwipeOutcome::Committed { direction }
        } else {
            inner.session.status = SwipePhase::Cancelling;
            let rest = VisualState::IDENTITY
                .with_translation_x(0.0)
                .with_transition(TransitionSpec::transform(config.cancel_duration_millis));
            inner.surface.apply(rest).or_noop("swipe cancel");

            let weak = Rc::downgrade(this);
            let restore = Sequence::new(inner.clock.clone(), "swipe-restore")
                .after(config.cancel_duration_millis, move || {
                    with_live(&weak, Self::finish_restore)
                })
                .start();
            inner.settle = Settle::Restoring(restore);
            log::debug!("swipe cancelled at offset {offset}");
            SwipeOutcome::Cancelled
        };

        inner.last_outcome = Some(outcome);
        let drag = inner.drag.take();
        inner.session = GestureSession::IDLE;
        drop(guard);
        if let Some(drag) = drag {
            drag.release();
        }
    }

    fn finish_dismiss(this: &Shared<S>) {
        let (on_delete, finished) = {
            let mut inner = this.borrow_mut();
            if inner.disposed || !matches!(inner.settle, Settle::Dismissing(_)) {
                return;
            }
            let finished = std::mem::replace(&mut inner.settle, Settle::Dismissed);
            (Rc::clone(&inner.on_delete), finished)
        };
        drop(finished);
        log::debug!("swipe dismissed, deleting item");
        on_delete();
    }

    fn finish_restore(this: &Shared<S>) {
        let finished = {
            let mut inner = this.borrow_mut();
            if inner.disposed || !matches!(inner.settle, Settle::Restoring(_)) {
                return;
            }
            inner
                .surface
                .apply(VisualState::IDENTITY.without_transition())
                .or_noop("swipe restore");
            std::mem::replace(&mut inner.settle, Settle::None)
        };
        drop(finished);
        log::trace!("swipe transition cleared");
    }
}

/// Runs `f` if the controller is still alive.
fn with_live<T>(weak: &Weak<RefCell<T>>, f: impl FnOnce(&Rc<RefCell<T>>)) {
    if let Some(this) = weak.upgrade() {
        f(&this);
    }
}

impl<S: Surface + 'static> Lifecycle for SwipeToDismiss<S> {
    fn on_mount(&mut self) {
        self.bind();
    }

    fn on_unmount(&mut self) {
        self.dispose();
    }
}

impl<S: Surface + 'static> Drop for SwipeToDismiss<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<S: Surface + 'static> fmt::Debug for SwipeToDismiss<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("SwipeToDismiss")
            .field("element", &inner.element)
            .field("session", &inner.session)
            .field("last_outcome", &inner.last_outcome)
            .finish()
    }
}
