//! Click feedback: an expanding, fading circle at the click position.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tactile_core::{
    FrameClock, LayerId, Lifecycle, RippleConfig, Sequence, SequenceHandle, Surface,
    SurfaceError, SurfaceResultExt,
};
use tactile_ui_graphics::{LayerStyle, Point, Rect, Transform, TransitionSpec, VisualState};

use crate::input::{
    ElementId, ListenerGuard, ListenerScope, PointerDispatcher, PointerEvent, PointerEventKind,
};

/// One ripple currently shown on the element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RippleInstance {
    pub id: u64,
    /// Click position relative to the element's top-left corner.
    pub origin: Point,
    /// Larger of the element's width and height at click time.
    pub diameter: f32,
    pub created_at_millis: u64,
    pub layer: LayerId,
}

struct ActiveRipple {
    instance: RippleInstance,
    style: LayerStyle,
    // Lifetime is over but the element was detached when the layer was due
    // to go. Removal is retried on the next trigger and on teardown.
    expired: bool,
    // Held so the steps are cancelled with the ripple.
    _expand: SequenceHandle,
    _cleanup: SequenceHandle,
}

struct RippleInner<S: Surface> {
    surface: S,
    clock: FrameClock,
    dispatcher: PointerDispatcher,
    element: ElementId,
    config: RippleConfig,
    active: Vec<ActiveRipple>,
    next_id: u64,
    click: Option<ListenerGuard>,
    disposed: bool,
}

/// Shows a ripple on every click on its element.
///
/// Each click inserts a circular layer centred on the click point, expands
/// it on the next animation frame and removes it `duration_millis` after it
/// was created. Ripples are timed independently of each other.
pub struct Ripple<S: Surface + 'static> {
    inner: Rc<RefCell<RippleInner<S>>>,
}

impl<S: Surface + 'static> Ripple<S> {
    pub fn new(
        dispatcher: &PointerDispatcher,
        element: ElementId,
        clock: FrameClock,
        surface: S,
        config: RippleConfig,
    ) -> Self {
        Self {
            inner: Rc::new(RefCell::new(RippleInner {
                surface,
                clock,
                dispatcher: dispatcher.clone(),
                element,
                config,
                active: Vec::new(),
                next_id: 1,
                click: None,
                disposed: false,
            })),
        }
    }

    /// Registers the element's click listener. Binding an element that is not
    /// attached registers nothing.
    pub fn bind(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.disposed || inner.click.is_some() {
            return;
        }
        if !inner.surface.is_attached() {
            log::trace!("ripple bind: {} detached, skipping", inner.element);
            return;
        }
        let weak = Rc::downgrade(&self.inner);
        let guard = inner.dispatcher.listen(
            ListenerScope::Element(inner.element),
            PointerEventKind::Click,
            move |event| Self::trigger_weak(&weak, event),
        );
        inner.click = Some(guard);
        log::debug!("ripple bound to {}", inner.element);
    }

    pub fn is_bound(&self) -> bool {
        self.inner.borrow().click.is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.borrow().disposed
    }

    pub fn active_ripples(&self) -> Vec<RippleInstance> {
        self.inner
            .borrow()
            .active
            .iter()
            .map(|ripple| ripple.instance)
            .collect()
    }

    pub fn active_count(&self) -> usize {
        self.inner.borrow().active.len()
    }

    /// Starts a ripple at the event position. Does nothing once disposed, on
    /// a detached element or for a position that is not finite.
    pub fn trigger(&self, event: &PointerEvent) -> Option<RippleInstance> {
        Self::start_ripple(&self.inner, event)
    }

    /// Releases the click listener, cancels pending ripple steps and removes
    /// the ripples still shown. Safe to call more than once.
    pub fn dispose(&self) {
        let (click, active) = {
            let mut inner = self.inner.borrow_mut();
            if inner.disposed {
                return;
            }
            inner.disposed = true;
            (inner.click.take(), std::mem::take(&mut inner.active))
        };
        if let Some(click) = click {
            click.release();
        }
        if !active.is_empty() {
            let mut inner = self.inner.borrow_mut();
            for ripple in &active {
                inner
                    .surface
                    .remove_layer(ripple.instance.layer)
                    .or_noop("ripple teardown");
            }
        }
        drop(active);
        log::debug!("ripple disposed");
    }

    fn trigger_weak(weak: &Weak<RefCell<RippleInner<S>>>, event: &PointerEvent) {
        if let Some(inner) = weak.upgrade() {
            Self::start_ripple(&inner, event);
        }
    }

    fn start_ripple(
        this: &Rc<RefCell<RippleInner<S>>>,
        event: &PointerEvent,
    ) -> Option<RippleInstance> {
        let mut guard = this.borrow_mut();
        let inner = &mut *guard;
        if inner.disposed {
            return None;
        }
        if !inner.surface.is_attached() {
            log::trace!("ripple trigger: {} detached, skipping", inner.element);
            return None;
        }
        if !event.position.is_finite() {
            log::trace!("ripple trigger: non-finite position ignored");
            return None;
        }
        Self::remove_expired(inner);
        let bounds = inner.surface.bounds().or_noop("ripple bounds")?;
        let origin = bounds.to_local(event.position);
        let diameter = bounds.size().max_dimension();
        let duration = inner.config.duration_millis;
        let transition = TransitionSpec::all(duration);

        let style = LayerStyle::circle(
            Rect::centered_square(origin, diameter),
            inner.config.color,
            VisualState {
                opacity: inner.config.initial_opacity,
                transform: Transform::scale(0.0),
                transition: Some(transition),
            },
        );
        let layer = inner.surface.insert_layer(style).or_noop("ripple insert")?;

        let id = inner.next_id;
        inner.next_id += 1;
        let instance = RippleInstance {
            id,
            origin,
            diameter,
            created_at_millis: inner.clock.now_millis(),
            layer,
        };

        let weak = Rc::downgrade(this);
        let expand = Sequence::new(inner.clock.clone(), "ripple-expand")
            .next_frame(move || Self::expand(&weak, id))
            .start();
        let weak = Rc::downgrade(this);
        let cleanup = Sequence::new(inner.clock.clone(), "ripple-remove")
            .after(duration, move || Self::remove(&weak, id))
            .start();

        inner.active.push(ActiveRipple {
            instance,
            style,
            expired: false,
            _expand: expand,
            _cleanup: cleanup,
        });
        log::debug!(
            "ripple {id} inserted at ({}, {}) diameter {diameter}",
            origin.x,
            origin.y
        );
        Some(instance)
    }

    fn expand(weak: &Weak<RefCell<RippleInner<S>>>, id: u64) {
        let Some(this) = weak.upgrade() else {
            return;
        };
        let mut guard = this.borrow_mut();
        let inner = &mut *guard;
        let Some(ripple) = inner.active.iter().find(|r| r.instance.id == id) else {
            return;
        };
        let expanded = ripple.style.with_visual(VisualState {
            opacity: 0.0,
            transform: Transform::scale(inner.config.target_scale),
            transition: ripple.style.visual.transition,
        });
        let layer = ripple.instance.layer;
        inner
            .surface
            .update_layer(layer, expanded)
            .or_noop("ripple expand");
        log::trace!("ripple {id} expanding");
    }

    fn remove(weak: &Weak<RefCell<RippleInner<S>>>, id: u64) {
        let Some(this) = weak.upgrade() else {
            return;
        };
        let removed = {
            let mut guard = this.borrow_mut();
            let inner = &mut *guard;
            let Some(index) = inner.active.iter().position(|r| r.instance.id == id) else {
                return;
            };
            let layer = inner.active[index].instance.layer;
            match inner.surface.remove_layer(layer) {
                Err(SurfaceError::Detached) => {
                    log::trace!("ripple {id}: target detached, removal deferred");
                    inner.active[index].expired = true;
                    return;
                }
                result => {
                    result.or_noop("ripple remove");
                }
            }
            inner.active.remove(index)
        };
        log::debug!("ripple {id} removed");
        drop(removed);
    }

    /// Removes layers whose lifetime ended while the element was detached.
    fn remove_expired(inner: &mut RippleInner<S>) {
        let RippleInner {
            active, surface, ..
        } = inner;
        active.retain(|ripple| {
            if !ripple.expired {
                return true;
            }
            let layer = ripple.instance.layer;
            let still_detached =
                matches!(surface.remove_layer(layer), Err(SurfaceError::Detached));
            if !still_detached {
                log::debug!("ripple {} removed after reattach", ripple.instance.id);
            }
            still_detached
        });
    }
}

impl<S: Surface + 'static> Lifecycle for Ripple<S> {
    fn on_mount(&mut self) {
        self.bind();
    }

    fn on_unmount(&mut self) {
        self.dispose();
    }
}

impl<S: Surface + 'static> Drop for Ripple<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}
