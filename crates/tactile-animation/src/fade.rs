//! One-shot fade-in on mount.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tactile_core::{
    FadeConfig, FrameCallbackRegistration, FrameClock, Lifecycle, Surface, SurfaceResultExt,
};
use tactile_ui_graphics::{TransitionSpec, VisualState};

/// Observable state of a fade: the opacity last applied and whether the
/// reveal step is still queued.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeSession {
    pub opacity: f32,
    pub scheduled: bool,
}

impl Default for FadeSession {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            scheduled: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Created,
    Mounted,
    Unmounted,
}

struct FadeInner<S: Surface> {
    surface: S,
    clock: FrameClock,
    config: FadeConfig,
    session: FadeSession,
    stage: Stage,
    reveal: Option<FrameCallbackRegistration>,
}

/// Fades its element from transparent to opaque when mounted.
///
/// Mounting applies opacity 0 with no transition, then on the next animation
/// frame opacity 1 with an opacity transition of `config.duration_millis`.
/// This happens once per instance: later updates and repeated mounts do not
/// replay it. Unmounting before the frame fires cancels the reveal.
pub struct FadeTransition<S: Surface + 'static> {
    inner: Rc<RefCell<FadeInner<S>>>,
}

impl<S: Surface + 'static> FadeTransition<S> {
    pub fn new(clock: FrameClock, surface: S, config: FadeConfig) -> Self {
        Self {
            inner: Rc::new(RefCell::new(FadeInner {
                surface,
                clock,
                config,
                session: FadeSession::default(),
                stage: Stage::Created,
                reveal: None,
            })),
        }
    }

    pub fn session(&self) -> FadeSession {
        self.inner.borrow().session
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.borrow().stage == Stage::Mounted
    }

    /// Runs `f` against the owned surface.
    pub fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.inner.borrow().surface)
    }

    fn reveal(weak: &Weak<RefCell<FadeInner<S>>>) {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        let mut inner = inner.borrow_mut();
        inner.reveal = None;
        inner.session.scheduled = false;
        if inner.stage != Stage::Mounted {
            return;
        }
        if !inner.surface.is_attached() {
            log::trace!("fade reveal: target detached, skipping");
            return;
        }
        let duration = inner.config.duration_millis;
        let revealed = VisualState::IDENTITY
            .with_opacity(1.0)
            .with_transition(TransitionSpec::opacity(duration));
        if inner.surface.apply(revealed).or_noop("fade reveal").is_some() {
            inner.session.opacity = 1.0;
            log::debug!("fade revealed over {duration}ms");
        }
    }
}

impl<S: Surface + 'static> Lifecycle for FadeTransition<S> {
    fn on_mount(&mut self) {
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        if inner.stage != Stage::Created {
            log::trace!("fade already ran for this instance");
            return;
        }
        inner.stage = Stage::Mounted;
        if !inner.surface.is_attached() {
            log::trace!("fade mount: target detached, skipping");
            return;
        }
        let hidden = VisualState::IDENTITY.with_opacity(0.0).without_transition();
        if inner.surface.apply(hidden).or_noop("fade mount").is_none() {
            return;
        }
        inner.session.opacity = 0.0;

        let weak = Rc::downgrade(&self.inner);
        inner.reveal = Some(inner.clock.with_frame_millis(move |_| Self::reveal(&weak)));
        inner.session.scheduled = true;
        log::debug!("fade scheduled");
    }

    fn on_unmount(&mut self) {
        let pending = {
            let mut inner = self.inner.borrow_mut();
            if inner.stage == Stage::Unmounted {
                return;
            }
            inner.stage = Stage::Unmounted;
            inner.session.scheduled = false;
            inner.reveal.take()
        };
        if let Some(registration) = pending {
            log::debug!("fade cancelled by unmount");
            registration.cancel();
        }
    }
}
