use std::rc::Rc;

use tactile_core::{FrameClock, Lifecycle, RippleConfig, Surface};
use tactile_ui_graphics::Color;

use crate::input::{ElementId, ListenerGuard, ListenerScope, PointerDispatcher, PointerEventKind};
use crate::ripple::Ripple;

/// Ripple tint used by buttons, `rgba(255, 255, 255, 0.4)`.
pub const RIPPLE_BUTTON_COLOR: Color = Color(1.0, 1.0, 1.0, 0.4);

/// A clickable element with ripple feedback that forwards clicks to
/// `on_click`. The ripple starts before `on_click` runs.
pub struct RippleButton<S: Surface + 'static> {
    ripple: Ripple<S>,
    dispatcher: PointerDispatcher,
    element: ElementId,
    on_click: Rc<dyn Fn()>,
    click: Option<ListenerGuard>,
}

impl<S: Surface + 'static> RippleButton<S> {
    pub fn new(
        dispatcher: &PointerDispatcher,
        element: ElementId,
        clock: FrameClock,
        surface: S,
        on_click: impl Fn() + 'static,
    ) -> Self {
        let config = RippleConfig::default().with_color(RIPPLE_BUTTON_COLOR);
        Self::with_config(dispatcher, element, clock, surface, config, on_click)
    }

    pub fn with_config(
        dispatcher: &PointerDispatcher,
        element: ElementId,
        clock: FrameClock,
        surface: S,
        config: RippleConfig,
        on_click: impl Fn() + 'static,
    ) -> Self {
        Self {
            ripple: Ripple::new(dispatcher, element, clock, surface, config),
            dispatcher: dispatcher.clone(),
            element,
            on_click: Rc::new(on_click),
            click: None,
        }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn ripple(&self) -> &Ripple<S> {
        &self.ripple
    }
}

impl<S: Surface + 'static> Lifecycle for RippleButton<S> {
    /// Binds the ripple, then the click forwarder. Nothing is forwarded
    /// unless the ripple bound, so a detached or disposed button stays inert.
    fn on_mount(&mut self) {
        self.ripple.on_mount();
        if self.click.is_some() {
            return;
        }
        if !self.ripple.is_bound() {
            log::trace!("ripple button {}: ripple not bound, skipping", self.element);
            return;
        }
        let on_click = Rc::clone(&self.on_click);
        self.click = Some(self.dispatcher.listen(
            ListenerScope::Element(self.element),
            PointerEventKind::Click,
            move |_| on_click(),
        ));
    }

    fn on_unmount(&mut self) {
        self.ripple.on_unmount();
        if let Some(click) = self.click.take() {
            click.release();
        }
    }
}
