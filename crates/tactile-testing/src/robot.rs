//! Robot-style driver for interaction tests.
//!
//! A [`GestureRobot`] owns a [`Runtime`] and a [`PointerDispatcher`], hit
//! tests pointer positions against the elements it created and lets a test
//! step time explicitly.
//!
//! # Example
//!
//! ```
//! use tactile_testing::GestureRobot;
//! use tactile_ui_graphics::Rect;
//!
//! let mut robot = GestureRobot::new();
//! let item = robot.add_element(Rect::new(0.0, 0.0, 300.0, 48.0));
//! robot.click(10.0, 10.0);
//! robot.frame();
//! robot.advance(600);
//! assert!(item.probe.is_attached());
//! ```

use tactile_core::{FrameClock, Runtime};
use tactile_foundation::{ElementId, PointerDispatcher, PointerEvent, PointerId};
use tactile_ui_graphics::{Point, Rect};

use crate::surface::{RecordingSurface, SurfaceProbe};

/// An element created by the robot. Move `surface` into the controller and
/// keep `probe` for assertions.
pub struct TestElement {
    pub id: ElementId,
    pub surface: RecordingSurface,
    pub probe: SurfaceProbe,
}

pub struct GestureRobot {
    runtime: Runtime,
    dispatcher: PointerDispatcher,
    elements: Vec<(ElementId, SurfaceProbe)>,
    pointer: PointerId,
}

impl Default for GestureRobot {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureRobot {
    pub fn new() -> Self {
        Self {
            runtime: Runtime::new(),
            dispatcher: PointerDispatcher::new(),
            elements: Vec::new(),
            pointer: 0,
        }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn dispatcher(&self) -> &PointerDispatcher {
        &self.dispatcher
    }

    pub fn clock(&self) -> FrameClock {
        self.runtime.frame_clock()
    }

    pub fn now_millis(&self) -> u64 {
        self.runtime.now_millis()
    }

    /// Creates an attached element at `bounds`. Later elements sit on top of
    /// earlier ones for hit testing.
    pub fn add_element(&mut self, bounds: Rect) -> TestElement {
        let id = self.dispatcher.allocate_element();
        let (surface, probe) = RecordingSurface::with_clock(bounds, self.clock());
        self.elements.push((id, probe.clone()));
        TestElement { id, surface, probe }
    }

    /// Topmost attached element containing `(x, y)`.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<ElementId> {
        self.elements
            .iter()
            .rev()
            .find(|(_, probe)| probe.is_attached() && probe.bounds().contains(x, y))
            .map(|(id, _)| *id)
    }

    fn send(&self, event: PointerEvent) -> usize {
        let Point { x, y } = event.position;
        let target = self.hit_test(x, y);
        self.dispatcher.dispatch(target, event.with_id(self.pointer))
    }

    /// Returns the number of listeners that ran.
    pub fn press(&mut self, x: f32, y: f32) -> usize {
        self.send(PointerEvent::down(x, y))
    }

    pub fn move_to(&mut self, x: f32, y: f32) -> usize {
        self.send(PointerEvent::moved(x, y))
    }

    /// Releasing over the pressed element also delivers a click.
    pub fn release(&mut self, x: f32, y: f32) -> usize {
        self.send(PointerEvent::up(x, y))
    }

    pub fn click(&mut self, x: f32, y: f32) -> usize {
        self.press(x, y) + self.release(x, y)
    }

    /// Presses at `(from_x, y)`, moves to `(to_x, y)` and releases there.
    pub fn drag(&mut self, from_x: f32, to_x: f32, y: f32) {
        self.press(from_x, y);
        self.move_to(to_x, y);
        self.release(to_x, y);
    }

    /// Runs one animation frame. Returns the number of callbacks that ran.
    pub fn frame(&mut self) -> usize {
        self.runtime.run_frame()
    }

    /// Moves time forward, firing due timers. Returns the number fired.
    pub fn advance(&mut self, millis: u64) -> usize {
        self.runtime.advance_by(millis)
    }

    /// Alternates frames and 16ms steps until nothing is pending or
    /// `max_millis` has elapsed.
    pub fn settle(&mut self, max_millis: u64) {
        let deadline = self.runtime.now_millis().saturating_add(max_millis);
        while !self.runtime.is_idle() && self.runtime.now_millis() < deadline {
            self.runtime.run_frame();
            self.runtime.advance_by(16);
        }
    }
}
