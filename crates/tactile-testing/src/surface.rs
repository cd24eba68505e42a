//! In-memory [`Surface`] that records every mutation.
//!
//! [`RecordingSurface`] is handed to the controller under test;
//! the paired [`SurfaceProbe`] stays with the test to inspect what was
//! applied and to attach or detach the element.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tactile_animation::TransitionTimeline;
use tactile_core::{FrameClock, LayerId, Surface, SurfaceError};
use tactile_ui_graphics::{LayerStyle, Rect, VisualState};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SurfaceEvent {
    Applied(VisualState),
    Inserted(LayerId),
    Updated(LayerId),
    Removed(LayerId),
}

struct SurfaceState {
    attached: bool,
    bounds: Rect,
    clock: Option<FrameClock>,
    visual: VisualState,
    timeline: TransitionTimeline,
    layers: FxHashMap<LayerId, LayerStyle>,
    next_layer: u64,
    events: Vec<SurfaceEvent>,
}

impl SurfaceState {
    fn now_millis(&self) -> u64 {
        self.clock.as_ref().map(FrameClock::now_millis).unwrap_or(0)
    }
}

pub struct RecordingSurface {
    state: Rc<RefCell<SurfaceState>>,
}

impl RecordingSurface {
    /// An attached surface with the given client bounds.
    pub fn new(bounds: Rect) -> (RecordingSurface, SurfaceProbe) {
        Self::build(bounds, true, None)
    }

    pub fn detached(bounds: Rect) -> (RecordingSurface, SurfaceProbe) {
        Self::build(bounds, false, None)
    }

    /// An attached surface whose transition timeline follows `clock`.
    pub fn with_clock(bounds: Rect, clock: FrameClock) -> (RecordingSurface, SurfaceProbe) {
        Self::build(bounds, true, Some(clock))
    }

    fn build(
        bounds: Rect,
        attached: bool,
        clock: Option<FrameClock>,
    ) -> (RecordingSurface, SurfaceProbe) {
        let now = clock.as_ref().map(FrameClock::now_millis).unwrap_or(0);
        let state = Rc::new(RefCell::new(SurfaceState {
            attached,
            bounds,
            clock,
            visual: VisualState::IDENTITY,
            timeline: TransitionTimeline::new(VisualState::IDENTITY, now),
            layers: FxHashMap::default(),
            next_layer: 1,
            events: Vec::new(),
        }));
        (
            RecordingSurface {
                state: Rc::clone(&state),
            },
            SurfaceProbe { state },
        )
    }

    fn check_attached(&self) -> Result<(), SurfaceError> {
        if self.state.borrow().attached {
            Ok(())
        } else {
            Err(SurfaceError::Detached)
        }
    }
}

impl Surface for RecordingSurface {
    fn is_attached(&self) -> bool {
        self.state.borrow().attached
    }

    fn bounds(&self) -> Result<Rect, SurfaceError> {
        self.check_attached()?;
        Ok(self.state.borrow().bounds)
    }

    fn apply(&mut self, visual: VisualState) -> Result<(), SurfaceError> {
        self.check_attached()?;
        let mut state = self.state.borrow_mut();
        let now = state.now_millis();
        state.visual = visual;
        state.timeline.retarget(visual, now);
        state.events.push(SurfaceEvent::Applied(visual));
        Ok(())
    }

    fn insert_layer(&mut self, layer: LayerStyle) -> Result<LayerId, SurfaceError> {
        self.check_attached()?;
        let mut state = self.state.borrow_mut();
        let id = LayerId(state.next_layer);
        state.next_layer += 1;
        state.layers.insert(id, layer);
        state.events.push(SurfaceEvent::Inserted(id));
        Ok(id)
    }

    fn update_layer(&mut self, id: LayerId, layer: LayerStyle) -> Result<(), SurfaceError> {
        self.check_attached()?;
        let mut state = self.state.borrow_mut();
        match state.layers.get_mut(&id) {
            Some(slot) => *slot = layer,
            None => return Err(SurfaceError::UnknownLayer(id)),
        }
        state.events.push(SurfaceEvent::Updated(id));
        Ok(())
    }

    fn remove_layer(&mut self, id: LayerId) -> Result<(), SurfaceError> {
        self.check_attached()?;
        let mut state = self.state.borrow_mut();
        if state.layers.remove(&id).is_none() {
            return Err(SurfaceError::UnknownLayer(id));
        }
        state.events.push(SurfaceEvent::Removed(id));
        Ok(())
    }
}

/// Test-side view of a [`RecordingSurface`].
#[derive(Clone)]
pub struct SurfaceProbe {
    state: Rc<RefCell<SurfaceState>>,
}

impl SurfaceProbe {
    pub fn attach(&self) {
        self.state.borrow_mut().attached = true;
    }

    pub fn detach(&self) {
        self.state.borrow_mut().attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.state.borrow().attached
    }

    pub fn bounds(&self) -> Rect {
        self.state.borrow().bounds
    }

    pub fn set_bounds(&self, bounds: Rect) {
        self.state.borrow_mut().bounds = bounds;
    }

    /// The last visual state applied to the element.
    pub fn visual(&self) -> VisualState {
        self.state.borrow().visual
    }

    /// The state the element shows at `now_millis`, part way through any
    /// running transition.
    pub fn presented(&self, now_millis: u64) -> VisualState {
        self.state.borrow().timeline.sample(now_millis)
    }

    pub fn applied(&self) -> Vec<VisualState> {
        self.state
            .borrow()
            .events
            .iter()
            .filter_map(|event| match event {
                SurfaceEvent::Applied(visual) => Some(*visual),
                _ => None,
            })
            .collect()
    }

    pub fn applied_count(&self) -> usize {
        self.applied().len()
    }

    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.state.borrow().events.clone()
    }

    pub fn clear_events(&self) {
        self.state.borrow_mut().events.clear();
    }

    pub fn layer(&self, id: LayerId) -> Option<LayerStyle> {
        self.state.borrow().layers.get(&id).copied()
    }

    /// Live layers ordered by id.
    pub fn layers(&self) -> Vec<(LayerId, LayerStyle)> {
        let mut layers: Vec<_> = self
            .state
            .borrow()
            .layers
            .iter()
            .map(|(id, layer)| (*id, *layer))
            .collect();
        layers.sort_by_key(|(id, _)| *id);
        layers
    }

    pub fn layer_count(&self) -> usize {
        self.state.borrow().layers.len()
    }

    fn count(&self, predicate: impl Fn(&SurfaceEvent) -> bool) -> usize {
        self.state.borrow().events.iter().filter(|event| predicate(event)).count()
    }

    pub fn inserted_count(&self) -> usize {
        self.count(|event| matches!(event, SurfaceEvent::Inserted(_)))
    }

    pub fn removed_count(&self) -> usize {
        self.count(|event| matches!(event, SurfaceEvent::Removed(_)))
    }

    /// How many times `id` was removed. Anything above one is a bug.
    pub fn removals_of(&self, id: LayerId) -> usize {
        self.count(|event| *event == SurfaceEvent::Removed(id))
    }
}
