//! Headless presentation layer.
//!
//! Stands in for a renderer: it keeps the bounds, visual state and child
//! layers of every mounted element so the demo can hit test pointer events
//! and print what would be on screen.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use tactile_core::{LayerId, Surface, SurfaceError};
use tactile_foundation::ElementId;
use tactile_ui_graphics::{Color, LayerStyle, Rect, VisualState};

#[derive(Clone, Debug)]
pub struct SceneNode {
    pub label: String,
    pub bounds: Rect,
    pub color: Color,
    pub visual: VisualState,
    pub layers: BTreeMap<LayerId, LayerStyle>,
}

#[derive(Default)]
struct SceneInner {
    nodes: BTreeMap<ElementId, SceneNode>,
    order: Vec<ElementId>,
    next_layer: u64,
}

/// Shared scene. Clones refer to the same nodes.
#[derive(Clone, Default)]
pub struct Scene {
    inner: Rc<RefCell<SceneInner>>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node on top of the existing ones and returns the surface a
    /// controller uses to drive it.
    pub fn mount(&self, id: ElementId, label: &str, bounds: Rect, color: Color) -> SceneSurface {
        let mut inner = self.inner.borrow_mut();
        inner.nodes.insert(
            id,
            SceneNode {
                label: label.to_string(),
                bounds,
                color,
                visual: VisualState::IDENTITY,
                layers: BTreeMap::new(),
            },
        );
        inner.order.retain(|existing| *existing != id);
        inner.order.push(id);
        SceneSurface {
            scene: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Removes the node. Its surfaces report detached from now on.
    pub fn unmount(&self, id: ElementId) -> bool {
        let mut inner = self.inner.borrow_mut();
        inner.order.retain(|existing| *existing != id);
        inner.nodes.remove(&id).is_some()
    }

    pub fn set_color(&self, id: ElementId, color: Color) {
        if let Some(node) = self.inner.borrow_mut().nodes.get_mut(&id) {
            node.color = color;
        }
    }

    pub fn set_bounds(&self, id: ElementId, bounds: Rect) {
        if let Some(node) = self.inner.borrow_mut().nodes.get_mut(&id) {
            node.bounds = bounds;
        }
    }

    pub fn set_label(&self, id: ElementId, label: &str) {
        if let Some(node) = self.inner.borrow_mut().nodes.get_mut(&id) {
            node.label = label.to_string();
        }
    }

    pub fn node(&self, id: ElementId) -> Option<SceneNode> {
        self.inner.borrow().nodes.get(&id).cloned()
    }

    /// Topmost node whose bounds contain `(x, y)`.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<ElementId> {
        let inner = self.inner.borrow();
        inner
            .order
            .iter()
            .rev()
            .find(|id| {
                inner
                    .nodes
                    .get(*id)
                    .is_some_and(|node| node.bounds.contains(x, y))
            })
            .copied()
    }

    /// First node, bottom to top, whose label is exactly `label`.
    pub fn find(&self, label: &str) -> Option<(ElementId, Rect)> {
        let inner = self.inner.borrow();
        inner.order.iter().find_map(|id| {
            inner
                .nodes
                .get(id)
                .filter(|node| node.label == label)
                .map(|node| (*id, node.bounds))
        })
    }

    pub fn labels(&self) -> Vec<String> {
        let inner = self.inner.borrow();
        inner
            .order
            .iter()
            .filter_map(|id| inner.nodes.get(id).map(|node| node.label.clone()))
            .collect()
    }

    pub fn layer_count(&self) -> usize {
        self.inner
            .borrow()
            .nodes
            .values()
            .map(|node| node.layers.len())
            .sum()
    }

    /// One line per node, bottom to top.
    pub fn describe(&self) -> Vec<String> {
        let inner = self.inner.borrow();
        inner
            .order
            .iter()
            .filter_map(|id| inner.nodes.get(id))
            .map(|node| {
                let mut line = format!(
                    "{:<22} opacity {:.2} dx {:>7.1}",
                    node.label, node.visual.opacity, node.visual.transform.translate_x
                );
                if !node.layers.is_empty() {
                    line.push_str(&format!(" ripples {}", node.layers.len()));
                }
                line
            })
            .collect()
    }
}

/// A [`Surface`] for one scene node.
pub struct SceneSurface {
    scene: Weak<RefCell<SceneInner>>,
    id: ElementId,
}

impl SceneSurface {
    fn with_node<R>(
        &self,
        f: impl FnOnce(&mut SceneNode, &mut u64) -> Result<R, SurfaceError>,
    ) -> Result<R, SurfaceError> {
        let scene = self.scene.upgrade().ok_or(SurfaceError::Detached)?;
        let mut inner = scene.borrow_mut();
        let SceneInner {
            nodes, next_layer, ..
        } = &mut *inner;
        let node = nodes.get_mut(&self.id).ok_or(SurfaceError::Detached)?;
        f(node, next_layer)
    }
}

impl Surface for SceneSurface {
    fn is_attached(&self) -> bool {
        self.scene
            .upgrade()
            .is_some_and(|scene| scene.borrow().nodes.contains_key(&self.id))
    }

    fn bounds(&self) -> Result<Rect, SurfaceError> {
        self.with_node(|node, _| Ok(node.bounds))
    }

    fn apply(&mut self, state: VisualState) -> Result<(), SurfaceError> {
        self.with_node(|node, _| {
            node.visual = state;
            Ok(())
        })
    }

    fn insert_layer(&mut self, layer: LayerStyle) -> Result<LayerId, SurfaceError> {
        self.with_node(|node, next_layer| {
            *next_layer += 1;
            let id = LayerId(*next_layer);
            node.layers.insert(id, layer);
            Ok(id)
        })
    }

    fn update_layer(&mut self, id: LayerId, layer: LayerStyle) -> Result<(), SurfaceError> {
        self.with_node(|node, _| match node.layers.get_mut(&id) {
            Some(slot) => {
                *slot = layer;
                Ok(())
            }
            None => Err(SurfaceError::UnknownLayer(id)),
        })
    }

    fn remove_layer(&mut self, id: LayerId) -> Result<(), SurfaceError> {
        self.with_node(|node, _| {
            node.layers
                .remove(&id)
                .map(|_| ())
                .ok_or(SurfaceError::UnknownLayer(id))
        })
    }
}
