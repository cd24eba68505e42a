//! The rendering target a controller mutates.
//!
//! A [`Surface`] stands for one element in the host's presentation layer. It
//! exposes attachment state, bounds, the element's own [`VisualState`] and a
//! set of transient child layers. Each controller instance owns its surface
//! exclusively.

use std::fmt;

use tactile_ui_graphics::{LayerStyle, Rect, VisualState};

/// Identifier of a child layer inserted into a surface.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u64);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceError {
    /// The element is not attached to the rendering tree.
    Detached,
    /// The layer was never inserted or has already been removed.
    UnknownLayer(LayerId),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::Detached => write!(f, "surface is detached"),
            SurfaceError::UnknownLayer(id) => write!(f, "unknown {id}"),
        }
    }
}

impl std::error::Error for SurfaceError {}

pub trait Surface {
    fn is_attached(&self) -> bool;

    /// Element bounds in client coordinates.
    fn bounds(&self) -> Result<Rect, SurfaceError>;

    /// Replaces the element's visual state.
    fn apply(&mut self, state: VisualState) -> Result<(), SurfaceError>;

    fn insert_layer(&mut self, layer: LayerStyle) -> Result<LayerId, SurfaceError>;

    fn update_layer(&mut self, id: LayerId, layer: LayerStyle) -> Result<(), SurfaceError>;

    fn remove_layer(&mut self, id: LayerId) -> Result<(), SurfaceError>;
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn is_attached(&self) -> bool {
        (**self).is_attached()
    }

    fn bounds(&self) -> Result<Rect, SurfaceError> {
        (**self).bounds()
    }

    fn apply(&mut self, state: VisualState) -> Result<(), SurfaceError> {
        (**self).apply(state)
    }

    fn insert_layer(&mut self, layer: LayerStyle) -> Result<LayerId, SurfaceError> {
        (**self).insert_layer(layer)
    }

    fn update_layer(&mut self, id: LayerId, layer: LayerStyle) -> Result<(), SurfaceError> {
        (**self).update_layer(id, layer)
    }

    fn remove_layer(&mut self, id: LayerId) -> Result<(), SurfaceError> {
        (**self).remove_layer(id)
    }
}

/// Turns surface errors into silent no-ops.
///
/// Operations against a detached element do nothing, and removing a layer
/// that is already gone is not an error either.
pub trait SurfaceResultExt<T> {
    fn or_noop(self, context: &str) -> Option<T>;
}

impl<T> SurfaceResultExt<T> for Result<T, SurfaceError> {
    fn or_noop(self, context: &str) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(SurfaceError::Detached) => {
                log::trace!("{context}: target detached, skipping");
                None
            }
            Err(err @ SurfaceError::UnknownLayer(_)) => {
                log::warn!("{context}: {err}, skipping");
                None
            }
        }
    }
}
