//! Pointer tracking: keeps the latest pointer or touch position, optionally
//! relative to a container whose origin is re-read on every event.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Move { x: f32, y: f32 },
    /// Active touch points; the first one drives the pointer.
    Touch { touches: Vec<Vec2> },
}

impl PointerEvent {
    pub fn moved(x: f32, y: f32) -> Self {
        Self::Move { x, y }
    }

    /// Absolute coordinates carried by the event, if any.
    pub fn point(&self) -> Option<Vec2> {
        match self {
            PointerEvent::Move { x, y } => Some(Vec2::new(*x, *y)),
            PointerEvent::Touch { touches } => touches.first().copied(),
        }
    }
}

/// Source of a container's current bounding-box origin. `None` means the
/// container has not been laid out yet.
pub trait ContainerBounds {
    fn origin(&self) -> Option<Vec2>;
}

impl<F> ContainerBounds for F
where
    F: Fn() -> Option<Vec2>,
{
    fn origin(&self) -> Option<Vec2> {
        self()
    }
}

#[derive(Default)]
pub struct PointerTracker {
    position: Vec2,
    container: Option<Box<dyn ContainerBounds>>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn relative_to(bounds: impl ContainerBounds + 'static) -> Self {
        Self {
            position: Vec2::ZERO,
            container: Some(Box::new(bounds)),
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn container_ready(&self) -> bool {
        self.container
            .as_ref()
            .map_or(true, |container| container.origin().is_some())
    }

    /// Applies one input event and returns the new position, or `None` when
    /// the event was skipped (no touch points, or container not laid out).
    pub fn handle(&mut self, event: &PointerEvent) -> Option<Vec2> {
        let Some(point) = event.point() else {
            trace!("pointer: touch event without touch points, skipped");
            return None;
        };
        let position = match &self.container {
            Some(container) => {
                let Some(origin) = container.origin() else {
                    trace!("pointer: container not laid out, skipped");
                    return None;
                };
                point - origin
            }
            None => point,
        };
        self.position = position;
        Some(position)
    }
}

impl fmt::Debug for PointerTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerTracker")
            .field("position", &self.position)
            .field("has_container", &self.container.is_some())
            .finish()
    }
}
