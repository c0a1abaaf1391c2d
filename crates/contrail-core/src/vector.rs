//! First-difference filter over the pointer stream.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::pointer::{PointerEvent, PointerTracker};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Motion {
    pub position: Vec2,
    /// Displacement from the previously recorded position.
    pub vector: Vec2,
}

#[derive(Debug, Default)]
pub struct VectorTracker {
    pointer: PointerTracker,
    last: Vec2,
    motion: Motion,
    revision: u64,
}

impl VectorTracker {
    pub fn new(pointer: PointerTracker) -> Self {
        Self {
            pointer,
            ..Self::default()
        }
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    pub fn position(&self) -> Vec2 {
        self.motion.position
    }

    /// Bumped for every processed event, zero displacement included.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn handle(&mut self, event: &PointerEvent) -> Option<Motion> {
        let position = self.pointer.handle(event)?;
        self.motion = Motion {
            position,
            vector: position - self.last,
        };
        self.last = position;
        self.revision += 1;
        Some(self.motion)
    }
}
