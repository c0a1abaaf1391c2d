//! Platform abstraction traits so `contrail-core` stays host-agnostic.

use contrail_core::{ContainerBounds, PointerEvent, RenderList, Vec2};
use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Bounding box of the view hosting the scene, in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ContainerRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.top_left() + self.size() / 2.0
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && point.x < self.x + self.width
            && point.y < self.y + self.height
    }
}

impl ContainerBounds for ContainerRect {
    fn origin(&self) -> Option<Vec2> {
        Some(self.top_left())
    }
}

/// Source of pointer and touch events. Events are drained once per frame.
pub trait InputSource: Send + Sync {
    fn start(&mut self) -> Result<()>;
    fn stop(&mut self) -> Result<()>;
    fn poll(&mut self) -> Vec<PointerEvent>;
}

/// Consumer of the per-frame render snapshot.
pub trait RenderSink {
    fn init(&mut self) -> Result<()> {
        Ok(())
    }
    fn present(&mut self, frame: &RenderList) -> Result<()>;
}
