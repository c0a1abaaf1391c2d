//! Contrail core engine: platform-agnostic pointer tracking, trails, parallax,
//! ambient loops and the launch countdown, all driven by one frame scheduler.

pub mod ambient;
pub mod clock;
pub mod config;
pub mod countdown;
pub mod easing;
mod error;
pub mod parallax;
pub mod pointer;
pub mod render;
pub mod scene;
pub mod trail;
pub mod vector;

pub use ambient::{AmbientField, AmbientPose, FloatingElement, Keyframes};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{
    AmbientConfig, CountdownConfig, FadeTiming, ParallaxConfig, SceneConfig, TrailPreset,
};
pub use countdown::{Countdown, TimeLeft};
pub use easing::Easing;
pub use error::ConfigError;
pub use glam::Vec2;
pub use parallax::{ElementId, ParallaxRegistry, ParallaxTarget};
pub use pointer::{ContainerBounds, PointerEvent, PointerTracker};
pub use render::{RenderList, TrailInstance, TrailSprite};
pub use scene::{FrameStats, Scene, Teardown};
pub use trail::{TrailId, TrailItem, TrailList, TrailPhase, TrailSpawner};
pub use vector::{Motion, VectorTracker};
