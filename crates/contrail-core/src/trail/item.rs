use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::FadeTiming;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrailId(pub u64);

impl fmt::Display for TrailId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trail#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrailPhase {
    Pending,
    FadingIn,
    FadingOut,
    Complete,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailItem {
    pub id: TrailId,
    pub position: Vec2,
    /// Degrees.
    pub rotation: f32,
    pub spawn_index: u64,
    pub variant: String,
    pub spawned_at: f64,
    phase: TrailPhase,
    opacity: f32,
}

impl TrailItem {
    pub fn new(
        id: TrailId,
        position: Vec2,
        rotation: f32,
        spawn_index: u64,
        variant: String,
        spawned_at: f64,
    ) -> Self {
        Self {
            id,
            position,
            rotation,
            spawn_index,
            variant,
            spawned_at,
            phase: TrailPhase::Pending,
            opacity: 0.0,
        }
    }

    pub fn phase(&self) -> TrailPhase {
        self.phase
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn is_complete(&self) -> bool {
        self.phase == TrailPhase::Complete
    }

    /// Moves the fade sequence forward to `now_ms`. Once complete the item
    /// stays complete; there is no way back.
    pub fn advance(&mut self, now_ms: f64, fade: &FadeTiming) -> TrailPhase {
        if self.phase == TrailPhase::Complete {
            return self.phase;
        }
        let elapsed = (now_ms - self.spawned_at).max(0.0);
        if elapsed < fade.fade_in_ms {
            self.phase = TrailPhase::FadingIn;
            self.opacity = fade.ease_in.apply((elapsed / fade.fade_in_ms) as f32);
        } else if elapsed < fade.total_ms() {
            self.phase = TrailPhase::FadingOut;
            let progress = (elapsed - fade.fade_in_ms) / fade.fade_out_ms;
            self.opacity = 1.0 - fade.ease_out.apply(progress as f32);
        } else {
            self.phase = TrailPhase::Complete;
            self.opacity = 0.0;
        }
        self.phase
    }
}
