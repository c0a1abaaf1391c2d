//! Per-frame render snapshot handed to whatever draws the scene.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::ambient::AmbientPose;
use crate::parallax::ElementId;
use crate::trail::{TrailId, TrailItem};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailSprite {
    pub id: TrailId,
    pub position: Vec2,
    /// Degrees.
    pub rotation: f32,
    pub opacity: f32,
    pub variant: String,
    /// Index of `variant` in the preset's variant list, `u32::MAX` if it is no
    /// longer listed.
    pub variant_slot: u32,
}

impl TrailSprite {
    pub fn from_item(item: &TrailItem, variants: &[String]) -> Self {
        let variant_slot = variants
            .iter()
            .position(|variant| *variant == item.variant)
            .map_or(u32::MAX, |slot| slot as u32);
        Self {
            id: item.id,
            position: item.position,
            rotation: item.rotation,
            opacity: item.opacity(),
            variant: item.variant.clone(),
            variant_slot,
        }
    }
}

/// GPU instance record for one trail sprite.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TrailInstance {
    pub position: [f32; 2],
    pub rotation_radians: f32,
    pub opacity: f32,
    pub variant_slot: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderList {
    /// Stacking order: later sprites draw on top.
    pub trail: Vec<TrailSprite>,
    pub parallax: Vec<(ElementId, Vec2)>,
    pub ambient: Vec<AmbientPose>,
}

impl RenderList {
    pub fn trail_instances(&self) -> Vec<TrailInstance> {
        self.trail
            .iter()
            .map(|sprite| TrailInstance {
                position: sprite.position.to_array(),
                rotation_radians: sprite.rotation.to_radians(),
                opacity: sprite.opacity,
                variant_slot: sprite.variant_slot,
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.trail.is_empty() && self.parallax.is_empty() && self.ambient.is_empty()
    }
}
