//! Pointer trail: rate-gated spawning of transient markers that fade in,
//! fade out, and remove themselves.

mod item;
mod list;
mod spawner;

pub use item::{TrailId, TrailItem, TrailPhase};
pub use list::TrailList;
pub use spawner::TrailSpawner;
