use tracing::warn;

use super::item::{TrailId, TrailItem};
use crate::config::FadeTiming;

/// Active trail items in stacking order (last renders on top).
#[derive(Debug, Default)]
pub struct TrailList {
    items: Vec<TrailItem>,
    removed_total: u64,
}

impl TrailList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item: TrailItem, new_on_top: bool) {
        if self.contains(item.id) {
            warn!("trail: refusing duplicate id {}", item.id);
            return;
        }
        if new_on_top {
            self.items.push(item);
        } else {
            self.items.insert(0, item);
        }
    }

    pub fn contains(&self, id: TrailId) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Removes the item with `id`. A second removal of the same id finds nothing.
    pub fn remove(&mut self, id: TrailId) -> Option<TrailItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        self.removed_total += 1;
        Some(self.items.remove(index))
    }

    /// Advances every item's fade and drops the ones that completed, returning
    /// their ids. Removal goes by id so items inserted meanwhile are unaffected.
    pub fn advance(&mut self, now_ms: f64, fade: &FadeTiming) -> Vec<TrailId> {
        let completed: Vec<TrailId> = self
            .items
            .iter_mut()
            .filter_map(|item| {
                item.advance(now_ms, fade);
                item.is_complete().then_some(item.id)
            })
            .collect();
        for id in &completed {
            self.remove(*id);
        }
        completed
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrailItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn removed_total(&self) -> u64 {
        self.removed_total
    }

    pub fn drain(&mut self) -> Vec<TrailItem> {
        std::mem::take(&mut self.items)
    }
}
