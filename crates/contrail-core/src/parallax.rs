//! Parallax registry: decorative elements follow the pointer with a depth-scaled,
//! exponentially smoothed offset.
//!
//! Elements live in a slot arena. Unregistering frees the slot; the next
//! registration that reuses it gets a bumped generation, so an old
//! [`ElementId`] can never address the new occupant.

use std::collections::VecDeque;
use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ParallaxConfig;

/// Divisor applied to `depth * sensitivity` to get the follow strength.
pub const STRENGTH_DIVISOR: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId {
    index: u32,
    generation: u32,
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element#{}v{}", self.index, self.generation)
    }
}

/// Whatever receives the computed offset as a visual transform.
pub trait ParallaxTarget {
    fn apply_offset(&mut self, offset: Vec2);
}

impl ParallaxTarget for () {
    fn apply_offset(&mut self, _offset: Vec2) {}
}

impl ParallaxTarget for Vec2 {
    fn apply_offset(&mut self, offset: Vec2) {
        *self = offset;
    }
}

#[derive(Debug)]
struct ParallaxElement<H> {
    handle: H,
    depth: f32,
    offset: Vec2,
}

#[derive(Debug)]
struct Slot<H> {
    generation: u32,
    element: Option<ParallaxElement<H>>,
}

#[derive(Debug)]
pub struct ParallaxRegistry<H> {
    slots: Vec<Slot<H>>,
    free_slots: VecDeque<usize>,
    len: usize,
}

impl<H> Default for ParallaxRegistry<H> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free_slots: VecDeque::new(),
            len: 0,
        }
    }
}

pub fn follow_strength(depth: f32, sensitivity: f32) -> f32 {
    depth * sensitivity / STRENGTH_DIVISOR
}

impl<H: ParallaxTarget> ParallaxRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handle: H, depth: f32) -> ElementId {
        let element = ParallaxElement {
            handle,
            depth,
            offset: Vec2::ZERO,
        };
        let id = match self.free_slots.pop_front() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.generation = slot.generation.wrapping_add(1);
                slot.element = Some(element);
                ElementId {
                    index: index as u32,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    element: Some(element),
                });
                ElementId {
                    index: (self.slots.len() - 1) as u32,
                    generation: 0,
                }
            }
        };
        self.len += 1;
        debug!("parallax: registered {id} depth {depth}");
        id
    }

    /// Removes the element and hands its handle back. Stale ids return `None`.
    pub fn unregister(&mut self, id: ElementId) -> Option<H> {
        let index = id.index as usize;
        let slot = self.slots.get_mut(index)?;
        if slot.generation != id.generation {
            warn!("parallax: ignoring stale id {id}");
            return None;
        }
        let element = slot.element.take()?;
        self.free_slots.push_back(index);
        self.len -= 1;
        debug!("parallax: unregistered {id}");
        Some(element.handle)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.element(id).is_some()
    }

    pub fn offset(&self, id: ElementId) -> Option<Vec2> {
        self.element(id).map(|element| element.offset)
    }

    pub fn handle(&self, id: ElementId) -> Option<&H> {
        self.element(id).map(|element| &element.handle)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Moves every element one smoothing step toward `pointer * strength` and
    /// writes the result to its handle. Returns how many elements were updated.
    pub fn tick(&mut self, pointer: Vec2, config: &ParallaxConfig) -> usize {
        let mut updated = 0;
        for element in self.slots.iter_mut().filter_map(|slot| slot.element.as_mut()) {
            let target = pointer * follow_strength(element.depth, config.sensitivity);
            element.offset += (target - element.offset) * config.easing_factor;
            element.handle.apply_offset(element.offset);
            updated += 1;
        }
        updated
    }

    pub fn offsets(&self) -> Vec<(ElementId, Vec2)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                slot.element.as_ref().map(|element| {
                    (
                        ElementId {
                            index: index as u32,
                            generation: slot.generation,
                        },
                        element.offset,
                    )
                })
            })
            .collect()
    }

    /// Empties the registry, returning every handle still registered.
    pub fn clear(&mut self) -> Vec<H> {
        let mut handles = Vec::with_capacity(self.len);
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if let Some(element) = slot.element.take() {
                handles.push(element.handle);
                self.free_slots.push_back(index);
            }
        }
        self.len = 0;
        handles
    }

    fn element(&self, id: ElementId) -> Option<&ParallaxElement<H>> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.element.as_ref())
    }
}
