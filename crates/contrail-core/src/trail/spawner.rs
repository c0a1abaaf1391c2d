use glam::Vec2;
use rand::Rng;
use tracing::{debug, trace};

use super::item::{TrailId, TrailItem};
use crate::config::TrailPreset;

/// Spawn gate: a new item needs both pointer movement since the last tick
/// and at least `interval_ms` since the last spawn.
#[derive(Debug, Default)]
pub struct TrailSpawner {
    last_position: Vec2,
    last_spawn_ms: f64,
    variant_cursor: usize,
    next_id: u64,
    spawn_count: u64,
}

impl TrailSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn_count(&self) -> u64 {
        self.spawn_count
    }

    pub fn last_spawn_ms(&self) -> f64 {
        self.last_spawn_ms
    }

    pub fn spawn_check<R: Rng + ?Sized>(
        &mut self,
        now_ms: f64,
        position: Vec2,
        preset: &TrailPreset,
        rng: &mut R,
    ) -> Option<TrailItem> {
        if preset.variants.is_empty() {
            trace!("trail: no variants configured, nothing to spawn");
            return None;
        }
        if position == self.last_position {
            return None;
        }
        self.last_position = position;
        if now_ms - self.last_spawn_ms < preset.interval_ms {
            trace!("trail: rate limited at {now_ms:.1}ms");
            return None;
        }

        let variant = preset.variants[self.variant_cursor % preset.variants.len()].clone();
        self.variant_cursor = (self.variant_cursor + 1) % preset.variants.len();
        let rotation = (rng.gen::<f32>() - 0.5) * 2.0 * preset.rotation_range;
        let id = TrailId(self.next_id);
        self.next_id += 1;
        let item = TrailItem::new(id, position, rotation, self.spawn_count, variant, now_ms);
        self.spawn_count += 1;
        self.last_spawn_ms = now_ms;
        debug!(
            "trail: spawned {} {:?} at ({:.1}, {:.1}) rot {:.1}",
            item.id, item.variant, position.x, position.y, rotation
        );
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn preset(variants: &[&str]) -> TrailPreset {
        TrailPreset {
            interval_ms: 100.0,
            rotation_range: 20.0,
            variants: variants.iter().map(|v| v.to_string()).collect(),
            ..TrailPreset::default()
        }
    }

    #[test]
    fn stationary_pointer_never_spawns() {
        let preset = preset(&["a"]);
        let mut rng = StdRng::seed_from_u64(1);
        let mut spawner = TrailSpawner::new();
        assert!(spawner
            .spawn_check(500.0, Vec2::new(5.0, 5.0), &preset, &mut rng)
            .is_some());
        for step in 1..100 {
            let now = 500.0 + step as f64 * 1_000.0;
            assert!(spawner
                .spawn_check(now, Vec2::new(5.0, 5.0), &preset, &mut rng)
                .is_none());
        }
    }

    #[test]
    fn pointer_at_origin_before_any_movement_does_not_spawn() {
        let preset = preset(&["a"]);
        let mut rng = StdRng::seed_from_u64(1);
        let mut spawner = TrailSpawner::new();
        assert!(spawner
            .spawn_check(10_000.0, Vec2::ZERO, &preset, &mut rng)
            .is_none());
    }

    #[test]
    fn rate_limit_holds_between_spawns() {
        let preset = preset(&["a"]);
        let mut rng = StdRng::seed_from_u64(2);
        let mut spawner = TrailSpawner::new();
        assert!(spawner
            .spawn_check(100.0, Vec2::new(1.0, 0.0), &preset, &mut rng)
            .is_some());
        assert!(spawner
            .spawn_check(150.0, Vec2::new(2.0, 0.0), &preset, &mut rng)
            .is_none());
        assert!(spawner
            .spawn_check(199.0, Vec2::new(3.0, 0.0), &preset, &mut rng)
            .is_none());
        let item = spawner
            .spawn_check(200.0, Vec2::new(4.0, 0.0), &preset, &mut rng)
            .unwrap();
        assert_eq!(item.position, Vec2::new(4.0, 0.0));
        assert_eq!(spawner.last_spawn_ms(), 200.0);
    }

    #[test]
    fn variants_cycle_round_robin() {
        let preset = preset(&["a", "b", "c"]);
        let mut rng = StdRng::seed_from_u64(3);
        let mut spawner = TrailSpawner::new();
        let spawned: Vec<String> = (1..=7)
            .filter_map(|step| {
                spawner.spawn_check(
                    step as f64 * 100.0,
                    Vec2::splat(step as f32),
                    &preset,
                    &mut rng,
                )
            })
            .map(|item| item.variant)
            .collect();
        assert_eq!(spawned, vec!["a", "b", "c", "a", "b", "c", "a"]);
    }

    #[test]
    fn ids_and_spawn_indices_are_sequential() {
        let preset = preset(&["a"]);
        let mut rng = StdRng::seed_from_u64(4);
        let mut spawner = TrailSpawner::new();
        let items: Vec<TrailItem> = (1..=3)
            .filter_map(|step| {
                spawner.spawn_check(step as f64 * 100.0, Vec2::splat(step as f32), &preset, &mut rng)
            })
            .collect();
        let ids: Vec<u64> = items.iter().map(|item| item.id.0).collect();
        let indices: Vec<u64> = items.iter().map(|item| item.spawn_index).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(spawner.spawn_count(), 3);
    }

    #[test]
    fn rotation_stays_within_range() {
        let preset = preset(&["a"]);
        let mut rng = StdRng::seed_from_u64(5);
        let mut spawner = TrailSpawner::new();
        for step in 1..=200 {
            if let Some(item) =
                spawner.spawn_check(step as f64 * 100.0, Vec2::splat(step as f32), &preset, &mut rng)
            {
                assert!(item.rotation.abs() <= preset.rotation_range);
            }
        }
    }

    #[test]
    fn empty_variant_list_spawns_nothing() {
        let preset = preset(&[]);
        let mut rng = StdRng::seed_from_u64(6);
        let mut spawner = TrailSpawner::new();
        for step in 1..=10 {
            assert!(spawner
                .spawn_check(step as f64 * 1_000.0, Vec2::splat(step as f32), &preset, &mut rng)
                .is_none());
        }
        assert_eq!(spawner.spawn_count(), 0);
    }
}
