//! Frame scheduler. One `tick` per display refresh runs, in order: the trail
//! spawn check, the trail fade advance, the parallax update, ambient sampling
//! and the countdown.

use std::rc::Rc;

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::ambient::{AmbientField, AmbientPose};
use crate::clock::Clock;
use crate::config::SceneConfig;
use crate::countdown::{Countdown, TimeLeft};
use crate::error::ConfigError;
use crate::parallax::{ElementId, ParallaxRegistry, ParallaxTarget};
use crate::pointer::{PointerEvent, PointerTracker};
use crate::render::{RenderList, TrailSprite};
use crate::trail::{TrailId, TrailList, TrailSpawner};
use crate::vector::{Motion, VectorTracker};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameStats {
    pub frame: u64,
    pub now_ms: f64,
    pub spawned: Option<TrailId>,
    pub removed: Vec<TrailId>,
    pub active_trail: usize,
    pub parallax_updated: usize,
    /// Set when the container was not laid out and parallax was skipped.
    pub parallax_skipped: bool,
    pub time_left: TimeLeft,
}

/// What `unmount` released.
#[derive(Debug)]
pub struct Teardown<H> {
    pub frames: u64,
    pub spawned_total: u64,
    pub removed_total: u64,
    pub dropped_trail_items: usize,
    pub released_handles: Vec<H>,
}

pub struct Scene<H, R = StdRng> {
    config: SceneConfig,
    clock: Rc<dyn Clock>,
    rng: R,
    vector: VectorTracker,
    spawner: TrailSpawner,
    trail: TrailList,
    parallax: ParallaxRegistry<H>,
    ambient: AmbientField,
    ambient_poses: Vec<AmbientPose>,
    countdown: Countdown,
    frame: u64,
}

impl<H: ParallaxTarget, R: Rng> Scene<H, R> {
    /// Validates `config` and attaches the scene to its pointer and clock.
    pub fn mount(
        config: SceneConfig,
        pointer: PointerTracker,
        clock: Rc<dyn Clock>,
        mut rng: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let ambient = AmbientField::seeded(&config.ambient, &mut rng);
        let countdown = Countdown::new(config.countdown.target_ms());
        info!(
            "Scene mounted (preset {:?}, {} variants, {} ambient elements)",
            config.trail.name,
            config.trail.variants.len(),
            ambient.len()
        );
        Ok(Self {
            config,
            clock,
            rng,
            vector: VectorTracker::new(pointer),
            spawner: TrailSpawner::new(),
            trail: TrailList::new(),
            parallax: ParallaxRegistry::new(),
            ambient,
            ambient_poses: Vec::new(),
            countdown,
            frame: 0,
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn handle_input(&mut self, event: &PointerEvent) -> Option<Motion> {
        self.vector.handle(event)
    }

    pub fn motion(&self) -> Motion {
        self.vector.motion()
    }

    pub fn trail(&self) -> &TrailList {
        &self.trail
    }

    pub fn parallax(&self) -> &ParallaxRegistry<H> {
        &self.parallax
    }

    pub fn register_parallax(&mut self, handle: H, depth: f32) -> ElementId {
        self.parallax.register(handle, depth)
    }

    pub fn unregister_parallax(&mut self, id: ElementId) -> Option<H> {
        self.parallax.unregister(id)
    }

    pub fn time_left(&self) -> TimeLeft {
        self.countdown.time_left()
    }

    pub fn tick(&mut self) -> FrameStats {
        let now_ms = self.clock.now_ms();
        self.frame += 1;
        let position = self.vector.position();

        let spawned = self
            .spawner
            .spawn_check(now_ms, position, &self.config.trail, &mut self.rng)
            .map(|item| {
                let id = item.id;
                self.trail.insert(item, self.config.trail.new_on_top);
                id
            });

        let removed = self.trail.advance(now_ms, &self.config.trail.fade);
        if !removed.is_empty() {
            debug!("trail: {} item(s) finished fading", removed.len());
        }

        let parallax_skipped = !self.vector.pointer().container_ready();
        let parallax_updated = if parallax_skipped {
            trace!("parallax: container not ready, tick skipped");
            0
        } else {
            self.parallax.tick(position, &self.config.parallax)
        };

        self.ambient_poses = self.ambient.sample(now_ms);
        let time_left = self.countdown.tick(now_ms);

        FrameStats {
            frame: self.frame,
            now_ms,
            spawned,
            removed,
            active_trail: self.trail.len(),
            parallax_updated,
            parallax_skipped,
            time_left,
        }
    }

    pub fn render_list(&self) -> RenderList {
        let variants = &self.config.trail.variants;
        RenderList {
            trail: self
                .trail
                .iter()
                .map(|item| TrailSprite::from_item(item, variants))
                .collect(),
            parallax: self.parallax.offsets(),
            ambient: self.ambient_poses.clone(),
        }
    }

    /// Detaches the scene. Consuming `self` guarantees no tick or input can
    /// reach the released state afterwards.
    pub fn unmount(mut self) -> Teardown<H> {
        let dropped_trail_items = self.trail.drain().len();
        let released_handles = self.parallax.clear();
        let teardown = Teardown {
            frames: self.frame,
            spawned_total: self.spawner.spawn_count(),
            removed_total: self.trail.removed_total(),
            dropped_trail_items,
            released_handles,
        };
        info!(
            "Scene unmounted after {} frames ({} spawned, {} in flight, {} parallax handles released)",
            teardown.frames,
            teardown.spawned_total,
            teardown.dropped_trail_items,
            teardown.released_handles.len()
        );
        teardown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use glam::Vec2;
    use rand::SeedableRng;

    fn mount(config: SceneConfig) -> (Rc<ManualClock>, Scene<Vec2>) {
        let clock = Rc::new(ManualClock::new());
        let scene = Scene::mount(
            config,
            PointerTracker::new(),
            clock.clone(),
            StdRng::seed_from_u64(11),
        )
        .unwrap();
        (clock, scene)
    }

    #[test]
    fn mount_rejects_invalid_config() {
        let mut config = SceneConfig::default();
        config.parallax.easing_factor = 0.0;
        let result = Scene::<(), StdRng>::mount(
            config,
            PointerTracker::new(),
            Rc::new(ManualClock::new()),
            StdRng::seed_from_u64(0),
        );
        assert!(result.is_err());
    }

    #[test]
    fn mount_refuses_oversized_ambient_field() {
        let mut config = SceneConfig::default();
        config.ambient.particle_count = u32::MAX;
        let result = Scene::<(), StdRng>::mount(
            config,
            PointerTracker::new(),
            Rc::new(ManualClock::new()),
            StdRng::seed_from_u64(0),
        );
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                field: "ambient.particle_count",
                ..
            })
        ));
    }

    #[test]
    fn tick_spawns_then_fades_out() {
        let (clock, mut scene) = mount(SceneConfig::default());
        scene.handle_input(&PointerEvent::moved(40.0, 30.0));
        clock.advance(200.0);
        let stats = scene.tick();
        assert_eq!(stats.spawned, Some(TrailId(0)));
        assert_eq!(stats.active_trail, 1);
        assert_eq!(scene.render_list().trail[0].position, Vec2::new(40.0, 30.0));

        clock.advance(scene.config().trail.fade.total_ms());
        let stats = scene.tick();
        assert_eq!(stats.spawned, None);
        assert_eq!(stats.removed, vec![TrailId(0)]);
        assert_eq!(stats.active_trail, 0);
    }

    #[test]
    fn parallax_follows_pointer_through_scene() {
        let mut config = SceneConfig::default();
        config.parallax.easing_factor = 1.0;
        let (clock, mut scene) = mount(config);
        let id = scene.register_parallax(Vec2::ZERO, 2.0);
        scene.handle_input(&PointerEvent::moved(100.0, 0.0));
        clock.advance(16.0);
        let stats = scene.tick();
        assert_eq!(stats.parallax_updated, 1);
        assert_eq!(scene.parallax().offset(id), Some(Vec2::new(10.0, 0.0)));
    }

    #[test]
    fn parallax_waits_for_container() {
        let ready = Rc::new(std::cell::Cell::new(false));
        let flag = Rc::clone(&ready);
        let clock = Rc::new(ManualClock::new());
        let mut scene: Scene<Vec2> = Scene::mount(
            SceneConfig::default(),
            PointerTracker::relative_to(move || flag.get().then_some(Vec2::ZERO)),
            clock.clone(),
            StdRng::seed_from_u64(1),
        )
        .unwrap();
        let id = scene.register_parallax(Vec2::ZERO, 1.0);

        let stats = scene.tick();
        assert!(stats.parallax_skipped);
        assert_eq!(stats.parallax_updated, 0);

        ready.set(true);
        scene.handle_input(&PointerEvent::moved(50.0, 50.0));
        let stats = scene.tick();
        assert!(!stats.parallax_skipped);
        assert!(scene.parallax().offset(id).unwrap().x > 0.0);
    }

    #[test]
    fn unmount_releases_everything() {
        let (clock, mut scene) = mount(SceneConfig::default());
        scene.register_parallax(Vec2::ZERO, 1.0);
        scene.register_parallax(Vec2::ZERO, 2.0);
        scene.handle_input(&PointerEvent::moved(1.0, 1.0));
        clock.advance(500.0);
        scene.tick();

        let teardown = scene.unmount();
        assert_eq!(teardown.frames, 1);
        assert_eq!(teardown.spawned_total, 1);
        assert_eq!(teardown.dropped_trail_items, 1);
        assert_eq!(teardown.released_handles.len(), 2);
    }

    #[test]
    fn countdown_ticks_with_the_frame_clock() {
        let mut config = SceneConfig::default();
        config.countdown.launch_in_days = 1.0;
        let (clock, mut scene) = mount(config);
        clock.advance(60.0 * 60.0 * 1_000.0);
        let stats = scene.tick();
        assert_eq!(stats.time_left.hours, 23);
        assert_eq!(scene.time_left(), stats.time_left);
    }
}
