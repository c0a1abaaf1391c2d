//! Windowless run: a scripted pointer path drives the scene on a virtual 60 fps clock.

use std::rc::Rc;

use contrail_core::{
    ManualClock, PointerEvent, PointerTracker, RenderList, Scene, SceneConfig, Vec2,
};
use contrail_platform::{InputSource, RenderSink, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info};

pub const FRAME_MS: f64 = 1_000.0 / 60.0;

const PARALLAX_DEPTHS: [f32; 4] = [0.5, 1.0, 2.0, 4.0];

/// Lissajous pointer path around the viewport center, one move per poll.
#[derive(Debug)]
pub struct ScriptedInput {
    center: Vec2,
    amplitude: Vec2,
    phase: f32,
    step: f32,
    listening: bool,
}

impl ScriptedInput {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            center: viewport / 2.0,
            amplitude: viewport * 0.35,
            phase: 0.0,
            step: 0.02,
            listening: false,
        }
    }

    fn next_point(&mut self) -> Vec2 {
        self.phase += self.step;
        self.center
            + Vec2::new(
                self.amplitude.x * (3.0 * self.phase).sin(),
                self.amplitude.y * (2.0 * self.phase).sin(),
            )
    }
}

impl InputSource for ScriptedInput {
    fn start(&mut self) -> Result<()> {
        self.listening = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.listening = false;
        Ok(())
    }

    fn poll(&mut self) -> Vec<PointerEvent> {
        if !self.listening {
            return Vec::new();
        }
        let point = self.next_point();
        vec![PointerEvent::moved(point.x, point.y)]
    }
}

/// Tracks what a GPU-backed sink would have uploaded.
#[derive(Debug, Default)]
pub struct StatsSink {
    pub frames: u64,
    pub peak_trail: usize,
    pub uploaded_bytes: usize,
}

impl RenderSink for StatsSink {
    fn present(&mut self, frame: &RenderList) -> Result<()> {
        let instances = frame.trail_instances();
        self.frames += 1;
        self.peak_trail = self.peak_trail.max(instances.len());
        self.uploaded_bytes += bytemuck::cast_slice::<_, u8>(&instances).len();
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct HeadlessReport {
    pub frames: u64,
    pub simulated_ms: f64,
    pub spawned: u64,
    pub removed: u64,
    pub in_flight_at_unmount: usize,
    pub peak_trail: usize,
    pub uploaded_bytes: usize,
    pub countdown: String,
    pub last_frame: RenderList,
}

pub fn run_headless(config: SceneConfig, frames: u64, seed: u64) -> Result<HeadlessReport> {
    let viewport = Vec2::new(config.ambient.viewport_width, config.ambient.viewport_height);
    let clock = Rc::new(ManualClock::new());
    let mut scene: Scene<Vec2> = Scene::mount(
        config,
        PointerTracker::new(),
        clock.clone(),
        StdRng::seed_from_u64(seed),
    )?;
    for depth in PARALLAX_DEPTHS {
        scene.register_parallax(Vec2::ZERO, depth);
    }

    let mut input = ScriptedInput::new(viewport);
    let mut sink = StatsSink::default();
    input.start()?;
    sink.init()?;
    info!("Headless run: {frames} frames at {:.2}ms", FRAME_MS);

    for _ in 0..frames {
        for event in input.poll() {
            scene.handle_input(&event);
        }
        clock.advance(FRAME_MS);
        let stats = scene.tick();
        if stats.frame % 60 == 0 {
            debug!(
                "frame {}: {} trail items, {} parallax updates, launch in {}",
                stats.frame, stats.active_trail, stats.parallax_updated, stats.time_left
            );
        }
        sink.present(&scene.render_list())?;
    }
    input.stop()?;

    let last_frame = scene.render_list();
    let countdown = scene.time_left().to_string();
    let teardown = scene.unmount();
    let report = HeadlessReport {
        frames: sink.frames,
        simulated_ms: frames as f64 * FRAME_MS,
        spawned: teardown.spawned_total,
        removed: teardown.removed_total,
        in_flight_at_unmount: teardown.dropped_trail_items,
        peak_trail: sink.peak_trail,
        uploaded_bytes: sink.uploaded_bytes,
        countdown,
        last_frame,
    };
    info!(
        "Headless run finished: {} spawned, {} removed, peak trail {}",
        report.spawned, report.removed, report.peak_trail
    );
    Ok(report)
}
