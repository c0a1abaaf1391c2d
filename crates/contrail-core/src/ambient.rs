//! Ambient floating elements: decorative loops (backdrop glows, airplane,
//! clouds, radar rings, motion lines, twinkling particles, the badge pulse)
//! driven by keyframe tracks.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AmbientConfig;
use crate::easing::Easing;

/// Evenly spaced keyframe values played over `duration_ms` after `delay_ms`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyframes {
    pub values: Vec<f32>,
    pub duration_ms: f64,
    pub delay_ms: f64,
    pub easing: Easing,
    pub repeat: bool,
}

impl Keyframes {
    pub fn new(values: impl Into<Vec<f32>>, duration_ms: f64, easing: Easing) -> Self {
        Self {
            values: values.into(),
            duration_ms,
            delay_ms: 0.0,
            easing,
            repeat: true,
        }
    }

    pub fn constant(value: f32) -> Self {
        Self::new(vec![value], 0.0, Easing::Linear)
    }

    pub fn delayed(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn once(mut self) -> Self {
        self.repeat = false;
        self
    }

    pub fn sample(&self, now_ms: f64) -> f32 {
        match self.values.as_slice() {
            [] => 0.0,
            [only] => *only,
            values => {
                let local = now_ms - self.delay_ms;
                if local <= 0.0 {
                    return values[0];
                }
                if self.duration_ms <= 0.0 {
                    return values[values.len() - 1];
                }
                let cycles = local / self.duration_ms;
                let progress = if self.repeat {
                    cycles.fract()
                } else {
                    cycles.min(1.0)
                };
                let eased = self.easing.apply(progress as f32);
                let segments = values.len() - 1;
                let scaled = eased * segments as f32;
                let index = (scaled.floor() as usize).min(segments - 1);
                let t = scaled - index as f32;
                values[index] + (values[index + 1] - values[index]) * t
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingElement {
    pub name: String,
    pub anchor: Vec2,
    pub x: Keyframes,
    pub y: Keyframes,
    pub rotate: Keyframes,
    pub opacity: Keyframes,
    pub scale: Keyframes,
}

impl FloatingElement {
    pub fn new(name: impl Into<String>, anchor: Vec2) -> Self {
        Self {
            name: name.into(),
            anchor,
            x: Keyframes::constant(0.0),
            y: Keyframes::constant(0.0),
            rotate: Keyframes::constant(0.0),
            opacity: Keyframes::constant(1.0),
            scale: Keyframes::constant(1.0),
        }
    }

    pub fn sample(&self, now_ms: f64) -> AmbientPose {
        AmbientPose {
            name: self.name.clone(),
            position: self.anchor + Vec2::new(self.x.sample(now_ms), self.y.sample(now_ms)),
            rotation: self.rotate.sample(now_ms),
            opacity: self.opacity.sample(now_ms),
            scale: self.scale.sample(now_ms),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmbientPose {
    pub name: String,
    pub position: Vec2,
    /// Degrees.
    pub rotation: f32,
    pub opacity: f32,
    pub scale: f32,
}

#[derive(Debug, Clone, Default)]
pub struct AmbientField {
    elements: Vec<FloatingElement>,
}

/// Non-particle elements in a seeded field.
pub const DECORATIVE_ELEMENTS: usize = 11;

const BACKDROP_CYCLE_MS: f64 = 10_000.0;
const BADGE_PULSE_MS: f64 = 3_000.0;

impl AmbientField {
    /// Builds the hero's decorative set for the configured viewport. Particle
    /// positions, durations and delays are drawn from `rng`.
    pub fn seeded<R: Rng + ?Sized>(config: &AmbientConfig, rng: &mut R) -> Self {
        if !config.enabled {
            return Self::default();
        }
        let width = config.viewport_width;
        let height = config.viewport_height;
        let center = Vec2::new(width / 2.0, height / 2.0);
        let mut elements =
            Vec::with_capacity(DECORATIVE_ELEMENTS + config.particle_count as usize);

        // Backdrop glows trade places over one cycle, fractions of the viewport.
        for (name, from, to) in [
            ("glow-violet", Vec2::new(0.2, 0.2), Vec2::new(0.2, 0.8)),
            ("glow-teal", Vec2::new(0.8, 0.8), Vec2::new(0.8, 0.2)),
            ("glow-indigo", Vec2::new(0.4, 0.6), Vec2::new(0.6, 0.4)),
        ] {
            let travel = (to - from) * Vec2::new(width, height);
            let mut glow = FloatingElement::new(name, from * Vec2::new(width, height));
            glow.x = Keyframes::new([0.0, travel.x, 0.0], BACKDROP_CYCLE_MS, Easing::EaseInOut);
            glow.y = Keyframes::new([0.0, travel.y, 0.0], BACKDROP_CYCLE_MS, Easing::EaseInOut);
            glow.opacity = Keyframes::constant(0.2);
            elements.push(glow);
        }

        let mut airplane = FloatingElement::new("airplane", Vec2::ZERO);
        airplane.x = Keyframes::new([0.0, width + 100.0], 20_000.0, Easing::Linear);
        airplane.y = Keyframes::new([200.0, 150.0, 200.0], 20_000.0, Easing::Linear);
        airplane.rotate = Keyframes::new([15.0, 25.0, 15.0], 20_000.0, Easing::Linear);
        airplane.opacity = Keyframes::constant(0.3);
        elements.push(airplane);

        let mut cloud = FloatingElement::new("cloud-left", Vec2::new(40.0, 80.0));
        cloud.x = Keyframes::new([-50.0, 100.0, -50.0], 15_000.0, Easing::EaseInOut);
        cloud.y = Keyframes::new([0.0, -20.0, 0.0], 15_000.0, Easing::EaseInOut);
        cloud.opacity = Keyframes::constant(0.1);
        elements.push(cloud);

        let mut cloud = FloatingElement::new("cloud-right", Vec2::new(width - 80.0, 160.0));
        cloud.x = Keyframes::new([0.0, -80.0, 0.0], 18_000.0, Easing::EaseInOut).delayed(2_000.0);
        cloud.y = Keyframes::new([0.0, 30.0, 0.0], 18_000.0, Easing::EaseInOut).delayed(2_000.0);
        cloud.opacity = Keyframes::constant(0.1);
        elements.push(cloud);

        let mut radar = FloatingElement::new("radar-outer", center);
        radar.rotate = Keyframes::new([0.0, 360.0], 30_000.0, Easing::Linear);
        radar.opacity = Keyframes::constant(0.1);
        elements.push(radar);

        let mut radar = FloatingElement::new("radar-inner", center);
        radar.rotate = Keyframes::new([360.0, 0.0], 45_000.0, Easing::Linear);
        radar.opacity = Keyframes::constant(0.1);
        elements.push(radar);

        for index in 0..config.particle_count {
            let anchor = Vec2::new(
                rng.gen::<f32>() * width,
                rng.gen::<f32>() * height,
            );
            let duration = rng.gen_range(2_000.0..5_000.0);
            let delay = rng.gen_range(0.0..2_000.0);
            let mut particle = FloatingElement::new(format!("particle-{index}"), anchor);
            particle.y =
                Keyframes::new([0.0, -100.0, 0.0], duration, Easing::EaseInOut).delayed(delay);
            particle.opacity =
                Keyframes::new([0.0, 0.6, 0.0], duration, Easing::EaseInOut).delayed(delay);
            particle.scale =
                Keyframes::new([0.5, 1.0, 0.5], duration, Easing::EaseInOut).delayed(delay);
            elements.push(particle);
        }

        let mut line = FloatingElement::new("motion-line-upper", Vec2::new(0.0, height / 3.0));
        line.x = Keyframes::new([-200.0, width + 200.0], 8_000.0, Easing::EaseInOut);
        line.opacity = Keyframes::new([0.0, 1.0, 0.0], 8_000.0, Easing::EaseInOut);
        elements.push(line);

        let mut line =
            FloatingElement::new("motion-line-lower", Vec2::new(0.0, height * 2.0 / 3.0));
        line.x =
            Keyframes::new([width + 200.0, -200.0], 6_000.0, Easing::EaseInOut).delayed(3_000.0);
        line.opacity =
            Keyframes::new([0.0, 1.0, 0.0], 6_000.0, Easing::EaseInOut).delayed(3_000.0);
        elements.push(line);

        let mut badge = FloatingElement::new("badge-glow", Vec2::new(center.x, 48.0));
        badge.opacity = Keyframes::new([0.5, 1.0, 0.5], BADGE_PULSE_MS, Easing::EaseInOut);
        badge.scale = Keyframes::new([1.0, 1.05, 1.0], BADGE_PULSE_MS, Easing::EaseInOut);
        elements.push(badge);

        debug!(
            "ambient: seeded {} elements for {}x{}",
            elements.len(),
            width,
            height
        );
        Self { elements }
    }

    pub fn elements(&self) -> &[FloatingElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn sample(&self, now_ms: f64) -> Vec<AmbientPose> {
        self.elements
            .iter()
            .map(|element| element.sample(now_ms))
            .collect()
    }
}
