//! Scene configuration. Every field has a default so partial TOML files load.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::easing::Easing;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FadeTiming {
    pub fade_in_ms: f64,
    pub fade_out_ms: f64,
    pub ease_in: Easing,
    pub ease_out: Easing,
}

impl Default for FadeTiming {
    fn default() -> Self {
        Self {
            fade_in_ms: 100.0,
            fade_out_ms: 500.0,
            ease_in: Easing::EaseOut,
            ease_out: Easing::EaseIn,
        }
    }
}

impl FadeTiming {
    pub fn total_ms(&self) -> f64 {
        self.fade_in_ms + self.fade_out_ms
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailPreset {
    pub name: String,
    /// Minimum time between two spawns.
    pub interval_ms: f64,
    /// Spawned items get a rotation in `[-rotation_range, rotation_range]` degrees.
    pub rotation_range: f32,
    /// Newer items stack above older ones (appended) instead of below (prepended).
    pub new_on_top: bool,
    /// Visual markers handed out round-robin.
    pub variants: Vec<String>,
    pub fade: FadeTiming,
}

impl Default for TrailPreset {
    fn default() -> Self {
        Self {
            name: "Default".into(),
            interval_ms: 150.0,
            rotation_range: 15.0,
            new_on_top: true,
            variants: ["✈", "☁", "🌍", "🧭", "🧳"]
                .iter()
                .map(|glyph| glyph.to_string())
                .collect(),
            fade: FadeTiming::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    /// Negative values make elements move away from the pointer.
    pub sensitivity: f32,
    /// Fraction of the remaining distance covered per tick, in `(0, 1]`.
    pub easing_factor: f32,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            sensitivity: 1.0,
            easing_factor: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientConfig {
    pub enabled: bool,
    pub particle_count: u32,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            particle_count: 20,
            viewport_width: 1280.0,
            viewport_height: 720.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountdownConfig {
    /// Launch moment measured from the clock origin.
    pub launch_in_days: f64,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            launch_in_days: 30.0,
        }
    }
}

impl CountdownConfig {
    pub fn target_ms(&self) -> f64 {
        self.launch_in_days * 24.0 * 60.0 * 60.0 * 1_000.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub trail: TrailPreset,
    pub parallax: ParallaxConfig,
    pub ambient: AmbientConfig,
    pub countdown: CountdownConfig,
}

impl SceneConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        info!(
            "Loaded config from {} (preset {:?}, {} variants)",
            path.display(),
            config.trail.name,
            config.trail.variants.len()
        );
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let trail = &self.trail;
        non_negative("trail.interval_ms", trail.interval_ms)?;
        non_negative("trail.rotation_range", f64::from(trail.rotation_range))?;
        non_negative("trail.fade.fade_in_ms", trail.fade.fade_in_ms)?;
        non_negative("trail.fade.fade_out_ms", trail.fade.fade_out_ms)?;

        if !self.parallax.sensitivity.is_finite() {
            return Err(ConfigError::invalid("parallax.sensitivity", "must be finite"));
        }
        let easing = self.parallax.easing_factor;
        if !(easing > 0.0 && easing <= 1.0) {
            return Err(ConfigError::invalid(
                "parallax.easing_factor",
                format!("{easing} is outside (0, 1]"),
            ));
        }

        if self.ambient.particle_count > MAX_PARTICLES {
            return Err(ConfigError::invalid(
                "ambient.particle_count",
                format!(
                    "{} exceeds the limit of {MAX_PARTICLES}",
                    self.ambient.particle_count
                ),
            ));
        }
        non_negative("ambient.viewport_width", f64::from(self.ambient.viewport_width))?;
        non_negative("ambient.viewport_height", f64::from(self.ambient.viewport_height))?;
        if !self.countdown.launch_in_days.is_finite() {
            return Err(ConfigError::invalid("countdown.launch_in_days", "must be finite"));
        }
        Ok(())
    }
}

/// Upper bound on seeded ambient particles.
pub const MAX_PARTICLES: u32 = 10_000;

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("{value} must be a finite, non-negative number"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        SceneConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = SceneConfig::from_toml_str(
            r#"
            [trail]
            interval_ms = 120.0
            variants = ["a", "b"]

            [parallax]
            sensitivity = -1.5
            "#,
        )
        .unwrap();
        assert_eq!(config.trail.interval_ms, 120.0);
        assert_eq!(config.trail.variants, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(config.trail.rotation_range, 15.0);
        assert!(config.trail.new_on_top);
        assert_eq!(config.parallax.sensitivity, -1.5);
        assert_eq!(config.parallax.easing_factor, 0.05);
        assert_eq!(config.ambient, AmbientConfig::default());
    }

    #[test]
    fn easing_names_are_snake_case() {
        let config = SceneConfig::from_toml_str(
            r#"
            [trail.fade]
            ease_in = "circ_out"
            ease_out = "ease_in_out"
            "#,
        )
        .unwrap();
        assert_eq!(config.trail.fade.ease_in, Easing::CircOut);
        assert_eq!(config.trail.fade.ease_out, Easing::EaseInOut);
    }

    #[test]
    fn round_trips_through_toml() {
        let mut config = SceneConfig::default();
        config.trail.new_on_top = false;
        config.parallax.easing_factor = 0.25;
        let text = config.to_toml_string().unwrap();
        assert_eq!(SceneConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn rejects_out_of_range_easing_factor() {
        for bad in ["0.0", "1.5", "-0.2"] {
            let source = format!("[parallax]\neasing_factor = {bad}\n");
            match SceneConfig::from_toml_str(&source) {
                Err(ConfigError::Invalid { field, .. }) => {
                    assert_eq!(field, "parallax.easing_factor")
                }
                other => panic!("expected invalid easing factor for {bad}, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_negative_interval() {
        let err = SceneConfig::from_toml_str("[trail]\ninterval_ms = -1.0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "trail.interval_ms",
                ..
            }
        ));
    }

    #[test]
    fn rejects_unbounded_particle_count() {
        let source = "[ambient]\nparticle_count = 4294967295\n";
        let err = SceneConfig::from_toml_str(source).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "ambient.particle_count",
                ..
            }
        ));
        let at_limit = format!("[ambient]\nparticle_count = {MAX_PARTICLES}\n");
        SceneConfig::from_toml_str(&at_limit).unwrap();
    }

    #[test]
    fn reports_parse_errors() {
        let err = SceneConfig::from_toml_str("[trail\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = SceneConfig::load("/definitely/not/here/contrail.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn countdown_target_is_in_milliseconds() {
        let countdown = CountdownConfig { launch_in_days: 1.0 };
        assert_eq!(countdown.target_ms(), 86_400_000.0);
    }
}
