//! Show configuration.
//!
//! Everything tunable about a show lives in [`ShowConfig`], which round-trips
//! through JSON. Every field has a default, so a config file only needs to
//! name what it changes:
//!
//! ```json
//! {
//!   "duration": 4.0,
//!   "click": { "count": { "min": 200, "max": 600 } },
//!   "textures": "assets/particles"
//! }
//! ```

use crate::animation::DEFAULT_DURATION;
use crate::easing::Easing;
use crate::error::ConfigError;
use crate::textures::PALETTE_SIZE;
use crate::trigger::{ClickRanges, StartupBurst};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Window and camera settings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Initial camera position; the camera looks at the world origin.
    pub camera_position: [f32; 3],
    /// Orbit damping factor per frame, `0..1`. 0 disables damping.
    pub damping: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            title: "Fireworks".into(),
            width: 1280,
            height: 720,
            fov: 25.0,
            near: 0.1,
            far: 100.0,
            camera_position: [1.5, 0.0, 6.0],
            damping: 0.05,
        }
    }
}

/// Complete show configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShowConfig {
    /// Seconds from spawn to disposal for every burst.
    pub duration: f32,
    pub easing: Easing,
    /// Fire the startup burst when the show begins.
    pub startup_enabled: bool,
    pub startup: StartupBurst,
    pub click: ClickRanges,
    /// Directory holding `1.png`..`8.png`. Procedural sprites are used when
    /// unset.
    pub textures: Option<PathBuf>,
    /// Seed for burst randomness. Unset means seeded from entropy.
    pub seed: Option<u64>,
    /// Playback speed multiplier.
    pub time_scale: f32,
    pub view: ViewConfig,
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            easing: Easing::Power2Out,
            startup_enabled: true,
            startup: StartupBurst::default(),
            click: ClickRanges::default(),
            textures: None,
            seed: None,
            time_scale: 1.0,
            view: ViewConfig::default(),
        }
    }
}

impl ShowConfig {
    /// Load and validate a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse and validate a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Check every value the show relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return invalid(format!("duration must be positive, got {}", self.duration));
        }
        if !(self.time_scale.is_finite() && self.time_scale >= 0.0) {
            return invalid(format!("time_scale must be >= 0, got {}", self.time_scale));
        }

        let s = &self.startup;
        if s.texture >= PALETTE_SIZE {
            return invalid(format!(
                "startup.texture {} is outside the {}-sprite palette",
                s.texture, PALETTE_SIZE
            ));
        }
        if !(s.size > 0.0 && s.radius > 0.0) {
            return invalid("startup size and radius must be positive".into());
        }

        let c = &self.click;
        if !c.count.is_valid() {
            return invalid(format!(
                "click.count range is reversed: {}..={}",
                c.count.min, c.count.max
            ));
        }
        for (name, range) in c.ranges() {
            if !range.is_valid() {
                return invalid(format!(
                    "click.{} range is empty or reversed: {}..{}",
                    name, range.min, range.max
                ));
            }
        }
        if c.size.min <= 0.0 || c.radius.min <= 0.0 {
            return invalid("click size and radius must be positive".into());
        }

        let v = &self.view;
        if v.width == 0 || v.height == 0 {
            return invalid("view width and height must be non-zero".into());
        }
        if !(v.fov > 0.0 && v.fov < 180.0) {
            return invalid(format!("view.fov must be in (0, 180), got {}", v.fov));
        }
        if !(v.near > 0.0 && v.far > v.near) {
            return invalid("view clip planes need 0 < near < far".into());
        }
        if !(0.0..1.0).contains(&v.damping) {
            return invalid(format!("view.damping must be in [0, 1), got {}", v.damping));
        }
        Ok(())
    }
}

fn invalid(message: String) -> Result<(), ConfigError> {
    Err(ConfigError::Invalid(message))
}
