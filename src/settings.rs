//! Scene settings
//!
//! Persisted in LocalStorage on the web, read from a JSON file natively.
//! Every field has a default, so partial JSON is fine.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::Error;
use crate::renderer::style::colors;
use crate::sim::{BoxBounds, WallId};
use crate::wall::Throttle;

/// How often the ball and impact overlays are redrawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RedrawCadence {
    /// Deliberately choppy, hand-drawn look
    #[default]
    Sketchy,
    /// Redraw on every frame
    Smooth,
}

/// Colors for one face
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallColors {
    pub color: String,
    /// Defaults to `color`
    #[serde(default)]
    pub impact_color: Option<String>,
}

impl WallColors {
    fn new(color: &str) -> Self {
        Self {
            color: color.to_owned(),
            impact_color: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Geometry ===
    /// Half the box edge; the box spans [-box_max, box_max] on every axis
    pub box_max: f64,
    pub ball_radius: f64,
    /// Initial speed per axis is uniform in [-max, max]
    pub max_initial_speed: f64,
    /// Drawing surface span
    pub screen_min: f64,
    pub screen_max: f64,

    // === Timing ===
    pub cadence: RedrawCadence,
    pub effect_duration_ms: f64,
    pub effect_redraw_min_ms: f64,
    pub effect_redraw_jitter_ms: f64,
    pub ball_redraw_min_ms: f64,
    pub ball_redraw_jitter_ms: f64,

    // === Look ===
    pub splat_scale: f64,
    pub ball_color: String,
    pub left: WallColors,
    pub right: WallColors,
    pub top: WallColors,
    pub bottom: WallColors,
    pub back: WallColors,
    /// The front face is never filled, but can still show impacts
    pub show_front_wall: bool,
    pub front: WallColors,

    // === Audio ===
    /// 0.0 - 1.0
    pub master_volume: f64,
    pub muted: bool,

    /// Fixed RNG seed; random when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            box_max: BOX_MAX,
            ball_radius: BALL_RADIUS,
            max_initial_speed: MAX_INITIAL_SPEED,
            screen_min: SCREEN_MIN,
            screen_max: SCREEN_MAX,

            cadence: RedrawCadence::Sketchy,
            effect_duration_ms: EFFECT_DURATION_MS,
            effect_redraw_min_ms: EFFECT_REDRAW_MIN_MS,
            effect_redraw_jitter_ms: EFFECT_REDRAW_JITTER_MS,
            ball_redraw_min_ms: BALL_REDRAW_MIN_MS,
            ball_redraw_jitter_ms: BALL_REDRAW_JITTER_MS,

            splat_scale: SPLAT_SCALE,
            ball_color: colors::BALL.to_owned(),
            left: WallColors::new(colors::LEFT_WALL),
            right: WallColors::new(colors::RIGHT_WALL),
            top: WallColors::new(colors::TOP_WALL),
            bottom: WallColors::new(colors::BOTTOM_WALL),
            back: WallColors::new(colors::BACK_WALL),
            show_front_wall: false,
            front: WallColors {
                color: colors::FRONT_WALL.to_owned(),
                impact_color: Some(colors::FRONT_WALL_IMPACT.to_owned()),
            },

            master_volume: 1.0,
            muted: false,

            seed: None,
        }
    }
}

impl Settings {
    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn bounds(&self) -> Result<BoxBounds, Error> {
        BoxBounds::new(self.box_max, self.ball_radius)
    }

    /// Check everything the simulation relies on
    pub fn validate(&self) -> Result<(), Error> {
        self.bounds()?;

        fn invalid(name: &'static str, reason: String) -> Result<(), Error> {
            Err(Error::InvalidSetting { name, reason })
        }

        if !(self.screen_min < self.screen_max) {
            return invalid(
                "screen_min",
                format!("must be below screen_max ({} >= {})", self.screen_min, self.screen_max),
            );
        }
        if !(self.max_initial_speed >= 0.0 && self.max_initial_speed.is_finite()) {
            return invalid("max_initial_speed", format!("got {}", self.max_initial_speed));
        }
        if !(self.effect_duration_ms > 0.0) {
            return invalid("effect_duration_ms", format!("must be positive, got {}", self.effect_duration_ms));
        }
        for (name, value) in [
            ("effect_redraw_min_ms", self.effect_redraw_min_ms),
            ("effect_redraw_jitter_ms", self.effect_redraw_jitter_ms),
            ("ball_redraw_min_ms", self.ball_redraw_min_ms),
            ("ball_redraw_jitter_ms", self.ball_redraw_jitter_ms),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return invalid(name, format!("must be non-negative, got {value}"));
            }
        }
        if !(self.splat_scale > 0.0) {
            return invalid("splat_scale", format!("must be positive, got {}", self.splat_scale));
        }
        Ok(())
    }

    /// Colors for a face, or `None` if the face isn't part of the scene
    pub fn wall_colors(&self, wall: WallId) -> Option<&WallColors> {
        match wall {
            WallId::Left => Some(&self.left),
            WallId::Right => Some(&self.right),
            WallId::Top => Some(&self.top),
            WallId::Bottom => Some(&self.bottom),
            WallId::Back => Some(&self.back),
            WallId::Front => self.show_front_wall.then_some(&self.front),
        }
    }

    /// Overlay redraw spacing for the current cadence
    pub fn effect_throttle(&self) -> Throttle {
        match self.cadence {
            RedrawCadence::Sketchy => Throttle {
                min_ms: self.effect_redraw_min_ms,
                jitter_ms: self.effect_redraw_jitter_ms,
            },
            RedrawCadence::Smooth => Throttle::NONE,
        }
    }

    /// Ball redraw spacing for the current cadence
    pub fn ball_throttle(&self) -> Throttle {
        match self.cadence {
            RedrawCadence::Sketchy => Throttle {
                min_ms: self.ball_redraw_min_ms,
                jitter_ms: self.ball_redraw_jitter_ms,
            },
            RedrawCadence::Smooth => Throttle::NONE,
        }
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "bounce_box_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: impl AsRef<std::path::Path>) -> Result<(), Error> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
