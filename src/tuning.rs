//! Gameplay tuning
//!
//! Every constant the game has been re-tuned on lives here as a named field.
//! Persisted separately from the high score in the key-value slot.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::persistence::KeyValueSlot;

/// Rejected tuning values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("`{field}` must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("pipes must scroll left (pipe_velocity < 0), got {0}")]
    PipesNotScrollingLeft(f32),
    #[error("gap ratios leave no room for pipes: min_top {min_top} + gap {gap} > max_top {max_top}")]
    GapTooLarge { min_top: f32, gap: f32, max_top: f32 },
    #[error("rotation range is inverted: {min} > {max}")]
    RotationRange { min: f32, max: f32 },
}

/// Tuning sets used by successive revisions of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    /// Slow pipes, roomy gap, relaxed spawn cadence
    Classic,
    /// Viewport-relative pipes, tighter spawn cadence
    Responsive,
    /// Fast pipes, narrow gap, rotation feedback
    #[default]
    Modern,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Classic => "Classic",
            Preset::Responsive => "Responsive",
            Preset::Modern => "Modern",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(Preset::Classic),
            "responsive" => Some(Preset::Responsive),
            "modern" | "latest" => Some(Preset::Modern),
            _ => None,
        }
    }

    pub fn spawn_interval_ms(&self) -> u32 {
        match self {
            Preset::Classic => 2000,
            Preset::Responsive => 1500,
            Preset::Modern => 1500,
        }
    }

    pub fn gap_ratio(&self) -> f32 {
        match self {
            Preset::Classic => 0.25,
            Preset::Responsive => 0.25,
            Preset::Modern => 0.2,
        }
    }

    pub fn pipe_velocity(&self) -> f32 {
        match self {
            Preset::Classic => -200.0,
            Preset::Responsive => -250.0,
            Preset::Modern => -300.0,
        }
    }

    /// Whether the bird tilts with its vertical velocity
    pub fn rotation_enabled(&self) -> bool {
        matches!(self, Preset::Modern)
    }
}

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightConfig {
    pub preset: Preset,

    // === Bird ===
    /// Downward acceleration while running, pixels/s²
    pub gravity: f32,
    /// Vertical velocity applied by a flap (negative is up)
    pub flap_velocity: f32,
    /// Fixed horizontal position of the bird's left edge
    pub bird_x: f32,
    /// Bird box width and height
    pub bird_size: f32,
    /// Degrees of tilt per unit of vertical velocity (0 disables tilt)
    pub rotation_per_velocity: f32,
    pub min_rotation: f32,
    pub max_rotation: f32,
    /// Keep the bird inside the viewport (it stops at the top edge)
    pub collide_world_bounds: bool,

    // === Pipes ===
    /// Gap height as a fraction of viewport height
    pub gap_ratio: f32,
    /// Shortest upper pipe as a fraction of viewport height
    pub min_top_ratio: f32,
    /// Upper pipe plus gap never reaches below this fraction of the viewport
    pub max_top_ratio: f32,
    /// Pipe width is viewport width divided by this
    pub pipe_width_divisor: f32,
    /// Horizontal pipe velocity, pixels/s
    pub pipe_velocity: f32,
    /// Spawner cadence
    pub spawn_interval_ms: u32,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self::from_preset(Preset::default())
    }
}

impl FlightConfig {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "flappy_config";

    /// Create a config from a preset (applies preset defaults)
    pub fn from_preset(preset: Preset) -> Self {
        let mut config = Self {
            preset,
            gravity: GRAVITY,
            flap_velocity: FLAP_VELOCITY,
            bird_x: BIRD_X,
            bird_size: BIRD_SIZE,
            rotation_per_velocity: ROTATION_PER_VELOCITY,
            min_rotation: MIN_ROTATION,
            max_rotation: MAX_ROTATION,
            collide_world_bounds: true,
            gap_ratio: GAP_RATIO,
            min_top_ratio: MIN_TOP_RATIO,
            max_top_ratio: MAX_TOP_RATIO,
            pipe_width_divisor: PIPE_WIDTH_DIVISOR,
            pipe_velocity: PIPE_VELOCITY,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
        };
        config.apply_preset(preset);
        config
    }

    /// Apply a preset (updates the preset-dependent fields only)
    pub fn apply_preset(&mut self, preset: Preset) {
        self.preset = preset;
        self.spawn_interval_ms = preset.spawn_interval_ms();
        self.gap_ratio = preset.gap_ratio();
        self.pipe_velocity = preset.pipe_velocity();
        self.rotation_per_velocity = if preset.rotation_enabled() {
            ROTATION_PER_VELOCITY
        } else {
            0.0
        };
    }

    /// Spawner cadence in seconds
    pub fn spawn_interval_secs(&self) -> f32 {
        self.spawn_interval_ms as f32 / 1000.0
    }

    /// Check the values describe a playable board
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("gravity", self.gravity),
            ("bird_size", self.bird_size),
            ("gap_ratio", self.gap_ratio),
            ("pipe_width_divisor", self.pipe_width_divisor),
            ("spawn_interval_ms", self.spawn_interval_ms as f32),
        ];
        for (field, value) in positive {
            if value <= 0.0 || !value.is_finite() {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        if self.pipe_velocity >= 0.0 {
            return Err(ConfigError::PipesNotScrollingLeft(self.pipe_velocity));
        }

        if self.min_top_ratio + self.gap_ratio > self.max_top_ratio || self.max_top_ratio > 1.0 {
            return Err(ConfigError::GapTooLarge {
                min_top: self.min_top_ratio,
                gap: self.gap_ratio,
                max_top: self.max_top_ratio,
            });
        }

        if self.min_rotation > self.max_rotation {
            return Err(ConfigError::RotationRange {
                min: self.min_rotation,
                max: self.max_rotation,
            });
        }

        Ok(())
    }

    /// Parse a config from JSON and validate it
    pub fn from_json(json: &str) -> Option<Self> {
        let config: Self = match serde_json::from_str(json) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring unparsable tuning: {}", e);
                return None;
            }
        };
        match config.validate() {
            Ok(()) => Some(config),
            Err(e) => {
                log::warn!("Ignoring invalid tuning: {}", e);
                None
            }
        }
    }

    /// Load tuning from the slot, falling back to defaults
    pub fn load(slot: &impl KeyValueSlot) -> Self {
        if let Some(config) = slot
            .get_item(Self::STORAGE_KEY)
            .and_then(|json| Self::from_json(&json))
        {
            log::info!("Loaded tuning ({})", config.preset.as_str());
            return config;
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Save tuning to the slot
    pub fn save(&self, slot: &mut impl KeyValueSlot) {
        match serde_json::to_string(self) {
            Ok(json) => match slot.set_item(Self::STORAGE_KEY, &json) {
                Ok(()) => log::info!("Tuning saved"),
                Err(e) => log::warn!("Tuning not saved: {}", e),
            },
            Err(e) => log::warn!("Tuning not serialized: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemorySlot;

    #[test]
    fn test_presets_are_valid() {
        for preset in [Preset::Classic, Preset::Responsive, Preset::Modern] {
            let config = FlightConfig::from_preset(preset);
            assert_eq!(config.validate(), Ok(()), "{}", preset.as_str());
            assert!((1500..=2000).contains(&config.spawn_interval_ms));
            assert!((0.2..=0.25).contains(&config.gap_ratio));
            assert!((-300.0..=-200.0).contains(&config.pipe_velocity));
        }
    }

    #[test]
    fn test_preset_names() {
        assert_eq!(Preset::from_str("CLASSIC"), Some(Preset::Classic));
        assert_eq!(Preset::from_str("latest"), Some(Preset::Modern));
        assert_eq!(Preset::from_str("nope"), None);
        assert_eq!(Preset::from_str(Preset::Responsive.as_str()), Some(Preset::Responsive));
    }

    #[test]
    fn test_only_modern_tilts() {
        assert_eq!(FlightConfig::from_preset(Preset::Classic).rotation_per_velocity, 0.0);
        assert!(FlightConfig::from_preset(Preset::Modern).rotation_per_velocity > 0.0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = FlightConfig::default();
        config.pipe_velocity = 100.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::PipesNotScrollingLeft(100.0))
        );

        let mut config = FlightConfig::default();
        config.gap_ratio = 0.7;
        assert!(matches!(config.validate(), Err(ConfigError::GapTooLarge { .. })));

        let mut config = FlightConfig::default();
        config.spawn_interval_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive { field: "spawn_interval_ms", .. })
        ));

        let mut config = FlightConfig::default();
        config.min_rotation = 10.0;
        config.max_rotation = -10.0;
        assert!(matches!(config.validate(), Err(ConfigError::RotationRange { .. })));
    }

    #[test]
    fn test_load_falls_back_to_defaults() {
        let mut slot = MemorySlot::new();
        assert_eq!(FlightConfig::load(&slot), FlightConfig::default());

        slot.set_item(FlightConfig::STORAGE_KEY, "{not json").unwrap();
        assert_eq!(FlightConfig::load(&slot), FlightConfig::default());

        slot.set_item(FlightConfig::STORAGE_KEY, r#"{"pipe_velocity": 50.0}"#)
            .unwrap();
        assert_eq!(FlightConfig::load(&slot), FlightConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let mut slot = MemorySlot::new();
        let mut config = FlightConfig::from_preset(Preset::Classic);
        config.gravity = 900.0;
        config.save(&mut slot);

        assert_eq!(FlightConfig::load(&slot), config);
    }

    #[test]
    fn test_partial_json_uses_defaults_for_missing_fields() {
        let config = FlightConfig::from_json(r#"{"spawn_interval_ms": 1800}"#).unwrap();
        assert_eq!(config.spawn_interval_ms, 1800);
        assert_eq!(config.gravity, GRAVITY);
    }
}
