//! Game settings and balance
//!
//! Loaded once at startup from an optional JSON file. Missing fields fall
//! back to the defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Playfield;
use crate::consts::*;

/// Errors surfaced while loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// What a projectile does after its first hit in a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HitPolicy {
    /// Keep testing the rest of the targets this frame; every overlap takes damage
    #[default]
    Pierce,
    /// Stop at the first target struck
    SingleTarget,
}

impl HitPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            HitPolicy::Pierce => "Pierce",
            HitPolicy::SingleTarget => "SingleTarget",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pierce" => Some(HitPolicy::Pierce),
            "single" | "singletarget" | "single_target" => Some(HitPolicy::SingleTarget),
            _ => None,
        }
    }
}

/// Slot counts per entity pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolSizes {
    pub enemies: usize,
    pub bosses: usize,
    pub powerups: usize,
    pub projectiles: usize,
}

impl Default for PoolSizes {
    fn default() -> Self {
        Self {
            enemies: 50,
            bosses: 6,
            powerups: 20,
            projectiles: 30,
        }
    }
}

impl PoolSizes {
    /// Slots across all pools
    pub fn total(&self) -> usize {
        self.enemies + self.bosses + self.powerups + self.projectiles
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen ===
    pub screen_width: i32,
    pub screen_height: i32,
    pub fps: u32,
    pub cell_size: i32,
    pub player_band: i32,

    // === Pools ===
    pub pools: PoolSizes,
    /// Pixels per frame for falling entities
    pub fall_speed: i32,
    /// Pixels per frame for player shells
    pub projectile_speed: i32,

    // === Animation ===
    pub animation_cadence: u64,

    // === Combat ===
    pub box_hits: i32,
    pub hit_policy: HitPolicy,
    pub effect_duration_secs: u32,

    // === Player ===
    pub player_max_health: i32,
    pub player_base_speed: f32,
    pub player_accel_step: f32,
    pub fire_cooldown_frames: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            fps: FPS,
            cell_size: CELL_SIZE,
            player_band: PLAYER_BAND,

            pools: PoolSizes::default(),
            fall_speed: 2,
            projectile_speed: 8,

            animation_cadence: ANIMATION_CADENCE,

            box_hits: BOX_HITS,
            hit_policy: HitPolicy::Pierce,
            effect_duration_secs: 10,

            player_max_health: PLAYER_MAX_HEALTH,
            player_base_speed: PLAYER_BASE_SPEED,
            player_accel_step: PLAYER_ACCEL_STEP,
            fire_cooldown_frames: FIRE_COOLDOWN_FRAMES,
        }
    }
}

impl Settings {
    /// Screen geometry derived from these settings
    pub fn playfield(&self) -> Playfield {
        Playfield {
            width: self.screen_width,
            height: self.screen_height,
            cell_size: self.cell_size,
            columns: PATTERN_COLUMNS,
            player_band: self.player_band,
        }
    }

    /// Timed effect length in frames
    pub fn effect_duration_frames(&self) -> u32 {
        self.effect_duration_secs.saturating_mul(self.fps)
    }

    /// Reject settings the simulation can't run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.fps == 0 {
            return Err(SettingsError::Invalid("fps must be positive".into()));
        }
        if self.animation_cadence == 0 {
            return Err(SettingsError::Invalid(
                "animation_cadence must be positive".into(),
            ));
        }
        if self.cell_size <= 0 || self.fall_speed <= 0 || self.projectile_speed <= 0 {
            return Err(SettingsError::Invalid(
                "cell_size, fall_speed and projectile_speed must be positive".into(),
            ));
        }
        let corridor = i32::try_from(PATTERN_COLUMNS)
            .ok()
            .and_then(|columns| columns.checked_mul(self.cell_size));
        if corridor.is_none_or(|width| width > self.screen_width) {
            return Err(SettingsError::Invalid(format!(
                "{} columns of {}px don't fit a {}px screen",
                PATTERN_COLUMNS, self.cell_size, self.screen_width
            )));
        }
        if self.player_band <= 0 || self.player_band > self.screen_height {
            return Err(SettingsError::Invalid(
                "player_band must lie within the screen".into(),
            ));
        }
        if self.player_max_health <= 0 || self.box_hits <= 0 {
            return Err(SettingsError::Invalid(
                "player_max_health and box_hits must be positive".into(),
            ));
        }
        if self.effect_duration_secs.checked_mul(self.fps).is_none() {
            return Err(SettingsError::Invalid(format!(
                "effect_duration_secs {} at {} fps overflows the frame counter",
                self.effect_duration_secs, self.fps
            )));
        }
        let p = &self.pools;
        if p.enemies == 0 || p.bosses == 0 || p.powerups == 0 || p.projectiles == 0 {
            return Err(SettingsError::Invalid("pool sizes must be positive".into()));
        }
        Ok(())
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Settings saved");
        Ok(())
    }
}
