//! Sandy Shore - a falling-debris beach shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entity pools, wave spawning, collisions)
//! - `renderer`: Sprite instance hand-off to whatever draws the frame
//! - `assets`: Texture handle and sprite geometry seam
//! - `settings`: Data-driven game balance

pub mod assets;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{HitPolicy, Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (one tick per rendered frame)
    pub const FPS: u32 = 60;

    /// Screen dimensions in pixels
    pub const SCREEN_WIDTH: i32 = 640;
    pub const SCREEN_HEIGHT: i32 = 960;

    /// Sprite cell size; pattern column `i` spawns at `i * CELL_SIZE`
    pub const CELL_SIZE: i32 = 32;
    /// Cells per pattern row
    pub const PATTERN_COLUMNS: usize = 12;

    /// Only entities lower than `SCREEN_HEIGHT - PLAYER_BAND` can touch the player
    pub const PLAYER_BAND: i32 = 160;

    /// Frames between animation steps
    pub const ANIMATION_CADENCE: u64 = 15;

    /// Player sprite
    pub const PLAYER_WIDTH: i32 = 30;
    pub const PLAYER_HEIGHT: i32 = 80;
    /// Half-heart units
    pub const PLAYER_MAX_HEALTH: i32 = 6;

    /// Per-frame acceleration growth while a direction is held
    pub const PLAYER_ACCEL_STEP: f32 = 0.005;
    pub const PLAYER_BASE_SPEED: f32 = 3.0;
    pub const FIRE_COOLDOWN_FRAMES: u32 = 12;

    /// Health given to bosses; projectiles can't wear it down within a run
    pub const BOSS_HEALTH: i32 = 1_000_000;
    /// Hits a power-up box takes before it opens
    pub const BOX_HITS: i32 = 2;
}

/// Screen geometry the simulation runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Playfield {
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
    pub columns: usize,
    pub player_band: i32,
}

impl Default for Playfield {
    fn default() -> Self {
        use consts::*;
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            cell_size: CELL_SIZE,
            columns: PATTERN_COLUMNS,
            player_band: PLAYER_BAND,
        }
    }
}

impl Playfield {
    /// Horizontal spawn position of a pattern column
    #[inline]
    pub fn column_x(&self, column: usize) -> i32 {
        column as i32 * self.cell_size
    }

    /// Width covered by a full pattern row (the player's travel corridor)
    #[inline]
    pub fn corridor_width(&self) -> i32 {
        self.columns as i32 * self.cell_size
    }

    /// Top of the band in which falling entities are tested against the player
    #[inline]
    pub fn band_top(&self) -> i32 {
        self.height - self.player_band
    }
}
