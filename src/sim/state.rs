//! Game state and core simulation types
//!
//! Everything a run needs to advance deterministically lives here; two
//! states built from the same seed and settings stay identical under the
//! same inputs.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::catalog::PowerUpKind;
use super::effects::ActiveEffects;
use super::player::Player;
use super::pool::Pools;
use super::scheduler::{SpawnScheduler, Tier, WaveReport};
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    /// Run ended; terminal
    GameOver,
}

/// Game events for audio/visual feedback
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    WaveSpawned(WaveReport),
    TierChanged(Tier),
    PowerUpCollected(PowerUpKind),
    PlayerHit { damage: i32, health: i32 },
    GameOver { score: u64, frame: u64 },
}

#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Frames simulated so far
    pub frame: u64,
    pub phase: GamePhase,
    pub score: u64,
    pub player: Player,
    pub pools: Pools,
    pub scheduler: SpawnScheduler,
    pub effects: ActiveEffects,
    /// Events from the last tick; cleared at the start of each tick
    pub events: Vec<GameEvent>,
    pub settings: Settings,
}

impl GameState {
    /// Create a new run with the given seed
    pub fn new(seed: u64, settings: &Settings) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            frame: 0,
            phase: GamePhase::Playing,
            score: 0,
            player: Player::new(settings),
            pools: Pools::new(settings),
            scheduler: SpawnScheduler::new(settings.fps),
            effects: ActiveEffects::default(),
            events: Vec::new(),
            settings: settings.clone(),
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Whole seconds of play so far
    pub fn elapsed_secs(&self) -> u64 {
        self.frame / u64::from(self.settings.fps.max(1))
    }
}
