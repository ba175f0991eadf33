//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by pool slot)
//! - No rendering or platform dependencies beyond the sprite sink seam

pub mod animation;
pub mod catalog;
pub mod collision;
pub mod effects;
pub mod entity;
pub mod pattern;
pub mod player;
pub mod pool;
pub mod scheduler;
pub mod state;
pub mod tick;

pub use catalog::{BossKind, Capabilities, Catalog, EntityTemplate, PowerUpKind, Role};
pub use collision::CollisionOutcome;
pub use effects::ActiveEffects;
pub use entity::{Aabb, Entity};
pub use pattern::{Cell, PatternLayout};
pub use player::Player;
pub use pool::{EntityPool, Pools};
pub use scheduler::{SpawnPhase, SpawnScheduler, Tier, WaveReport};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, autopilot, draw, tick};
