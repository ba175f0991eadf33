//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. One call is
//! one frame: input, spawning, motion and animation, collisions, effects.

use glam::IVec2;

use super::catalog::{Catalog, PowerUpKind, Role};
use super::collision;
use super::state::{GameEvent, GamePhase, GameState};
use crate::renderer::{SpriteInstance, SpriteSink};

/// Horizontal gap between spread shells
pub const SPREAD_OFFSET: i32 = 12;

/// How far above the player the autopilot watches for falling threats
const AUTOPILOT_LOOKAHEAD: i32 = 120;
/// Extra clearance the autopilot keeps on each side when dodging
const DODGE_MARGIN: i32 = 4;
/// Dead zone when lining up with a power-up
const STEER_DEADZONE: i32 = 4;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, catalog: &Catalog, input: &TickInput) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    state.events.clear();

    let input = if input.idle_mode {
        autopilot(state)
    } else {
        input.clone()
    };
    let playfield = state.settings.playfield();

    // Input
    state.player.steer(input.left, input.right);
    state.player.cool_down();
    if state.player.try_fire(input.fire, state.settings.fire_cooldown_frames) {
        fire(state, catalog);
    }

    // Spawning
    if let Some(report) = state.scheduler.evaluate(
        state.frame,
        &mut state.pools,
        catalog,
        &playfield,
        &mut state.rng,
    ) {
        if report.new_wave {
            state.score += report.tier.score_award();
        }
        if report.tier_changed {
            state.events.push(GameEvent::TierChanged(report.tier));
        }
        state.events.push(GameEvent::WaveSpawned(report));
    }

    // Motion, lifecycle and animation
    state.pools.update_all(&playfield);
    state.pools.animate(state.frame, state.settings.animation_cadence);

    // Collisions
    let outcome = collision::resolve(
        &mut state.player,
        &mut state.pools,
        &playfield,
        &state.effects,
        state.settings.hit_policy,
    );
    let duration = state.settings.effect_duration_frames();
    for kind in outcome.collected {
        state.effects.apply(kind, &mut state.player, duration);
        state.events.push(GameEvent::PowerUpCollected(kind));
    }
    if outcome.damage_taken > 0 {
        state.events.push(GameEvent::PlayerHit {
            damage: outcome.damage_taken,
            health: state.player.health,
        });
    }

    state.effects.tick();

    if state.player.is_dead() {
        state.phase = GamePhase::GameOver;
        log::info!("Game over after {}s, score {}", state.elapsed_secs(), state.score);
        state.events.push(GameEvent::GameOver {
            score: state.score,
            frame: state.frame,
        });
    }

    state.frame += 1;
}

/// Launch one shell, or three under the spread effect
fn fire(state: &mut GameState, catalog: &Catalog) {
    let shell = catalog.projectile();
    let size = IVec2::new(shell.sprite.frame_width, shell.sprite.frame_height);
    let muzzle = state.player.muzzle(size);

    let offsets: &[i32] = if state.effects.spread_shot() {
        &[-SPREAD_OFFSET, 0, SPREAD_OFFSET]
    } else {
        &[0]
    };
    for &dx in offsets {
        let pos = muzzle + IVec2::new(dx, 0);
        // Out of shells just means this one doesn't fire
        if state.pools.projectiles.create_at(shell, pos).is_none() {
            log::trace!("No free shell at frame {}", state.frame);
            break;
        }
    }
}

/// Demo-mode driver: dodge what's about to land, line up under opened
/// power-ups, keep firing
pub fn autopilot(state: &GameState) -> TickInput {
    let player = &state.player;
    let body = player.bounds();
    let center = body.min.x + body.size.x / 2;
    let horizon = body.min.y - AUTOPILOT_LOOKAHEAD;

    let threat = state
        .pools
        .enemies
        .iter_live()
        .chain(state.pools.bosses.iter_live())
        .map(|(_, e)| e.bounds())
        .filter(|b| b.max().y > horizon && b.min.y < body.max().y)
        .filter(|b| {
            b.min.x < body.max().x + DODGE_MARGIN && b.max().x > body.min.x - DODGE_MARGIN
        })
        .max_by_key(|b| b.max().y);

    let (left, right) = if let Some(threat) = threat {
        let flee_right = threat.min.x + threat.size.x / 2 <= center;
        if flee_right && player.x >= player.max_x() {
            (true, false)
        } else if !flee_right && player.x <= 0.0 {
            (false, true)
        } else {
            (!flee_right, flee_right)
        }
    } else {
        let target = state
            .pools
            .powerups
            .iter_live()
            .filter(|(_, e)| e.caps.collectible)
            .filter(|(_, e)| e.role != Role::PowerUp(PowerUpKind::DoubleEnemyDamage))
            .map(|(_, e)| e.pos.x + e.width() / 2 - center)
            .min_by_key(|dx| dx.abs());
        match target {
            Some(dx) => (dx < -STEER_DEADZONE, dx > STEER_DEADZONE),
            None => (false, false),
        }
    };

    TickInput {
        left,
        right,
        fire: true,
        idle_mode: true,
    }
}

/// Report every sprite for this frame: pools first, then the player
pub fn draw(state: &GameState, catalog: &Catalog, sink: &mut impl SpriteSink) {
    state.pools.draw_all(catalog, sink);
    let cadence = state.settings.animation_cadence.max(1);
    let frame = (state.frame / cadence) as u32;
    sink.draw(SpriteInstance::new(catalog.player(), frame, state.player.pos()));
}
