//! Collision resolution
//!
//! Two passes per frame. The player is checked against everything falling
//! into the bottom band, then every live shell is checked against enemies,
//! bosses and unopened boxes. All tests are strict AABB overlaps; shells use
//! a box twice their sprite width so narrow sprites still land hits.

use super::catalog::{PowerUpKind, Role};
use super::effects::ActiveEffects;
use super::entity::Aabb;
use super::player::Player;
use super::pool::{EntityPool, Pools};
use crate::Playfield;
use crate::settings::HitPolicy;

/// Shell hitbox width multiplier
pub const PROJECTILE_REACH: i32 = 2;

/// What happened during one resolution pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionOutcome {
    /// Health the player lost to contact
    pub damage_taken: i32,
    /// Power-ups consumed, in pickup order
    pub collected: Vec<PowerUpKind>,
    /// Enemies and bosses that ran into the player
    pub contacts: u32,
    /// Shell hits on enemies and bosses
    pub enemy_hits: u32,
    /// Shell hits on unopened boxes
    pub box_hits: u32,
}

/// Run both passes for one frame
pub fn resolve(
    player: &mut Player,
    pools: &mut Pools,
    playfield: &Playfield,
    effects: &ActiveEffects,
    policy: HitPolicy,
) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();
    resolve_player(player, pools, playfield, effects, &mut outcome);
    resolve_projectiles(pools, effects.projectile_damage(), policy, &mut outcome);
    outcome
}

/// Player against power-ups, then enemies, then bosses
pub fn resolve_player(
    player: &mut Player,
    pools: &mut Pools,
    playfield: &Playfield,
    effects: &ActiveEffects,
    outcome: &mut CollisionOutcome,
) {
    let body = player.bounds();

    for slot in touching(&pools.powerups, &body, playfield) {
        let Some(entity) = pools.powerups.get(slot) else {
            continue;
        };
        // Boxed power-ups drift past until they're shot open
        if !entity.caps.collectible {
            continue;
        }
        if let Role::PowerUp(kind) = entity.role {
            outcome.collected.push(kind);
        }
        pools.powerups.kill(slot);
    }

    if effects.invisible() {
        return;
    }

    let damage = effects.contact_damage();
    for pool in [&mut pools.enemies, &mut pools.bosses] {
        for slot in touching(pool, &body, playfield) {
            if !pool.get(slot).is_some_and(|e| e.caps.hostile) {
                continue;
            }
            pool.kill(slot);
            player.damage(damage);
            outcome.damage_taken += damage;
            outcome.contacts += 1;
            log::debug!("Player hit for {damage}, health {}", player.health);
        }
    }
}

/// Slots in `pool` inside the player band that overlap `body`
fn touching(pool: &EntityPool, body: &Aabb, playfield: &Playfield) -> Vec<usize> {
    pool.iter_live()
        .filter(|(_, e)| Player::in_reach(e.pos.y, playfield))
        .filter(|(_, e)| e.bounds().overlaps(body))
        .map(|(slot, _)| slot)
        .collect()
}

/// Every live shell against enemies, bosses and boxes
pub fn resolve_projectiles(
    pools: &mut Pools,
    damage: i32,
    policy: HitPolicy,
    outcome: &mut CollisionOutcome,
) {
    for shell in 0..pools.projectiles.capacity() {
        let Some(projectile) = pools.projectiles.get(shell) else {
            continue;
        };
        let reach = projectile.bounds().widened(PROJECTILE_REACH);

        let mut struck = 0;
        for targets in [&mut pools.enemies, &mut pools.bosses] {
            if policy == HitPolicy::SingleTarget && struck > 0 {
                break;
            }
            struck += strike(targets, &reach, damage, policy);
        }
        if struck > 0 {
            outcome.enemy_hits += struck;
            pools.projectiles.kill(shell);
            if policy == HitPolicy::SingleTarget {
                continue;
            }
        }

        // Boxes take a hit but don't stop the shell
        let mut cracked = 0;
        for (_, entity) in pools.powerups.iter_live_mut() {
            if !entity.caps.boxed || !entity.bounds().overlaps(&reach) {
                continue;
            }
            entity.health -= 1;
            cracked += 1;
            if policy == HitPolicy::SingleTarget {
                break;
            }
        }
        outcome.box_hits += cracked;
    }
}

/// Damage hostile entities in `targets` overlapping `reach`; returns hits
fn strike(targets: &mut EntityPool, reach: &Aabb, damage: i32, policy: HitPolicy) -> u32 {
    let mut hits = 0;
    for (_, entity) in targets.iter_live_mut() {
        if !entity.caps.hostile || !entity.bounds().overlaps(reach) {
            continue;
        }
        entity.health -= damage;
        hits += 1;
        if policy == HitPolicy::SingleTarget {
            break;
        }
    }
    hits
}
