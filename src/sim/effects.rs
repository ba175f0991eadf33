//! Timed power-up effects

use super::catalog::PowerUpKind;
use super::player::Player;

/// Health restored by a health pickup
pub const HEALTH_RESTORE: i32 = 2;

/// Remaining frames for each timed effect; zero means inactive
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveEffects {
    pub invisibility: u32,
    pub double_fire_damage: u32,
    pub double_enemy_damage: u32,
    pub spread: u32,
}

impl ActiveEffects {
    /// Start (or restart) the effect of a collected power-up
    pub fn apply(&mut self, kind: PowerUpKind, player: &mut Player, duration: u32) {
        log::debug!("Power-up collected: {kind:?}");
        match kind {
            PowerUpKind::Health => player.heal(HEALTH_RESTORE),
            PowerUpKind::Invisibility => self.invisibility = duration,
            PowerUpKind::DoubleFireDamage => self.double_fire_damage = duration,
            PowerUpKind::DoubleEnemyDamage => self.double_enemy_damage = duration,
            PowerUpKind::Spread => self.spread = duration,
        }
    }

    /// One frame passes
    pub fn tick(&mut self) {
        for timer in [
            &mut self.invisibility,
            &mut self.double_fire_damage,
            &mut self.double_enemy_damage,
            &mut self.spread,
        ] {
            *timer = timer.saturating_sub(1);
        }
    }

    pub fn invisible(&self) -> bool {
        self.invisibility > 0
    }

    pub fn spread_shot(&self) -> bool {
        self.spread > 0
    }

    /// Damage one shell deals per hit
    pub fn projectile_damage(&self) -> i32 {
        if self.double_fire_damage > 0 { 2 } else { 1 }
    }

    /// Health the player loses per enemy contact
    pub fn contact_damage(&self) -> i32 {
        if self.double_enemy_damage > 0 { 2 } else { 1 }
    }
}
