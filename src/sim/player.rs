//! The player's beachcomber
//!
//! Moves along a fixed row near the bottom of the screen. Holding a
//! direction builds speed; letting go or reversing drops it back to base.

use glam::IVec2;

use super::entity::Aabb;
use crate::Playfield;
use crate::consts::{PLAYER_HEIGHT, PLAYER_WIDTH};
use crate::settings::Settings;

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Left edge; fractional so slow acceleration still accumulates
    pub x: f32,
    pub y: i32,
    pub size: IVec2,
    /// Half-heart units
    pub health: i32,
    pub max_health: i32,
    accel: f32,
    /// -1 left, 1 right, 0 idle
    heading: i32,
    fire_cooldown: u32,
    base_speed: f32,
    accel_step: f32,
    corridor: i32,
}

impl Player {
    pub fn new(settings: &Settings) -> Self {
        let playfield = settings.playfield();
        let corridor = playfield.corridor_width();
        Self {
            x: ((corridor - PLAYER_WIDTH) / 2) as f32,
            y: playfield.height - PLAYER_HEIGHT,
            size: IVec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            health: settings.player_max_health,
            max_health: settings.player_max_health,
            accel: 0.0,
            heading: 0,
            fire_cooldown: 0,
            base_speed: settings.player_base_speed,
            accel_step: settings.player_accel_step,
            corridor,
        }
    }

    pub fn pos(&self) -> IVec2 {
        IVec2::new(self.x as i32, self.y)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x as i32, self.y, self.size.x, self.size.y)
    }

    pub fn accel(&self) -> f32 {
        self.accel
    }

    /// Rightmost left-edge position inside the corridor
    pub fn max_x(&self) -> f32 {
        (self.corridor - self.size.x).max(0) as f32
    }

    /// Apply one frame of directional input
    pub fn steer(&mut self, left: bool, right: bool) {
        let heading = i32::from(right) - i32::from(left);
        if heading == 0 {
            self.accel = 0.0;
            self.heading = 0;
            return;
        }
        if heading != self.heading {
            self.accel = 0.0;
            self.heading = heading;
        }

        self.accel += self.accel_step;
        let step = heading as f32 * (self.base_speed + self.accel);
        self.x = (self.x + step).clamp(0.0, self.max_x());
    }

    /// Count down the fire cooldown; call once per frame
    pub fn cool_down(&mut self) {
        self.fire_cooldown = self.fire_cooldown.saturating_sub(1);
    }

    /// True when a shot leaves the barrel this frame
    pub fn try_fire(&mut self, fire: bool, cooldown_frames: u32) -> bool {
        if !fire || self.fire_cooldown > 0 {
            return false;
        }
        self.fire_cooldown = cooldown_frames;
        true
    }

    /// Top-left position for a shell of `size` fired from the player's center
    pub fn muzzle(&self, size: IVec2) -> IVec2 {
        IVec2::new(self.x as i32 + (self.size.x - size.x) / 2, self.y - size.y)
    }

    pub fn damage(&mut self, amount: i32) {
        self.health -= amount;
    }

    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Whether `top` lies in the band where entities can touch the player
    pub fn in_reach(top: i32, playfield: &Playfield) -> bool {
        top > playfield.band_top()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn player() -> Player {
        Player::new(&Settings::default())
    }

    #[test]
    fn test_starts_centered_at_bottom() {
        let p = player();
        assert_eq!(p.y, 880);
        assert_eq!(p.health, 6);
        assert_eq!(p.x, ((384 - 30) / 2) as f32);
    }

    #[test]
    fn test_acceleration_builds_while_held() {
        let mut p = player();
        let start = p.x;
        for _ in 0..4 {
            p.steer(false, true);
        }
        assert!((p.accel() - 0.02).abs() < 1e-6);
        // 4 * base + (1 + 2 + 3 + 4) * step
        let expected = start + 4.0 * 3.0 + 10.0 * 0.005;
        assert!((p.x - expected).abs() < 1e-3);
    }

    #[test]
    fn test_reversal_and_release_reset_acceleration() {
        let mut p = player();
        for _ in 0..10 {
            p.steer(true, false);
        }
        p.steer(false, true);
        assert!((p.accel() - 0.005).abs() < 1e-6);

        p.steer(false, false);
        assert_eq!(p.accel(), 0.0);

        // Both held cancels out
        p.steer(true, true);
        assert_eq!(p.accel(), 0.0);
    }

    #[test]
    fn test_clamped_to_corridor() {
        let mut p = player();
        for _ in 0..500 {
            p.steer(true, false);
        }
        assert_eq!(p.x, 0.0);
        for _ in 0..500 {
            p.steer(false, true);
        }
        assert_eq!(p.x, p.max_x());
        assert_eq!(p.bounds().max().x, 384);
    }

    #[test]
    fn test_fire_cooldown() {
        let mut p = player();
        assert!(!p.try_fire(false, 3));
        assert!(p.try_fire(true, 3));
        for _ in 0..2 {
            p.cool_down();
            assert!(!p.try_fire(true, 3));
        }
        p.cool_down();
        assert!(p.try_fire(true, 3));
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut p = player();
        p.damage(3);
        p.heal(2);
        assert_eq!(p.health, 5);
        p.heal(2);
        assert_eq!(p.health, 6);
        p.damage(6);
        assert!(p.is_dead());
    }

    #[test]
    fn test_muzzle_centers_shell() {
        let p = player();
        let muzzle = p.muzzle(IVec2::new(8, 16));
        assert_eq!(muzzle, IVec2::new(p.x as i32 + 11, 880 - 16));
    }

    fn steering() -> impl Strategy<Value = Vec<(bool, bool)>> {
        proptest::collection::vec((any::<bool>(), any::<bool>()), 0..400)
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_corridor(inputs in steering()) {
            let mut p = player();
            for (left, right) in inputs {
                p.steer(left, right);
                prop_assert!(p.x >= 0.0);
                prop_assert!(p.x <= p.max_x());
            }
        }
    }
}
