//! Pooled entities and their bounding boxes

use glam::IVec2;

use super::catalog::{Capabilities, EntityTemplate, Role};
use crate::assets::SpriteSheet;

/// Axis-aligned rectangle in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aabb {
    pub min: IVec2,
    pub size: IVec2,
}

impl Aabb {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            min: IVec2::new(x, y),
            size: IVec2::new(w, h),
        }
    }

    #[inline]
    pub fn max(&self) -> IVec2 {
        self.min + self.size
    }

    /// Strict overlap; rectangles that only share an edge don't touch
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x
            && a_max.x > other.min.x
            && self.min.y < b_max.y
            && a_max.y > other.min.y
    }

    /// Same box, `factor` times as wide (left edge fixed)
    pub fn widened(&self, factor: i32) -> Self {
        Self {
            min: self.min,
            size: IVec2::new(self.size.x * factor, self.size.y),
        }
    }
}

/// One pool slot
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub pos: IVec2,
    pub vel: IVec2,
    /// Grows without bound; wrapped by the frame count when drawn
    pub frame_index: u32,
    /// Signed: damage can push it below zero
    pub health: i32,
    pub role: Role,
    pub caps: Capabilities,
    pub sprite: SpriteSheet,
    pub(super) alive: bool,
}

impl Entity {
    /// An empty slot; inert until stamped
    pub(super) fn vacant() -> Self {
        Self {
            pos: IVec2::ZERO,
            vel: IVec2::ZERO,
            frame_index: 0,
            health: 0,
            role: Role::Enemy,
            caps: Capabilities::default(),
            sprite: SpriteSheet::default(),
            alive: false,
        }
    }

    /// Overwrite this slot with a fresh copy of `template`
    pub(super) fn stamp(&mut self, template: &EntityTemplate, pos: IVec2, speed: i32) {
        self.pos = pos;
        self.vel = template.velocity * speed;
        self.frame_index = 0;
        self.health = template.health;
        self.role = template.role;
        self.caps = template.caps;
        self.sprite = template.sprite;
        self.alive = true;
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.sprite.frame_width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.sprite.frame_height
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, self.width(), self.height())
    }

    /// Still sliding in from above the screen
    #[inline]
    pub fn is_emerging(&self) -> bool {
        self.pos.y < 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_overlap() {
        let player = Aabb::new(300, 880, 30, 80);
        let enemy = Aabb::new(300, 900, 30, 30);
        assert!(player.overlaps(&enemy));
        assert!(enemy.overlaps(&player));
    }

    #[test]
    fn test_aabb_touching_edges_miss() {
        let a = Aabb::new(0, 0, 32, 32);
        let right = Aabb::new(32, 0, 32, 32);
        let below = Aabb::new(0, 32, 32, 32);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_aabb_widened() {
        let shell = Aabb::new(100, 500, 8, 16);
        let wide = shell.widened(2);
        assert_eq!(wide.size, IVec2::new(16, 16));
        assert_eq!(wide.min, shell.min);
        // 12px to the right: missed by the narrow box, caught by the wide one
        let target = Aabb::new(112, 500, 32, 32);
        assert!(!shell.overlaps(&target));
        assert!(wide.overlaps(&target));
    }
}
