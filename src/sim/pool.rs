//! Fixed-capacity entity pools
//!
//! Slots are never allocated or freed after construction; an entity "dies"
//! by flipping its liveness flag, which returns the slot to the free list.
//! The free list always hands out the lowest free index first.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use glam::IVec2;

use super::animation;
use super::catalog::{Catalog, EntityTemplate};
use super::entity::Entity;
use crate::Playfield;
use crate::renderer::{SpriteInstance, SpriteSink};
use crate::settings::Settings;

/// A fixed array of entity slots plus the speed stamped into new entities
#[derive(Debug, Clone)]
pub struct EntityPool {
    slots: Vec<Entity>,
    free: BinaryHeap<Reverse<usize>>,
    speed: i32,
}

impl EntityPool {
    pub fn new(capacity: usize, speed: i32) -> Self {
        Self {
            slots: (0..capacity).map(|_| Entity::vacant()).collect(),
            free: (0..capacity).map(Reverse).collect(),
            speed,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn live_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Every slot, dead ones included, in index order
    pub fn slots(&self) -> &[Entity] {
        &self.slots
    }

    /// Spawn `template` just above the screen at column position `x`
    pub fn create(&mut self, template: &EntityTemplate, x: i32) -> Option<usize> {
        self.create_at(template, IVec2::new(x, -template.sprite.frame_height))
    }

    /// Spawn `template` at `pos`; `None` (and nothing else) when the pool is full
    pub fn create_at(&mut self, template: &EntityTemplate, pos: IVec2) -> Option<usize> {
        let Some(Reverse(slot)) = self.free.pop() else {
            log::trace!("Pool full ({}), dropped {}", self.capacity(), template.name);
            return None;
        };
        self.slots[slot].stamp(template, pos, self.speed);
        Some(slot)
    }

    /// Free a slot; dead slots are left alone
    pub fn kill(&mut self, slot: usize) {
        if let Some(entity) = self.slots.get_mut(slot) {
            if entity.alive {
                entity.alive = false;
                self.free.push(Reverse(slot));
            }
        }
    }

    pub fn is_alive(&self, slot: usize) -> bool {
        self.slots.get(slot).is_some_and(|e| e.alive)
    }

    /// Live entity at `slot`
    pub fn get(&self, slot: usize) -> Option<&Entity> {
        self.slots.get(slot).filter(|e| e.alive)
    }

    /// Live entity at `slot`, mutable
    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Entity> {
        self.slots.get_mut(slot).filter(|e| e.alive)
    }

    /// Live entities with their slot indices, lowest first
    pub fn iter_live(&self) -> impl Iterator<Item = (usize, &Entity)> {
        self.slots.iter().enumerate().filter(|(_, e)| e.alive)
    }

    pub fn iter_live_mut(&mut self) -> impl Iterator<Item = (usize, &mut Entity)> {
        self.slots.iter_mut().enumerate().filter(|(_, e)| e.alive)
    }

    /// Some live entity is still partly above the screen
    pub fn any_emerging(&self) -> bool {
        self.iter_live().any(|(_, e)| e.is_emerging())
    }

    /// Motion and lifecycle: expire spent or off-screen entities, move the rest
    pub fn update_all(&mut self, playfield: &Playfield) {
        for slot in 0..self.slots.len() {
            let entity = &self.slots[slot];
            if !entity.alive {
                continue;
            }

            let exhausted = entity.caps.destructible && entity.health <= 0;
            let below = entity.pos.y > playfield.height + entity.height();
            let above = entity.vel.y < 0 && entity.pos.y + entity.height() < 0;

            if exhausted || below || above {
                self.kill(slot);
            } else {
                let entity = &mut self.slots[slot];
                entity.pos += entity.vel;
            }
        }
    }

    /// Animation step for every live entity
    pub fn animate(&mut self, frame_counter: u64, cadence: u64) {
        for entity in self.slots.iter_mut().filter(|e| e.alive) {
            animation::advance(entity, frame_counter, cadence);
        }
    }

    /// Report every live entity's sprite, in slot order
    pub fn draw_all(&self, catalog: &Catalog, sink: &mut impl SpriteSink) {
        for (_, entity) in self.iter_live() {
            let sheet = if entity.caps.boxed {
                catalog.box_wrapper()
            } else {
                &entity.sprite
            };
            sink.draw(SpriteInstance::new(sheet, entity.frame_index, entity.pos));
        }
    }
}

/// The four pools the game runs on
#[derive(Debug, Clone)]
pub struct Pools {
    pub enemies: EntityPool,
    pub bosses: EntityPool,
    pub powerups: EntityPool,
    pub projectiles: EntityPool,
}

impl Pools {
    pub fn new(settings: &Settings) -> Self {
        let sizes = &settings.pools;
        Self {
            enemies: EntityPool::new(sizes.enemies, settings.fall_speed),
            bosses: EntityPool::new(sizes.bosses, settings.fall_speed),
            powerups: EntityPool::new(sizes.powerups, settings.fall_speed),
            projectiles: EntityPool::new(sizes.projectiles, settings.projectile_speed),
        }
    }

    /// Some falling entity hasn't fully entered the screen yet
    pub fn any_emerging(&self) -> bool {
        self.enemies.any_emerging() || self.bosses.any_emerging() || self.powerups.any_emerging()
    }

    pub fn live_count(&self) -> usize {
        self.enemies.live_count()
            + self.bosses.live_count()
            + self.powerups.live_count()
            + self.projectiles.live_count()
    }

    pub fn update_all(&mut self, playfield: &Playfield) {
        self.enemies.update_all(playfield);
        self.bosses.update_all(playfield);
        self.powerups.update_all(playfield);
        self.projectiles.update_all(playfield);
    }

    pub fn animate(&mut self, frame_counter: u64, cadence: u64) {
        self.enemies.animate(frame_counter, cadence);
        self.bosses.animate(frame_counter, cadence);
        self.powerups.animate(frame_counter, cadence);
        self.projectiles.animate(frame_counter, cadence);
    }

    pub fn draw_all(&self, catalog: &Catalog, sink: &mut impl SpriteSink) {
        self.powerups.draw_all(catalog, sink);
        self.enemies.draw_all(catalog, sink);
        self.bosses.draw_all(catalog, sink);
        self.projectiles.draw_all(catalog, sink);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::HandleRegistry;
    use crate::renderer::InstanceBuffer;
    use proptest::prelude::*;

    fn catalog() -> Catalog {
        Catalog::new(&Settings::default(), &mut HandleRegistry::new())
    }

    #[test]
    fn test_create_stamps_template() {
        let catalog = catalog();
        let mut pool = EntityPool::new(4, 1);
        let template = catalog.enemy(2);

        let slot = pool.create(template, 96).expect("pool has room");
        let entity = pool.get(slot).unwrap();
        assert_eq!(entity.pos, IVec2::new(96, -template.sprite.frame_height));
        assert!(entity.is_alive());
        assert_eq!(entity.health, template.health);
        assert_eq!(entity.frame_index, 0);
    }

    #[test]
    fn test_velocity_scaled_by_pool_speed() {
        let catalog = catalog();
        let mut pool = EntityPool::new(1, 3);
        let slot = pool.create(catalog.enemy(0), 0).unwrap();
        assert_eq!(pool.get(slot).unwrap().vel, IVec2::new(0, 3));
    }

    #[test]
    fn test_lowest_free_slot_first() {
        let catalog = catalog();
        let mut pool = EntityPool::new(4, 1);
        for expected in 0..4 {
            assert_eq!(pool.create(catalog.enemy(0), 0), Some(expected));
        }
        pool.kill(2);
        pool.kill(0);
        assert_eq!(pool.create(catalog.enemy(0), 0), Some(0));
        assert_eq!(pool.create(catalog.enemy(0), 0), Some(2));
    }

    #[test]
    fn test_full_pool_drops_spawn() {
        let catalog = catalog();
        let mut pool = EntityPool::new(2, 1);
        assert!(pool.create(catalog.enemy(0), 0).is_some());
        assert!(pool.create(catalog.enemy(1), 32).is_some());
        let before = pool.slots().to_vec();

        assert_eq!(pool.create(catalog.enemy(2), 64), None);
        assert_eq!(pool.slots(), &before[..]);
        assert_eq!(pool.live_count(), 2);
    }

    #[test]
    fn test_kill_twice_frees_once() {
        let catalog = catalog();
        let mut pool = EntityPool::new(2, 1);
        let slot = pool.create(catalog.enemy(0), 0).unwrap();
        pool.kill(slot);
        pool.kill(slot);
        assert_eq!(pool.live_count(), 0);
        assert!(pool.create(catalog.enemy(0), 0).is_some());
        assert!(pool.create(catalog.enemy(0), 0).is_some());
        assert!(pool.create(catalog.enemy(0), 0).is_none());
    }

    #[test]
    fn test_update_empty_pool_is_noop() {
        let mut pool = EntityPool::new(8, 2);
        let before = pool.slots().to_vec();
        pool.update_all(&Playfield::default());
        assert_eq!(pool.slots(), &before[..]);
        assert_eq!(pool.live_count(), 0);
    }

    #[test]
    fn test_offscreen_boundary() {
        let catalog = catalog();
        let playfield = Playfield::default();
        let mut pool = EntityPool::new(2, 1);
        let h = catalog.enemy(0).sprite.frame_height;

        let inside = pool.create(catalog.enemy(0), 0).unwrap();
        let outside = pool.create(catalog.enemy(0), 32).unwrap();
        pool.get_mut(inside).unwrap().pos.y = playfield.height + h - 1;
        pool.get_mut(outside).unwrap().pos.y = playfield.height + h + 1;

        pool.update_all(&playfield);
        assert!(pool.is_alive(inside));
        assert_eq!(pool.get(inside).unwrap().pos.y, playfield.height + h);
        assert!(!pool.is_alive(outside));
    }

    #[test]
    fn test_exhausted_enemy_expires_on_update() {
        let catalog = catalog();
        let mut pool = EntityPool::new(1, 1);
        let slot = pool.create(catalog.enemy(0), 0).unwrap();
        pool.get_mut(slot).unwrap().health = 0;
        pool.update_all(&Playfield::default());
        assert!(!pool.is_alive(slot));
    }

    #[test]
    fn test_opened_box_survives_zero_health() {
        let catalog = catalog();
        let mut pool = EntityPool::new(1, 1);
        let slot = pool.create(catalog.powerup(1), 0).unwrap();
        pool.get_mut(slot).unwrap().health = 0;
        pool.animate(1, 15);
        pool.update_all(&Playfield::default());
        let entity = pool.get(slot).expect("power-ups aren't destroyed by damage");
        assert!(entity.caps.collectible);
    }

    #[test]
    fn test_projectile_expires_above_screen() {
        let catalog = catalog();
        let mut pool = EntityPool::new(1, 8);
        let slot = pool
            .create_at(catalog.projectile(), IVec2::new(100, 4))
            .unwrap();
        pool.update_all(&Playfield::default());
        assert_eq!(pool.get(slot).unwrap().pos.y, -4);
        pool.update_all(&Playfield::default());
        assert_eq!(pool.get(slot).unwrap().pos.y, -12);
        // Bottom edge still at y = 4
        pool.update_all(&Playfield::default());
        assert_eq!(pool.get(slot).unwrap().pos.y, -20);
        pool.update_all(&Playfield::default());
        assert!(!pool.is_alive(slot));
    }

    #[test]
    fn test_any_emerging() {
        let catalog = catalog();
        let mut pool = EntityPool::new(1, 1);
        assert!(!pool.any_emerging());
        let slot = pool.create(catalog.enemy(0), 0).unwrap();
        assert!(pool.any_emerging());
        pool.get_mut(slot).unwrap().pos.y = 0;
        assert!(!pool.any_emerging());
    }

    #[test]
    fn test_draw_skips_dead_and_keeps_order() {
        let catalog = catalog();
        let mut pool = EntityPool::new(3, 1);
        pool.create(catalog.enemy(0), 0).unwrap();
        let middle = pool.create(catalog.enemy(1), 32).unwrap();
        pool.create(catalog.enemy(2), 64).unwrap();
        pool.kill(middle);

        let mut buffer = InstanceBuffer::default();
        pool.draw_all(&catalog, &mut buffer);
        let xs: Vec<f32> = buffer.instances().iter().map(|s| s.position[0]).collect();
        assert_eq!(xs, vec![0.0, 64.0]);
    }

    #[test]
    fn test_boxed_powerup_draws_crate() {
        let catalog = catalog();
        let mut pool = EntityPool::new(1, 1);
        let slot = pool.create(catalog.powerup(2), 0).unwrap();
        pool.get_mut(slot).unwrap().health = 1;
        pool.animate(1, 15);

        let mut buffer = InstanceBuffer::default();
        pool.draw_all(&catalog, &mut buffer);
        let sprite = buffer.instances()[0];
        assert_eq!(sprite.texture(), catalog.box_wrapper().texture);
        assert_eq!(sprite.source[0], 32.0, "broken frame");
    }

    #[derive(Debug, Clone)]
    enum Op {
        Create(i32),
        Kill(usize),
        Update,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..12i32).prop_map(|c| Op::Create(c * 32)),
            (0..16usize).prop_map(Op::Kill),
            Just(Op::Update),
        ]
    }

    proptest! {
        #[test]
        fn prop_live_count_never_exceeds_capacity(
            capacity in 1..12usize,
            ops in proptest::collection::vec(op(), 0..200),
        ) {
            let catalog = catalog();
            let playfield = Playfield::default();
            let mut pool = EntityPool::new(capacity, 7);

            for op in ops {
                match op {
                    Op::Create(x) => {
                        let lowest_free = pool.slots().iter().position(|e| !e.is_alive());
                        let slot = pool.create(catalog.enemy(0), x);
                        prop_assert_eq!(slot, lowest_free);
                    }
                    Op::Kill(slot) => pool.kill(slot),
                    Op::Update => pool.update_all(&playfield),
                }
                let alive = pool.slots().iter().filter(|e| e.is_alive()).count();
                prop_assert!(pool.live_count() <= pool.capacity());
                prop_assert_eq!(pool.live_count(), alive);
            }
        }
    }
}
