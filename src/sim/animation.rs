//! Animation stepper
//!
//! Time-driven frame advance for everything except boxed power-ups, whose
//! frame shows how close the box is to breaking.

use super::entity::Entity;

/// Frame a box shows at a given health: intact, then broken
fn box_frame(health: i32) -> u32 {
    if health >= 2 { 0 } else { 1 }
}

/// Advance one entity's animation for frame `frame_counter`
pub fn advance(entity: &mut Entity, frame_counter: u64, cadence: u64) {
    if entity.caps.boxed {
        if entity.health <= 0 {
            // Box is gone; what's left is a plain collectible
            entity.caps.boxed = false;
            entity.caps.collectible = true;
            entity.frame_index = 0;
            log::trace!("Box opened at ({}, {})", entity.pos.x, entity.pos.y);
        } else {
            entity.frame_index = box_frame(entity.health);
        }
        return;
    }

    if frame_counter % cadence.max(1) == 0 {
        entity.frame_index = entity.frame_index.wrapping_add(1);
    }
}
