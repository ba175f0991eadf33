//! Sprite instance types for 2D rendering

use bytemuck::{Pod, Zeroable};
use glam::IVec2;

use crate::assets::{SpriteSheet, TextureHandle};

/// One textured quad: which texture, which part of it, and where on screen
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    pub texture: u32,
    /// Source rectangle in texels: x, y, w, h
    pub source: [f32; 4],
    /// Top-left destination in screen pixels
    pub position: [f32; 2],
}

impl SpriteInstance {
    pub fn new(sheet: &SpriteSheet, frame_index: u32, pos: IVec2) -> Self {
        let [x, y, w, h] = sheet.frame_rect(frame_index);
        Self {
            texture: sheet.texture.0,
            source: [x as f32, y as f32, w as f32, h as f32],
            position: [pos.x as f32, pos.y as f32],
        }
    }

    pub fn texture(&self) -> TextureHandle {
        TextureHandle(self.texture)
    }
}

/// Receives the sprites of one frame, in draw order
pub trait SpriteSink {
    fn draw(&mut self, sprite: SpriteInstance);
}

/// Collects a frame's sprites for upload as an instance buffer
#[derive(Debug, Default, Clone)]
pub struct InstanceBuffer {
    instances: Vec<SpriteInstance>,
}

impl InstanceBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
        }
    }

    /// Start a new frame
    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn instances(&self) -> &[SpriteInstance] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Raw bytes ready for a vertex/instance buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl SpriteSink for InstanceBuffer {
    fn draw(&mut self, sprite: SpriteInstance) {
        self.instances.push(sprite);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_selects_frame() {
        let sheet = SpriteSheet {
            texture: TextureHandle(4),
            frame_width: 32,
            frame_height: 32,
            frame_count: 2,
        };
        let sprite = SpriteInstance::new(&sheet, 3, IVec2::new(64, -32));
        assert_eq!(sprite.texture(), TextureHandle(4));
        assert_eq!(sprite.source, [32.0, 0.0, 32.0, 32.0]);
        assert_eq!(sprite.position, [64.0, -32.0]);
    }

    #[test]
    fn test_buffer_bytes_match_layout() {
        let sheet = SpriteSheet {
            texture: TextureHandle(1),
            frame_width: 8,
            frame_height: 16,
            frame_count: 1,
        };
        let mut buffer = InstanceBuffer::default();
        buffer.draw(SpriteInstance::new(&sheet, 0, IVec2::ZERO));
        buffer.draw(SpriteInstance::new(&sheet, 0, IVec2::new(10, 10)));
        assert_eq!(buffer.len(), 2);
        assert_eq!(
            buffer.as_bytes().len(),
            2 * std::mem::size_of::<SpriteInstance>()
        );
        buffer.clear();
        assert!(buffer.is_empty());
    }
}
