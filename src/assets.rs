//! Texture handles and sprite sheet geometry
//!
//! Decoding images is the host's job. The simulation only sees opaque
//! [`TextureHandle`]s and the frame layout of each sheet.

use std::collections::HashMap;

/// Opaque reference to a texture owned by the host renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureHandle(pub u32);

/// Layout of a horizontal strip of equally sized animation frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpriteSheet {
    pub texture: TextureHandle,
    pub frame_width: i32,
    pub frame_height: i32,
    pub frame_count: u32,
}

impl SpriteSheet {
    /// Source rectangle `[x, y, w, h]` of a frame; the index wraps here and only here
    pub fn frame_rect(&self, frame_index: u32) -> [i32; 4] {
        let frame = frame_index % self.frame_count.max(1);
        [
            frame as i32 * self.frame_width,
            0,
            self.frame_width,
            self.frame_height,
        ]
    }
}

/// Supplies texture handles for asset paths
pub trait TextureLoader {
    fn load(&mut self, path: &str) -> TextureHandle;
}

/// Headless loader: hands out sequential handles, one per distinct path
#[derive(Debug, Default)]
pub struct HandleRegistry {
    handles: HashMap<String, TextureHandle>,
}

impl HandleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl TextureLoader for HandleRegistry {
    fn load(&mut self, path: &str) -> TextureHandle {
        let next = TextureHandle(self.handles.len() as u32 + 1);
        let handle = *self.handles.entry(path.to_string()).or_insert(next);
        log::debug!("Texture {} -> {:?}", path, handle);
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_reuses_handles() {
        let mut registry = HandleRegistry::new();
        let a = registry.load("assets/images/straw.png");
        let b = registry.load("assets/images/rings.png");
        let a2 = registry.load("assets/images/straw.png");
        assert_eq!(a, a2);
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_frame_rect_wraps_index() {
        let sheet = SpriteSheet {
            texture: TextureHandle(1),
            frame_width: 32,
            frame_height: 32,
            frame_count: 2,
        };
        assert_eq!(sheet.frame_rect(0), [0, 0, 32, 32]);
        assert_eq!(sheet.frame_rect(1), [32, 0, 32, 32]);
        assert_eq!(sheet.frame_rect(7), [32, 0, 32, 32]);
    }
}
