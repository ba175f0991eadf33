//! Rendering hand-off
//!
//! The simulation never touches a GPU. Each frame it reports one
//! [`SpriteInstance`] per visible entity to a [`SpriteSink`]; the host turns
//! those into draw calls.

pub mod sprite;

pub use sprite::{InstanceBuffer, SpriteInstance, SpriteSink};
