//! wgpu-backed device resources.
//!
//! - `context` creates a windowless device and queue
//! - `texture` uploads mipmapped textures and implements
//!   [`crate::backend::TextureDevice`]

pub mod context;
pub mod texture;

pub use context::GpuContext;
pub use texture::{GpuTexture, GpuTextures};
