//! Scene data structures: registries and value types.
//!
//! - `texture` holds the tagged texture registry and image decoding
//! - `material` holds lighting-material presets and their registry
//! - `transform` composes per-object model matrices
//! - `light` describes the directional and point lights

pub mod light;
pub mod material;
pub mod texture;
pub mod transform;
