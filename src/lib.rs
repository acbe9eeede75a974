//! tabletop-scene
//!
//! Renders a fixed, hand-authored tabletop (table, wall, tape roll, two
//! bottles and a dock) with an immediate-style draw sequence: for every object
//! a model matrix is published, a colour or texture and a material are
//! selected, and a primitive mesh is drawn. The graphics API sits behind small
//! backend traits so the same sequence runs against a GPU or a recorder.
//!
//! High-level modules
//! - `backend`: shader-uniform, mesh and texture-device contracts plus a
//!   recording backend
//! - `data_structures`: texture and material registries, transforms, lights
//! - `render`: the explicit per-draw render state and the object table types
//! - `scene`: one-time preparation, the per-frame draw loop and the authored scene
//! - `gpu`: wgpu device creation and texture upload
//!

pub mod backend;
pub mod data_structures;
pub mod gpu;
pub mod render;
pub mod scene;

// Re-exports commonly used types for convenience in downstream code.
pub use backend::recorder::FrameRecorder;
pub use scene::{Scene, SceneConfig};
pub use cgmath::*;
