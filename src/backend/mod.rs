//! Backend contracts consumed by the scene.
//!
//! The scene never talks to a graphics API directly. It pushes named uniforms
//! through [`ShaderUniforms`], loads and draws primitive meshes through
//! [`MeshLibrary`] and creates/binds textures through [`TextureDevice`]. All
//! three are plain capabilities so the draw sequence can run against a GPU
//! (see [`crate::gpu`]) or against the [`recorder::FrameRecorder`].
//!
//! # Key types
//!
//! - [`Shape`] names the five primitive meshes the scene uses
//! - [`BoxSide`] names a single face of the box mesh
//! - [`TextureHandle`] is an opaque id handed out by a [`TextureDevice`]

use cgmath::{Matrix4, Vector2, Vector3, Vector4};
use image::RgbaImage;

pub mod recorder;

/// Sampler unit passed to [`ShaderUniforms::set_sampler`] when no texture slot
/// could be resolved. Backends treat it as "no texture".
pub const NO_TEXTURE_UNIT: i32 = -1;

/// Uniform names shared between the scene and the shader.
pub mod names {
    pub const MODEL: &str = "model";
    pub const OBJECT_COLOR: &str = "objectColor";
    pub const OBJECT_TEXTURE: &str = "objectTexture";
    pub const USE_TEXTURE: &str = "bUseTexture";
    pub const USE_LIGHTING: &str = "bUseLighting";
    pub const UV_SCALE: &str = "UVscale";

    pub const MATERIAL_AMBIENT_COLOR: &str = "material.ambientColor";
    pub const MATERIAL_AMBIENT_STRENGTH: &str = "material.ambientStrength";
    pub const MATERIAL_DIFFUSE_COLOR: &str = "material.diffuseColor";
    pub const MATERIAL_SPECULAR_COLOR: &str = "material.specularColor";
    pub const MATERIAL_SHININESS: &str = "material.shininess";
}

/// Generic named-uniform interface of the shader backend.
pub trait ShaderUniforms {
    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>);
    fn set_vec2(&mut self, name: &str, value: Vector2<f32>);
    fn set_vec3(&mut self, name: &str, value: Vector3<f32>);
    fn set_vec4(&mut self, name: &str, value: Vector4<f32>);
    fn set_float(&mut self, name: &str, value: f32);
    fn set_bool(&mut self, name: &str, value: bool);
    fn set_int(&mut self, name: &str, value: i32);
    /// Point the sampler `name` at texture `unit`, or [`NO_TEXTURE_UNIT`].
    fn set_sampler(&mut self, name: &str, unit: i32);
}

/// The primitive meshes available to the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    Plane,
    Torus,
    Cylinder,
    Box,
    TaperedCylinder,
}

impl Shape {
    /// Every shape, in the order the scene loads them.
    pub const ALL: [Shape; 5] = [
        Shape::Plane,
        Shape::Torus,
        Shape::Cylinder,
        Shape::Box,
        Shape::TaperedCylinder,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoxSide {
    Front,
    Back,
    Left,
    Right,
    Top,
    Bottom,
}

/// A single mesh draw call: a whole shape or one face of the box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Draw {
    Mesh(Shape),
    BoxSide(BoxSide),
}

impl Draw {
    /// Issue this draw on `meshes`.
    pub fn issue<M: MeshLibrary + ?Sized>(self, meshes: &mut M) {
        match self {
            Draw::Mesh(shape) => meshes.draw_mesh(shape),
            Draw::BoxSide(side) => meshes.draw_box_side(side),
        }
    }
}

/// Mesh geometry backend.
///
/// `load_mesh` uploads a shape once; the draw calls reuse it as often as
/// needed and use whatever model matrix, colour/texture and material were last
/// published through [`ShaderUniforms`].
pub trait MeshLibrary {
    fn load_mesh(&mut self, shape: Shape);
    fn draw_mesh(&mut self, shape: Shape);
    fn draw_box_side(&mut self, side: BoxSide);
}

/// Opaque id of a texture living on a [`TextureDevice`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Texture storage and binding on the graphics device.
pub trait TextureDevice {
    /// Upload a decoded RGBA8 image as a mipmapped, repeating, linearly
    /// filtered 2D texture.
    fn upload(&mut self, label: &str, image: &RgbaImage) -> TextureHandle;
    /// Make `handle` the texture sampled through unit `unit`.
    fn bind(&mut self, unit: u32, handle: TextureHandle);
    fn release(&mut self, handle: TextureHandle);
    /// Number of positional texture units the device exposes.
    fn max_texture_units(&self) -> usize;
}
