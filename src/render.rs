//! Per-draw render state and the scene object table.
//!
//! The shader keeps whatever model matrix, colour/texture and material were set
//! last; every draw call uses that state. [`RenderState`] mirrors it on the
//! CPU side so the active state is explicit and can be inspected, and it is the
//! only place that writes the per-object uniforms.
//!
//! # Key types
//!
//! - [`RenderState`] publishes transforms, colours, textures and materials
//! - [`SceneObject`] is one entry of a data-driven scene: a transform and the
//!   draw steps that share it
//! - [`DrawStep`] selects a [`Surface`], optionally a material, and issues a [`Draw`]

use cgmath::{Matrix4, SquareMatrix, Vector2, Vector4};

use crate::{
    backend::{Draw, NO_TEXTURE_UNIT, ShaderUniforms, names},
    data_structures::{material::MaterialRegistry, texture::TextureRegistry, transform::Transform},
};

/// What an object's surface is painted with.
#[derive(Clone, Debug, PartialEq)]
pub enum Surface {
    /// Flat RGBA colour, texturing disabled.
    Color([f32; 4]),
    /// Texture looked up by tag, texturing enabled.
    Texture(String),
}

/// One draw call of an object.
///
/// A step without a material keeps whatever material the previous step or
/// object left active.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawStep {
    pub surface: Surface,
    pub material: Option<String>,
    pub uv_scale: Option<[f32; 2]>,
    pub draw: Draw,
}

impl DrawStep {
    pub fn textured(tag: &str, draw: Draw) -> Self {
        Self {
            surface: Surface::Texture(tag.to_string()),
            material: None,
            uv_scale: None,
            draw,
        }
    }

    pub fn colored(rgba: [f32; 4], draw: Draw) -> Self {
        Self {
            surface: Surface::Color(rgba),
            material: None,
            uv_scale: None,
            draw,
        }
    }

    pub fn with_material(mut self, tag: &str) -> Self {
        self.material = Some(tag.to_string());
        self
    }

    pub fn with_uv_scale(mut self, u: f32, v: f32) -> Self {
        self.uv_scale = Some([u, v]);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneObject {
    pub name: String,
    pub transform: Transform,
    pub steps: Vec<DrawStep>,
}

impl SceneObject {
    pub fn new(name: &str, transform: Transform, steps: Vec<DrawStep>) -> Self {
        Self {
            name: name.to_string(),
            transform,
            steps,
        }
    }
}

/// The state the next draw call will use.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderState {
    pub model: Matrix4<f32>,
    pub color: [f32; 4],
    pub use_texture: bool,
    /// Slot of the selected texture; `None` if the tag was not registered.
    pub texture_unit: Option<usize>,
    /// Tag of the active material.
    pub material: Option<String>,
    pub uv_scale: [f32; 2],
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            model: Matrix4::identity(),
            color: [1.0, 1.0, 1.0, 1.0],
            use_texture: false,
            texture_unit: None,
            material: None,
            uv_scale: [1.0, 1.0],
        }
    }
}

impl RenderState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the model matrix of `transform` and make it the active one.
    pub fn set_transform<U: ShaderUniforms + ?Sized>(
        &mut self,
        uniforms: &mut U,
        transform: &Transform,
    ) {
        self.model = transform.to_matrix();
        uniforms.set_mat4(names::MODEL, self.model);
    }

    /// Paint with a flat colour and switch texturing off.
    pub fn set_color<U: ShaderUniforms + ?Sized>(&mut self, uniforms: &mut U, rgba: [f32; 4]) {
        self.color = rgba;
        self.use_texture = false;
        uniforms.set_bool(names::USE_TEXTURE, false);
        uniforms.set_vec4(names::OBJECT_COLOR, Vector4::from(rgba));
    }

    /// Sample the texture tagged `tag` and switch texturing on.
    ///
    /// An unknown tag still enables texturing but points the sampler at
    /// [`NO_TEXTURE_UNIT`].
    pub fn set_texture<U: ShaderUniforms + ?Sized>(
        &mut self,
        uniforms: &mut U,
        textures: &TextureRegistry,
        tag: &str,
    ) {
        let slot = textures.find_slot(tag);
        if slot.is_none() {
            log::warn!("texture `{tag}` is not registered");
        }
        self.use_texture = true;
        self.texture_unit = slot;
        uniforms.set_bool(names::USE_TEXTURE, true);
        uniforms.set_sampler(
            names::OBJECT_TEXTURE,
            slot.map_or(NO_TEXTURE_UNIT, |s| s as i32),
        );
    }

    /// Make the material tagged `tag` active.
    ///
    /// Returns false and leaves the previous material in place when the tag is
    /// unknown.
    pub fn set_material<U: ShaderUniforms + ?Sized>(
        &mut self,
        uniforms: &mut U,
        materials: &MaterialRegistry,
        tag: &str,
    ) -> bool {
        match materials.find(tag) {
            Some(material) => {
                material.apply(uniforms);
                self.material = Some(material.tag);
                true
            }
            None => {
                log::warn!(
                    "material `{tag}` is not defined, keeping {:?}",
                    self.material
                );
                false
            }
        }
    }

    pub fn set_uv_scale<U: ShaderUniforms + ?Sized>(&mut self, uniforms: &mut U, u: f32, v: f32) {
        self.uv_scale = [u, v];
        uniforms.set_vec2(names::UV_SCALE, Vector2::new(u, v));
    }
}
