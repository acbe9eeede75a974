//! Scene lights.
//!
//! One directional light plus any number of point lights. Lights are configured
//! once during preparation and published as named uniforms; they are not
//! touched per frame.

use cgmath::Vector3;

use crate::backend::{ShaderUniforms, names};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vector3<f32>,
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
    pub active: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vector3<f32>,
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Lighting {
    /// When false the shader falls back to its unlit path.
    pub use_lighting: bool,
    pub directional: DirectionalLight,
    pub point_lights: Vec<PointLight>,
}

impl Lighting {
    pub fn apply<U: ShaderUniforms + ?Sized>(&self, uniforms: &mut U) {
        uniforms.set_bool(names::USE_LIGHTING, self.use_lighting);

        let d = &self.directional;
        uniforms.set_vec3("directionalLight.direction", d.direction);
        uniforms.set_vec3("directionalLight.ambient", d.ambient);
        uniforms.set_vec3("directionalLight.diffuse", d.diffuse);
        uniforms.set_vec3("directionalLight.specular", d.specular);
        uniforms.set_bool("directionalLight.bActive", d.active);

        for (i, light) in self.point_lights.iter().enumerate() {
            let field = |name: &str| format!("pointLights[{i}].{name}");
            uniforms.set_vec3(&field("position"), light.position);
            uniforms.set_vec3(&field("ambient"), light.ambient);
            uniforms.set_vec3(&field("diffuse"), light.diffuse);
            uniforms.set_vec3(&field("specular"), light.specular);
            uniforms.set_bool(&field("bActive"), light.active);
        }
        log::debug!(
            "lighting configured with {} point light(s)",
            self.point_lights.len()
        );
    }
}
