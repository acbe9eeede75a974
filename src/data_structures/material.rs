//! Named lighting-material presets.

use cgmath::Vector3;

use crate::backend::{ShaderUniforms, names};

/// Reflectance coefficients for the lighting shader, independent of any
/// texture.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub tag: String,
    pub ambient_color: Vector3<f32>,
    pub ambient_strength: f32,
    pub diffuse_color: Vector3<f32>,
    pub specular_color: Vector3<f32>,
    pub shininess: f32,
}

impl Material {
    /// A neutral grey material tagged `tag`.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ambient_color: Vector3::new(1.0, 1.0, 1.0),
            ambient_strength: 0.1,
            diffuse_color: Vector3::new(0.5, 0.5, 0.5),
            specular_color: Vector3::new(0.0, 0.0, 0.0),
            shininess: 1.0,
        }
    }

    pub fn with_ambient(mut self, color: [f32; 3], strength: f32) -> Self {
        self.ambient_color = color.into();
        self.ambient_strength = strength;
        self
    }

    pub fn with_diffuse(mut self, color: [f32; 3]) -> Self {
        self.diffuse_color = color.into();
        self
    }

    pub fn with_specular(mut self, color: [f32; 3], shininess: f32) -> Self {
        self.specular_color = color.into();
        self.shininess = shininess;
        self
    }

    /// Publish the material fields to the shader.
    pub fn apply<U: ShaderUniforms + ?Sized>(&self, uniforms: &mut U) {
        uniforms.set_vec3(names::MATERIAL_AMBIENT_COLOR, self.ambient_color);
        uniforms.set_float(names::MATERIAL_AMBIENT_STRENGTH, self.ambient_strength);
        uniforms.set_vec3(names::MATERIAL_DIFFUSE_COLOR, self.diffuse_color);
        uniforms.set_vec3(names::MATERIAL_SPECULAR_COLOR, self.specular_color);
        uniforms.set_float(names::MATERIAL_SHININESS, self.shininess);
    }
}

/// Material presets, looked up by tag.
///
/// Defining a tag twice keeps both entries; only the first one is ever found.
#[derive(Debug, Default)]
pub struct MaterialRegistry {
    materials: Vec<Material>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, material: Material) {
        self.materials.push(material);
    }

    /// A copy of the first material tagged `tag`.
    pub fn find(&self, tag: &str) -> Option<Material> {
        self.materials.iter().find(|m| m.tag == tag).cloned()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_on_empty_registry() {
        assert_eq!(MaterialRegistry::new().find("glass"), None);
    }

    #[test]
    fn first_definition_wins() {
        let mut registry = MaterialRegistry::new();
        registry.define(Material::new("glass").with_specular([0.6, 0.6, 0.6], 32.0));
        registry.define(Material::new("glass").with_specular([0.0, 0.0, 0.0], 1.0));

        let glass = registry.find("glass").unwrap();
        assert_eq!(glass.shininess, 32.0);
        assert_eq!(glass.specular_color, Vector3::new(0.6, 0.6, 0.6));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn find_returns_an_independent_copy() {
        let mut registry = MaterialRegistry::new();
        registry.define(Material::new("dock").with_ambient([0.1, 0.1, 0.1], 0.1));

        let mut copy = registry.find("dock").unwrap();
        copy.ambient_strength = 0.9;

        assert_eq!(registry.find("dock").unwrap().ambient_strength, 0.1);
    }

    #[test]
    fn unknown_tag_is_not_found() {
        let mut registry = MaterialRegistry::new();
        registry.define(Material::new("table"));
        assert!(registry.find("placeHolder").is_none());
    }
}
