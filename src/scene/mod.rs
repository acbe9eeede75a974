//! Scene preparation and the per-frame draw sequence.
//!
//! A [`Scene`] owns its texture and material registries, its lights and a table
//! of [`SceneObject`]s. It is driven in three phases:
//!
//! 1. [`Scene::prepare`] runs once: textures are loaded and bound, materials
//!    defined, lights published and every primitive mesh loaded
//! 2. [`Scene::render_frame`] runs every frame and walks the object table in
//!    authored order
//! 3. [`Scene::release`] frees the GPU textures at teardown and resets the scene
//!
//! Nothing here fails hard. A texture that cannot be loaded is logged and the
//! objects using it render with the "no texture" sampler unit instead.

use std::{
    env,
    path::{Path, PathBuf},
};

use crate::{
    backend::{MeshLibrary, ShaderUniforms, Shape, TextureDevice},
    data_structures::{
        light::Lighting,
        material::{Material, MaterialRegistry},
        texture::TextureRegistry,
    },
    render::{RenderState, SceneObject, Surface},
};

pub mod tabletop;

/// Environment variable that overrides [`SceneConfig::texture_dir`].
pub const TEXTURE_DIR_ENV: &str = "TABLETOP_TEXTURE_DIR";

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    /// Directory texture file names are resolved against.
    pub texture_dir: PathBuf,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            texture_dir: PathBuf::from("./Textures"),
        }
    }
}

impl SceneConfig {
    pub fn new(texture_dir: impl Into<PathBuf>) -> Self {
        Self {
            texture_dir: texture_dir.into(),
        }
    }

    /// The default config, with the texture directory taken from
    /// `TABLETOP_TEXTURE_DIR` when it is set.
    pub fn from_env() -> Self {
        match env::var_os(TEXTURE_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Self::new(dir),
            _ => Self::default(),
        }
    }
}

/// An image file and the tag it is registered under.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureSource {
    pub file: PathBuf,
    pub tag: String,
}

impl TextureSource {
    pub fn new(file: impl Into<PathBuf>, tag: &str) -> Self {
        Self {
            file: file.into(),
            tag: tag.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct Scene {
    config: SceneConfig,
    texture_sources: Vec<TextureSource>,
    material_presets: Vec<Material>,
    lighting: Lighting,
    objects: Vec<SceneObject>,
    textures: TextureRegistry,
    materials: MaterialRegistry,
    state: RenderState,
    prepared: bool,
}

impl Scene {
    pub fn new(
        config: SceneConfig,
        texture_sources: Vec<TextureSource>,
        material_presets: Vec<Material>,
        lighting: Lighting,
        objects: Vec<SceneObject>,
    ) -> Self {
        Self {
            config,
            texture_sources,
            material_presets,
            lighting,
            objects,
            textures: TextureRegistry::new(),
            materials: MaterialRegistry::new(),
            state: RenderState::new(),
            prepared: false,
        }
    }

    /// The hand-authored tabletop scene.
    pub fn tabletop(config: SceneConfig) -> Self {
        Self::new(
            config,
            tabletop::textures(),
            tabletop::materials(),
            tabletop::lighting(),
            tabletop::objects(),
        )
    }

    /// One-time setup. Order matters: textures are loaded then bound,
    /// materials defined, lights published, and each mesh loaded once no
    /// matter how often it is drawn.
    pub fn prepare<D, B>(&mut self, device: &mut D, backend: &mut B)
    where
        D: TextureDevice + ?Sized,
        B: ShaderUniforms + MeshLibrary + ?Sized,
    {
        if self.prepared {
            log::warn!("scene is already prepared, ignoring");
            return;
        }

        let loaded = self.load_textures(device);
        self.textures.bind_all(device);
        log::info!(
            "{loaded} of {} textures loaded and bound",
            self.texture_sources.len()
        );

        for material in &self.material_presets {
            self.materials.define(material.clone());
        }

        self.lighting.apply(backend);

        for shape in Shape::ALL {
            backend.load_mesh(shape);
        }

        self.prepared = true;
    }

    fn load_textures<D: TextureDevice + ?Sized>(&mut self, device: &mut D) -> usize {
        let mut loaded = 0;
        for source in &self.texture_sources {
            let path = resolve(&self.config.texture_dir, &source.file);
            match self.textures.load(device, &path, &source.tag) {
                Ok(slot) => {
                    log::debug!("texture `{}` registered at slot {slot}", source.tag);
                    loaded += 1;
                }
                Err(e) => log::error!("{e}"),
            }
        }
        loaded
    }

    /// Draw every object in authored order.
    ///
    /// Per object the transform is published once, then each step selects its
    /// colour or texture, its UV scale and material if it has them, and issues
    /// its draw call.
    pub fn render_frame<B>(&mut self, backend: &mut B)
    where
        B: ShaderUniforms + MeshLibrary + ?Sized,
    {
        if !self.prepared {
            log::warn!("render_frame called before prepare, skipping frame");
            return;
        }

        for object in &self.objects {
            log::trace!("drawing {}", object.name);
            self.state.set_transform(backend, &object.transform);
            for step in &object.steps {
                match &step.surface {
                    Surface::Color(rgba) => self.state.set_color(backend, *rgba),
                    Surface::Texture(tag) => {
                        self.state.set_texture(backend, &self.textures, tag)
                    }
                }
                if let Some([u, v]) = step.uv_scale {
                    self.state.set_uv_scale(backend, u, v);
                }
                if let Some(tag) = &step.material {
                    self.state.set_material(backend, &self.materials, tag);
                }
                step.draw.issue(backend);
            }
        }
    }

    /// Free every texture and return to the unprepared state.
    ///
    /// Both registries are empty afterwards and the render state is reset, so
    /// frames are skipped until [`Scene::prepare`] runs again.
    pub fn release<D: TextureDevice + ?Sized>(&mut self, device: &mut D) {
        self.textures.release_all(device);
        self.materials = MaterialRegistry::new();
        self.state = RenderState::new();
        self.prepared = false;
    }

    pub fn textures(&self) -> &TextureRegistry {
        &self.textures
    }

    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }
}

fn resolve(dir: &Path, file: &Path) -> PathBuf {
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        dir.join(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_textures_dir() {
        assert_eq!(SceneConfig::default().texture_dir, PathBuf::from("./Textures"));
    }

    #[test]
    fn relative_files_resolve_against_texture_dir() {
        let dir = Path::new("/assets");
        assert_eq!(resolve(dir, Path::new("wall.png")), PathBuf::from("/assets/wall.png"));
        assert_eq!(resolve(dir, Path::new("/tmp/x.png")), PathBuf::from("/tmp/x.png"));
    }

    #[test]
    fn tabletop_scene_starts_unprepared() {
        let scene = Scene::tabletop(SceneConfig::default());
        assert!(!scene.is_prepared());
        assert!(scene.textures().is_empty());
        assert!(scene.materials().is_empty());
        assert_eq!(scene.objects().len(), 11);
    }
}
