//! A backend that records instead of rendering.
//!
//! [`FrameRecorder`] keeps the latest value of every named uniform, the way a
//! shader program would, and appends every call to an ordered command log.
//! Each draw snapshots the active state into an [`ObjectUniform`], the packed
//! per-draw block a GPU backend would upload.

use std::collections::HashMap;

use cgmath::{Matrix4, SquareMatrix, Vector2, Vector3, Vector4};

use super::{BoxSide, Draw, MeshLibrary, NO_TEXTURE_UNIT, ShaderUniforms, Shape, names};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    Mat4(Matrix4<f32>),
    Vec2(Vector2<f32>),
    Vec3(Vector3<f32>),
    Vec4(Vector4<f32>),
    Float(f32),
    Bool(bool),
    Int(i32),
    Sampler(i32),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Uniform { name: String, value: UniformValue },
    LoadMesh(Shape),
    Draw { draw: Draw, object: ObjectUniform },
}

/**
 * Per-draw state as it would sit in a uniform buffer.
 *
 * Every field is 4 bytes wide and the struct is a multiple of 16 bytes, so it
 * can be uploaded as-is.
 */
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub ambient_color: [f32; 3],
    pub ambient_strength: f32,
    pub diffuse_color: [f32; 3],
    pub shininess: f32,
    pub specular_color: [f32; 3],
    pub use_texture: u32,
    pub uv_scale: [f32; 2],
    pub texture_unit: i32,
    _padding: u32,
}

impl ObjectUniform {
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    pub fn model(&self) -> Matrix4<f32> {
        self.model.into()
    }

    pub fn uses_texture(&self) -> bool {
        self.use_texture != 0
    }
}

#[derive(Debug, Default)]
pub struct FrameRecorder {
    uniforms: HashMap<String, UniformValue>,
    commands: Vec<Command>,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the command log but keep uniform values, like a shader program
    /// keeps them between frames.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn uniform(&self, name: &str) -> Option<&UniformValue> {
        self.uniforms.get(name)
    }

    /// All draws in issue order.
    pub fn draws(&self) -> impl Iterator<Item = (Draw, &ObjectUniform)> {
        self.commands.iter().filter_map(|command| match command {
            Command::Draw { draw, object } => Some((*draw, object)),
            _ => None,
        })
    }

    /// How often `shape` was loaded.
    pub fn loads(&self, shape: Shape) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, Command::LoadMesh(s) if *s == shape))
            .count()
    }

    fn record(&mut self, name: &str, value: UniformValue) {
        self.uniforms.insert(name.to_string(), value);
        self.commands.push(Command::Uniform {
            name: name.to_string(),
            value,
        });
    }

    fn vec3(&self, name: &str) -> [f32; 3] {
        match self.uniforms.get(name) {
            Some(UniformValue::Vec3(v)) => (*v).into(),
            _ => [0.0; 3],
        }
    }

    fn float(&self, name: &str) -> f32 {
        match self.uniforms.get(name) {
            Some(UniformValue::Float(f)) => *f,
            _ => 0.0,
        }
    }

    fn snapshot(&self) -> ObjectUniform {
        let model = match self.uniforms.get(names::MODEL) {
            Some(UniformValue::Mat4(m)) => *m,
            _ => Matrix4::identity(),
        };
        let color = match self.uniforms.get(names::OBJECT_COLOR) {
            Some(UniformValue::Vec4(c)) => (*c).into(),
            _ => [1.0; 4],
        };
        let use_texture = match self.uniforms.get(names::USE_TEXTURE) {
            Some(UniformValue::Bool(b)) => *b,
            Some(UniformValue::Int(i)) => *i != 0,
            _ => false,
        };
        let texture_unit = match self.uniforms.get(names::OBJECT_TEXTURE) {
            Some(UniformValue::Sampler(unit)) => *unit,
            _ => NO_TEXTURE_UNIT,
        };
        let uv_scale = match self.uniforms.get(names::UV_SCALE) {
            Some(UniformValue::Vec2(uv)) => (*uv).into(),
            _ => [1.0, 1.0],
        };
        ObjectUniform {
            model: model.into(),
            color,
            ambient_color: self.vec3(names::MATERIAL_AMBIENT_COLOR),
            ambient_strength: self.float(names::MATERIAL_AMBIENT_STRENGTH),
            diffuse_color: self.vec3(names::MATERIAL_DIFFUSE_COLOR),
            shininess: self.float(names::MATERIAL_SHININESS),
            specular_color: self.vec3(names::MATERIAL_SPECULAR_COLOR),
            use_texture: use_texture as u32,
            uv_scale,
            texture_unit,
            _padding: 0,
        }
    }

    fn push_draw(&mut self, draw: Draw) {
        let object = self.snapshot();
        log::trace!("draw {:?} with texture unit {}", draw, object.texture_unit);
        self.commands.push(Command::Draw { draw, object });
    }
}

impl ShaderUniforms for FrameRecorder {
    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>) {
        self.record(name, UniformValue::Mat4(value));
    }

    fn set_vec2(&mut self, name: &str, value: Vector2<f32>) {
        self.record(name, UniformValue::Vec2(value));
    }

    fn set_vec3(&mut self, name: &str, value: Vector3<f32>) {
        self.record(name, UniformValue::Vec3(value));
    }

    fn set_vec4(&mut self, name: &str, value: Vector4<f32>) {
        self.record(name, UniformValue::Vec4(value));
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.record(name, UniformValue::Float(value));
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.record(name, UniformValue::Bool(value));
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.record(name, UniformValue::Int(value));
    }

    fn set_sampler(&mut self, name: &str, unit: i32) {
        self.record(name, UniformValue::Sampler(unit));
    }
}

impl MeshLibrary for FrameRecorder {
    fn load_mesh(&mut self, shape: Shape) {
        self.commands.push(Command::LoadMesh(shape));
    }

    fn draw_mesh(&mut self, shape: Shape) {
        self.push_draw(Draw::Mesh(shape));
    }

    fn draw_box_side(&mut self, side: BoxSide) {
        self.push_draw(Draw::BoxSide(side));
    }
}
