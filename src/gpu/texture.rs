//! GPU textures backed by wgpu.
//!
//! [`GpuTextures`] implements [`TextureDevice`]: every upload becomes an sRGB
//! RGBA8 2D texture with a full mip chain, a repeating sampler and linear
//! filtering. Binding stores the handle in a positional unit table that a
//! render pipeline reads when it builds its bind group.

use std::collections::HashMap;

use image::{RgbaImage, imageops::FilterType};

use crate::backend::{TextureDevice, TextureHandle};

use super::context::GpuContext;

/// A GPU texture with its view and sampler.
#[derive(Clone, Debug)]
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl GpuTexture {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

    /// Upload `img` with every mip level down to 1x1.
    ///
    /// # Arguments
    ///
    /// * `img` is the RGBA8 image, already flipped so that row 0 is the bottom
    /// * `label` is used as a debug label for the GPU resource
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        img: &RgbaImage,
        label: Option<&str>,
    ) -> Self {
        let levels = mip_chain(img);
        let size = wgpu::Extent3d {
            width: img.width().max(1),
            height: img.height().max(1),
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
            size,
            mip_level_count: levels.len() as u32,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (mip_level, level) in levels.iter().enumerate() {
            let (width, height) = level.dimensions();
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    aspect: wgpu::TextureAspect::All,
                    texture: &texture,
                    mip_level: mip_level as u32,
                    origin: wgpu::Origin3d::ZERO,
                },
                level.as_raw(),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * width),
                    rows_per_image: Some(height),
                },
                wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label,
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Linear,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }
}

/// `img` followed by successively halved copies down to 1x1.
///
/// wgpu has no mipmap generation of its own, so the levels are filtered on the
/// CPU before upload.
pub fn mip_chain(img: &RgbaImage) -> Vec<RgbaImage> {
    let mut levels = vec![img.clone()];
    let (mut width, mut height) = img.dimensions();
    while width > 1 || height > 1 {
        width = (width / 2).max(1);
        height = (height / 2).max(1);
        let prev = levels.last().unwrap_or(img);
        let next = image::imageops::resize(prev, width, height, FilterType::Triangle);
        levels.push(next);
    }
    levels
}

/// Texture storage on a wgpu device.
#[derive(Debug)]
pub struct GpuTextures {
    device: wgpu::Device,
    queue: wgpu::Queue,
    textures: HashMap<TextureHandle, GpuTexture>,
    units: Vec<Option<TextureHandle>>,
    next_id: u32,
}

impl GpuTextures {
    pub fn new(ctx: &GpuContext) -> Self {
        Self {
            device: ctx.device.clone(),
            queue: ctx.queue.clone(),
            textures: HashMap::new(),
            units: vec![None; ctx.max_texture_units()],
            next_id: 0,
        }
    }

    /// The texture currently bound to `unit`, if any.
    pub fn bound(&self, unit: usize) -> Option<&GpuTexture> {
        let handle = self.units.get(unit).copied().flatten()?;
        self.textures.get(&handle)
    }

    pub fn get(&self, handle: TextureHandle) -> Option<&GpuTexture> {
        self.textures.get(&handle)
    }

    /// Number of live textures.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl TextureDevice for GpuTextures {
    fn upload(&mut self, label: &str, image: &RgbaImage) -> TextureHandle {
        let texture = GpuTexture::from_image(&self.device, &self.queue, image, Some(label));
        self.next_id += 1;
        let handle = TextureHandle(self.next_id);
        self.textures.insert(handle, texture);
        handle
    }

    fn bind(&mut self, unit: u32, handle: TextureHandle) {
        match self.units.get_mut(unit as usize) {
            Some(slot) => *slot = Some(handle),
            None => log::warn!(
                "texture unit {unit} is out of range ({} units)",
                self.units.len()
            ),
        }
    }

    fn release(&mut self, handle: TextureHandle) {
        if let Some(texture) = self.textures.remove(&handle) {
            texture.texture.destroy();
        }
        for slot in self.units.iter_mut().filter(|slot| **slot == Some(handle)) {
            *slot = None;
        }
    }

    fn max_texture_units(&self) -> usize {
        self.units.len()
    }
}
