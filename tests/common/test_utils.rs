use std::path::Path;

use image::{GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};
use tabletop_scene::backend::{TextureDevice, TextureHandle};

/// A texture device that only counts what happens to it.
#[derive(Debug, Default)]
pub struct CountingDevice {
    next: u32,
    pub uploads: Vec<String>,
    pub binds: Vec<(u32, TextureHandle)>,
    pub releases: Vec<TextureHandle>,
}

impl CountingDevice {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TextureDevice for CountingDevice {
    fn upload(&mut self, label: &str, _: &RgbaImage) -> TextureHandle {
        self.uploads.push(label.to_string());
        self.next += 1;
        TextureHandle(self.next)
    }

    fn bind(&mut self, unit: u32, handle: TextureHandle) {
        self.binds.push((unit, handle));
    }

    fn release(&mut self, handle: TextureHandle) {
        self.releases.push(handle);
    }

    fn max_texture_units(&self) -> usize {
        16
    }
}

/// Write a small placeholder for every texture file of the tabletop scene.
pub fn write_tabletop_textures(dir: &Path) {
    for source in tabletop_scene::scene::tabletop::textures() {
        let path = dir.join(&source.file);
        let is_jpeg = path.extension().is_some_and(|ext| ext == "jpg");
        if is_jpeg {
            RgbImage::from_pixel(4, 4, Rgb([120, 80, 40])).save(&path).unwrap();
        } else {
            RgbaImage::from_pixel(4, 4, Rgba([200, 200, 200, 255]))
                .save(&path)
                .unwrap();
        }
    }
}

/// Overwrite `file` in `dir` with a single-channel image.
pub fn write_grayscale(dir: &Path, file: &str) {
    GrayImage::from_pixel(2, 2, Luma([128]))
        .save(dir.join(file))
        .unwrap();
}
