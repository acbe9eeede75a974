//! Tagged texture registry.
//!
//! This module provides [`TextureRegistry`], which decodes image files, uploads
//! them through a [`TextureDevice`] and remembers each texture under a string
//! tag. Registration order is significant: entry *i* is bound to texture unit
//! *i* by [`TextureRegistry::bind_all`], so the slot of a tag doubles as the
//! sampler unit the shader reads from.

use std::path::{Path, PathBuf};

use image::{ImageError, ImageReader, RgbaImage};
use thiserror::Error;

use crate::backend::{TextureDevice, TextureHandle};

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("could not load image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
    #[error("image {path} has {channels} channels, only 3 or 4 are supported")]
    UnsupportedChannels { path: PathBuf, channels: u8 },
    #[error("all {capacity} texture units are in use, cannot register `{tag}`")]
    SlotsExhausted { tag: String, capacity: usize },
}

/// A decoded image ready for upload.
///
/// `pixels` is always RGBA8 and already flipped vertically so that row 0 is
/// the bottom of the picture; `channels` is the channel count of the file.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub channels: u8,
    pub pixels: RgbaImage,
}

/// Decode the image at `path`.
///
/// Fails for unreadable or corrupt files and for images with anything other
/// than 3 (RGB) or 4 (RGBA) channels.
pub fn decode_image(path: &Path) -> Result<DecodedImage, TextureError> {
    let decode_err = |source: ImageError| TextureError::Decode {
        path: path.to_path_buf(),
        source,
    };
    let img = ImageReader::open(path)
        .map_err(|e| decode_err(ImageError::IoError(e)))?
        .with_guessed_format()
        .map_err(|e| decode_err(ImageError::IoError(e)))?
        .decode()
        .map_err(decode_err)?;

    let channels = img.color().channel_count();
    if channels != 3 && channels != 4 {
        return Err(TextureError::UnsupportedChannels {
            path: path.to_path_buf(),
            channels,
        });
    }

    Ok(DecodedImage {
        channels,
        pixels: img.flipv().to_rgba8(),
    })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureEntry {
    pub tag: String,
    pub handle: TextureHandle,
}

/// Textures indexed by tag, in registration order.
///
/// Tags are not required to be unique; lookups return the first match.
#[derive(Debug, Default)]
pub struct TextureRegistry {
    entries: Vec<TextureEntry>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `path`, upload it and register it under `tag` at the next free
    /// slot. Returns that slot.
    ///
    /// Nothing is registered when this fails.
    pub fn load<D: TextureDevice + ?Sized>(
        &mut self,
        device: &mut D,
        path: impl AsRef<Path>,
        tag: &str,
    ) -> Result<usize, TextureError> {
        let path = path.as_ref();
        let capacity = device.max_texture_units();
        if self.entries.len() >= capacity {
            return Err(TextureError::SlotsExhausted {
                tag: tag.to_string(),
                capacity,
            });
        }

        let image = decode_image(path)?;
        log::info!(
            "Loaded image {}, width: {}, height: {}, channels: {}",
            path.display(),
            image.pixels.width(),
            image.pixels.height(),
            image.channels
        );

        let handle = device.upload(tag, &image.pixels);
        let slot = self.entries.len();
        self.entries.push(TextureEntry {
            tag: tag.to_string(),
            handle,
        });
        Ok(slot)
    }

    /// Bind entry *i* to texture unit *i* for every entry.
    ///
    /// Must run after the last `load` and before any draw samples a texture.
    pub fn bind_all<D: TextureDevice + ?Sized>(&self, device: &mut D) {
        for (unit, entry) in self.entries.iter().enumerate() {
            device.bind(unit as u32, entry.handle);
        }
    }

    pub fn find_handle(&self, tag: &str) -> Option<TextureHandle> {
        self.entries
            .iter()
            .find(|entry| entry.tag == tag)
            .map(|entry| entry.handle)
    }

    pub fn find_slot(&self, tag: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.tag == tag)
    }

    /// Release every texture on the device and empty the registry.
    pub fn release_all<D: TextureDevice + ?Sized>(&mut self, device: &mut D) {
        for entry in self.entries.drain(..) {
            device.release(entry.handle);
        }
    }

    pub fn entries(&self) -> &[TextureEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage, Rgba};
    use tempfile::TempDir;

    #[derive(Default)]
    struct FakeDevice {
        next: u32,
        units: Vec<(u32, TextureHandle)>,
        released: Vec<TextureHandle>,
        uploaded: Vec<(String, u32, u32)>,
        capacity: Option<usize>,
    }

    impl TextureDevice for FakeDevice {
        fn upload(&mut self, label: &str, image: &RgbaImage) -> TextureHandle {
            self.uploaded
                .push((label.to_string(), image.width(), image.height()));
            self.next += 1;
            TextureHandle(self.next)
        }

        fn bind(&mut self, unit: u32, handle: TextureHandle) {
            self.units.push((unit, handle));
        }

        fn release(&mut self, handle: TextureHandle) {
            self.released.push(handle);
        }

        fn max_texture_units(&self) -> usize {
            self.capacity.unwrap_or(16)
        }
    }

    fn write_rgb(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        RgbImage::from_pixel(4, 2, Rgb([200, 100, 50])).save(&path).unwrap();
        path
    }

    #[test]
    fn load_registers_at_next_slot() {
        let dir = TempDir::new().unwrap();
        let table = write_rgb(&dir, "table.jpg");
        let wall = dir.path().join("wall.png");
        image::RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 4]))
            .save(&wall)
            .unwrap();

        let mut device = FakeDevice::default();
        let mut registry = TextureRegistry::new();
        assert_eq!(registry.load(&mut device, &table, "table").unwrap(), 0);
        assert_eq!(registry.load(&mut device, &wall, "wall").unwrap(), 1);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.find_slot("wall"), Some(1));
        assert_eq!(registry.find_slot("missing"), None);
        assert_eq!(registry.find_handle("table"), Some(TextureHandle(1)));
        assert_eq!(device.uploaded[0], ("table".to_string(), 4, 2));
    }

    #[test]
    fn grayscale_image_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gray.png");
        GrayImage::from_pixel(2, 2, Luma([7])).save(&path).unwrap();

        let mut device = FakeDevice::default();
        let mut registry = TextureRegistry::new();
        let err = registry.load(&mut device, &path, "gray").unwrap_err();

        assert!(matches!(
            err,
            TextureError::UnsupportedChannels { channels: 1, .. }
        ));
        assert!(registry.is_empty());
        assert!(device.uploaded.is_empty());
    }

    #[test]
    fn unreadable_file_is_a_decode_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.png");
        let corrupt = dir.path().join("corrupt.png");
        std::fs::write(&corrupt, b"definitely not a png").unwrap();

        let mut device = FakeDevice::default();
        let mut registry = TextureRegistry::new();
        assert!(matches!(
            registry.load(&mut device, &missing, "a"),
            Err(TextureError::Decode { .. })
        ));
        assert!(matches!(
            registry.load(&mut device, &corrupt, "b"),
            Err(TextureError::Decode { .. })
        ));
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn lookups_on_empty_registry_return_none() {
        let registry = TextureRegistry::new();
        assert_eq!(registry.find_slot("table"), None);
        assert_eq!(registry.find_handle("table"), None);
    }

    #[test]
    fn duplicate_tags_resolve_to_first_entry() {
        let dir = TempDir::new().unwrap();
        let path = write_rgb(&dir, "a.png");
        let mut device = FakeDevice::default();
        let mut registry = TextureRegistry::new();
        registry.load(&mut device, &path, "dup").unwrap();
        registry.load(&mut device, &path, "dup").unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.find_slot("dup"), Some(0));
        assert_eq!(registry.find_handle("dup"), Some(TextureHandle(1)));
    }

    #[test]
    fn load_fails_once_units_are_exhausted() {
        let dir = TempDir::new().unwrap();
        let path = write_rgb(&dir, "a.png");
        let mut device = FakeDevice {
            capacity: Some(2),
            ..Default::default()
        };
        let mut registry = TextureRegistry::new();
        registry.load(&mut device, &path, "one").unwrap();
        registry.load(&mut device, &path, "two").unwrap();

        let err = registry.load(&mut device, &path, "three").unwrap_err();
        assert!(matches!(err, TextureError::SlotsExhausted { capacity: 2, .. }));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn bind_all_uses_registration_order() {
        let dir = TempDir::new().unwrap();
        let path = write_rgb(&dir, "a.png");
        let mut device = FakeDevice::default();
        let mut registry = TextureRegistry::new();
        for tag in ["a", "b", "c"] {
            registry.load(&mut device, &path, tag).unwrap();
        }
        registry.bind_all(&mut device);

        assert_eq!(
            device.units,
            vec![
                (0, TextureHandle(1)),
                (1, TextureHandle(2)),
                (2, TextureHandle(3)),
            ]
        );
    }

    #[test]
    fn release_all_frees_handles_and_resets() {
        let dir = TempDir::new().unwrap();
        let path = write_rgb(&dir, "a.png");
        let mut device = FakeDevice::default();
        let mut registry = TextureRegistry::new();
        registry.load(&mut device, &path, "table").unwrap();
        registry.load(&mut device, &path, "wall").unwrap();

        registry.release_all(&mut device);

        assert_eq!(device.released, vec![TextureHandle(1), TextureHandle(2)]);
        assert!(registry.is_empty());
        assert_eq!(registry.find_slot("table"), None);
        assert_eq!(registry.load(&mut device, &path, "again").unwrap(), 0);
    }

    #[test]
    fn decoded_pixels_are_flipped_vertically() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stripes.png");
        let mut img = RgbImage::new(1, 2);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(0, 1, Rgb([0, 0, 255]));
        img.save(&path).unwrap();

        let decoded = decode_image(&path).unwrap();
        assert_eq!(decoded.channels, 3);
        assert_eq!(decoded.pixels.get_pixel(0, 0), &Rgba([0, 0, 255, 255]));
        assert_eq!(decoded.pixels.get_pixel(0, 1), &Rgba([255, 0, 0, 255]));
    }
}
