//! GPU texture handle

use std::path::Path;

use crate::assets::AssetError;
use crate::render::device::{GraphicsDevice, TextureDesc, TextureId};
use crate::render::RenderError;

/// A GPU texture with its dimensions and channel count
///
/// Equality is handle identity; clones share the handle. The GPU texture is
/// released by [`Texture::destroy`], which must run exactly once across all
/// clones.
#[derive(Debug, Clone)]
pub struct Texture {
    id: TextureId,
    width: u32,
    height: u32,
    channels: u8,
}

impl Texture {
    /// Decode an image file and upload it
    ///
    /// The image is flipped vertically on load so that UV (0,0) addresses
    /// the bottom-left of the source art, uploaded as RGBA8 with mipmaps.
    pub fn from_file(
        device: &mut dyn GraphicsDevice,
        path: impl AsRef<Path>,
    ) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let decoded = image::open(path).map_err(|source| AssetError::ImageDecode {
            path: path.to_path_buf(),
            source,
        })?;
        let channels = decoded.color().channel_count();
        let rgba = decoded.flipv().to_rgba8();
        let (width, height) = rgba.dimensions();

        let id = device
            .create_texture(
                &TextureDesc { width, height, generate_mipmaps: true },
                Some(rgba.as_raw()),
            )
            .map_err(|source| AssetError::TextureUpload { path: path.to_path_buf(), source })?;

        log::debug!("loaded texture {path:?} ({width}x{height}, {channels} channels)");
        Ok(Self { id, width, height, channels })
    }

    /// Wrap a raw RGBA8 pixel buffer, or allocate uninitialized storage
    /// when `pixels` is `None` (render-target backing)
    pub fn from_pixels(
        device: &mut dyn GraphicsDevice,
        width: u32,
        height: u32,
        pixels: Option<&[u8]>,
    ) -> Result<Self, RenderError> {
        let id = device.create_texture(
            &TextureDesc { width, height, generate_mipmaps: false },
            pixels,
        )?;
        Ok(Self { id, width, height, channels: 4 })
    }

    /// The underlying texture handle
    pub fn id(&self) -> TextureId {
        self.id
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channel count of the source image (storage is always RGBA8)
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Release the GPU texture; the handle must not be used afterwards
    pub fn destroy(self, device: &mut dyn GraphicsDevice) {
        device.delete_texture(self.id);
    }
}

impl PartialEq for Texture {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::test_device::RecordingDevice;

    #[test]
    fn from_pixels_reports_dimensions() {
        let mut device = RecordingDevice::new();
        let texture = Texture::from_pixels(&mut device, 64, 32, None).unwrap();
        assert_eq!(texture.width(), 64);
        assert_eq!(texture.height(), 32);
    }

    #[test]
    fn equality_is_handle_identity() {
        let mut device = RecordingDevice::new();
        let a = Texture::from_pixels(&mut device, 8, 8, None).unwrap();
        let b = Texture::from_pixels(&mut device, 8, 8, None).unwrap();
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn missing_file_fails_with_path() {
        let mut device = RecordingDevice::new();
        let result = Texture::from_file(&mut device, "no/such/image.png");
        match result {
            Err(AssetError::ImageDecode { path, .. }) => {
                assert!(path.ends_with("image.png"));
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }
}
