//! Asset loading and caching
//!
//! [`AssetManager`] is a path-keyed cache for textures and shaders. Entries
//! are created on first request and live until [`AssetManager::clean_all`]
//! releases them in bulk. It is a plain owned value, not a global; callers
//! pass it alongside the graphics device.
//!
//! Path convention: textures resolve under `{root}/sprites/`, shaders under
//! `{root}/shaders/` (a shader name loads `{name}.vert` + `{name}.frag`).
//! Tool-export animation descriptions bypass the sprite root and load their
//! texture relative to the description file via
//! [`AssetManager::load_texture_at`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::render::device::GraphicsDevice;
use crate::render::shader::Shader;
use crate::render::texture::Texture;
use crate::render::RenderError;

/// Asset loading errors; every variant names the offending path
#[derive(Debug, Error)]
pub enum AssetError {
    /// Image file missing or not decodable
    #[error("failed to decode image {path:?}: {source}")]
    ImageDecode {
        /// Path of the image file
        path: PathBuf,
        /// Decoder error
        #[source]
        source: image::ImageError,
    },

    /// Decoded pixels could not be uploaded to the device
    #[error("failed to upload texture {path:?}: {source}")]
    TextureUpload {
        /// Path of the image file
        path: PathBuf,
        /// Device error
        #[source]
        source: RenderError,
    },

    /// Shader source file missing or unreadable
    #[error("failed to read shader source {path:?}: {source}")]
    ShaderSource {
        /// Path of the shader source file
        path: PathBuf,
        /// IO error
        #[source]
        source: std::io::Error,
    },

    /// Shader sources read but compilation or linking failed
    #[error("failed to build shader {name:?}: {source}")]
    ShaderBuild {
        /// Shader name under the shader root
        name: String,
        /// Compile/link error with the driver log
        #[source]
        source: RenderError,
    },
}

/// Path-keyed cache for textures and shaders
pub struct AssetManager {
    root: PathBuf,
    textures: HashMap<PathBuf, Texture>,
    shaders: HashMap<String, Shader>,
}

impl AssetManager {
    /// Create a manager resolving under the given asset root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            textures: HashMap::new(),
            shaders: HashMap::new(),
        }
    }

    /// The configured asset root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory textures are resolved under
    pub fn sprite_root(&self) -> PathBuf {
        self.root.join("sprites")
    }

    /// Load (or fetch the cached) texture named under `{root}/sprites/`
    pub fn load_texture(
        &mut self,
        device: &mut dyn GraphicsDevice,
        name: &str,
    ) -> Result<&Texture, AssetError> {
        let path = self.sprite_root().join(name);
        self.load_texture_at(device, &path)
    }

    /// Load (or fetch the cached) texture at an explicit path
    ///
    /// Used by tool-export animation descriptions, whose texture reference
    /// is relative to the description file rather than the sprite root.
    pub fn load_texture_at(
        &mut self,
        device: &mut dyn GraphicsDevice,
        path: &Path,
    ) -> Result<&Texture, AssetError> {
        if !self.textures.contains_key(path) {
            let texture = Texture::from_file(device, path)?;
            self.textures.insert(path.to_path_buf(), texture);
        }
        Ok(&self.textures[path])
    }

    /// Load (or fetch the cached) shader named under `{root}/shaders/`
    ///
    /// Reads `{name}.vert` and `{name}.frag` and compiles them through the
    /// device. Returned mutably because uniform writes populate the
    /// shader's location cache.
    pub fn load_shader(
        &mut self,
        device: &mut dyn GraphicsDevice,
        name: &str,
    ) -> Result<&mut Shader, AssetError> {
        if !self.shaders.contains_key(name) {
            let base = self.root.join("shaders");
            let vert_path = base.join(format!("{name}.vert"));
            let frag_path = base.join(format!("{name}.frag"));

            let vert_src = std::fs::read_to_string(&vert_path)
                .map_err(|source| AssetError::ShaderSource { path: vert_path.clone(), source })?;
            let frag_src = std::fs::read_to_string(&frag_path)
                .map_err(|source| AssetError::ShaderSource { path: frag_path.clone(), source })?;

            let shader = Shader::from_sources(device, &vert_src, &frag_src)
                .map_err(|source| AssetError::ShaderBuild { name: name.to_string(), source })?;
            log::debug!("loaded shader {name:?}");
            self.shaders.insert(name.to_string(), shader);
        }
        Ok(self.shaders.get_mut(name).expect("just inserted"))
    }

    /// Fetch an already-loaded shader without touching the filesystem
    pub fn shader_mut(&mut self, name: &str) -> Option<&mut Shader> {
        self.shaders.get_mut(name)
    }

    /// Number of cached textures
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Release every cached texture and shader on the device and clear
    /// both caches
    pub fn clean_all(&mut self, device: &mut dyn GraphicsDevice) {
        for (_, shader) in self.shaders.drain() {
            shader.destroy(device);
        }
        for (_, texture) in self.textures.drain() {
            texture.destroy(device);
        }
    }
}

impl Default for AssetManager {
    fn default() -> Self {
        Self::new("assets")
    }
}
