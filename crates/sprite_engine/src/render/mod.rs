//! Rendering: device abstraction, GPU resource handles, camera, batched drawing
//!
//! The device-level graphics API lives behind the [`GraphicsDevice`] trait;
//! everything above it ([`Shader`], [`Texture`], [`RenderTarget`],
//! [`RenderContext`]) is host logic that issues commands through that
//! boundary and never touches the driver directly.

pub mod camera;
pub mod context;
pub mod device;
pub mod shader;
pub mod target;
pub mod texture;

#[cfg(test)]
pub(crate) mod test_device;

pub use camera::Camera;
pub use context::{DrawTextureParams, RenderContext};
pub use device::{
    FramebufferId, GraphicsDevice, MeshId, ProgramId, TextureDesc, TextureId, UniformLocation,
    UniformValue,
};
pub use shader::Shader;
pub use target::RenderTarget;
pub use texture::Texture;

use thiserror::Error;

/// Errors raised by rendering resource construction
///
/// Per-frame operations (draw calls, clears) never fail at the host level;
/// only construction of GPU resources surfaces errors.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A shader stage failed to compile
    #[error("Shader compilation failed: {log}")]
    ShaderCompile {
        /// Compiler output for the failing stage
        log: String,
    },

    /// Vertex and fragment stages compiled but the program failed to link
    #[error("Shader program link failed: {log}")]
    ShaderLink {
        /// Linker output
        log: String,
    },

    /// GPU resource creation failed
    #[error("Resource creation failed: {0}")]
    ResourceCreationFailed(String),

    /// Framebuffer could not be assembled into a complete render target
    #[error("Render target incomplete: {0}")]
    IncompleteRenderTarget(String),
}
