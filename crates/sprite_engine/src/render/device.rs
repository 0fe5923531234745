//! Graphics device abstraction
//!
//! This trait is the single seam between the engine core and the
//! device-level graphics API. Backends (a GL implementation in the host, a
//! recording stub in tests) implement it; the core holds only opaque
//! copyable handles and never observes driver state directly.
//!
//! All handles are created, bound, and destroyed on the thread that owns
//! the rendering context; the trait is deliberately not `Send`/`Sync`.

use crate::foundation::math::{Color, Mat4, Vec2, Vec3, Vec4};
use crate::render::RenderError;

/// Handle to a linked shader program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId(pub u64);

/// Handle to a GPU texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

/// Handle to an uploaded vertex/index mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(pub u64);

/// Handle to a framebuffer with its attachments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FramebufferId(pub u64);

/// Resolved uniform location within a program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub i32);

/// A uniform value ready for upload
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    /// Boolean (uploaded as an integer)
    Bool(bool),
    /// 32-bit integer
    Int(i32),
    /// 32-bit float
    Float(f32),
    /// 2-component float vector
    Vec2(Vec2),
    /// 3-component float vector
    Vec3(Vec3),
    /// 4-component float vector
    Vec4(Vec4),
    /// 4x4 float matrix, column-major
    Mat4(Mat4),
}

/// Texture storage description
///
/// Pixel data is always tightly packed RGBA8. Sampling state matches the
/// engine's pixel-art defaults: mirrored-repeat wrap, nearest filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureDesc {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Whether the backend should generate mipmaps after upload
    pub generate_mipmaps: bool,
}

/// Device-level rendering backend
///
/// Implementations execute the commands; they do not decide when to issue
/// them. Redundant-bind elimination is the caller's job
/// ([`crate::render::RenderContext`]), so backends may bind unconditionally.
pub trait GraphicsDevice {
    /// Compile and link a program from vertex and fragment GLSL sources
    ///
    /// Compile and link failures must be reported, not swallowed; the
    /// returned error carries the compiler/linker log.
    fn create_program(
        &mut self,
        vertex_src: &str,
        fragment_src: &str,
    ) -> Result<ProgramId, RenderError>;

    /// Release a program; the handle must not be used afterwards
    fn delete_program(&mut self, program: ProgramId);

    /// Make a program current for subsequent draws and uniform writes
    fn bind_program(&mut self, program: ProgramId);

    /// Resolve a uniform location by name, or `None` if the program does
    /// not declare it (or the compiler optimized it away)
    fn uniform_location(&mut self, program: ProgramId, name: &str) -> Option<UniformLocation>;

    /// Write a uniform value to the currently bound program
    fn set_uniform(&mut self, location: UniformLocation, value: UniformValue);

    /// Create a texture; `pixels` is tightly packed RGBA8, or `None` to
    /// allocate uninitialized storage (render-target backing)
    fn create_texture(
        &mut self,
        desc: &TextureDesc,
        pixels: Option<&[u8]>,
    ) -> Result<TextureId, RenderError>;

    /// Release a texture; the handle must not be used afterwards
    fn delete_texture(&mut self, texture: TextureId);

    /// Bind a texture for subsequent textured draws
    fn bind_texture(&mut self, texture: TextureId);

    /// Upload an indexed mesh; vertices are interleaved
    /// `[x, y, z, u, v]` floats
    fn create_mesh(&mut self, vertices: &[f32], indices: &[u32]) -> Result<MeshId, RenderError>;

    /// Release a mesh
    fn delete_mesh(&mut self, mesh: MeshId);

    /// Bind a mesh's vertex and index buffers
    fn bind_mesh(&mut self, mesh: MeshId);

    /// Issue one indexed draw of `index_count` indices from the bound mesh
    fn draw_indexed(&mut self, index_count: u32);

    /// Build a framebuffer with `color` as its color attachment and a
    /// combined depth/stencil renderbuffer sized `width` x `height`
    fn create_framebuffer(
        &mut self,
        width: u32,
        height: u32,
        color: TextureId,
    ) -> Result<FramebufferId, RenderError>;

    /// Release a framebuffer and its depth/stencil renderbuffer
    /// (the color attachment is owned and released separately)
    fn delete_framebuffer(&mut self, framebuffer: FramebufferId);

    /// Bind a framebuffer as the draw destination; `None` binds the
    /// default (window) framebuffer
    fn bind_framebuffer(&mut self, framebuffer: Option<FramebufferId>);

    /// Set the viewport rectangle in pixels
    fn set_viewport(&mut self, x: i32, y: i32, width: u32, height: u32);

    /// Clear the color and depth buffers of the bound framebuffer
    fn clear(&mut self, color: Color);
}
