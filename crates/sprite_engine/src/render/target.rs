//! Offscreen render target
//!
//! A fixed-size framebuffer with a color texture attachment and a combined
//! depth/stencil renderbuffer. Usable both as a draw destination and, via
//! its color attachment, as an ordinary drawable texture — the mechanism
//! for rendering at a fixed internal resolution and scaling up to the
//! window.

use crate::foundation::math::Vec2;
use crate::render::camera::Camera;
use crate::render::context::{DrawTextureParams, RenderContext};
use crate::render::device::{FramebufferId, GraphicsDevice};
use crate::render::texture::Texture;
use crate::render::RenderError;

/// Offscreen color + depth framebuffer
pub struct RenderTarget {
    framebuffer: FramebufferId,
    color: Texture,
    width: u32,
    height: u32,
}

impl RenderTarget {
    /// Allocate a target of the given fixed size
    ///
    /// The color attachment is created with uninitialized storage; the
    /// backend pairs it with a depth/stencil renderbuffer of the same size.
    pub fn new(
        device: &mut dyn GraphicsDevice,
        width: u32,
        height: u32,
    ) -> Result<Self, RenderError> {
        let color = Texture::from_pixels(device, width, height, None)?;
        let framebuffer = device.create_framebuffer(width, height, color.id())?;
        log::debug!("created {width}x{height} render target");
        Ok(Self { framebuffer, color, width, height })
    }

    /// Fixed width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Fixed height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The color attachment, drawable like any texture
    pub fn color_texture(&self) -> &Texture {
        &self.color
    }

    /// Redirect subsequent draws into this target and shrink the viewport
    /// to its fixed size; must be paired with [`RenderTarget::unbind`]
    pub fn bind(&self, ctx: &mut RenderContext) {
        ctx.bind_offscreen(self.framebuffer, self.width, self.height);
    }

    /// Restore the default framebuffer and the window-sized viewport
    /// tracked by the context
    pub fn unbind(&self, ctx: &mut RenderContext) {
        ctx.bind_default_framebuffer();
    }

    /// Draw this target's color attachment as a regular texture
    pub fn draw(
        &self,
        ctx: &mut RenderContext,
        camera: &Camera,
        position: Vec2,
        scale: Vec2,
        origin: Vec2,
    ) {
        let params = DrawTextureParams { origin, scale, ..Default::default() };
        ctx.draw_texture(camera, &self.color, position, &params);
    }

    /// Release the framebuffer, its renderbuffer, and the color attachment
    pub fn destroy(self, device: &mut dyn GraphicsDevice) {
        // Attachment outlives the container teardown call order
        device.delete_framebuffer(self.framebuffer);
        self.color.destroy(device);
    }
}
