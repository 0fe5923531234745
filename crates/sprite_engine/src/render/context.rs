//! Batched draw core
//!
//! [`RenderContext`] is the stateful immediate-mode drawer. It owns the
//! graphics device, one shared unit-quad mesh, the built-in shader set, and
//! the dirty-tracking state that makes sequential draws cheap: a draw call
//! only rebinds the texture or shader when it differs from what is already
//! bound. Equality is GPU-handle identity.
//!
//! The context is an explicitly constructed value passed by `&mut` into
//! drawing call sites; there is no process-wide drawing state.

use crate::foundation::math::{Color, Mat4, Rectangle, Vec2, Vec3};
use crate::render::camera::Camera;
use crate::render::device::{GraphicsDevice, MeshId, ProgramId, TextureId};
use crate::render::shader::Shader;
use crate::render::texture::Texture;
use crate::render::RenderError;

const DEFAULT_VERT: &str = include_str!("shaders/default.vert");
const DEFAULT_FRAG: &str = include_str!("shaders/default.frag");
const SOLID_VERT: &str = include_str!("shaders/solid.vert");
const SOLID_FRAG: &str = include_str!("shaders/solid.frag");
const CIRCLE_FRAG: &str = include_str!("shaders/circle.frag");

// Shared unit quad: positions span 0..1, UVs flipped in Y so the top of the
// quad samples the top of (vertically pre-flipped) texture storage.
const QUAD_VERTICES: [f32; 20] = [
    // positions     // texture coords
    0.0, 0.0, 0.0, 0.0, 1.0, //
    1.0, 0.0, 0.0, 1.0, 1.0, //
    1.0, 1.0, 0.0, 1.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, 0.0, //
];
const QUAD_INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

/// Optional parameters for [`RenderContext::draw_texture`]
///
/// Replaces the usual pile of drawing overloads: construct with
/// `DrawTextureParams::default()` and override what you need.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawTextureParams {
    /// Pivot subtracted from the position before rotation/scale
    pub origin: Vec2,
    /// Per-axis scale factor
    pub scale: Vec2,
    /// Rotation around Z in degrees
    pub rotation: f32,
    /// Sub-rectangle of the texture to sample, in pixels from the top-left;
    /// `None` draws the whole texture
    pub source: Option<Rectangle>,
    /// Mirror horizontally
    pub flip_h: bool,
    /// Mirror vertically
    pub flip_v: bool,
    /// Layer depth written into the model translation's Z
    pub depth: f32,
}

impl Default for DrawTextureParams {
    fn default() -> Self {
        Self {
            origin: Vec2::zeros(),
            scale: Vec2::new(1.0, 1.0),
            rotation: 0.0,
            source: None,
            flip_h: false,
            flip_v: false,
            depth: 0.0,
        }
    }
}

/// Device plus the bind-minimization cache
///
/// Kept separate from the shaders so a draw can borrow the device state and
/// a context-owned shader at the same time.
struct DeviceState {
    device: Box<dyn GraphicsDevice>,
    current_texture: Option<TextureId>,
    current_shader: Option<ProgramId>,
}

impl DeviceState {
    fn bind_texture(&mut self, texture: TextureId) {
        if self.current_texture != Some(texture) {
            self.device.bind_texture(texture);
            self.current_texture = Some(texture);
        }
    }

    fn bind_shader(&mut self, shader: ProgramId) {
        if self.current_shader != Some(shader) {
            self.device.bind_program(shader);
            self.current_shader = Some(shader);
        }
    }
}

/// Stateful immediate-mode drawer over a [`GraphicsDevice`]
pub struct RenderContext {
    state: DeviceState,
    quad: MeshId,
    default_shader: Shader,
    solid_shader: Shader,
    circle_shader: Shader,
    window_width: u32,
    window_height: u32,
}

impl RenderContext {
    /// Build a context over a device: compiles the built-in shader set and
    /// uploads and binds the shared quad mesh (bound once, reused by every
    /// draw)
    ///
    /// `window_width`/`window_height` seed the tracked window size used to
    /// restore the viewport after offscreen rendering; keep it current via
    /// [`RenderContext::set_window_size`].
    pub fn new(
        mut device: Box<dyn GraphicsDevice>,
        window_width: u32,
        window_height: u32,
    ) -> Result<Self, RenderError> {
        let default_shader = Shader::from_sources(device.as_mut(), DEFAULT_VERT, DEFAULT_FRAG)?;
        let solid_shader = Shader::from_sources(device.as_mut(), SOLID_VERT, SOLID_FRAG)?;
        let circle_shader = Shader::from_sources(device.as_mut(), SOLID_VERT, CIRCLE_FRAG)?;

        let quad = device.create_mesh(&QUAD_VERTICES, &QUAD_INDICES)?;
        device.bind_mesh(quad);
        device.set_viewport(0, 0, window_width, window_height);

        log::info!("render context initialized ({window_width}x{window_height})");
        Ok(Self {
            state: DeviceState { device, current_texture: None, current_shader: None },
            quad,
            default_shader,
            solid_shader,
            circle_shader,
            window_width,
            window_height,
        })
    }

    /// Direct access to the device, for resource construction
    pub fn device_mut(&mut self) -> &mut dyn GraphicsDevice {
        self.state.device.as_mut()
    }

    /// Track the live window size; offscreen targets restore the viewport
    /// to this on unbind
    pub fn set_window_size(&mut self, width: u32, height: u32) {
        self.window_width = width;
        self.window_height = height;
    }

    /// The tracked window size in pixels
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }

    /// Clear the color and depth buffers of the current draw destination
    pub fn clear_background(&mut self, color: Color) {
        self.state.device.clear(color);
    }

    /// Draw a texture (or a sub-rectangle of it) with the default shader
    pub fn draw_texture(
        &mut self,
        camera: &Camera,
        texture: &Texture,
        position: Vec2,
        params: &DrawTextureParams,
    ) {
        Self::draw_textured_quad(
            &mut self.state,
            &mut self.default_shader,
            camera,
            texture,
            position,
            params,
        );
    }

    /// Draw a texture through a caller-supplied shader
    ///
    /// The shader must declare the uniform contract documented on
    /// [`Shader`]; missing uniforms are skipped.
    pub fn draw_texture_with(
        &mut self,
        camera: &Camera,
        texture: &Texture,
        position: Vec2,
        params: &DrawTextureParams,
        shader: &mut Shader,
    ) {
        Self::draw_textured_quad(
            &mut self.state,
            shader,
            camera,
            texture,
            position,
            params,
        );
    }

    /// Draw an axis-aligned filled rectangle
    pub fn draw_rectangle(&mut self, camera: &Camera, rect: Rectangle, color: Color, depth: f32) {
        let model = Mat4::new_translation(&Vec3::new(rect.x, rect.y, depth))
            * Mat4::new_nonuniform_scaling(&Vec3::new(rect.width, rect.height, 1.0));
        Self::draw_solid_quad(&mut self.state, &mut self.solid_shader, camera, model, color);
    }

    /// Draw a filled circle; the cutout happens in the fragment stage
    pub fn draw_circle(&mut self, camera: &Camera, center: Vec2, radius: f32, color: Color, depth: f32) {
        let diameter = radius * 2.0;
        let model =
            Mat4::new_translation(&Vec3::new(center.x - radius, center.y - radius, depth))
                * Mat4::new_nonuniform_scaling(&Vec3::new(diameter, diameter, 1.0));
        Self::draw_solid_quad(&mut self.state, &mut self.circle_shader, camera, model, color);
    }

    fn draw_textured_quad(
        state: &mut DeviceState,
        shader: &mut Shader,
        camera: &Camera,
        texture: &Texture,
        position: Vec2,
        params: &DrawTextureParams,
    ) {
        state.bind_texture(texture.id());
        state.bind_shader(shader.id());

        let device = state.device.as_mut();
        shader.set_mat4(device, "projection", &camera.projection_matrix());
        shader.set_mat4(device, "view", &camera.view_matrix());

        let (uv0, uv1, uv_size) = uv_bounds(texture, params);
        shader.set_vec2(device, "uv0", uv0);
        shader.set_vec2(device, "uv1", uv1);
        shader.set_vec2(device, "uvSize", uv_size);
        shader.set_vec4(device, "color", Color::WHITE.to_vec4());

        let anchored = position - params.origin;
        let model = Mat4::new_translation(&Vec3::new(anchored.x, anchored.y, params.depth))
            * Mat4::new_rotation(Vec3::new(0.0, 0.0, params.rotation.to_radians()))
            * Mat4::new_nonuniform_scaling(&Vec3::new(params.scale.x, params.scale.y, 1.0));
        shader.set_mat4(device, "model", &model);

        device.draw_indexed(QUAD_INDICES.len() as u32);
    }

    fn draw_solid_quad(
        state: &mut DeviceState,
        shader: &mut Shader,
        camera: &Camera,
        model: Mat4,
        color: Color,
    ) {
        state.bind_shader(shader.id());

        let device = state.device.as_mut();
        shader.set_mat4(device, "projection", &camera.projection_matrix());
        shader.set_mat4(device, "view", &camera.view_matrix());
        shader.set_mat4(device, "model", &model);
        shader.set_vec4(device, "color", color.to_vec4());

        device.draw_indexed(QUAD_INDICES.len() as u32);
    }

    pub(crate) fn bind_offscreen(
        &mut self,
        framebuffer: crate::render::device::FramebufferId,
        width: u32,
        height: u32,
    ) {
        self.state.device.bind_framebuffer(Some(framebuffer));
        self.state.device.set_viewport(0, 0, width, height);
    }

    pub(crate) fn bind_default_framebuffer(&mut self) {
        self.state.device.bind_framebuffer(None);
        self.state
            .device
            .set_viewport(0, 0, self.window_width, self.window_height);
    }

    /// Release the context's GPU resources (shaders, then the quad mesh)
    /// and hand the device back for the host's remaining teardown
    pub fn destroy(self) -> Box<dyn GraphicsDevice> {
        let Self { mut state, quad, default_shader, solid_shader, circle_shader, .. } = self;
        default_shader.destroy(state.device.as_mut());
        solid_shader.destroy(state.device.as_mut());
        circle_shader.destroy(state.device.as_mut());
        state.device.delete_mesh(quad);
        state.device
    }
}

/// UV bounds for a draw: min corner, max corner, and source size in pixels
///
/// Texture storage is vertically flipped at load time, so a source
/// rectangle given in top-left pixel coordinates maps to an inverted V
/// range. Flip flags mirror the sampled region by swapping the bound for
/// that axis.
fn uv_bounds(texture: &Texture, params: &DrawTextureParams) -> (Vec2, Vec2, Vec2) {
    let (mut uv0, mut uv1, size) = match params.source {
        Some(src) => {
            let tex_w = texture.width() as f32;
            let tex_h = texture.height() as f32;
            (
                Vec2::new(src.x / tex_w, 1.0 - (src.y + src.height) / tex_h),
                Vec2::new((src.x + src.width) / tex_w, 1.0 - src.y / tex_h),
                Vec2::new(src.width, src.height),
            )
        }
        None => (
            Vec2::zeros(),
            Vec2::new(1.0, 1.0),
            Vec2::new(texture.width() as f32, texture.height() as f32),
        ),
    };

    if params.flip_h {
        std::mem::swap(&mut uv0.x, &mut uv1.x);
    }
    if params.flip_v {
        std::mem::swap(&mut uv0.y, &mut uv1.y);
    }
    (uv0, uv1, size)
}
