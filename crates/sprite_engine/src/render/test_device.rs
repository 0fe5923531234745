//! Recording graphics device for tests
//!
//! Allocates handles from a counter and records every call so tests can
//! assert on bind counts and uploaded uniforms without a real GPU. The
//! recorded state is shared through `Rc<RefCell<..>>` so a test can keep
//! inspecting it after the device is boxed into a `RenderContext`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::foundation::math::Color;
use crate::render::device::{
    FramebufferId, GraphicsDevice, MeshId, ProgramId, TextureDesc, TextureId, UniformLocation,
    UniformValue,
};
use crate::render::RenderError;

/// One recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCall {
    BindProgram(ProgramId),
    BindTexture(TextureId),
    BindMesh(MeshId),
    BindFramebuffer(Option<FramebufferId>),
    SetViewport(i32, i32, u32, u32),
    SetUniform(UniformLocation, UniformValue),
    DrawIndexed(u32),
    Clear(Color),
}

#[derive(Default)]
pub struct RecordingState {
    next_handle: u64,
    next_location: i32,
    pub calls: Vec<DeviceCall>,
    /// Every location lookup, in order; the shader cache should make these
    /// happen at most once per (program, name)
    pub location_lookups: Vec<(ProgramId, String)>,
    locations: HashMap<(u64, String), UniformLocation>,
    location_names: HashMap<i32, String>,
    /// When set, `create_program` fails with this compile log
    pub fail_compile: Option<String>,
    pub deleted_programs: Vec<ProgramId>,
    pub deleted_textures: Vec<TextureId>,
    pub deleted_meshes: Vec<MeshId>,
    pub deleted_framebuffers: Vec<FramebufferId>,
}

impl RecordingState {
    fn next(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }

    pub fn count_program_binds(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DeviceCall::BindProgram(_)))
            .count()
    }

    pub fn count_texture_binds(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DeviceCall::BindTexture(_)))
            .count()
    }

    pub fn count_draws(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DeviceCall::DrawIndexed(_)))
            .count()
    }

    pub fn lookups_of(&self, name: &str) -> usize {
        self.location_lookups.iter().filter(|(_, n)| n == name).count()
    }

    /// All values written to the uniform with the given name, in order
    pub fn writes_of(&self, name: &str) -> Vec<UniformValue> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DeviceCall::SetUniform(loc, value)
                    if self.location_names.get(&loc.0).is_some_and(|n| n == name) =>
                {
                    Some(*value)
                }
                _ => None,
            })
            .collect()
    }

    pub fn count_uniform_writes(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DeviceCall::SetUniform(..)))
            .count()
    }

    /// Forget recorded calls, keeping allocated handles and locations
    pub fn reset_calls(&mut self) {
        self.calls.clear();
        self.location_lookups.clear();
    }
}

#[derive(Default)]
pub struct RecordingDevice {
    state: Rc<RefCell<RecordingState>>,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared view of the recorded state; stays valid after the device is
    /// boxed into a context
    pub fn recording(&self) -> Rc<RefCell<RecordingState>> {
        Rc::clone(&self.state)
    }
}

impl GraphicsDevice for RecordingDevice {
    fn create_program(
        &mut self,
        _vertex_src: &str,
        _fragment_src: &str,
    ) -> Result<ProgramId, RenderError> {
        let mut state = self.state.borrow_mut();
        if let Some(log) = state.fail_compile.clone() {
            return Err(RenderError::ShaderCompile { log });
        }
        let id = state.next();
        Ok(ProgramId(id))
    }

    fn delete_program(&mut self, program: ProgramId) {
        self.state.borrow_mut().deleted_programs.push(program);
    }

    fn bind_program(&mut self, program: ProgramId) {
        self.state.borrow_mut().calls.push(DeviceCall::BindProgram(program));
    }

    fn uniform_location(&mut self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        let mut state = self.state.borrow_mut();
        state.location_lookups.push((program, name.to_string()));
        if let Some(existing) = state.locations.get(&(program.0, name.to_string())) {
            return Some(*existing);
        }
        let location = UniformLocation(state.next_location);
        state.next_location += 1;
        state.locations.insert((program.0, name.to_string()), location);
        state.location_names.insert(location.0, name.to_string());
        Some(location)
    }

    fn set_uniform(&mut self, location: UniformLocation, value: UniformValue) {
        self.state.borrow_mut().calls.push(DeviceCall::SetUniform(location, value));
    }

    fn create_texture(
        &mut self,
        _desc: &TextureDesc,
        _pixels: Option<&[u8]>,
    ) -> Result<TextureId, RenderError> {
        let id = self.state.borrow_mut().next();
        Ok(TextureId(id))
    }

    fn delete_texture(&mut self, texture: TextureId) {
        self.state.borrow_mut().deleted_textures.push(texture);
    }

    fn bind_texture(&mut self, texture: TextureId) {
        self.state.borrow_mut().calls.push(DeviceCall::BindTexture(texture));
    }

    fn create_mesh(&mut self, _vertices: &[f32], _indices: &[u32]) -> Result<MeshId, RenderError> {
        let id = self.state.borrow_mut().next();
        Ok(MeshId(id))
    }

    fn delete_mesh(&mut self, mesh: MeshId) {
        self.state.borrow_mut().deleted_meshes.push(mesh);
    }

    fn bind_mesh(&mut self, mesh: MeshId) {
        self.state.borrow_mut().calls.push(DeviceCall::BindMesh(mesh));
    }

    fn draw_indexed(&mut self, index_count: u32) {
        self.state.borrow_mut().calls.push(DeviceCall::DrawIndexed(index_count));
    }

    fn create_framebuffer(
        &mut self,
        _width: u32,
        _height: u32,
        _color: TextureId,
    ) -> Result<FramebufferId, RenderError> {
        let id = self.state.borrow_mut().next();
        Ok(FramebufferId(id))
    }

    fn delete_framebuffer(&mut self, framebuffer: FramebufferId) {
        self.state.borrow_mut().deleted_framebuffers.push(framebuffer);
    }

    fn bind_framebuffer(&mut self, framebuffer: Option<FramebufferId>) {
        self.state.borrow_mut().calls.push(DeviceCall::BindFramebuffer(framebuffer));
    }

    fn set_viewport(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.state.borrow_mut().calls.push(DeviceCall::SetViewport(x, y, width, height));
    }

    fn clear(&mut self, color: Color) {
        self.state.borrow_mut().calls.push(DeviceCall::Clear(color));
    }
}
