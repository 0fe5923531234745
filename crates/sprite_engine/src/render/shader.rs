//! Shader program handle with cached uniform lookups

use std::collections::HashMap;

use crate::foundation::math::{Mat4, Vec2, Vec3, Vec4};
use crate::render::device::{GraphicsDevice, ProgramId, UniformLocation, UniformValue};
use crate::render::RenderError;

/// A linked shader program and its uniform-location cache
///
/// Locations are resolved lazily on first use per name and cached, so
/// repeated uniform writes avoid a lookup. Misses (uniforms the program
/// does not declare) are cached too and the write is skipped.
///
/// Equality is program-handle identity; clones share the handle. The GPU
/// program is released by [`Shader::destroy`], which must run exactly once
/// across all clones.
///
/// Every shader bound through [`crate::render::RenderContext`] must declare
/// `projection`, `view` and `model` mat4 uniforms, and textured draws
/// additionally write `uv0`, `uv1`, `uvSize` (vec2) and `color` (vec4).
#[derive(Debug, Clone)]
pub struct Shader {
    program: ProgramId,
    locations: HashMap<String, Option<UniformLocation>>,
}

impl Shader {
    /// Compile and link a program from GLSL sources
    pub fn from_sources(
        device: &mut dyn GraphicsDevice,
        vertex_src: &str,
        fragment_src: &str,
    ) -> Result<Self, RenderError> {
        let program = device.create_program(vertex_src, fragment_src)?;
        Ok(Self { program, locations: HashMap::new() })
    }

    /// The underlying program handle
    pub fn id(&self) -> ProgramId {
        self.program
    }

    /// Make this program current for subsequent draws
    ///
    /// Prefer drawing through [`crate::render::RenderContext`], which skips
    /// the bind when this program is already current.
    pub fn bind(&self, device: &mut dyn GraphicsDevice) {
        device.bind_program(self.program);
    }

    /// Release the GPU program; the handle must not be used afterwards
    pub fn destroy(self, device: &mut dyn GraphicsDevice) {
        device.delete_program(self.program);
    }

    fn location(
        &mut self,
        device: &mut dyn GraphicsDevice,
        name: &str,
    ) -> Option<UniformLocation> {
        if let Some(cached) = self.locations.get(name) {
            return *cached;
        }
        let resolved = device.uniform_location(self.program, name);
        if resolved.is_none() {
            log::trace!("uniform {name:?} not found in program {:?}", self.program);
        }
        self.locations.insert(name.to_string(), resolved);
        resolved
    }

    fn set(&mut self, device: &mut dyn GraphicsDevice, name: &str, value: UniformValue) {
        if let Some(location) = self.location(device, name) {
            device.set_uniform(location, value);
        }
    }

    /// Write a bool uniform
    pub fn set_bool(&mut self, device: &mut dyn GraphicsDevice, name: &str, value: bool) {
        self.set(device, name, UniformValue::Bool(value));
    }

    /// Write an int uniform
    pub fn set_int(&mut self, device: &mut dyn GraphicsDevice, name: &str, value: i32) {
        self.set(device, name, UniformValue::Int(value));
    }

    /// Write a float uniform
    pub fn set_float(&mut self, device: &mut dyn GraphicsDevice, name: &str, value: f32) {
        self.set(device, name, UniformValue::Float(value));
    }

    /// Write a vec2 uniform
    pub fn set_vec2(&mut self, device: &mut dyn GraphicsDevice, name: &str, value: Vec2) {
        self.set(device, name, UniformValue::Vec2(value));
    }

    /// Write a vec3 uniform
    pub fn set_vec3(&mut self, device: &mut dyn GraphicsDevice, name: &str, value: Vec3) {
        self.set(device, name, UniformValue::Vec3(value));
    }

    /// Write a vec4 uniform
    pub fn set_vec4(&mut self, device: &mut dyn GraphicsDevice, name: &str, value: Vec4) {
        self.set(device, name, UniformValue::Vec4(value));
    }

    /// Write a mat4 uniform
    pub fn set_mat4(&mut self, device: &mut dyn GraphicsDevice, name: &str, value: &Mat4) {
        self.set(device, name, UniformValue::Mat4(*value));
    }
}

impl PartialEq for Shader {
    fn eq(&self, other: &Self) -> bool {
        self.program == other.program
    }
}
