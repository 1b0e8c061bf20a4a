//! OpenGL backend over [`glow`].
//!
//! Thin translation of the [`ShaderBackend`] surface onto a live GL
//! context. All calls must happen on the thread owning the context; the
//! crate performs no synchronization of its own.

use std::num::NonZeroU32;
use std::sync::Arc;

use glow::HasContext;

use super::{RawProgram, RawStage, ShaderBackend};
use crate::stage::StageKind;

/// [`ShaderBackend`] implementation backed by a `glow::Context`.
pub struct GlowBackend {
    gl: Arc<glow::Context>,
}

impl GlowBackend {
    #[must_use]
    pub fn new(gl: Arc<glow::Context>) -> Self {
        Self { gl }
    }

    /// The wrapped context, for issuing uniform-set and draw calls.
    #[must_use]
    pub fn context(&self) -> &glow::Context {
        &self.gl
    }
}

fn gl_stage_type(kind: StageKind) -> u32 {
    match kind {
        StageKind::Vertex => glow::VERTEX_SHADER,
        StageKind::Geometry => glow::GEOMETRY_SHADER,
        StageKind::Fragment => glow::FRAGMENT_SHADER,
        StageKind::Compute => glow::COMPUTE_SHADER,
    }
}

fn native_shader(raw: RawStage) -> Option<glow::NativeShader> {
    NonZeroU32::new(raw).map(glow::NativeShader)
}

fn native_program(raw: RawProgram) -> Option<glow::NativeProgram> {
    NonZeroU32::new(raw).map(glow::NativeProgram)
}

impl ShaderBackend for GlowBackend {
    fn compile_stage(&mut self, kind: StageKind, source: &str) -> Result<RawStage, String> {
        unsafe {
            let shader = self.gl.create_shader(gl_stage_type(kind))?;
            self.gl.shader_source(shader, source);
            self.gl.compile_shader(shader);

            if self.gl.get_shader_compile_status(shader) {
                Ok(shader.0.get())
            } else {
                let log = self.gl.get_shader_info_log(shader);
                self.gl.delete_shader(shader);
                Err(log)
            }
        }
    }

    fn delete_stage(&mut self, stage: RawStage) {
        if let Some(shader) = native_shader(stage) {
            unsafe { self.gl.delete_shader(shader) };
        }
    }

    fn link_program(&mut self, stages: &[RawStage]) -> Result<RawProgram, String> {
        unsafe {
            let program = match self.gl.create_program() {
                Ok(program) => program,
                Err(log) => {
                    for &stage in stages {
                        self.delete_stage(stage);
                    }
                    return Err(log);
                }
            };

            for &stage in stages {
                if let Some(shader) = native_shader(stage) {
                    self.gl.attach_shader(program, shader);
                }
            }

            self.gl.link_program(program);

            // Stage objects are never needed after linking, success or not.
            for &stage in stages {
                if let Some(shader) = native_shader(stage) {
                    self.gl.detach_shader(program, shader);
                    self.gl.delete_shader(shader);
                }
            }

            if self.gl.get_program_link_status(program) {
                Ok(program.0.get())
            } else {
                let log = self.gl.get_program_info_log(program);
                self.gl.delete_program(program);
                Err(log)
            }
        }
    }

    fn delete_program(&mut self, program: RawProgram) {
        if let Some(program) = native_program(program) {
            unsafe { self.gl.delete_program(program) };
        }
    }

    fn bind_program(&mut self, program: RawProgram) {
        unsafe { self.gl.use_program(native_program(program)) };
    }

    fn active_uniform_count(&self, program: RawProgram) -> u32 {
        match native_program(program) {
            Some(program) => unsafe { self.gl.get_active_uniforms(program) },
            None => 0,
        }
    }

    fn active_uniform_name(&self, program: RawProgram, index: u32) -> Option<String> {
        let program = native_program(program)?;
        unsafe { self.gl.get_active_uniform(program, index) }.map(|u| u.name)
    }

    fn uniform_location(&self, program: RawProgram, name: &str) -> i32 {
        let Some(program) = native_program(program) else {
            return crate::uniforms::INVALID_LOCATION;
        };
        match unsafe { self.gl.get_uniform_location(program, name) } {
            Some(location) => location.0 as i32,
            None => crate::uniforms::INVALID_LOCATION,
        }
    }
}
