//! Graphics Backend Seam
//!
//! The build pipeline talks to the GPU exclusively through the
//! [`ShaderBackend`] trait, so the compile/link engine and the uniform
//! cache can run against a real GL context ([`GlowBackend`]) or a headless
//! double ([`MockBackend`]) without changing.
//!
//! Handles are raw `u32` object names with `0` meaning "no object", the
//! GL convention. Ownership is manual and exclusive: whoever holds a
//! non-zero handle is responsible for exactly one matching delete call.

pub mod gl;
pub mod mock;

pub use gl::GlowBackend;
pub use mock::MockBackend;

use crate::stage::StageKind;

/// Raw program object name. `0` = no program.
pub type RawProgram = u32;

/// Raw shader (stage) object name. `0` = no shader.
pub type RawStage = u32;

/// The "no program" handle.
pub const NO_PROGRAM: RawProgram = 0;

/// Minimal GPU surface needed to build and introspect shader programs.
///
/// Error values are the backend's info-log text for the failed operation.
pub trait ShaderBackend {
    /// Creates, sources and compiles one stage object.
    ///
    /// On success the caller owns the returned handle. On failure the
    /// backend has already released the stage object; only the log is
    /// returned.
    fn compile_stage(&mut self, kind: StageKind, source: &str) -> Result<RawStage, String>;

    /// Releases a compiled stage object.
    fn delete_stage(&mut self, stage: RawStage);

    /// Creates a program, attaches `stages`, links, then detaches and
    /// releases every stage object — on both success and failure; the
    /// caller's stage handles are consumed either way.
    ///
    /// On link failure the program object is also released and the link
    /// log returned.
    fn link_program(&mut self, stages: &[RawStage]) -> Result<RawProgram, String>;

    /// Releases a program object. `NO_PROGRAM` is a no-op.
    fn delete_program(&mut self, program: RawProgram);

    /// Makes `program` current for subsequent draw/dispatch calls.
    /// Binding `NO_PROGRAM` unbinds.
    fn bind_program(&mut self, program: RawProgram);

    /// Number of active uniforms on a linked program.
    fn active_uniform_count(&self, program: RawProgram) -> u32;

    /// Declared name of the active uniform at `index`.
    fn active_uniform_name(&self, program: RawProgram, index: u32) -> Option<String>;

    /// Location of a named uniform, `-1` when inactive.
    fn uniform_location(&self, program: RawProgram, name: &str) -> i32;
}
