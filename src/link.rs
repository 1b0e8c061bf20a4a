//! Compile/Link Engine
//!
//! Turns a composed source string into a linked program object, or into a
//! complete set of diagnostics and no program at all. Every stage is
//! compiled before success is decided, so one pass reports every failing
//! stage's log, not just the first.
//!
//! The operation is atomic from the caller's point of view: on any
//! failure, all intermediate stage and program objects are released before
//! returning.

use crate::backend::{RawProgram, ShaderBackend};
use crate::diagnostics::{DiagnosticsSink, Severity};
use crate::errors::ShaderError;
use crate::stage;

/// Segments `source`, compiles every located stage, and links the result.
///
/// All diagnostics are delivered through `sink`, tagged with `id`.
/// Returns `None` when segmentation, any compilation, or linking failed;
/// no GPU objects survive a failure.
pub fn build_program<B: ShaderBackend>(
    backend: &mut B,
    sink: &dyn DiagnosticsSink,
    id: &str,
    source: &str,
) -> Option<RawProgram> {
    let specs = match stage::segment(source) {
        Ok(specs) => specs,
        Err(err) => {
            sink.report(Severity::Error, id, &err.to_string());
            return None;
        }
    };

    let mut compiled = Vec::with_capacity(specs.len());
    let mut failed = false;

    for spec in &specs {
        match backend.compile_stage(spec.kind, &source[spec.span.clone()]) {
            Ok(handle) => compiled.push(handle),
            Err(log) => {
                let err = ShaderError::StageCompile {
                    stage: spec.kind,
                    log,
                };
                sink.report(Severity::Error, id, &err.to_string());
                failed = true;
            }
        }
    }

    if failed {
        for handle in compiled {
            backend.delete_stage(handle);
        }
        return None;
    }

    match backend.link_program(&compiled) {
        Ok(program) => Some(program),
        Err(log) => {
            let err = ShaderError::ProgramLink { log };
            sink.report(Severity::Error, id, &err.to_string());
            None
        }
    }
}
