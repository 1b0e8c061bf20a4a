//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`ShaderError`] covers all failure modes of the
//! build pipeline:
//! - Source file access and timestamp queries
//! - Per-stage compilation and program linking
//! - Invalid stage configurations
//!
//! Errors never unwind across the public runtime surface: operations such
//! as [`reload`](crate::ShaderProgram::reload) surface failures through the
//! injected [`DiagnosticsSink`](crate::DiagnosticsSink) and leave the
//! previous valid state intact.

use std::path::PathBuf;

use thiserror::Error;

use crate::stage::StageKind;

/// The main error type for shader-program management.
///
/// Each variant carries the context needed to produce a useful diagnostic
/// line; the `Display` form is what reaches the diagnostics sink.
#[derive(Error, Debug)]
pub enum ShaderError {
    // ========================================================================
    // Filesystem
    // ========================================================================
    /// The shader source file could not be opened or read.
    #[error("could not open file `{}`: {source}", path.display())]
    FileOpen {
        /// Path that failed to open
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The modification timestamp of the source file could not be queried.
    #[error("could not query last write time of `{}`: {source}", path.display())]
    TimestampQuery {
        /// Path that failed the query
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    // ========================================================================
    // Compile & Link
    // ========================================================================
    /// One shader stage failed to compile.
    #[error("{stage} shader compilation failed\n{log}")]
    StageCompile {
        /// Stage that failed
        stage: StageKind,
        /// Compiler info log
        log: String,
    },

    /// The program failed to link.
    #[error("program linking failed\n{log}")]
    ProgramLink {
        /// Linker info log
        log: String,
    },

    // ========================================================================
    // Configuration
    // ========================================================================
    /// The source text or the requested operation is misconfigured
    /// (invalid stage combination, reload without a backing file, ...).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A uniform name was looked up that is not active on the program.
    #[error("unknown uniform `{0}`")]
    UnknownUniform(String),
}

/// Alias for `Result<T, ShaderError>`.
pub type Result<T> = std::result::Result<T, ShaderError>;
