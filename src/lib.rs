#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod backend;
pub mod diagnostics;
pub mod errors;
pub mod link;
pub mod program;
pub mod source;
pub mod stage;
pub mod uniforms;

pub use backend::{GlowBackend, MockBackend, RawProgram, RawStage, ShaderBackend, NO_PROGRAM};
pub use diagnostics::{CapturingSink, DiagnosticsSink, LogSink, NullSink, Severity};
pub use errors::{Result, ShaderError};
pub use program::{ShaderProgram, POLL_INTERVAL};
pub use stage::{StageKind, StageSpec};
pub use uniforms::{UniformTable, INVALID_LOCATION};
