//! Shader Program
//!
//! [`ShaderProgram`] owns one linked program object and drives the whole
//! pipeline: load → segment → compile/link → uniform cache, at
//! construction and again on every detected change of the backing file.
//!
//! # Reload semantics
//!
//! After a successful reload the program must be rebound and all
//! previously obtained uniform locations are invalid. On a failed reload
//! the previous program and uniform table stay live — a working program is
//! never torn down speculatively. Only a failed *first* build leaves the
//! object invalid, until a later reload succeeds.
//!
//! # Ownership
//!
//! The backend program handle is owned exclusively; moving the
//! `ShaderProgram` moves the handle with it. Release is explicit and
//! idempotent via [`destroy`](ShaderProgram::destroy), since dropping
//! cannot reach the backend.
//!
//! All operations are synchronous and must run on the thread owning the
//! graphics context.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

use crate::backend::{RawProgram, ShaderBackend, NO_PROGRAM};
use crate::diagnostics::{DiagnosticsSink, LogSink, Severity};
use crate::errors::ShaderError;
use crate::link;
use crate::source;
use crate::uniforms::{UniformTable, INVALID_LOCATION};

/// Seconds between file-timestamp checks in [`ShaderProgram::hot_reload`].
pub const POLL_INTERVAL: f32 = 1.0;

/// Where the source text came from, and the reload state for file-backed
/// programs.
#[derive(Debug)]
enum SourceIdentity {
    /// In-memory source; reload is not possible.
    Literal,
    /// File-backed source, reloadable.
    File {
        path: PathBuf,
        /// Whether `bind` checks the file for changes.
        hot_reload: bool,
        /// Last observed modification time (`None` if never queried
        /// successfully).
        last_write: Option<SystemTime>,
        /// Elapsed time since the last poll in `hot_reload`.
        poll_accum: f32,
    },
}

/// A linked, executable multi-stage shader program with cached uniform
/// locations and optional hot reload.
pub struct ShaderProgram {
    id: String,
    identity: SourceIdentity,
    program: RawProgram,
    uniforms: UniformTable,
    sink: Arc<dyn DiagnosticsSink>,
    literal_poll_warned: bool,
}

impl ShaderProgram {
    /// Builds a program from a source file, reporting through [`LogSink`].
    ///
    /// With `hot_reload` enabled, [`bind`](Self::bind) re-checks the
    /// file's modification time and rebuilds on change.
    pub fn from_file<B: ShaderBackend>(
        backend: &mut B,
        path: impl Into<PathBuf>,
        hot_reload: bool,
    ) -> Self {
        Self::from_file_with_sink(backend, path, hot_reload, Arc::new(LogSink))
    }

    /// [`from_file`](Self::from_file) with an injected diagnostics sink.
    pub fn from_file_with_sink<B: ShaderBackend>(
        backend: &mut B,
        path: impl Into<PathBuf>,
        hot_reload: bool,
        sink: Arc<dyn DiagnosticsSink>,
    ) -> Self {
        let path = path.into();
        let id = path.display().to_string();

        // Recorded before the first build, so a shader that is broken at
        // startup becomes valid on the first successful reload.
        let last_write = source::last_write_time(&path, sink.as_ref(), &id);

        let mut this = Self {
            id,
            identity: SourceIdentity::File {
                path: path.clone(),
                hot_reload,
                last_write,
                poll_accum: 0.0,
            },
            program: NO_PROGRAM,
            uniforms: UniformTable::default(),
            sink,
            literal_poll_warned: false,
        };

        let text = source::load_from_file(&path, this.sink.as_ref(), &this.id);
        if !text.is_empty() {
            this.swap_program(backend, &text);
        }
        this
    }

    /// Builds a program from in-memory source text. `id` is used only in
    /// diagnostics. Reload is not available.
    pub fn from_source<B: ShaderBackend>(backend: &mut B, source: &str, id: &str) -> Self {
        Self::from_source_with_sink(backend, source, id, Arc::new(LogSink))
    }

    /// [`from_source`](Self::from_source) with an injected diagnostics sink.
    pub fn from_source_with_sink<B: ShaderBackend>(
        backend: &mut B,
        source: &str,
        id: &str,
        sink: Arc<dyn DiagnosticsSink>,
    ) -> Self {
        let mut this = Self {
            id: id.to_string(),
            identity: SourceIdentity::Literal,
            program: NO_PROGRAM,
            uniforms: UniformTable::default(),
            sink,
            literal_poll_warned: false,
        };
        this.swap_program(backend, source);
        this
    }

    /// Whether a usable program is currently owned.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.program != NO_PROGRAM
    }

    /// Diagnostics identifier: the file path, or the caller-supplied id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The raw backend handle (`0` when invalid).
    #[must_use]
    pub fn raw_program(&self) -> RawProgram {
        self.program
    }

    /// Makes the program current for subsequent draw/dispatch calls.
    ///
    /// When the program is file-backed and hot reload was requested at
    /// construction, the file is checked for changes first.
    pub fn bind<B: ShaderBackend>(&mut self, backend: &mut B) {
        if matches!(
            self.identity,
            SourceIdentity::File {
                hot_reload: true,
                ..
            }
        ) {
            self.check_and_reload(backend);
        }
        backend.bind_program(self.program);
    }

    /// Cached location of an active uniform.
    ///
    /// Unknown names return [`INVALID_LOCATION`] and are reported once per
    /// distinct name per program generation; uniform-set calls against the
    /// sentinel are no-ops, so iteration-time misses degrade gracefully.
    #[must_use]
    pub fn location_of(&self, name: &str) -> i32 {
        match self.uniforms.get(name) {
            Some(location) => location,
            None => {
                if self.uniforms.note_unknown(name) {
                    let err = ShaderError::UnknownUniform(name.to_string());
                    self.sink
                        .report(Severity::Warning, &self.id, &err.to_string());
                }
                INVALID_LOCATION
            }
        }
    }

    /// Re-reads the file's modification time and rebuilds the program if
    /// it changed. A second call without an intervening file change is a
    /// no-op.
    ///
    /// Returns `true` when a new program was installed; the caller must
    /// rebind and refresh any cached uniform locations.
    pub fn reload<B: ShaderBackend>(&mut self, backend: &mut B) -> bool {
        if matches!(self.identity, SourceIdentity::Literal) {
            let err = ShaderError::Configuration(
                "reload requested but program was built from literal source".into(),
            );
            self.sink.report(Severity::Error, &self.id, &err.to_string());
            return false;
        }
        self.check_and_reload(backend)
    }

    /// Throttled reload polling, meant to be called every frame with the
    /// frame's delta time in seconds.
    ///
    /// Accumulates `delta_seconds`; once [`POLL_INTERVAL`] is reached the
    /// accumulator resets and one timestamp check (and reload, on change)
    /// is performed. Returns `true` when a new program was installed.
    ///
    /// On a literal-source program this is a configuration error, reported
    /// once per program rather than once per call (unlike
    /// [`reload`](Self::reload)) since this method is driven from a frame
    /// loop.
    pub fn hot_reload<B: ShaderBackend>(&mut self, backend: &mut B, delta_seconds: f32) -> bool {
        let fire = match &mut self.identity {
            SourceIdentity::Literal => {
                if !self.literal_poll_warned {
                    self.literal_poll_warned = true;
                    let err = ShaderError::Configuration(
                        "hot reload requested but program was built from literal source".into(),
                    );
                    self.sink.report(Severity::Error, &self.id, &err.to_string());
                }
                return false;
            }
            SourceIdentity::File { poll_accum, .. } => {
                *poll_accum += delta_seconds;
                if *poll_accum >= POLL_INTERVAL {
                    *poll_accum = 0.0;
                    true
                } else {
                    false
                }
            }
        };

        fire && self.check_and_reload(backend)
    }

    /// Releases the backend program handle. Idempotent; the object is
    /// invalid afterwards until a successful reload.
    pub fn destroy<B: ShaderBackend>(&mut self, backend: &mut B) {
        if self.program != NO_PROGRAM {
            backend.delete_program(self.program);
            self.program = NO_PROGRAM;
            self.uniforms = UniformTable::default();
        }
    }

    /// Timestamp check + full pipeline rerun on change. Returns `true`
    /// when a new program was installed.
    fn check_and_reload<B: ShaderBackend>(&mut self, backend: &mut B) -> bool {
        let (path, last) = match &self.identity {
            SourceIdentity::File {
                path, last_write, ..
            } => (path.clone(), *last_write),
            SourceIdentity::Literal => return false,
        };

        let Some(current) = source::last_write_time(&path, self.sink.as_ref(), &self.id) else {
            return false;
        };
        if last == Some(current) {
            return false;
        }
        if let SourceIdentity::File { last_write, .. } = &mut self.identity {
            *last_write = Some(current);
        }

        let text = source::load_from_file(&path, self.sink.as_ref(), &self.id);
        if text.is_empty() {
            // No update available; keep the previous program.
            return false;
        }

        if self.swap_program(backend, &text) {
            self.sink
                .report(Severity::Info, &self.id, "reload succeeded");
            true
        } else {
            false
        }
    }

    /// Atomic replacement: the previous program is destroyed only after
    /// the new one linked, and the uniform table is rebuilt in full.
    fn swap_program<B: ShaderBackend>(&mut self, backend: &mut B, source: &str) -> bool {
        let Some(new_program) = link::build_program(backend, self.sink.as_ref(), &self.id, source)
        else {
            return false;
        };

        if self.program != NO_PROGRAM {
            backend.delete_program(self.program);
        }
        self.program = new_program;
        self.uniforms = UniformTable::rebuild(backend, new_program);
        true
    }
}
