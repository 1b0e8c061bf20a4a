//! Headless backend double.
//!
//! Implements [`ShaderBackend`] without a GL context so the build
//! pipeline, uniform cache and hot-reload controller can be exercised in
//! plain `cargo test` runs. Compile and link failures are scripted per
//! test; every create/delete is accounted for, so tests can assert that no
//! object leaks on any failure path.
//!
//! Active uniforms of a "linked" program are discovered by scanning the
//! attached stage sources for `uniform <type> <name>;` declarations, in
//! declaration order, with locations assigned from zero.

use rustc_hash::{FxHashMap, FxHashSet};

use super::{RawProgram, RawStage, ShaderBackend};
use crate::stage::StageKind;
use crate::uniforms::INVALID_LOCATION;

/// Scriptable in-memory [`ShaderBackend`].
#[derive(Debug, Default)]
pub struct MockBackend {
    next_id: u32,
    stages: FxHashMap<RawStage, (StageKind, String)>,
    programs: FxHashMap<RawProgram, Vec<String>>,

    /// Stage kinds whose compilation should fail.
    pub fail_compile: FxHashSet<StageKind>,
    /// Whether the next link attempts should fail.
    pub fail_link: bool,

    /// Currently bound program (`0` = none).
    pub bound: RawProgram,
    /// Total compile attempts (including scripted failures).
    pub compile_count: u32,
    /// Total link attempts (including scripted failures).
    pub link_count: u32,
}

impl MockBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stage objects currently alive.
    #[must_use]
    pub fn live_stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Number of program objects currently alive.
    #[must_use]
    pub fn live_program_count(&self) -> usize {
        self.programs.len()
    }

    /// Whether `program` is a live program object.
    #[must_use]
    pub fn is_live(&self, program: RawProgram) -> bool {
        self.programs.contains_key(&program)
    }

    fn fresh_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

/// Extracts uniform names from `uniform <type> <name>;` declarations.
fn scan_uniform_declarations(source: &str, names: &mut Vec<String>) {
    for line in source.lines() {
        let line = line.trim();
        let Some(rest) = line.strip_prefix("uniform ") else {
            continue;
        };
        let mut words = rest.split_whitespace();
        let _ty = words.next();
        if let Some(name) = words.next() {
            let name = name.trim_end_matches(';');
            let name = name.split('[').next().unwrap_or(name);
            if !name.is_empty() && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }
}

impl ShaderBackend for MockBackend {
    fn compile_stage(&mut self, kind: StageKind, source: &str) -> Result<RawStage, String> {
        self.compile_count += 1;

        if self.fail_compile.contains(&kind) {
            return Err(format!("mock: {kind} stage scripted to fail"));
        }

        let id = self.fresh_id();
        self.stages.insert(id, (kind, source.to_string()));
        Ok(id)
    }

    fn delete_stage(&mut self, stage: RawStage) {
        self.stages.remove(&stage);
    }

    fn link_program(&mut self, stages: &[RawStage]) -> Result<RawProgram, String> {
        self.link_count += 1;

        let mut uniforms = Vec::new();
        for stage in stages {
            if let Some((_, source)) = self.stages.remove(stage) {
                scan_uniform_declarations(&source, &mut uniforms);
            }
        }

        if self.fail_link {
            return Err("mock: link scripted to fail".into());
        }

        let id = self.fresh_id();
        self.programs.insert(id, uniforms);
        Ok(id)
    }

    fn delete_program(&mut self, program: RawProgram) {
        self.programs.remove(&program);
    }

    fn bind_program(&mut self, program: RawProgram) {
        self.bound = program;
    }

    fn active_uniform_count(&self, program: RawProgram) -> u32 {
        self.programs
            .get(&program)
            .map_or(0, |uniforms| uniforms.len() as u32)
    }

    fn active_uniform_name(&self, program: RawProgram, index: u32) -> Option<String> {
        self.programs
            .get(&program)
            .and_then(|uniforms| uniforms.get(index as usize).cloned())
    }

    fn uniform_location(&self, program: RawProgram, name: &str) -> i32 {
        self.programs
            .get(&program)
            .and_then(|uniforms| uniforms.iter().position(|n| n == name))
            .map_or(INVALID_LOCATION, |pos| pos as i32)
    }
}
