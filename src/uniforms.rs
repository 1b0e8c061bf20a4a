//! Uniform Cache
//!
//! Name-to-location table built once per successful link by enumerating
//! the program's active uniforms, so draw-time lookups are O(1) map hits
//! instead of GL round trips.
//!
//! The table is valid only for the program that produced it; the owning
//! [`ShaderProgram`](crate::ShaderProgram) replaces it wholesale on every
//! successful swap, which also resets the unknown-name tracking.

use std::cell::RefCell;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::backend::{RawProgram, ShaderBackend};

/// Sentinel for uniforms that are not active on the program. This is GL's
/// own invalid location; `glUniform*` calls against it are no-ops.
pub const INVALID_LOCATION: i32 = -1;

/// Case-sensitive uniform name → location mapping for one linked program.
#[derive(Debug, Default)]
pub struct UniformTable {
    locations: FxHashMap<String, i32>,
    // Names already reported as unknown, so repeated per-frame lookups of
    // a missing uniform warn once, not every frame.
    unknown: RefCell<FxHashSet<String>>,
}

impl UniformTable {
    /// Enumerates the active uniforms of `program` into a fresh table.
    pub fn rebuild<B: ShaderBackend>(backend: &B, program: RawProgram) -> Self {
        let count = backend.active_uniform_count(program);
        let mut locations =
            FxHashMap::with_capacity_and_hasher(count as usize, Default::default());

        for index in 0..count {
            if let Some(name) = backend.active_uniform_name(program, index) {
                let location = backend.uniform_location(program, &name);
                locations.insert(name, location);
            }
        }

        Self {
            locations,
            unknown: RefCell::new(FxHashSet::default()),
        }
    }

    /// Location of `name`, if it is an active uniform.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<i32> {
        self.locations.get(name).copied()
    }

    /// Records `name` as unknown; returns `true` the first time a given
    /// name is recorded.
    pub fn note_unknown(&self, name: &str) -> bool {
        self.unknown.borrow_mut().insert(name.to_string())
    }

    /// Number of active uniforms in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}
