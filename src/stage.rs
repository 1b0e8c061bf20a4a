//! Stage Segmenter
//!
//! Splits a combined shader source into per-stage slices by scanning for
//! the literal marker tokens `VERTEX`, `GEOMETRY`, `FRAGMENT` and
//! `COMPUTE`. Only the first occurrence of each marker is recognized, and
//! stages are ordered by where their content starts — the physical order
//! of the blocks in the file is irrelevant.
//!
//! The scan is deliberately naive: a marker token appearing as a substring
//! of ordinary shader text before the intended marker will be misdetected.
//! That is a documented limitation of the format, not something this
//! module tries to outsmart.

use std::fmt;
use std::ops::Range;

use crate::errors::{Result, ShaderError};

/// One shader pipeline phase, compiled as an independent unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Vertex,
    Geometry,
    Fragment,
    Compute,
}

impl StageKind {
    /// All stage kinds, in marker-scan order.
    pub const ALL: [StageKind; 4] = [
        StageKind::Vertex,
        StageKind::Geometry,
        StageKind::Fragment,
        StageKind::Compute,
    ];

    /// The literal marker token that introduces this stage in source text.
    #[must_use]
    pub fn marker(self) -> &'static str {
        match self {
            StageKind::Vertex => "VERTEX",
            StageKind::Geometry => "GEOMETRY",
            StageKind::Fragment => "FRAGMENT",
            StageKind::Compute => "COMPUTE",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StageKind::Vertex => "vertex",
            StageKind::Geometry => "geometry",
            StageKind::Fragment => "fragment",
            StageKind::Compute => "compute",
        };
        f.write_str(name)
    }
}

/// A located stage: its kind and the byte range of its source text within
/// the composed source string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSpec {
    pub kind: StageKind,
    pub span: Range<usize>,
}

/// Locates every stage marker in `source` and returns the stages ordered
/// by content start.
///
/// Each stage's span begins immediately after its marker token and runs up
/// to the start of the next stage's marker (or end of source for the last
/// stage).
///
/// # Errors
///
/// [`ShaderError::Configuration`] when no marker is found, when `COMPUTE`
/// is combined with any rasterization stage, or when a rasterization
/// source is missing `VERTEX` or `FRAGMENT`.
pub fn segment(source: &str) -> Result<Vec<StageSpec>> {
    // (kind, content start) for every marker present.
    let mut found: Vec<(StageKind, usize)> = StageKind::ALL
        .iter()
        .filter_map(|&kind| {
            source
                .find(kind.marker())
                .map(|pos| (kind, pos + kind.marker().len()))
        })
        .collect();

    found.sort_by_key(|&(_, start)| start);

    if found.is_empty() {
        return Err(ShaderError::Configuration(
            "no stage markers (VERTEX / GEOMETRY / FRAGMENT / COMPUTE) found".into(),
        ));
    }

    validate_combination(&found)?;

    let specs = found
        .iter()
        .enumerate()
        .map(|(i, &(kind, start))| {
            let end = match found.get(i + 1) {
                Some(&(next_kind, next_start)) => next_start - next_kind.marker().len(),
                None => source.len(),
            };
            StageSpec {
                kind,
                span: start..end,
            }
        })
        .collect();

    Ok(specs)
}

/// Vertex+Fragment (with optional Geometry) or Compute alone are the only
/// valid combinations.
fn validate_combination(found: &[(StageKind, usize)]) -> Result<()> {
    let has = |kind| found.iter().any(|&(k, _)| k == kind);

    if has(StageKind::Compute) {
        if found.len() > 1 {
            return Err(ShaderError::Configuration(
                "COMPUTE cannot be combined with rasterization stages".into(),
            ));
        }
        return Ok(());
    }

    if !has(StageKind::Vertex) {
        return Err(ShaderError::Configuration(
            "missing VERTEX stage".into(),
        ));
    }
    if !has(StageKind::Fragment) {
        return Err(ShaderError::Configuration(
            "missing FRAGMENT stage".into(),
        ));
    }

    Ok(())
}
