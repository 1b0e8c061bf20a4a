//! Stage Segmenter Tests
//!
//! Tests for:
//! - Marker detection and span boundaries for all four stage kinds
//! - Ordering by content start (physical marker order is irrelevant)
//! - Configuration errors: no markers, Compute mixed with rasterization,
//!   missing Vertex/Fragment
//! - First-occurrence semantics of the naive scan

use glshader::stage::{segment, StageKind};

fn kinds(source: &str) -> Vec<StageKind> {
    segment(source)
        .expect("expected valid segmentation")
        .iter()
        .map(|spec| spec.kind)
        .collect()
}

fn content<'a>(source: &'a str, kind: StageKind) -> &'a str {
    let specs = segment(source).expect("expected valid segmentation");
    let spec = specs
        .iter()
        .find(|spec| spec.kind == kind)
        .expect("stage not found");
    &source[spec.span.clone()]
}

// ============================================================================
// Marker detection & spans
// ============================================================================

#[test]
fn vertex_fragment_pair_segments() {
    let src = "VERTEX\nvs code\nFRAGMENT\nfs code";
    assert_eq!(kinds(src), vec![StageKind::Vertex, StageKind::Fragment]);
    assert_eq!(content(src, StageKind::Vertex), "\nvs code\n");
    assert_eq!(content(src, StageKind::Fragment), "\nfs code");
}

#[test]
fn geometry_stage_is_optional_and_detected() {
    let src = "VERTEX\nvs\nGEOMETRY\ngs\nFRAGMENT\nfs";
    assert_eq!(
        kinds(src),
        vec![StageKind::Vertex, StageKind::Geometry, StageKind::Fragment]
    );
    assert_eq!(content(src, StageKind::Geometry), "\ngs\n");
}

#[test]
fn compute_alone_segments_to_end_of_source() {
    let src = "COMPUTE\nlayout(local_size_x = 64) in;\nvoid main() {}";
    assert_eq!(kinds(src), vec![StageKind::Compute]);
    assert_eq!(
        content(src, StageKind::Compute),
        "\nlayout(local_size_x = 64) in;\nvoid main() {}"
    );
}

#[test]
fn span_excludes_next_marker_keyword() {
    let src = "VERTEX abc FRAGMENT def";
    // Vertex content ends exactly where the FRAGMENT keyword begins.
    assert_eq!(content(src, StageKind::Vertex), " abc ");
    assert_eq!(content(src, StageKind::Fragment), " def");
}

#[test]
fn only_first_marker_occurrence_is_recognized() {
    // The second FRAGMENT token lands inside the fragment stage's content.
    let src = "VERTEX\nvs\nFRAGMENT\nfs\nFRAGMENT more";
    let specs = segment(src).expect("expected valid segmentation");
    assert_eq!(specs.len(), 2);
    assert_eq!(content(src, StageKind::Fragment), "\nfs\nFRAGMENT more");
}

// ============================================================================
// Order invariance
// ============================================================================

#[test]
fn physical_marker_order_is_irrelevant() {
    let forward = "VERTEX\nvs-body\nFRAGMENT\nfs-body";
    let reversed = "FRAGMENT\nfs-body\nVERTEX\nvs-body";

    assert_eq!(content(forward, StageKind::Vertex), "\nvs-body\n");
    assert_eq!(content(reversed, StageKind::Vertex), "\nvs-body");
    assert_eq!(content(forward, StageKind::Fragment), "\nfs-body");
    assert_eq!(content(reversed, StageKind::Fragment), "\nfs-body\n");

    // Stages come back sorted by where they appear, not by kind.
    assert_eq!(
        kinds(reversed),
        vec![StageKind::Fragment, StageKind::Vertex]
    );
}

// ============================================================================
// Configuration errors
// ============================================================================

#[test]
fn no_markers_is_a_configuration_error() {
    let err = segment("void main() {}").unwrap_err();
    assert!(err.to_string().contains("no stage markers"));
}

#[test]
fn compute_mixed_with_fragment_is_rejected() {
    let err = segment("COMPUTE\ncs\nFRAGMENT\nfs").unwrap_err();
    assert!(err.to_string().contains("COMPUTE"));
}

#[test]
fn compute_mixed_with_vertex_is_rejected() {
    assert!(segment("VERTEX\nvs\nCOMPUTE\ncs").is_err());
}

#[test]
fn vertex_without_fragment_is_rejected() {
    let err = segment("VERTEX\nvs only").unwrap_err();
    assert!(err.to_string().contains("FRAGMENT"));
}

#[test]
fn fragment_without_vertex_is_rejected() {
    let err = segment("FRAGMENT\nfs only").unwrap_err();
    assert!(err.to_string().contains("VERTEX"));
}

#[test]
fn geometry_alone_is_rejected() {
    assert!(segment("GEOMETRY\ngs only").is_err());
}
