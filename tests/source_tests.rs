//! Source Loader Tests
//!
//! Tests for:
//! - Plain file reads and the empty-text failure value
//! - INCLUDE directive splicing (directive line removed, content inlined)
//! - Recursive resolution of the included file's own directive
//! - Single-resolution-per-scan and malformed-directive behavior
//! - Modification-timestamp queries

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;

use glshader::diagnostics::{CapturingSink, NullSink, Severity};
use glshader::source::{last_write_time, load_from_file};

fn test_dir(name: &str) -> Result<PathBuf> {
    let dir = std::env::temp_dir().join(format!("glshader-source-{}-{name}", std::process::id()));
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

// ============================================================================
// Plain loads
// ============================================================================

#[test]
fn load_reads_file_contents() -> Result<()> {
    let dir = test_dir("plain")?;
    let path = dir.join("shader.glsl");
    fs::write(&path, "VERTEX\nvs\nFRAGMENT\nfs")?;

    let text = load_from_file(&path, &NullSink, "test");
    assert_eq!(text, "VERTEX\nvs\nFRAGMENT\nfs");
    Ok(())
}

#[test]
fn missing_file_yields_empty_text_and_reports() {
    let sink = CapturingSink::new();
    let text = load_from_file(Path::new("/nonexistent/shader.glsl"), &sink, "test");

    assert!(text.is_empty());
    assert_eq!(sink.count(Severity::Error), 1);
    assert!(sink.contains("could not open file"));
}

// ============================================================================
// INCLUDE resolution
// ============================================================================

#[test]
fn include_directive_is_replaced_by_file_content() -> Result<()> {
    let dir = test_dir("include")?;
    let common = dir.join("common.glsl");
    fs::write(&common, "uniform mat4 MVP;\n")?;

    let main = dir.join("main.glsl");
    fs::write(
        &main,
        format!("VERTEX\nINCLUDE \"{}\"\nvs\nFRAGMENT\nfs", common.display()),
    )?;

    let text = load_from_file(&main, &NullSink, "test");
    assert_eq!(text, "VERTEX\nuniform mat4 MVP;\nvs\nFRAGMENT\nfs");
    Ok(())
}

#[test]
fn nested_includes_resolve_recursively() -> Result<()> {
    let dir = test_dir("nested")?;
    let inner = dir.join("inner.glsl");
    fs::write(&inner, "innermost\n")?;

    let outer = dir.join("outer.glsl");
    fs::write(&outer, format!("INCLUDE \"{}\"\nouter tail\n", inner.display()))?;

    let main = dir.join("main.glsl");
    fs::write(&main, format!("head\nINCLUDE \"{}\"\ntail", outer.display()))?;

    let text = load_from_file(&main, &NullSink, "test");
    assert_eq!(text, "head\ninnermost\nouter tail\ntail");
    Ok(())
}

#[test]
fn only_first_directive_is_resolved_per_scan() -> Result<()> {
    let dir = test_dir("twice")?;
    let common = dir.join("common.glsl");
    fs::write(&common, "included\n")?;

    let main = dir.join("main.glsl");
    fs::write(
        &main,
        format!(
            "INCLUDE \"{0}\"\nmiddle\nINCLUDE \"{0}\"\nend",
            common.display()
        ),
    )?;

    let text = load_from_file(&main, &NullSink, "test");
    // The second directive survives the pass textually.
    assert!(text.starts_with("included\nmiddle\nINCLUDE \""));
    Ok(())
}

#[test]
fn missing_include_target_splices_empty_text() -> Result<()> {
    let dir = test_dir("missing-target")?;
    let main = dir.join("main.glsl");
    fs::write(&main, "head\nINCLUDE \"/nonexistent/common.glsl\"\ntail")?;

    let sink = CapturingSink::new();
    let text = load_from_file(&main, &sink, "test");

    assert_eq!(text, "head\ntail");
    assert_eq!(sink.count(Severity::Error), 1);
    Ok(())
}

#[test]
fn malformed_directive_leaves_source_untouched() -> Result<()> {
    let dir = test_dir("malformed")?;
    let main = dir.join("main.glsl");
    fs::write(&main, "VERTEX\nINCLUDE no quotes here")?;

    let sink = CapturingSink::new();
    let text = load_from_file(&main, &sink, "test");

    assert_eq!(text, "VERTEX\nINCLUDE no quotes here");
    assert_eq!(sink.count(Severity::Warning), 1);
    assert!(sink.contains("malformed INCLUDE"));
    Ok(())
}

// ============================================================================
// Timestamps
// ============================================================================

#[test]
fn last_write_time_of_existing_file() -> Result<()> {
    let dir = test_dir("mtime")?;
    let path = dir.join("shader.glsl");
    fs::write(&path, "x")?;

    assert!(last_write_time(&path, &NullSink, "test").is_some());
    Ok(())
}

#[test]
fn last_write_time_of_missing_file_warns_and_returns_none() {
    let sink = CapturingSink::new();
    let time = last_write_time(Path::new("/nonexistent/shader.glsl"), &sink, "test");

    assert!(time.is_none());
    assert_eq!(sink.count(Severity::Warning), 1);
    assert!(sink.contains("last write time"));
}
