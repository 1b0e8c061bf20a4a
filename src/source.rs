//! Source Loader
//!
//! Reads shader source text from disk and resolves the single-level
//! `INCLUDE "path"` directive by textual substitution: the first occurrence
//! of the directive is located, the referenced file is loaded (recursively,
//! so the included file's own directive is honored), and the loaded text is
//! spliced in place of the directive line.
//!
//! This is intentionally not a preprocessor. The scan does not understand
//! comments or escaping, and only the first directive per load pass is
//! resolved. Include paths are used verbatim, relative to the process
//! working directory.
//!
//! Empty text is the loader's failure value: callers treat it as "no
//! update available", never as a valid empty program.

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use crate::diagnostics::{DiagnosticsSink, Severity};
use crate::errors::ShaderError;

const INCLUDE_DIRECTIVE: &str = "INCLUDE";

/// Reads `path` fully as text and resolves its include directive.
///
/// On open failure the error is reported through `sink` and empty text is
/// returned.
pub fn load_from_file(path: &Path, sink: &dyn DiagnosticsSink, id: &str) -> String {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(source) => {
            let err = ShaderError::FileOpen {
                path: path.to_path_buf(),
                source,
            };
            sink.report(Severity::Error, id, &err.to_string());
            return String::new();
        }
    };

    resolve_include(source, sink, id)
}

/// Splices the content referenced by the first `INCLUDE "path"` directive
/// in place of the directive line. Returns the source unchanged when no
/// directive is present, or when the directive is malformed (missing
/// quotes).
fn resolve_include(source: String, sink: &dyn DiagnosticsSink, id: &str) -> String {
    let Some(line_first) = source.find(INCLUDE_DIRECTIVE) else {
        return source;
    };

    // End of the directive line, one past the newline. A directive on the
    // last line consumes up to end of source.
    let line_last = source[line_first..]
        .find('\n')
        .map_or(source.len(), |p| line_first + p + 1);

    let after_keyword = line_first + INCLUDE_DIRECTIVE.len();
    let quoted = source[after_keyword..]
        .find('"')
        .map(|q| after_keyword + q + 1)
        .and_then(|name_first| {
            source[name_first..]
                .find('"')
                .map(|len| (name_first, name_first + len))
        });

    let Some((name_first, name_last)) = quoted else {
        let err = ShaderError::Configuration(
            "malformed INCLUDE directive: expected INCLUDE \"path\"".into(),
        );
        sink.report(Severity::Warning, id, &err.to_string());
        return source;
    };

    let include_path = &source[name_first..name_last];
    let included = load_from_file(Path::new(include_path), sink, id);

    let mut resolved = String::with_capacity(source.len() + included.len());
    resolved.push_str(&source[..line_first]);
    resolved.push_str(&included);
    resolved.push_str(&source[line_last..]);
    resolved
}

/// Queries the last modification time of `path`.
///
/// A failed query is reported through `sink` at warning severity and
/// yields `None`; polling treats that as "no change".
pub fn last_write_time(
    path: &Path,
    sink: &dyn DiagnosticsSink,
    id: &str,
) -> Option<SystemTime> {
    match fs::metadata(path).and_then(|meta| meta.modified()) {
        Ok(time) => Some(time),
        Err(source) => {
            let err = ShaderError::TimestampQuery {
                path: path.to_path_buf(),
                source,
            };
            sink.report(Severity::Warning, id, &err.to_string());
            None
        }
    }
}
