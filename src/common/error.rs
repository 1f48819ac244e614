use miette::Diagnostic;
use thiserror::Error;

/// Errors surfaced while establishing a queryable route set.
///
/// Malformed rows and cells never error; they are dropped or coerced to
/// sentinel values during ingestion. Only a source that yields no usable
/// rows at all is reported.
#[derive(Debug, Error, Diagnostic)]
pub enum LogbookError {
    #[error("failed to read route export")]
    Io(#[from] std::io::Error),

    #[error("route export contained no data rows")]
    #[diagnostic(help("the export should carry a header line followed by one row per route"))]
    EmptyExport,
}
