//! Error types with rich diagnostics using miette
//!
//! Only two things can abort a render: a scene description that exists but
//! cannot be understood, and an output file that cannot be produced. Every
//! other irregularity (unknown compass tokens, unknown item types, bad
//! dimensions) has a documented fallback and never surfaces here.

use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

// ============================================================================
// Schema Errors
// ============================================================================

/// Errors raised while loading or persisting a scene description
#[derive(Error, Diagnostic, Debug)]
pub enum SchemaError {
    #[error("cannot read scene description {}", .path.display())]
    #[diagnostic(code(roomplot::schema::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed scene description: {message}")]
    #[diagnostic(
        code(roomplot::schema::parse),
        help("expected an object with a `room_description` containing `items`, `dimensions`, ...")
    )]
    Parse {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("cannot write default scene description to {}", .path.display())]
    #[diagnostic(code(roomplot::schema::persist))]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot encode scene description")]
    #[diagnostic(code(roomplot::schema::serialize))]
    Serialize(#[from] serde_json::Error),
}

impl SchemaError {
    /// Build a parse error pointing at the line/column serde_json reported.
    pub(crate) fn parse(name: &str, source: &str, err: &serde_json::Error) -> Self {
        let offset = byte_offset(source, err.line(), err.column());
        SchemaError::Parse {
            message: err.to_string(),
            src: NamedSource::new(name, source.to_string()),
            span: SourceSpan::from((offset, 0)),
        }
    }
}

/// Convert a 1-based line and column into a byte offset, clamped to the source.
fn byte_offset(source: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(source.len())
}

// ============================================================================
// Output Errors
// ============================================================================

/// Errors that occur while rasterizing or writing the finished scene
#[derive(Error, Diagnostic, Debug)]
pub enum OutputWriteError {
    #[error("invalid output resolution: {value} dpi")]
    #[diagnostic(code(roomplot::output::invalid_dpi), help("use a positive, finite DPI such as 300"))]
    InvalidDpi { value: f64 },

    #[error("cannot serialize SVG: {message}")]
    #[diagnostic(code(roomplot::output::serialize))]
    Serialize { message: String },

    #[error("generated SVG was rejected by the rasterizer")]
    #[diagnostic(code(roomplot::output::svg))]
    Svg(#[from] usvg::Error),

    #[error("cannot allocate a {width}x{height} drawing surface")]
    #[diagnostic(code(roomplot::output::surface), help("try a lower --dpi"))]
    Surface { width: u32, height: u32 },

    #[error("cannot encode image: {message}")]
    #[diagnostic(code(roomplot::output::encode))]
    Encode { message: String },

    #[error("cannot write {}", .path.display())]
    #[diagnostic(code(roomplot::output::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ============================================================================
// Top-level
// ============================================================================

/// Any error that aborts a render run
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Output(#[from] OutputWriteError),
}
