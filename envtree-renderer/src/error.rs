//! Error types for envtree-renderer.

use thiserror::Error;

/// All errors that can arise from context construction and template rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Tera template engine error (parse or execution).
    #[error("template engine error: {0}")]
    Template(#[from] tera::Error),

    /// An environment entry that could not be split into `KEY=VALUE`.
    #[error("malformed environment entry (no '='): {entry}")]
    MalformedEntry { entry: String },

    /// An environment entry whose name or value is not valid Unicode.
    #[error("environment entry is not valid Unicode: {entry}")]
    NonUnicode { entry: String },

    /// Failure writing a `var:` diagnostic line to the diagnostics sink.
    #[error("diagnostics stream error: {0}")]
    Diagnostics(#[from] std::io::Error),
}
