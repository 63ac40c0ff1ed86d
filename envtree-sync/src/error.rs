//! Error types for envtree-sync.

use std::path::PathBuf;

use thiserror::Error;

use envtree_renderer::RenderError;

/// All errors that can arise from stream rendering and tree synchronization.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An error from the rendering engine or context construction.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A template file whose bytes are not valid UTF-8 and therefore cannot
    /// be parsed as a template. Raw files have no such restriction.
    #[error("template at {path} is not valid UTF-8")]
    NonUtf8Template { path: PathBuf },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
