//! # envtree-sync
//!
//! Tree synchronization and stream rendering for envtree.
//!
//! Call [`sync_tree`] to mirror an input directory into an output directory,
//! rendering every file through the supplied engine (or copying `.raw` files
//! verbatim) while preserving permission modes and modification times.
//! Call [`render_stream`] for single-shot stdin→stdout style rendering.

pub mod error;
pub mod stream;
pub mod tree;

pub use error::SyncError;
pub use stream::render_stream;
pub use tree::{sync_tree, RAW_SUFFIX};
