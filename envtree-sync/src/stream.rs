//! Single-shot stream renderer — read one template from a reader, render it,
//! write the output to a writer.

use std::io::{Read, Write};
use std::path::PathBuf;

use envtree_renderer::{Context, TemplateEngine};

use crate::error::{io_err, SyncError};

/// Render the entire contents of `input` as one template and write the
/// result to `output`.
///
/// The template is buffered fully before parsing; the engine may stream its
/// output into `output` as it executes. Any engine failure propagates.
pub fn render_stream(
    engine: &dyn TemplateEngine,
    ctx: &Context,
    input: &mut dyn Read,
    output: &mut dyn Write,
) -> Result<(), SyncError> {
    let mut source = String::new();
    input
        .read_to_string(&mut source)
        .map_err(|e| io_err(PathBuf::from("<stdin>"), e))?;
    engine.render_to(&source, ctx, output)?;
    Ok(())
}
