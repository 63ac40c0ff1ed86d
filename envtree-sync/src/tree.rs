//! Tree synchronizer — mirror an input directory into an output directory,
//! rendering each file through the engine unless it carries the raw suffix.
//!
//! Metadata preservation happens in two passes: files get their permission
//! mode and modification time fixed up inline (they are never written to
//! again), while directory timestamps are recorded during the walk and
//! applied only after it completes, because every write inside a directory
//! disturbs that directory's own mtime.

use std::fs;
use std::path::{Path, PathBuf};

use filetime::FileTime;

use envtree_renderer::{Context, TemplateEngine};

use crate::error::{io_err, SyncError};

/// Reserved suffix marking a file for verbatim copy; stripped from the
/// output name.
pub const RAW_SUFFIX: &str = ".raw";

/// Deferred mtime fix-up entry for one output directory.
struct DirTimestamp {
    target: PathBuf,
    mtime: FileTime,
}

/// Recursively mirror `input_root` into `output_root`.
///
/// Walks the input tree depth-first in pre-order. Directories are recreated
/// with matching permission modes; `.raw` files are copied byte-for-byte
/// with the suffix stripped; every other file is rendered against `ctx`.
/// After the walk, a flat fix-up pass restores directory mtimes in first
/// visited order — all writes have completed by then, so nothing disturbs
/// them afterwards.
///
/// Any filesystem or engine failure aborts immediately; the output tree is
/// left in whatever partial state it reached.
pub fn sync_tree(
    engine: &dyn TemplateEngine,
    ctx: &Context,
    input_root: &Path,
    output_root: &Path,
) -> Result<(), SyncError> {
    let mut dir_times = Vec::new();
    visit(engine, ctx, input_root, output_root, &mut dir_times)?;

    for DirTimestamp { target, mtime } in dir_times {
        filetime::set_file_times(&target, mtime, mtime).map_err(|e| io_err(&target, e))?;
    }
    Ok(())
}

fn visit(
    engine: &dyn TemplateEngine,
    ctx: &Context,
    input_path: &Path,
    target_path: &Path,
    dir_times: &mut Vec<DirTimestamp>,
) -> Result<(), SyncError> {
    let meta = fs::metadata(input_path).map_err(|e| io_err(input_path, e))?;
    if !meta.is_dir() {
        return sync_file(engine, ctx, input_path, target_path, &meta);
    }

    fs::create_dir_all(target_path).map_err(|e| io_err(target_path, e))?;
    fs::set_permissions(target_path, meta.permissions())
        .map_err(|e| io_err(target_path, e))?;
    dir_times.push(DirTimestamp {
        target: target_path.to_path_buf(),
        mtime: FileTime::from_last_modification_time(&meta),
    });

    // Children in lexical order for a stable traversal.
    let mut names = Vec::new();
    for entry in fs::read_dir(input_path).map_err(|e| io_err(input_path, e))? {
        let entry = entry.map_err(|e| io_err(input_path, e))?;
        names.push(entry.file_name());
    }
    names.sort();

    for name in names {
        visit(
            engine,
            ctx,
            &input_path.join(&name),
            &target_path.join(&name),
            dir_times,
        )?;
    }
    Ok(())
}

fn sync_file(
    engine: &dyn TemplateEngine,
    ctx: &Context,
    input_path: &Path,
    target_path: &Path,
    meta: &fs::Metadata,
) -> Result<(), SyncError> {
    let data = fs::read(input_path).map_err(|e| io_err(input_path, e))?;

    let (target, output) = match raw_output_path(target_path) {
        Some(stripped) => (stripped, data),
        None => {
            let source = String::from_utf8(data).map_err(|_| SyncError::NonUtf8Template {
                path: input_path.to_path_buf(),
            })?;
            let rendered = engine.render(&source, ctx)?;
            (target_path.to_path_buf(), rendered.into_bytes())
        }
    };

    fs::write(&target, &output).map_err(|e| io_err(&target, e))?;
    fs::set_permissions(&target, meta.permissions()).map_err(|e| io_err(&target, e))?;

    let mtime = FileTime::from_last_modification_time(meta);
    filetime::set_file_times(&target, mtime, mtime).map_err(|e| io_err(&target, e))?;

    log::debug!("wrote: {}", target.display());
    Ok(())
}

/// If the file name ends with [`RAW_SUFFIX`], the output path with the
/// suffix stripped; `None` for template files.
fn raw_output_path(target: &Path) -> Option<PathBuf> {
    let name = target.file_name()?.to_str()?;
    let stripped = name.strip_suffix(RAW_SUFFIX)?;
    Some(target.with_file_name(stripped))
}
