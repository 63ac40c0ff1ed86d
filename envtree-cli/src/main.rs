//! envtree — render templates from environment variables.
//!
//! # Usage
//!
//! ```text
//! envtree [--envprefix <PREFIX>]                      # stdin -> stdout
//! envtree [--envprefix <PREFIX>] INPUT_DIR OUTPUT_DIR # mirror a tree
//! ```
//!
//! Only environment variables whose lower-cased name starts with the prefix
//! are exposed to templates, with the prefix stripped from the key. In tree
//! mode, files ending in `.raw` are copied verbatim (suffix removed); all
//! other files are rendered. Permission modes and modification times of the
//! output tree match the input tree entry-for-entry.

use std::io;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;

use envtree_renderer::{Context, TeraEngine};
use envtree_sync::{render_stream, sync_tree};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "envtree",
    version,
    about = "Render templates from prefixed environment variables, \
             on a single stream or across a directory tree",
    long_about = None,
)]
struct Cli {
    /// Prefix of environment variable names exposed to templates
    /// (matched case-insensitively, stripped from the key).
    #[arg(long, value_name = "PREFIX", default_value = "deployvar_")]
    envprefix: String,

    /// Directory tree to mirror; omit both directories to render stdin.
    #[arg(value_name = "INPUT_DIR", requires = "output_dir")]
    input_dir: Option<PathBuf>,

    /// Where the rendered tree is written.
    #[arg(value_name = "OUTPUT_DIR", requires = "input_dir")]
    output_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    // One context per invocation, diagnostics to stderr, before any output
    // is produced.
    let mut stderr = io::stderr();
    let ctx = Context::from_env(&cli.envprefix, &mut stderr)
        .context("failed to build template context from environment")?;
    let engine = TeraEngine::new();

    match (cli.input_dir, cli.output_dir) {
        (Some(input_dir), Some(output_dir)) => {
            sync_tree(&engine, &ctx, &input_dir, &output_dir).with_context(|| {
                format!(
                    "sync failed from '{}' to '{}'",
                    input_dir.display(),
                    output_dir.display()
                )
            })
        }
        (None, None) => {
            let mut stdin = io::stdin().lock();
            let mut stdout = io::stdout().lock();
            render_stream(&engine, &ctx, &mut stdin, &mut stdout)
                .context("failed to render template from stdin")
        }
        // clap `requires` rejects a lone INPUT_DIR or OUTPUT_DIR before we
        // get here.
        _ => unreachable!("positional arguments are validated by clap"),
    }
}
