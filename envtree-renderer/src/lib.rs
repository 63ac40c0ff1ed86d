//! # envtree-renderer
//!
//! Environment-backed rendering context and template engine for envtree.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use envtree_renderer::{Context, TemplateEngine, TeraEngine};
//!
//! fn render_greeting() {
//!     let mut diag = std::io::stderr();
//!     if let Ok(ctx) = Context::from_env("deployvar_", &mut diag) {
//!         let engine = TeraEngine::new();
//!         if let Ok(out) = engine.render("Hello {{ name }}!", &ctx) {
//!             println!("{out}");
//!         }
//!     }
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;

pub use context::Context;
pub use engine::{TemplateEngine, TeraEngine};
pub use error::RenderError;
