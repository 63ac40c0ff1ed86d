//! Template engine capability — [`TemplateEngine`] trait and the Tera-backed
//! [`TeraEngine`].
//!
//! The whole template source is parsed as one unit; execution output may be
//! streamed. Autoescaping is disabled: envtree produces plain text, not HTML.

use std::io::Write;

use tera::Tera;

use crate::context::Context;
use crate::error::RenderError;

/// Registered name of the single one-shot template inside a [`Tera`] instance.
const TEMPLATE_NAME: &str = "template";

/// Opaque parse-and-execute capability consumed by the stream renderer and
/// the tree synchronizer.
///
/// Implementations must support variable substitution by context key and must
/// not HTML-escape output.
pub trait TemplateEngine {
    /// Parse `source` as one template and execute it against `ctx`.
    fn render(&self, source: &str, ctx: &Context) -> Result<String, RenderError>;

    /// Like [`TemplateEngine::render`], but stream the rendered output into
    /// `out` as it is produced.
    fn render_to(
        &self,
        source: &str,
        ctx: &Context,
        out: &mut dyn Write,
    ) -> Result<(), RenderError>;
}

/// Tera-based engine with autoescaping disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct TeraEngine;

impl TeraEngine {
    pub fn new() -> Self {
        TeraEngine
    }

    fn compile(source: &str) -> Result<Tera, RenderError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_template(TEMPLATE_NAME, source)?;
        Ok(tera)
    }
}

impl TemplateEngine for TeraEngine {
    fn render(&self, source: &str, ctx: &Context) -> Result<String, RenderError> {
        let tera = Self::compile(source)?;
        let rendered = tera.render(TEMPLATE_NAME, &ctx.to_tera_context()?)?;
        Ok(rendered)
    }

    fn render_to(
        &self,
        source: &str,
        ctx: &Context,
        out: &mut dyn Write,
    ) -> Result<(), RenderError> {
        let tera = Self::compile(source)?;
        tera.render_to(TEMPLATE_NAME, &ctx.to_tera_context()?, out)?;
        Ok(())
    }
}
