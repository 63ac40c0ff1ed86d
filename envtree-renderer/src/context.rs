//! Rendering context — key/value payload built from filtered environment
//! entries.
//!
//! Only variables whose lower-cased name starts with the configured prefix
//! are exposed to templates; the prefix is stripped and the remaining key is
//! stored lower-case. One `var: <key>=<value>` diagnostic line per retained
//! entry is written to the supplied sink, with credential-looking keys
//! (containing `pass` or `pwd`) redacted in the printed value only.

use std::collections::HashMap;
use std::io::Write;

use serde::Serialize;

use crate::error::RenderError;

/// Replacement shown in diagnostics for credential-looking values.
const REDACTED: &str = "***";

/// Immutable key/value mapping exposed to template rendering.
///
/// Built once per invocation; duplicate normalized keys resolve to the
/// last-seen value.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Context {
    vars: HashMap<String, String>,
}

impl Context {
    /// Build a [`Context`] from the current process environment.
    ///
    /// Entries with non-Unicode names or values are a fatal error, matching
    /// the fail-fast policy for malformed entries.
    pub fn from_env(prefix: &str, diagnostics: &mut dyn Write) -> Result<Self, RenderError> {
        let mut ctx = Context::default();
        let prefix = prefix.to_lowercase();
        for (name, value) in std::env::vars_os() {
            let name = name.into_string().map_err(|raw| RenderError::NonUnicode {
                entry: raw.to_string_lossy().into_owned(),
            })?;
            let value = value.into_string().map_err(|raw| RenderError::NonUnicode {
                entry: format!("{}={}", name, raw.to_string_lossy()),
            })?;
            ctx.insert_entry(&prefix, &name, value, diagnostics)?;
        }
        Ok(ctx)
    }

    /// Build a [`Context`] from raw `KEY=VALUE` lines.
    ///
    /// A line with no `=` is a fatal [`RenderError::MalformedEntry`], never
    /// silently skipped.
    pub fn from_lines<I, S>(
        prefix: &str,
        lines: I,
        diagnostics: &mut dyn Write,
    ) -> Result<Self, RenderError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ctx = Context::default();
        let prefix = prefix.to_lowercase();
        for line in lines {
            let line = line.as_ref();
            let (name, value) = line
                .split_once('=')
                .ok_or_else(|| RenderError::MalformedEntry { entry: line.to_string() })?;
            ctx.insert_entry(&prefix, name, value.to_string(), diagnostics)?;
        }
        Ok(ctx)
    }

    /// Normalize one entry and store it if it matches the prefix.
    fn insert_entry(
        &mut self,
        prefix: &str,
        name: &str,
        value: String,
        diagnostics: &mut dyn Write,
    ) -> Result<(), RenderError> {
        let name = name.to_lowercase();
        let Some(key) = name.strip_prefix(prefix) else {
            return Ok(());
        };

        let printed = if key.contains("pass") || key.contains("pwd") {
            REDACTED
        } else {
            value.as_str()
        };
        writeln!(diagnostics, "var: {key}={printed}")?;

        self.vars.insert(key.to_string(), value);
        Ok(())
    }

    /// Look up a variable by its normalized key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        tera::Context::from_serialize(self).map_err(RenderError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(prefix: &str, lines: &[&str]) -> (Context, String) {
        let mut diag = Vec::new();
        let ctx = Context::from_lines(prefix, lines, &mut diag).expect("context");
        (ctx, String::from_utf8(diag).expect("utf8 diagnostics"))
    }

    #[test]
    fn prefix_is_stripped_and_key_lowercased() {
        let (ctx, _) = build("deployvar_", &["DEPLOYVAR_DB_HOST=db.internal"]);
        assert_eq!(ctx.len(), 1);
        assert_eq!(ctx.get("db_host"), Some("db.internal"));
    }

    #[test]
    fn non_matching_entries_are_discarded() {
        let (ctx, diag) = build("deployvar_", &["PATH=/usr/bin", "HOME=/root"]);
        assert!(ctx.is_empty());
        assert!(diag.is_empty(), "no diagnostics for discarded entries");
    }

    #[test]
    fn prefix_match_is_case_insensitive_on_the_source_key() {
        let (ctx, _) = build("deployvar_", &["DeployVar_Name=world"]);
        assert_eq!(ctx.get("name"), Some("world"));
    }

    #[test]
    fn mixed_case_prefix_argument_is_normalized() {
        let (ctx, _) = build("DEPLOYVAR_", &["deployvar_name=world"]);
        assert_eq!(ctx.get("name"), Some("world"));
    }

    #[test]
    fn last_duplicate_wins() {
        let (ctx, _) = build(
            "deployvar_",
            &["DEPLOYVAR_PORT=8080", "deployvar_port=9090"],
        );
        assert_eq!(ctx.len(), 1);
        assert_eq!(ctx.get("port"), Some("9090"));
    }

    #[test]
    fn diagnostic_line_format_is_exact() {
        let (_, diag) = build("deployvar_", &["DEPLOYVAR_NAME=world"]);
        assert_eq!(diag, "var: name=world\n");
    }

    #[test]
    fn pass_and_pwd_keys_are_redacted_in_diagnostics_only() {
        let (ctx, diag) = build(
            "deployvar_",
            &["DEPLOYVAR_DB_PASS=hunter2", "DEPLOYVAR_ROOT_PWD=toor"],
        );
        assert!(diag.contains("var: db_pass=***"));
        assert!(diag.contains("var: root_pwd=***"));
        assert!(!diag.contains("hunter2"));
        assert!(!diag.contains("toor"));
        // Stored values are the real ones.
        assert_eq!(ctx.get("db_pass"), Some("hunter2"));
        assert_eq!(ctx.get("root_pwd"), Some("toor"));
    }

    #[test]
    fn entry_without_equals_is_fatal() {
        let mut diag = Vec::new();
        let err = Context::from_lines("deployvar_", ["BADENTRY"], &mut diag)
            .expect_err("missing '=' must abort");
        assert!(matches!(err, RenderError::MalformedEntry { entry } if entry == "BADENTRY"));
    }

    #[test]
    fn value_may_contain_equals_signs() {
        let (ctx, _) = build("deployvar_", &["DEPLOYVAR_OPTS=a=1,b=2"]);
        assert_eq!(ctx.get("opts"), Some("a=1,b=2"));
    }

    #[test]
    fn from_env_picks_up_process_variables() {
        let mut diag = Vec::new();
        std::env::set_var("ENVTREE_TEST_PFX_CITY", "lisbon");
        let ctx = Context::from_env("envtree_test_pfx_", &mut diag).expect("context");
        std::env::remove_var("ENVTREE_TEST_PFX_CITY");
        assert_eq!(ctx.get("city"), Some("lisbon"));
        let diag = String::from_utf8(diag).unwrap();
        assert!(diag.contains("var: city=lisbon"));
    }

    #[test]
    fn to_tera_context_exposes_keys_at_top_level() {
        let (ctx, _) = build("deployvar_", &["DEPLOYVAR_NAME=world"]);
        let tera_ctx = ctx.to_tera_context().expect("conversion");
        assert_eq!(
            tera_ctx.get("name").and_then(|v| v.as_str()),
            Some("world")
        );
    }
}
