use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::Context;
use chrono::NaiveDate;
use regex::{Regex, RegexBuilder};
use serde_json::{Map, Value};

use crate::error::ConvertError;
use crate::slug::slugify;
use crate::transform::COMPONENT_IMPORT;

/// One parsed note: the leading attribute block as an insertion-ordered map
/// (serde_json with `preserve_order`) plus the untouched body text.
#[derive(Debug, Clone)]
pub(crate) struct Document {
    pub attrs: Map<String, Value>,
    pub body: String,
}

impl Document {
    /// Read and split a note file. The path must exist; the check runs
    /// before any parsing so nothing is attempted on a missing file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            anyhow::bail!(ConvertError::NotFound(path.to_path_buf()));
        }
        let content =
            fs::read_to_string(path).with_context(|| format!("while reading {:?}", path))?;
        Ok(Self::parse(&content))
    }

    /// Split the pandoc-style `---` attribute block from the body and parse
    /// its `key: value` lines. Both delimiters are whole lines; the closing
    /// one may end the file, and whitespace before the block is ignored.
    /// Values keep everything after the first `:`, trimmed, with one pair
    /// of surrounding quotes removed; comment lines and lines without a `:`
    /// are skipped. A note without a block parses as an empty map plus the
    /// whole content as body.
    pub fn parse(content: &str) -> Self {
        static HEADER: LazyLock<Regex> = LazyLock::new(|| {
            RegexBuilder::new(r"\A---[ \t]*\r?\n(.*?)^---[ \t]*(?:\r?\n|\z)(.*)")
                .dot_matches_new_line(true)
                .multi_line(true)
                .build()
                .unwrap()
        });

        let trimmed = content.trim_start();
        let mut attrs = Map::new();
        let body = if let Some(caps) = HEADER.captures(trimmed) {
            for line in caps[1].split('\n') {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some((key, value)) = line.split_once(':') {
                    attrs.insert(
                        key.trim().to_string(),
                        Value::String(unquote(value.trim())),
                    );
                }
            }
            caps[2].to_string()
        } else {
            content.to_string()
        };

        Self { attrs, body }
    }

    /// The one hard metadata requirement: a non-empty `title`.
    pub fn validate(&self) -> Result<(), ConvertError> {
        match self.attrs.get("title").and_then(Value::as_str) {
            Some(title) if !title.is_empty() => Ok(()),
            _ => Err(ConvertError::MissingTitle),
        }
    }

    /// Explicit `slug` attribute if the note sets one, otherwise derived
    /// from the title and injected so the rendered block always carries it.
    pub fn derive_slug(&mut self) -> String {
        if let Some(slug) = self.attrs.get("slug").and_then(Value::as_str) {
            return slug.to_string();
        }
        let title = self.attrs.get("title").and_then(Value::as_str).unwrap_or("");
        let slug = slugify(title);
        self.attrs.insert("slug".to_string(), Value::String(slug.clone()));
        slug
    }

    /// Publishing defaults, set-if-absent only: `pubDate` (the run date),
    /// `description` (empty), `draft` (true). Keys the note already defines
    /// are never touched.
    pub fn fill_defaults(&mut self, today: NaiveDate) {
        self.attrs
            .entry("pubDate")
            .or_insert_with(|| Value::String(today.format("%Y-%m-%d").to_string()));
        self.attrs
            .entry("description")
            .or_insert_with(|| Value::String(String::new()));
        self.attrs.entry("draft").or_insert(Value::Bool(true));
    }

    /// Serialize the attribute block, the component import and the (already
    /// transformed) body. Values are written verbatim in map order; no
    /// quoting or escaping is added, so a value containing `"` yields
    /// malformed frontmatter. Known limitation.
    pub fn render(&self, body: &str) -> String {
        let mut out = String::from("---\n");
        for (key, value) in &self.attrs {
            match value {
                Value::String(s) => {
                    let _ = writeln!(out, "{key}: {s}");
                }
                other => {
                    let _ = writeln!(out, "{key}: {other}");
                }
            }
        }
        out.push_str("---\n\n");
        out.push_str(COMPONENT_IMPORT);
        out.push_str("\n\n");
        out.push_str(body);
        out
    }
}

/// Remove one matching pair of surrounding double or single quotes, the way
/// a YAML loader would read a quoted scalar.
fn unquote(value: &str) -> String {
    if value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')))
    {
        value[1..value.len() - 1].to_string()
    } else {
        value.to_string()
    }
}
