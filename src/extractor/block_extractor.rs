//! Fenced diagram block extraction.
//!
//! A block is a fenced code span whose info string is the configured diagram
//! language, e.g.
//!
//! ````markdown
//! ```plantuml
//! Alice -> Bob: hello
//! ```
//! ````
//!
//! Matching is lazy: each opening fence pairs with the nearest following
//! triple backtick, even one that opens another block. A fence that is never
//! closed produces nothing.

use crate::config::DiagramConfig;
use crate::error::Result;
use regex::{CaptureMatches, Regex};
use std::borrow::Cow;
use std::ops::Range;

/// One diagram found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'t> {
    /// 1-based position within the document.
    pub ordinal: usize,
    /// Text between the fences, as written.
    pub raw: &'t str,
    /// Byte range of the whole fenced match.
    pub span: Range<usize>,
    /// Trimmed text, framed by the start/end directives.
    pub source: Cow<'t, str>,
}

pub struct BlockExtractor {
    pattern: Regex,
    start_directive: String,
    end_directive: String,
}

impl BlockExtractor {
    pub fn new(config: &DiagramConfig) -> Result<Self> {
        let language = config.language.trim();
        // `\b` after a symbol would demand a word character next.
        let boundary = match language.chars().last() {
            Some(c) if c.is_alphanumeric() || c == '_' => r"\b",
            _ => "",
        };
        let pattern = Regex::new(&format!(
            r"```{}{}\s*([\s\S]*?)```",
            regex::escape(language),
            boundary
        ))?;

        Ok(Self {
            pattern,
            start_directive: config.start_directive.clone(),
            end_directive: config.end_directive.clone(),
        })
    }

    /// Lazily scans `text`; call again to restart from the beginning.
    pub fn blocks<'r, 't>(&'r self, text: &'t str) -> Blocks<'r, 't> {
        Blocks {
            extractor: self,
            captures: self.pattern.captures_iter(text),
            next_ordinal: 1,
        }
    }

    /// Trims `raw` and wraps it unless it already opens with the start directive.
    pub fn normalize<'t>(&self, raw: &'t str) -> Cow<'t, str> {
        let trimmed = raw.trim();
        if trimmed.starts_with(&self.start_directive) {
            Cow::Borrowed(trimmed)
        } else {
            Cow::Owned(format!(
                "{}\n{}\n{}",
                self.start_directive, trimmed, self.end_directive
            ))
        }
    }
}

pub struct Blocks<'r, 't> {
    extractor: &'r BlockExtractor,
    captures: CaptureMatches<'r, 't>,
    next_ordinal: usize,
}

impl<'r, 't> Iterator for Blocks<'r, 't> {
    type Item = Block<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let caps = self.captures.next()?;
        let whole = caps.get(0)?;
        let raw = caps.get(1).map_or("", |m| m.as_str());

        let ordinal = self.next_ordinal;
        self.next_ordinal += 1;

        Some(Block {
            ordinal,
            raw,
            span: whole.range(),
            source: self.extractor.normalize(raw),
        })
    }
}
