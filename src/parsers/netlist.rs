//! Plain-text netlist extractor.
//!
//! Each non-comment line is `NET node node ...`. A node names a pin of a
//! component as `REF:PIN`, `REF.PIN` or `REF-PIN`; the reference designator
//! before the separator becomes a record. References are reported once, in
//! first-seen order, with quantity 1.
//!
//! A net with a single node is still read, so a component tied to one
//! otherwise-unconnected net is not lost.

use super::traits::{ExtractError, FormatConfidence, RecordExtractor};
use crate::model::{ComponentRecord, FileKind, RecordSet};
use indexmap::IndexSet;
use regex::Regex;
use std::sync::LazyLock;

const COMMENT_PREFIXES: [char; 3] = ['#', '*', ';'];

#[allow(clippy::expect_used)]
static NODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*?)[:.\-]([A-Za-z0-9_+\-]+)$").expect("static regex")
});

/// Split a node token into `(reference, pin)`.
#[must_use]
pub fn split_node(token: &str) -> Option<(&str, &str)> {
    let caps = NODE_PATTERN.captures(token)?;
    let reference = caps.get(1)?.as_str();
    let pin = caps.get(2)?.as_str();
    Some((reference, pin))
}

/// Extractor for whitespace-separated netlists
#[derive(Debug, Clone, Copy, Default)]
pub struct NetlistExtractor;

impl NetlistExtractor {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl RecordExtractor for NetlistExtractor {
    fn kind(&self) -> FileKind {
        FileKind::NetlistText
    }

    fn try_extract(&self, content: &str, source: &str) -> Result<RecordSet, ExtractError> {
        let mut references: IndexSet<String> = IndexSet::new();
        let mut nets = 0usize;
        let mut unrecognized = 0usize;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(COMMENT_PREFIXES) {
                continue;
            }
            let mut tokens = line.split_whitespace();
            let Some(_net) = tokens.next() else {
                continue;
            };
            let nodes: Vec<&str> = tokens.collect();
            if nodes.is_empty() {
                continue;
            }
            nets += 1;
            for node in nodes {
                match split_node(node) {
                    Some((reference, _pin)) => {
                        references.insert(reference.to_string());
                    }
                    None => unrecognized += 1,
                }
            }
        }

        if unrecognized > 0 {
            tracing::debug!(
                "{} netlist node(s) in {} did not look like REF:PIN and were ignored",
                unrecognized,
                source
            );
        }
        tracing::debug!(
            "Extracted {} component(s) from {} net(s) in {}",
            references.len(),
            nets,
            source
        );

        let mut set = RecordSet::new(source).with_kind(FileKind::NetlistText);
        for reference in references {
            set.push(
                ComponentRecord::new(reference)
                    .with_quantity(1)
                    .with_source_file(source),
            );
        }
        Ok(set)
    }

    fn detect(&self, content: &str) -> FormatConfidence {
        let mut lines = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_PREFIXES))
            .take(5)
            .peekable();
        if lines.peek().is_none() {
            return FormatConfidence::NONE;
        }
        let mut matched = 0;
        let mut total = 0;
        for line in lines {
            total += 1;
            if line.contains(',') || line.starts_with('<') {
                continue;
            }
            if line.split_whitespace().skip(1).any(|t| split_node(t).is_some()) {
                matched += 1;
            }
        }
        if matched == 0 {
            FormatConfidence::NONE
        } else if matched == total {
            FormatConfidence::HIGH
        } else {
            FormatConfidence::MEDIUM
        }
    }
}
