//! Capture classification and query execution.
//!
//! Capture names are classified once, when a query is compiled, so that every
//! capture coming out of a parse already carries its [`CaptureKind`].

use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Query, QueryCursor};

use super::language::SupportedLanguage;
use crate::error::{OutlineError, Result};

// ============ Classification ============

/// What a capture contributes to the outline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureKind {
    /// Kept verbatim, never deduplicated
    Comment,
    /// Interfaces, type aliases, enums, structs: kept verbatim
    TypeDefinition,
    /// Declaration line plus an optional inheritance line
    ClassDefinition,
    /// Kept verbatim
    Import,
    /// Kept verbatim
    Property,
    /// Function/method header with the body trimmed off
    Signature,
    /// Not part of the outline
    Irrelevant,
}

impl CaptureKind {
    /// Classify a capture tag by the vocabulary it contains.
    ///
    /// The mapping is total: anything unrecognised is `Irrelevant`. `class`
    /// is checked before `type` so class tags never fall into the verbatim
    /// type bucket.
    pub fn from_tag(tag: &str) -> Self {
        if tag.contains("comment") {
            Self::Comment
        } else if tag.contains("class") {
            Self::ClassDefinition
        } else if tag.contains("interface") || tag.contains("type") || tag.contains("enum") {
            Self::TypeDefinition
        } else if tag.contains("import") {
            Self::Import
        } else if tag.contains("function") || tag.contains("method") {
            Self::Signature
        } else if tag.contains("property") {
            Self::Property
        } else {
            Self::Irrelevant
        }
    }

    /// Whether chunks of this kind go through the processed-key set
    pub fn dedupes(&self) -> bool {
        !matches!(self, Self::Comment | Self::Irrelevant)
    }
}

// ============ Captures ============

/// Where a node's `body` child begins (0-indexed row, byte column)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyStart {
    pub row: usize,
    pub column: usize,
}

/// A classified span of source rows (0-indexed, inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capture {
    pub start_row: usize,
    pub end_row: usize,
    pub kind: CaptureKind,
    /// Start of the node's `body` child, when the grammar exposes one
    pub body: Option<BodyStart>,
}

impl Capture {
    pub fn new(start_row: usize, end_row: usize, kind: CaptureKind) -> Self {
        Self {
            start_row,
            end_row,
            kind,
            body: None,
        }
    }

    fn from_node(node: Node, kind: CaptureKind) -> Self {
        let start = node.start_position();
        let end = node.end_position();
        // Nodes that swallow their trailing newline end at column 0 of the next row
        let end_row = if end.column == 0 && end.row > start.row {
            end.row - 1
        } else {
            end.row
        };
        Self {
            start_row: start.row,
            end_row,
            kind,
            body: node.child_by_field_name("body").map(|body| {
                let point = body.start_position();
                BodyStart {
                    row: point.row,
                    column: point.column,
                }
            }),
        }
    }
}

// ============ Compiled Queries ============

/// A capture query compiled for one language, with its names pre-classified
pub struct CompiledQuery {
    language: SupportedLanguage,
    query: Query,
    kinds: Vec<CaptureKind>,
}

impl CompiledQuery {
    pub fn compile(language: SupportedLanguage) -> Result<Self> {
        let query = Query::new(&language.tree_sitter_language(), language.query_source())
            .map_err(|e| OutlineError::QueryCompile {
                language: language.name(),
                message: e.to_string(),
            })?;
        let kinds = query
            .capture_names()
            .iter()
            .map(|name| CaptureKind::from_tag(name))
            .collect();

        Ok(Self {
            language,
            query,
            kinds,
        })
    }

    pub fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Run the query over a parsed tree, in match order (not sorted by row).
    /// Irrelevant captures are dropped here.
    pub fn captures(&self, root: Node, source: &[u8]) -> Vec<Capture> {
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&self.query, root, source);
        let mut captures = Vec::new();

        while let Some(m) = matches.next() {
            for capture in m.captures {
                let kind = self
                    .kinds
                    .get(capture.index as usize)
                    .copied()
                    .unwrap_or(CaptureKind::Irrelevant);
                if kind == CaptureKind::Irrelevant {
                    continue;
                }
                captures.push(Capture::from_node(capture.node, kind));
            }
        }

        captures
    }
}
