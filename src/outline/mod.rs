//! Outline extraction: AST-guided code condensation
//!
//! Turns a source file into an outline that keeps comments, imports, type
//! definitions and properties in full, but only the headers of functions,
//! methods and classes.
//!
//! ## Architecture
//!
//! ```text
//! outline/
//! ├── mod.rs       - Extractor, orchestration
//! ├── language.rs  - Language detection, grammars, capture queries
//! ├── capture.rs   - Capture classification, query execution
//! ├── trim.rs      - Span extraction, signature/class trimming
//! └── chunk.rs     - Deduplication, assembly
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use code_outline::{OutlineExtractor, PackConfig};
//!
//! let extractor = OutlineExtractor::new()?;
//! let outline = extractor.extract("def foo(x):\n    return x\n", "foo.py", &PackConfig::default());
//! assert_eq!(outline.as_text(), Some("def foo(x):"));
//! ```

pub mod capture;
pub mod chunk;
pub mod language;
mod trim;

use std::collections::HashMap;
use std::path::Path;

use log::{debug, warn};

use crate::config::PackConfig;
use crate::error::{OutlineError, Result};

pub use capture::{BodyStart, Capture, CaptureKind, CompiledQuery};
pub use chunk::{ChunkAssembler, ProcessedKeys};
pub use language::SupportedLanguage;

// ============ Result Type ============

/// Outcome of extracting one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outline {
    /// The assembled outline; empty when nothing qualified
    Text(String),
    /// No grammar is available for the file
    Unsupported,
}

impl Outline {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Unsupported => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            Self::Unsupported => None,
        }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported)
    }
}

// ============ Assembly ============

/// Assemble an outline from source lines and classified captures.
///
/// Captures are stably sorted by start row, so captures sharing a row keep
/// their given order.
pub fn build_outline(lines: &[&str], mut captures: Vec<Capture>) -> String {
    captures.sort_by_key(|capture| capture.start_row);

    let mut assembler = ChunkAssembler::new(lines);
    for capture in &captures {
        assembler.push(capture);
    }
    assembler.finish()
}

// ============ Extractor ============

/// Holds one compiled query per supported language.
///
/// Build it once and share it by reference; it is `Send + Sync` and holds no
/// per-call state.
pub struct OutlineExtractor {
    queries: HashMap<SupportedLanguage, CompiledQuery>,
}

impl OutlineExtractor {
    /// Compile the queries of every supported language
    pub fn new() -> Result<Self> {
        Self::with_languages(&SupportedLanguage::ALL)
    }

    /// Compile queries for a subset of languages; other files resolve as unsupported
    pub fn with_languages(languages: &[SupportedLanguage]) -> Result<Self> {
        let mut queries = HashMap::new();
        for &language in languages {
            queries.insert(language, CompiledQuery::compile(language)?);
        }
        Ok(Self { queries })
    }

    pub fn supports(&self, language: SupportedLanguage) -> bool {
        self.queries.contains_key(&language)
    }

    /// Extract the outline of one file.
    ///
    /// Never fails: parse faults are logged and produce whatever was
    /// assembled before them. `_config` is reserved for per-language policy.
    pub fn extract(
        &self,
        content: &str,
        file_path: impl AsRef<Path>,
        _config: &PackConfig,
    ) -> Outline {
        let file_path = file_path.as_ref();
        let Some(query) = SupportedLanguage::from_path(file_path)
            .and_then(|language| self.queries.get(&language))
        else {
            return Outline::Unsupported;
        };

        let lines: Vec<&str> = content.lines().collect();
        let outline = match parse_captures(content, query) {
            Ok(captures) => build_outline(&lines, captures),
            Err(err) => {
                warn!("Outline extraction failed for {}: {}", file_path.display(), err);
                String::new()
            }
        };

        debug!(
            "Outlined {} ({}): {} lines -> {} lines",
            file_path.display(),
            query.language().name(),
            lines.len(),
            outline.lines().count()
        );
        Outline::Text(outline)
    }
}

/// Parse `content` and run the language query over the tree
fn parse_captures(content: &str, query: &CompiledQuery) -> Result<Vec<Capture>> {
    let language = query.language();
    let mut parser = language.parser()?;
    let tree = parser
        .parse(content, None)
        .ok_or(OutlineError::ParseFailed { language: language.name() })?;

    Ok(query.captures(tree.root_node(), content.as_bytes()))
}
