//! Deduplication and assembly of outline chunks.

use std::collections::HashSet;

use log::debug;

use super::capture::{Capture, CaptureKind};
use super::trim::{extract_span, trim_class_signature, trim_signature};

/// Separator between chunks in the final outline
pub const CHUNK_SEPARATOR: &str = "\n\n";

// ============ Processed Keys ============

/// Final chunk texts already emitted during one extraction
#[derive(Debug, Default)]
pub struct ProcessedKeys {
    keys: HashSet<String>,
}

impl ProcessedKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key; returns `false` if it was already present
    pub fn insert(&mut self, key: &str) -> bool {
        if self.keys.contains(key) {
            return false;
        }
        self.keys.insert(key.to_string())
    }
}

// ============ Assembler ============

/// Turns captures into chunks for a single file.
///
/// Captures must be pushed in ascending `start_row` order; the assembler keeps
/// push order. [`finish`](Self::finish) may be called at any point and returns
/// what has been accepted so far.
pub struct ChunkAssembler<'a> {
    lines: &'a [&'a str],
    processed: ProcessedKeys,
    chunks: Vec<String>,
}

impl<'a> ChunkAssembler<'a> {
    pub fn new(lines: &'a [&'a str]) -> Self {
        Self {
            lines,
            processed: ProcessedKeys::new(),
            chunks: Vec::new(),
        }
    }

    /// Build the chunk for one capture. Returns `true` if it was kept.
    ///
    /// Out-of-range and irrelevant captures, empty chunks and repeated
    /// structural chunks are skipped.
    pub fn push(&mut self, capture: &Capture) -> bool {
        let Capture { start_row, end_row, kind, body } = *capture;
        if start_row >= self.lines.len() || end_row < start_row {
            return false;
        }

        let text = match kind {
            CaptureKind::Comment
            | CaptureKind::TypeDefinition
            | CaptureKind::Import
            | CaptureKind::Property => extract_span(self.lines, start_row, end_row),
            CaptureKind::ClassDefinition => trim_class_signature(self.lines, start_row, end_row),
            CaptureKind::Signature => trim_signature(self.lines, start_row, end_row, body),
            CaptureKind::Irrelevant => return false,
        };

        if text.is_empty() {
            return false;
        }
        if kind.dedupes() && !self.processed.insert(&text) {
            debug!("Skipping duplicate {:?} chunk at row {}", kind, start_row);
            return false;
        }

        self.chunks.push(text);
        true
    }

    /// Join the accepted chunks with a blank line between them
    pub fn finish(self) -> String {
        self.chunks.join(CHUNK_SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_processed_keys() {
        let mut keys = ProcessedKeys::new();
        assert!(keys.insert("fn a()"));
        assert!(!keys.insert("fn a()"));
        assert!(keys.insert("fn b()"));
    }

    #[test]
    fn test_empty_assembler_finishes_empty() {
        let lines = ["fn a() {}"];
        assert_eq!(ChunkAssembler::new(&lines).finish(), "");
    }

    #[test]
    fn test_duplicate_signatures_collapse() {
        let lines = [
            "foo(x: int): int {",
            "  return x;",
            "}",
            "foo(x: int): int {",
            "  return x + 1;",
            "}",
        ];
        let mut assembler = ChunkAssembler::new(&lines);
        assert!(assembler.push(&Capture::new(0, 2, CaptureKind::Signature)));
        assert!(!assembler.push(&Capture::new(3, 5, CaptureKind::Signature)));
        assert_eq!(assembler.finish(), "foo(x: int): int");
    }

    #[test]
    fn test_comments_repeat() {
        let lines = ["// MIT License", "import a from 'a';", "// MIT License"];
        let mut assembler = ChunkAssembler::new(&lines);
        assert!(assembler.push(&Capture::new(0, 0, CaptureKind::Comment)));
        assert!(assembler.push(&Capture::new(1, 1, CaptureKind::Import)));
        assert!(assembler.push(&Capture::new(2, 2, CaptureKind::Comment)));
        assert_eq!(assembler.finish(), "// MIT License\n\nimport a from 'a';\n\n// MIT License");
    }

    #[test]
    fn test_comment_text_does_not_block_structural_chunk() {
        let lines = ["type A = B;", "type A = B;"];
        let mut assembler = ChunkAssembler::new(&lines);
        assert!(assembler.push(&Capture::new(0, 0, CaptureKind::Comment)));
        assert!(assembler.push(&Capture::new(1, 1, CaptureKind::TypeDefinition)));
    }

    #[test]
    fn test_out_of_range_capture_skipped() {
        let lines = ["import os"];
        let mut assembler = ChunkAssembler::new(&lines);
        assert!(!assembler.push(&Capture::new(4, 6, CaptureKind::Import)));
        assert!(!assembler.push(&Capture::new(0, 0, CaptureKind::Irrelevant)));
        assert_eq!(assembler.finish(), "");
    }

    #[test]
    fn test_empty_chunks_dropped() {
        let lines = ["", "   ", "class A {"];
        let mut assembler = ChunkAssembler::new(&lines);
        assert!(!assembler.push(&Capture::new(0, 1, CaptureKind::Comment)));
        assert!(assembler.push(&Capture::new(2, 2, CaptureKind::ClassDefinition)));
        assert_eq!(assembler.finish(), "class A");
    }

    #[test]
    fn test_partial_result_available_mid_stream() {
        let lines = ["use std::fmt;", "use std::io;"];
        let mut assembler = ChunkAssembler::new(&lines);
        assembler.push(&Capture::new(0, 0, CaptureKind::Import));
        assert_eq!(assembler.finish(), "use std::fmt;");
    }
}
