//! Language resolution, grammars and capture queries.

use std::path::Path;

use tree_sitter::{Language, Parser};

use crate::error::Result;

// ============ Capture Queries ============

const TYPESCRIPT_QUERY: &str = r#"
(comment) @comment
(import_statement) @definition.import
(function_declaration) @definition.function
(generator_function_declaration) @definition.function
(lexical_declaration (variable_declarator value: (arrow_function))) @definition.function
(function_signature) @definition.function
(method_definition) @definition.method
(abstract_method_signature) @definition.method
(class_declaration) @definition.class
(abstract_class_declaration) @definition.class
(interface_declaration) @definition.interface
(type_alias_declaration) @definition.type
(enum_declaration) @definition.enum
(public_field_definition) @definition.property
"#;

const JAVASCRIPT_QUERY: &str = r#"
(comment) @comment
(import_statement) @definition.import
(function_declaration) @definition.function
(generator_function_declaration) @definition.function
(lexical_declaration (variable_declarator value: (arrow_function))) @definition.function
(method_definition) @definition.method
(class_declaration) @definition.class
(field_definition) @definition.property
"#;

const PYTHON_QUERY: &str = r#"
(comment) @comment
(import_statement) @definition.import
(import_from_statement) @definition.import
(function_definition) @definition.function
(class_definition) @definition.class
"#;

const RUST_QUERY: &str = r#"
(line_comment) @comment
(block_comment) @comment
(use_declaration) @definition.import
(function_item) @definition.function
(function_signature_item) @definition.method
(impl_item) @definition.class
(trait_item) @definition.class
(struct_item) @definition.type
(enum_item) @definition.enum
(type_item) @definition.type
"#;

const GO_QUERY: &str = r#"
(comment) @comment
(import_declaration) @definition.import
(function_declaration) @definition.function
(method_declaration) @definition.method
(type_declaration) @definition.type
"#;

const C_QUERY: &str = r#"
(comment) @comment
(preproc_include) @definition.import
(function_definition) @definition.function
(declaration declarator: (function_declarator)) @definition.function
(type_definition) @definition.type
"#;

// ============ Supported Languages ============

/// Languages with a grammar and a capture query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportedLanguage {
    TypeScript,
    TypeScriptTsx,
    JavaScript,
    JavaScriptJsx,
    Python,
    Rust,
    Go,
    C,
}

impl SupportedLanguage {
    /// Every supported language, in a stable order
    pub const ALL: [SupportedLanguage; 8] = [
        Self::TypeScript,
        Self::TypeScriptTsx,
        Self::JavaScript,
        Self::JavaScriptJsx,
        Self::Python,
        Self::Rust,
        Self::Go,
        Self::C,
    ];

    /// Detect language from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "tsx" => Some(Self::TypeScriptTsx),
            "js" | "mjs" | "cjs" => Some(Self::JavaScript),
            "jsx" => Some(Self::JavaScriptJsx),
            "py" | "pyw" | "pyi" => Some(Self::Python),
            "rs" => Some(Self::Rust),
            "go" => Some(Self::Go),
            "c" | "h" => Some(Self::C),
            _ => None,
        }
    }

    /// Detect language from a file path; only the extension is consulted
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Lowercase display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::TypeScriptTsx => "tsx",
            Self::JavaScript => "javascript",
            Self::JavaScriptJsx => "jsx",
            Self::Python => "python",
            Self::Rust => "rust",
            Self::Go => "go",
            Self::C => "c",
        }
    }

    /// Get the tree-sitter language for this file type
    pub fn tree_sitter_language(&self) -> Language {
        match self {
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::TypeScriptTsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            Self::JavaScript | Self::JavaScriptJsx => tree_sitter_javascript::LANGUAGE.into(),
            Self::Python => tree_sitter_python::LANGUAGE.into(),
            Self::Rust => tree_sitter_rust::LANGUAGE.into(),
            Self::Go => tree_sitter_go::LANGUAGE.into(),
            Self::C => tree_sitter_c::LANGUAGE.into(),
        }
    }

    /// Source of the capture query for this language
    pub fn query_source(&self) -> &'static str {
        match self {
            Self::TypeScript | Self::TypeScriptTsx => TYPESCRIPT_QUERY,
            Self::JavaScript | Self::JavaScriptJsx => JAVASCRIPT_QUERY,
            Self::Python => PYTHON_QUERY,
            Self::Rust => RUST_QUERY,
            Self::Go => GO_QUERY,
            Self::C => C_QUERY,
        }
    }

    /// Build a fresh parser for this language.
    ///
    /// Parsers hold per-parse state and are not `Sync`, so each extraction
    /// call builds its own.
    pub fn parser(&self) -> Result<Parser> {
        let mut parser = Parser::new();
        parser.set_language(&self.tree_sitter_language())?;
        Ok(parser)
    }
}
