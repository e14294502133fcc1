use std::path::PathBuf;

use thiserror::Error;

/// Result type for outline operations
pub type Result<T> = std::result::Result<T, OutlineError>;

/// Errors raised by the fallible surfaces of the crate.
///
/// Extraction itself never fails: parse and query faults are logged and
/// degrade to a partial outline. These variants cover construction, config
/// loading and file access.
#[derive(Error, Debug)]
pub enum OutlineError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The grammar could not be loaded into a parser
    #[error("Failed to set language: {0}")]
    ParserSetup(#[from] tree_sitter::LanguageError),

    /// A capture query did not compile against its grammar
    #[error("Failed to compile {language} query: {message}")]
    QueryCompile { language: &'static str, message: String },

    /// The parser gave up on the input
    #[error("Failed to parse {language} content")]
    ParseFailed { language: &'static str },

    /// File exceeds the configured size limit
    #[error("{} is {size} bytes, limit is {limit}", path.display())]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl OutlineError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
