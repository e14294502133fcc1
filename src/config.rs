//! Packing configuration.
//!
//! Controls how projects are scanned and which files are read. The outline
//! extractor receives this config untouched; it makes no decisions on it.

use serde::{Deserialize, Serialize};

use crate::error::{OutlineError, Result};

/// Files larger than this are never read
pub const DEFAULT_MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Settings for scanning and outlining a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackConfig {
    /// Upper bound on the size of files that get read
    pub max_file_bytes: u64,
    /// Directory names skipped during the walk
    pub ignored_dirs: Vec<String>,
    /// Exact file names skipped during the walk
    pub ignored_files: Vec<String>,
    /// File suffixes (with leading dot) skipped during the walk
    pub ignored_extensions: Vec<String>,
    /// Outline batches on the rayon pool
    pub parallel: bool,
}

impl Default for PackConfig {
    fn default() -> Self {
        let dirs = [
            "node_modules", "target", "dist", "build", "out", ".git",
            ".vscode", ".idea", "__pycache__",
        ];
        let files = [".DS_Store", "Thumbs.db"];
        let extensions = [
            ".png", ".jpg", ".jpeg", ".gif", ".webp", ".ico", ".bmp", ".tiff",
            ".woff", ".woff2", ".ttf", ".eot",
            ".exe", ".dll", ".so", ".dylib", ".bin", ".obj", ".o", ".a", ".lib",
            ".pdf", ".zip", ".tar", ".gz", ".7z", ".rar",
        ];
        Self {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            ignored_dirs: dirs.iter().map(|s| s.to_string()).collect(),
            ignored_files: files.iter().map(|s| s.to_string()).collect(),
            ignored_extensions: extensions.iter().map(|s| s.to_string()).collect(),
            parallel: true,
        }
    }
}

impl PackConfig {
    /// Parse a config from JSON, filling missing fields with defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| OutlineError::invalid_config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.max_file_bytes == 0 {
            return Err(OutlineError::invalid_config("max_file_bytes must be greater than 0"));
        }
        if let Some(ext) = self.ignored_extensions.iter().find(|e| !e.starts_with('.')) {
            return Err(OutlineError::invalid_config(format!(
                "ignored extension {ext:?} must start with '.'"
            )));
        }
        Ok(())
    }

    /// Whether a directory entry with this name is skipped
    pub fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignored_dirs.iter().any(|d| d == name)
    }

    /// Whether a file with this name is skipped, by exact name or extension
    pub fn is_ignored_file(&self, name: &str) -> bool {
        if self.ignored_files.iter().any(|f| f == name) {
            return true;
        }
        let lower = name.to_lowercase();
        self.ignored_extensions.iter().any(|ext| lower.ends_with(ext.as_str()))
    }
}
