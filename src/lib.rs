//! # Code Outline
//!
//! Condenses source files into outlines for LLM context packing: comments,
//! imports and type definitions in full, functions, methods and classes as
//! signatures only.
//!
//! The crate has two layers:
//! - [`outline`]: the per-file extraction pipeline
//! - the packing surface in this file: project scanning and batch outlining

use serde::{Deserialize, Serialize};
use ignore::WalkBuilder;
use log::error;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::fs::File;
use std::io::{self, Read};

pub mod config;
pub mod error;
pub mod outline;


pub use crate::config::PackConfig;
pub use crate::error::{OutlineError, Result};
pub use outline::{
    build_outline, Capture, CaptureKind, Outline, OutlineExtractor, SupportedLanguage,
};

/// A file or directory found while scanning a project
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FileEntry {
    pub path: String,
    pub relative_path: String,
    pub is_dir: bool,
    pub size: u64,
    pub line_count: Option<usize>,
}

/// Line count with `str::lines` semantics: a trailing newline does not
/// start another line, and an empty file has none
fn count_lines(path: &Path) -> Option<usize> {
    let file = File::open(path).ok()?;
    let mut reader = io::BufReader::new(file);
    let mut buffer = [0; 32 * 1024];
    let mut count = 0;
    let mut last_byte = None;

    loop {
        match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => {
                count += buffer[..n].iter().filter(|&&b| b == b'\n').count();
                last_byte = Some(buffer[n - 1]);
            }
            Err(_) => return None,
        }
    }
    match last_byte {
        Some(b'\n') | None => Some(count),
        Some(_) => Some(count + 1),
    }
}

/// Walk a project, honouring .gitignore and the configured skip lists
pub fn scan_project(root: impl AsRef<Path>, config: &PackConfig) -> Result<Vec<FileEntry>> {
    config.validate()?;
    let root_path = root.as_ref();
    if !root_path.exists() {
        return Err(OutlineError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} does not exist", root_path.display()),
        )));
    }

    let filter_config = config.clone();
    let walker = WalkBuilder::new(root_path)
        .standard_filters(true)
        .filter_entry(move |entry| {
            let name = entry.file_name().to_string_lossy();
            !filter_config.is_ignored_dir(&name) && !filter_config.is_ignored_file(&name)
        })
        .build();

    let mut entries = Vec::new();

    for result in walker {
        match result {
            Ok(entry) => {
                let p = entry.path();
                if p == root_path {
                    continue;
                }

                if let Ok(relative) = p.strip_prefix(root_path) {
                    let is_dir = p.is_dir();
                    let size = p.metadata().map(|m| m.len()).unwrap_or(0);
                    let line_count = if !is_dir && size <= config.max_file_bytes {
                        count_lines(p)
                    } else {
                        None
                    };

                    entries.push(FileEntry {
                        path: p.to_string_lossy().to_string(),
                        relative_path: relative.to_string_lossy().to_string(),
                        is_dir,
                        size,
                        line_count,
                    });
                }
            }
            Err(err) => error!("Error walking {}: {}", root_path.display(), err),
        }
    }

    entries.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

    Ok(entries)
}

/// Outline of one file on disk, with size statistics
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FileOutline {
    pub path: PathBuf,
    pub language: Option<String>,
    /// `None` when no grammar is available for the file
    pub outline: Option<String>,
    pub original_lines: usize,
    pub outline_lines: usize,
    pub compression_ratio: f64,
}

impl FileOutline {
    fn new(path: PathBuf, content: &str, outline: Outline) -> Self {
        let original_lines = content.lines().count();
        let outline = outline.into_text();
        let outline_lines = outline.as_deref().map_or(0, |text| text.lines().count());

        Self {
            language: SupportedLanguage::from_path(&path).map(|l| l.name().to_string()),
            path,
            outline,
            original_lines,
            outline_lines,
            compression_ratio: compression_ratio(original_lines, outline_lines),
        }
    }

    pub fn is_supported(&self) -> bool {
        self.outline.is_some()
    }
}

/// Share of lines removed, in `[0, 1]`
pub fn compression_ratio(original_lines: usize, outline_lines: usize) -> f64 {
    if original_lines == 0 {
        return 0.0;
    }
    let diff = original_lines as f64 - outline_lines as f64;
    (diff / original_lines as f64).max(0.0)
}

/// Read a file and extract its outline.
///
/// Files of exactly `max_file_bytes` are read; larger ones are rejected.
pub fn outline_file(
    extractor: &OutlineExtractor,
    path: impl AsRef<Path>,
    config: &PackConfig,
) -> Result<FileOutline> {
    config.validate()?;
    let path = path.as_ref();
    let size = std::fs::metadata(path)?.len();
    if size > config.max_file_bytes {
        return Err(OutlineError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            limit: config.max_file_bytes,
        });
    }

    let content = std::fs::read_to_string(path)?;
    let outline = extractor.extract(&content, path, config);
    Ok(FileOutline::new(path.to_path_buf(), &content, outline))
}

/// Outline many files; results line up with `paths`.
///
/// A failing file is logged and reported in place without affecting the rest.
pub fn outline_files<P>(
    extractor: &OutlineExtractor,
    paths: &[P],
    config: &PackConfig,
) -> Vec<Result<FileOutline>>
where
    P: AsRef<Path> + Sync,
{
    let run = |path: &P| {
        let result = outline_file(extractor, path, config);
        if let Err(err) = &result {
            error!("Failed to outline {}: {}", path.as_ref().display(), err);
        }
        result
    };

    if config.parallel {
        paths.par_iter().map(run).collect()
    } else {
        paths.iter().map(run).collect()
    }
}
