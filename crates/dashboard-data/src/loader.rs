//! Locating and reading the export text.
//!
//! The core never touches the filesystem directly: it asks a [`RawTextSource`]
//! for the export's text. [`CsvFileSource`] is the implementation the CLI
//! uses; tests and embedders can pass any closure.

use std::path::{Path, PathBuf};

use dashboard_core::error::{DashboardError, Result};
use tracing::{debug, warn};

use crate::parser::{parse_creatives, ParseOutcome};

/// Supplies the raw text of the export.
pub trait RawTextSource: Send + Sync {
    fn load_raw_text(&self) -> Result<String>;
}

impl<F> RawTextSource for F
where
    F: Fn() -> Result<String> + Send + Sync,
{
    fn load_raw_text(&self) -> Result<String> {
        self()
    }
}

/// Reads the export from a file, or finds it by name under a directory.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
    export_name: String,
}

impl CsvFileSource {
    /// `path` may be the export itself or a directory containing a file
    /// called `export_name` (searched recursively).
    pub fn new(path: impl Into<PathBuf>, export_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            export_name: export_name.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn resolve(&self) -> Result<PathBuf> {
        if self.path.is_file() {
            return Ok(self.path.clone());
        }
        if self.path.is_dir() {
            return find_export_file(&self.path, &self.export_name)
                .ok_or_else(|| DashboardError::SourceNotFound(self.path.join(&self.export_name)));
        }
        Err(DashboardError::SourceNotFound(self.path.clone()))
    }
}

impl RawTextSource for CsvFileSource {
    fn load_raw_text(&self) -> Result<String> {
        let file = self.resolve()?;
        debug!("Reading export {}", file.display());
        std::fs::read_to_string(&file).map_err(|source| DashboardError::FileRead { path: file, source })
    }
}

/// Find the first file named `name` under `dir`, in path order.
pub fn find_export_file(dir: &Path, name: &str) -> Option<PathBuf> {
    let mut matches: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && entry.file_name() == name)
        .map(|entry| entry.into_path())
        .collect();

    matches.sort();
    matches.into_iter().next()
}

/// Load the export from `source` and parse it.
///
/// Row problems are logged and returned in the outcome; only a missing
/// source or an empty/header-only export is an error.
pub fn load_creatives(source: &dyn RawTextSource) -> Result<ParseOutcome> {
    let raw = source.load_raw_text()?;
    let outcome = parse_creatives(&raw)?;

    for warning in &outcome.warnings {
        warn!("{}", warning);
    }
    debug!(
        "Loaded {} creatives ({} row warnings)",
        outcome.creatives.len(),
        outcome.warnings.len()
    );

    Ok(outcome)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
