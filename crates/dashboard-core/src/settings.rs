use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::filters::{Choice, ContentType, Dimension, FilterConfig, Month, Product, SortOrder, Status};

/// Name of the export file looked up when `--data` points at a directory.
pub const DEFAULT_EXPORT_NAME: &str = "AG1-Data.csv";

/// Default quiet period before filter edits trigger a recompute.
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Creative performance dashboard for AG1 Meta Ads exports
#[derive(Parser, Debug, Clone)]
#[command(
    name = "ag1-dashboard",
    about = "Creative performance dashboard for AG1 Meta Ads exports",
    version
)]
pub struct Settings {
    /// CSV export, or a directory searched for the export file
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Export file name looked up inside a data directory
    #[arg(long, default_value = DEFAULT_EXPORT_NAME)]
    pub export_name: String,

    /// Product filter (label or "Tous")
    #[arg(long, default_value = "Tous", value_parser = parse_choice::<Product>)]
    pub product: Choice<Product>,

    /// Month filter (label or "Tous")
    #[arg(long, default_value = "Tous", value_parser = parse_choice::<Month>)]
    pub month: Choice<Month>,

    /// Status filter (label or "Tous")
    #[arg(long, default_value = "Tous", value_parser = parse_choice::<Status>)]
    pub status: Choice<Status>,

    /// Content type filter (label or "Tous")
    #[arg(long, default_value = "Tous", value_parser = parse_choice::<ContentType>)]
    pub content_type: Choice<ContentType>,

    /// Search ad name, creator and product
    #[arg(long, default_value = "")]
    pub search: String,

    /// Creator name substring
    #[arg(long, default_value = "")]
    pub creator: String,

    /// Sort order
    #[arg(long, default_value = "roas-desc")]
    pub sort: SortOrder,

    /// Report format
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Read filter edits from stdin and print a report after each pause
    #[arg(long)]
    pub interactive: bool,

    /// Quiet period (ms) before filter edits are applied
    #[arg(long, default_value_t = DEFAULT_DEBOUNCE_MS, value_parser = clap::value_parser!(u64).range(0..=5000))]
    pub debounce_ms: u64,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

fn parse_choice<T: Dimension + Send + Sync>(label: &str) -> Result<Choice<T>, String> {
    Choice::<T>::parse_label(label).ok_or_else(|| {
        let known: Vec<&str> = T::VALUES.iter().map(|v| v.label()).collect();
        format!("unknown value '{}'; expected Tous or one of: {}", label, known.join(", "))
    })
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Parameters remembered between runs in `~/.ag1-dashboard/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debounce_ms: Option<u64>,
}

impl LastUsedParams {
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    pub fn config_path_in(base_dir: &Path) -> PathBuf {
        base_dir.join(".ag1-dashboard").join("last_used.json")
    }

    /// Load from `path`, falling back to defaults when the file is absent or
    /// malformed.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str(&content) {
            Ok(params) => params,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed saved settings");
                Self::default()
            }
        }
    }

    /// Write to `path` through a temp file and rename.
    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, path)
    }

    pub fn clear_at(path: &Path) -> Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            data: s.data.clone(),
            sort: Some(s.sort),
            format: Some(s.format.clone()),
            debounce_ms: Some(s.debounce_ms),
        }
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments, merge remembered values and persist.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(std::env::args_os().collect(), &LastUsedParams::config_path())
    }

    /// Argument values given on the command line always win over remembered
    /// ones. Filters are never remembered, only the data source, sort, format
    /// and debounce.
    pub fn load_with_last_used_impl(args: Vec<std::ffi::OsString>, config_path: &Path) -> Self {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                tracing::warn!(error = %e, "failed to clear saved settings");
            }
            return settings.resolve_debug();
        }

        let last = LastUsedParams::load_from(config_path);

        if !is_arg_explicitly_set(&matches, "data") && settings.data.is_none() {
            settings.data = last.data;
        }
        if !is_arg_explicitly_set(&matches, "sort") {
            if let Some(v) = last.sort {
                settings.sort = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "format") {
            if let Some(v) = last.format {
                settings.format = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "debounce_ms") {
            if let Some(v) = last.debounce_ms {
                settings.debounce_ms = v;
            }
        }

        settings = settings.resolve_debug();

        if let Err(e) = LastUsedParams::from(&settings).save_to(config_path) {
            tracing::warn!(error = %e, "failed to persist settings");
        }

        settings
    }

    /// Initial filter configuration requested on the command line.
    pub fn filter_config(&self) -> FilterConfig {
        FilterConfig {
            product: self.product,
            month: self.month,
            status: self.status,
            content_type: self.content_type,
            search_text: self.search.clone(),
            creator: self.creator.clone(),
            sort: self.sort,
        }
    }

    fn resolve_debug(mut self) -> Self {
        if self.debug {
            self.log_level = "DEBUG".to_string();
        }
        self
    }
}

/// clap stores arg ids under the field name (underscores), not the flag.
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}
