use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the dashboard crates.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// The backing CSV resource could not be located.
    #[error("CSV source not found: {0}")]
    SourceNotFound(PathBuf),

    /// The CSV text is empty or holds a header row only.
    #[error("Invalid CSV format: {0}")]
    InvalidFormat(String),

    /// A file exists but could not be read.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DashboardError {
    /// Short message suitable for showing to the dashboard user.
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::SourceNotFound(_) => "Le fichier CSV n'a pas été trouvé".to_string(),
            DashboardError::InvalidFormat(_) => "Format CSV invalide".to_string(),
            DashboardError::FileRead { .. } | DashboardError::Io(_) => {
                "Le fichier CSV n'a pas pu être lu".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;
