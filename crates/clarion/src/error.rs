//! CLI error types.

use std::path::PathBuf;

use clarion_config::ConfigError;
use clarion_site::BuildError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Build(#[from] BuildError),

    #[error("{0}")]
    Walk(#[from] ignore::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("Path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("{0} accessibility issue(s) found")]
    IssuesFound(usize),
}
