//! `clarion audit` command implementation.
//!
//! Audits already generated HTML files without rebuilding the site.

use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use clarion_audit::{Auditor, Issue};
use clarion_config::{CliSettings, Config};
use clarion_site::auditor_from_config;
use ignore::WalkBuilder;
use serde::Serialize;

use crate::error::CliError;
use crate::output::Output;

/// Report format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    #[default]
    Text,
    Json,
}

/// Arguments for the audit command.
#[derive(Args)]
pub(crate) struct AuditArgs {
    /// HTML files or directories containing them.
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Path to configuration file (default: auto-discover clarion.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Nu HTML Checker URL for markup validation (overrides config).
    #[arg(long, env = "NU_VALIDATOR_URL")]
    validator_url: Option<String>,

    /// Report format.
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Exit with an error when any accessibility issue is found.
    #[arg(long)]
    strict: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Issues found in one file.
#[derive(Debug, Serialize)]
pub(crate) struct FileReport {
    pub path: PathBuf,
    pub issues: Vec<Issue>,
}

impl AuditArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            validator_url: self.validator_url,
            fail_on_issues: self.strict.then_some(true),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let files = collect_html_files(&self.paths)?;
        let auditor = auditor_from_config(&config);
        let reports = audit_files(&auditor, &files)?;
        let count: usize = reports.iter().map(|r| r.issues.len()).sum();

        match self.format {
            Format::Json => output.data(&serde_json::to_string_pretty(&reports)?),
            Format::Text => {
                for report in &reports {
                    output.issues(&report.path.display().to_string(), &report.issues);
                }
                if count == 0 {
                    output.success(&format!(
                        "No accessibility issues in {} file(s)",
                        files.len()
                    ));
                } else {
                    output.warning(&format!(
                        "{count} accessibility issue(s) in {} file(s) (WCAG {})",
                        files.len(),
                        auditor.wcag_level()
                    ));
                }
            }
        }

        if count > 0 && config.accessibility.fail_on_issues {
            return Err(CliError::IssuesFound(count));
        }
        Ok(())
    }
}

/// Expand files and directories into a sorted list of `.html`/`.htm` files.
pub(crate) fn collect_html_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>, CliError> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            for entry in WalkBuilder::new(path).require_git(false).build() {
                let entry = entry?;
                if entry.file_type().is_some_and(|t| t.is_file()) && is_html(entry.path()) {
                    files.push(entry.into_path());
                }
            }
        } else {
            return Err(CliError::NotFound(path.clone()));
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("html") || e.eq_ignore_ascii_case("htm"))
}

/// Audit each file in order.
pub(crate) fn audit_files(auditor: &Auditor, files: &[PathBuf]) -> Result<Vec<FileReport>, CliError> {
    files
        .iter()
        .map(|path| {
            let html = std::fs::read_to_string(path)?;
            let issues = auditor.audit(&html);
            tracing::info!(path = %path.display(), issues = issues.len(), "Audited");
            Ok(FileReport {
                path: path.clone(),
                issues,
            })
        })
        .collect()
}
