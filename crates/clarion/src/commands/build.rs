//! `clarion build` command implementation.

use std::path::PathBuf;

use clap::Args;
use clarion_config::{CliSettings, Config};
use clarion_site::{PageProcessor, SiteBuilder};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover clarion.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory for the generated site (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Nu HTML Checker URL for markup validation (overrides config).
    #[arg(long, env = "NU_VALIDATOR_URL")]
    validator_url: Option<String>,

    /// Skip the accessibility audit.
    #[arg(long)]
    no_audit: bool,

    /// Exit with an error when any accessibility issue is found.
    #[arg(long)]
    strict: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            validator_url: self.validator_url,
            fail_on_issues: self.strict.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let site = &config.site_resolved;
        output.info(&format!("Source: {}", site.source_dir.display()));
        output.info(&format!("Output: {}", site.output_dir.display()));

        let processor = PageProcessor::from_config(&config, !self.no_audit);
        if !processor.audits() {
            output.info("Accessibility audit: disabled");
        }

        let builder = SiteBuilder::new(
            site.source_dir.clone(),
            site.output_dir.clone(),
            processor,
        );
        let report = builder.build()?;

        for page in report.pages_with_issues() {
            output.issues(&page.source.display().to_string(), &page.issues);
        }

        output.success(&format!(
            "Built {} page(s) and copied {} asset(s) to {}",
            report.pages.len(),
            report.assets,
            site.output_dir.display()
        ));

        let count = report.issue_count();
        if count > 0 {
            output.warning(&format!(
                "{count} accessibility issue(s) in {} page(s)",
                report.pages_with_issues().count()
            ));
            if config.accessibility.fail_on_issues {
                return Err(CliError::IssuesFound(count));
            }
        }

        Ok(())
    }
}
