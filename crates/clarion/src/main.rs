//! Clarion CLI - accessible documentation site generator.
//!
//! Provides commands for:
//! - `build`: Render markdown to an enhanced static site and audit it
//! - `audit`: Audit existing HTML files for accessibility issues

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AuditArgs, BuildArgs};
use output::Output;

/// Clarion - accessible documentation site generator.
#[derive(Parser)]
#[command(name = "clarion", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the documentation site.
    Build(BuildArgs),
    /// Audit HTML files for accessibility issues.
    Audit(AuditArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Build(args) => args.verbose,
        Commands::Audit(args) => args.verbose,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Audit(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build_flags() {
        let cli = Cli::try_parse_from([
            "clarion",
            "build",
            "--source-dir",
            "docs",
            "--no-audit",
            "--strict",
            "-v",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Build(ref args) if args.verbose));
    }

    #[test]
    fn test_parse_audit_requires_paths() {
        assert!(Cli::try_parse_from(["clarion", "audit"]).is_err());
        let cli = Cli::try_parse_from(["clarion", "audit", "site", "--format", "json"]).unwrap();
        assert!(matches!(cli.command, Commands::Audit(_)));
    }

    #[test]
    fn test_parse_audit_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["clarion", "audit", "site", "--format", "xml"]).is_err());
    }
}
