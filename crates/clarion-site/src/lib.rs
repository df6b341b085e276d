//! Static site generation for Clarion.
//!
//! Markdown sources are rendered with `pulldown-cmark`, run through the
//! accessibility [`Enhancer`](clarion_enhance::Enhancer), audited, and
//! wrapped in a page template. [`SiteBuilder`] applies this to a whole
//! source directory.
//!
//! # Example
//!
//! ```no_run
//! use clarion_config::Config;
//! use clarion_site::{PageProcessor, SiteBuilder};
//!
//! let config = Config::load(None, None)?;
//! let builder = SiteBuilder::new(
//!     config.site_resolved.source_dir.clone(),
//!     config.site_resolved.output_dir.clone(),
//!     PageProcessor::from_config(&config, true),
//! );
//! let report = builder.build()?;
//! println!("{} issues", report.issue_count());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod builder;
mod markdown;
mod pipeline;
mod template;

pub use builder::{BuildError, BuildReport, PageReport, SiteBuilder};
pub use markdown::{parser_options, render_markdown};
pub use pipeline::{PageDefaults, PageLocation, PageProcessor, ProcessedPage, auditor_from_config};
pub use template::{PageData, render_page};
