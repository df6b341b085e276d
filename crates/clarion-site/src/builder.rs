//! Static site builder.
//!
//! Walks the source directory (honoring `.gitignore` and skipping hidden
//! files), renders every markdown file through the [`PageProcessor`] in
//! parallel and copies everything else verbatim.

use std::fs;
use std::path::{Path, PathBuf};

use clarion_audit::Issue;
use clarion_meta::MetaError;
use ignore::WalkBuilder;
use rayon::prelude::*;
use serde::Serialize;

use crate::pipeline::{PageLocation, PageProcessor};

/// Error returned by the static site builder.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Source directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid frontmatter in {}: {source}", path.display())]
    Frontmatter { path: PathBuf, source: MetaError },

    #[error("Failed to walk source directory: {0}")]
    Walk(#[from] ignore::Error),
}

impl BuildError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Accessibility report for one generated page.
#[derive(Debug, Serialize)]
pub struct PageReport {
    /// Source path relative to the source directory.
    pub source: PathBuf,
    /// Output path relative to the output directory.
    pub output: PathBuf,
    pub title: String,
    pub issues: Vec<Issue>,
}

/// Summary of a site build.
#[derive(Debug, Default, Serialize)]
pub struct BuildReport {
    pub pages: Vec<PageReport>,
    pub assets: usize,
}

impl BuildReport {
    /// Total number of issues across all pages.
    pub fn issue_count(&self) -> usize {
        self.pages.iter().map(|p| p.issues.len()).sum()
    }

    /// Pages with at least one issue.
    pub fn pages_with_issues(&self) -> impl Iterator<Item = &PageReport> {
        self.pages.iter().filter(|p| !p.issues.is_empty())
    }
}

/// Builds a static documentation site from a directory of markdown files.
pub struct SiteBuilder {
    source_dir: PathBuf,
    output_dir: PathBuf,
    processor: PageProcessor,
}

impl SiteBuilder {
    #[must_use]
    pub fn new(source_dir: PathBuf, output_dir: PathBuf, processor: PageProcessor) -> Self {
        Self {
            source_dir,
            output_dir,
            processor,
        }
    }

    /// Build the site.
    ///
    /// Accessibility issues are collected into the report and never fail
    /// the build.
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        if !self.source_dir.is_dir() {
            return Err(BuildError::SourceNotFound(self.source_dir.clone()));
        }

        let (markdown, assets) = self.discover()?;
        fs::create_dir_all(&self.output_dir).map_err(|e| BuildError::io(&self.output_dir, e))?;

        let pages = markdown
            .par_iter()
            .map(|relative| self.build_page(relative))
            .collect::<Result<Vec<_>, _>>()?;

        for relative in &assets {
            self.copy_asset(relative)?;
        }

        let report = BuildReport {
            pages,
            assets: assets.len(),
        };
        tracing::info!(
            pages = report.pages.len(),
            assets = report.assets,
            issues = report.issue_count(),
            "Site built"
        );
        Ok(report)
    }

    /// Collect source files relative to the source directory, split into
    /// markdown pages and assets. Both lists are sorted.
    fn discover(&self) -> Result<(Vec<PathBuf>, Vec<PathBuf>), BuildError> {
        let output_dir = self.output_dir.clone();
        let walker = WalkBuilder::new(&self.source_dir)
            .require_git(false)
            .filter_entry(move |entry| entry.path() != output_dir)
            .build();

        let mut markdown = Vec::new();
        let mut assets = Vec::new();
        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&self.source_dir) else {
                continue;
            };
            if relative.extension().is_some_and(|e| e == "md") {
                markdown.push(relative.to_path_buf());
            } else {
                assets.push(relative.to_path_buf());
            }
        }

        markdown.sort();
        assets.sort();
        tracing::debug!(pages = markdown.len(), assets = assets.len(), "Discovered sources");
        Ok((markdown, assets))
    }

    fn build_page(&self, relative: &Path) -> Result<PageReport, BuildError> {
        let source_path = self.source_dir.join(relative);
        let source = fs::read_to_string(&source_path).map_err(|e| BuildError::io(&source_path, e))?;

        let location = PageLocation {
            fallback_title: relative
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
            root: root_prefix(relative),
        };
        let page = self
            .processor
            .process(&source, &location)
            .map_err(|source| BuildError::Frontmatter {
                path: source_path.clone(),
                source,
            })?;

        let output = relative.with_extension("html");
        let output_path = self.output_dir.join(&output);
        write_file(&output_path, page.html.as_bytes())?;

        for issue in &page.issues {
            tracing::debug!(page = %relative.display(), %issue, "Accessibility issue");
        }

        Ok(PageReport {
            source: relative.to_path_buf(),
            output,
            title: page.title,
            issues: page.issues,
        })
    }

    fn copy_asset(&self, relative: &Path) -> Result<(), BuildError> {
        let from = self.source_dir.join(relative);
        let to = self.output_dir.join(relative);
        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
        }
        fs::copy(&from, &to).map_err(|e| BuildError::io(&from, e))?;
        Ok(())
    }
}

fn write_file(path: &Path, content: &[u8]) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
    }
    fs::write(path, content).map_err(|e| BuildError::io(path, e))
}

/// Relative path from a page back to the site root (`guide/intro.md` → `../`).
fn root_prefix(relative: &Path) -> String {
    let depth = relative.components().count().saturating_sub(1);
    "../".repeat(depth)
}
