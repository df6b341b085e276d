//! Per-page processing pipeline.
//!
//! extract frontmatter → render markdown → parse → enhance → serialize →
//! audit → wrap in the page template.
//!
//! The audit runs on the enhanced document and never changes the output.

use clarion_audit::{AuditChecks, Auditor, Issue, NuValidator, WcagLevel};
use clarion_config::Config;
use clarion_dom::Document;
use clarion_enhance::{EnhanceOptions, Enhancer};
use clarion_meta::{Frontmatter, MetaError};

use crate::markdown::render_markdown;
use crate::template::{PageData, render_page};

/// Build an auditor with the checks, WCAG level and validator from
/// configuration.
///
/// An unparseable `wcag_level` falls back to AA with a warning.
#[must_use]
pub fn auditor_from_config(config: &Config) -> Auditor {
    let a11y = &config.accessibility;
    let checks = AuditChecks {
        wcag: a11y.check_wcag,
        heading_hierarchy: a11y.check_heading_hierarchy,
        color_contrast: a11y.check_color_contrast,
        html_validation: a11y.validate_html,
        aria: a11y.check_aria,
        keyboard: a11y.check_keyboard_accessibility,
        screen_reader: a11y.check_screen_reader_announcements,
    };
    let level = a11y.wcag_level.parse().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Falling back to WCAG level AA");
        WcagLevel::default()
    });

    let auditor = Auditor::new(checks).with_wcag_level(level);
    match &config.validator_resolved.url {
        Some(url) => {
            tracing::debug!(url = %url, "Using Nu HTML Checker");
            auditor.with_validator(NuValidator::new(url, config.validator_resolved.timeout))
        }
        None => auditor,
    }
}

/// Site-wide values used when a page's frontmatter leaves them out.
#[derive(Clone, Debug)]
pub struct PageDefaults {
    pub site_name: String,
    pub language: String,
    pub theme: String,
}

impl Default for PageDefaults {
    fn default() -> Self {
        Self {
            site_name: "Documentation".to_owned(),
            language: "en".to_owned(),
            theme: "light".to_owned(),
        }
    }
}

/// Where a page sits in the site.
#[derive(Clone, Debug, Default)]
pub struct PageLocation {
    /// Title used when neither frontmatter nor an H1 provides one.
    pub fallback_title: String,
    /// Relative path from the page to the site root.
    pub root: String,
}

/// Result of processing one page.
#[derive(Debug)]
pub struct ProcessedPage {
    /// Final page HTML.
    pub html: String,
    pub title: String,
    /// Accessibility issues found in the enhanced document.
    pub issues: Vec<Issue>,
}

/// Turns markdown sources into enhanced, audited pages.
///
/// Holds no per-page state and can be shared across threads.
pub struct PageProcessor {
    enhancer: Enhancer,
    auditor: Option<Auditor>,
    defaults: PageDefaults,
}

impl PageProcessor {
    /// Create a processor. Pass `None` to skip auditing.
    #[must_use]
    pub fn new(enhancer: Enhancer, auditor: Option<Auditor>, defaults: PageDefaults) -> Self {
        Self {
            enhancer,
            auditor: auditor.filter(|a| a.checks().any()),
            defaults,
        }
    }

    /// Create a processor from loaded configuration.
    ///
    /// With `audit` false no checks run regardless of configuration.
    #[must_use]
    pub fn from_config(config: &Config, audit: bool) -> Self {
        let enhancer = Enhancer::new(EnhanceOptions {
            indicate_external_links: config.accessibility.indicate_external_links,
        });

        let auditor = audit.then(|| auditor_from_config(config));

        let site = &config.site_resolved;
        Self::new(
            enhancer,
            auditor,
            PageDefaults {
                site_name: site.name.clone(),
                language: site.language.clone(),
                theme: site.theme.clone(),
            },
        )
    }

    /// Whether pages are audited.
    pub fn audits(&self) -> bool {
        self.auditor.is_some()
    }

    /// Process one markdown source.
    ///
    /// # Errors
    ///
    /// Returns an error if the frontmatter block is malformed.
    pub fn process(&self, source: &str, location: &PageLocation) -> Result<ProcessedPage, MetaError> {
        let (mut frontmatter, body) = clarion_meta::extract(source)?;
        self.apply_defaults(&mut frontmatter, body, location);

        let content = render_markdown(body);
        let mut doc = Document::parse(&format!("<!DOCTYPE html>\n{content}"));
        self.enhancer.enhance(&mut doc, &frontmatter);

        let issues = match &self.auditor {
            Some(auditor) => auditor.audit(&doc.to_html()),
            None => Vec::new(),
        };

        let description = frontmatter.description().map(ToOwned::to_owned);
        let title = frontmatter.title.unwrap_or_default();
        let html = render_page(&PageData {
            site_name: self.defaults.site_name.clone(),
            title: title.clone(),
            description,
            language: frontmatter.language.unwrap_or_default(),
            theme: frontmatter.theme.unwrap_or_default(),
            content: doc.body().map(|b| doc.inner_html(b)).unwrap_or_default(),
            root: location.root.clone(),
        });

        Ok(ProcessedPage { html, title, issues })
    }

    /// Fill language, title and theme so every later stage sees them set.
    fn apply_defaults(&self, frontmatter: &mut Frontmatter, body: &str, location: &PageLocation) {
        if frontmatter.language().is_none() {
            frontmatter.language = Some(self.defaults.language.clone());
        }
        if frontmatter.theme().is_none() {
            frontmatter.theme = Some(self.defaults.theme.clone());
        }
        if frontmatter.title().is_none() {
            let title = clarion_meta::title_from_markdown(body)
                .unwrap_or_else(|| location.fallback_title.clone());
            frontmatter.title = Some(title);
        }
    }
}
