//! Colored terminal output utilities.

use clarion_audit::{Issue, IssueKind};
use console::{Style, Term};

/// Terminal output formatter.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    cyan_bold: Style,
    dim: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
            dim: Style::new().dim(),
        }
    }

    /// Print an info message.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        let _ = self.term.write_line(&self.yellow.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Print a highlighted message (cyan bold).
    pub(crate) fn highlight(&self, msg: &str) {
        let _ = self
            .term
            .write_line(&self.cyan_bold.apply_to(msg).to_string());
    }

    /// Print the issues of one page under its name.
    pub(crate) fn issues(&self, page: &str, issues: &[Issue]) {
        if issues.is_empty() {
            return;
        }
        self.highlight(&format!("{page} ({} issue(s))", issues.len()));
        for issue in issues {
            let line = format!("  {issue}");
            if issue.kind == IssueKind::Error {
                self.error(&line);
            } else {
                self.warning(&line);
            }
            if let Some(element) = &issue.element {
                let _ = self
                    .term
                    .write_line(&self.dim.apply_to(format!("    {element}")).to_string());
            }
        }
    }

    /// Write a line to stdout, bypassing styling (machine-readable output).
    pub(crate) fn data(&self, line: &str) {
        let _ = Term::stdout().write_line(line);
    }
}
