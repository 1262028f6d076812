pub mod ast;
pub mod error;
pub mod indentation;
pub mod locator;
pub mod path;
pub mod schema;
pub mod validation;
pub mod validator;

use error::{LintError, LintReport};
use validator::Validator;

pub struct FlowLinter {
    validator: Validator,
}

impl FlowLinter {
    pub fn new() -> Self {
        Self {
            validator: Validator::new(),
        }
    }

    /// Lint one flow file. Never fails: parse problems become diagnostics.
    pub fn lint(&self, text: &str) -> LintReport {
        let report = self.validator.validate(text);
        tracing::debug!("Linted flow: {} diagnostic(s)", report.errors.len());
        report
    }

    pub fn analyze(&self, text: &str) -> AnalysisResult {
        let report = self.lint(text);
        AnalysisResult {
            is_valid: !report.has_errors(),
            errors: report.errors,
        }
    }
}

impl Default for FlowLinter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub is_valid: bool,
    pub errors: Vec<LintError>,
}

impl AnalysisResult {
    pub fn has_issues(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn summary(&self) -> String {
        match self.errors.len() {
            0 => "Flow is valid with no issues".to_string(),
            e => format!("Flow has {} error{}", e, if e == 1 { "" } else { "s" }),
        }
    }

    /// One numbered `<code>: <message>` line per diagnostic.
    pub fn format_issues(&self) -> String {
        self.errors
            .iter()
            .enumerate()
            .map(|(i, error)| format!("  {}. {}: {}\n", i + 1, error.code(), error.render()))
            .collect()
    }
}

pub fn lint_flow(text: &str) -> LintReport {
    FlowLinter::new().lint(text)
}

pub fn analyze_flow(text: &str) -> AnalysisResult {
    FlowLinter::new().analyze(text)
}
