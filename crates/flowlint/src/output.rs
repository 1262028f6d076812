use std::path::PathBuf;

use flowlint_linter::AnalysisResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    }
}

/// What happened to one discovered flow file.
#[derive(Debug)]
pub enum FileOutcome {
    Passed,
    Failed(AnalysisResult),
    Unreadable(String),
}

impl FileOutcome {
    pub fn from_analysis(analysis: AnalysisResult) -> Self {
        if analysis.has_issues() {
            FileOutcome::Failed(analysis)
        } else {
            FileOutcome::Passed
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub passed: usize,
    pub failed: usize,
    pub unreadable: usize,
}

impl Tally {
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.unreadable
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.unreadable == 0
    }

    /// `Summary: 1/3 files valid, 1 failed, 1 could not be read`
    pub fn summary_line(&self) -> String {
        let mut line = format!("Summary: {}/{} files valid", self.passed, self.total());
        if self.failed > 0 {
            line.push_str(&format!(", {} failed", self.failed));
        }
        if self.unreadable > 0 {
            line.push_str(&format!(", {} could not be read", self.unreadable));
        }
        line
    }
}

/// Per-file outcomes of one `check` run, in discovery order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub files: Vec<(PathBuf, FileOutcome)>,
}

impl RunReport {
    pub fn tally(&self) -> Tally {
        self.files
            .iter()
            .fold(Tally::default(), |mut tally, (_, outcome)| {
                match outcome {
                    FileOutcome::Passed => tally.passed += 1,
                    FileOutcome::Failed(_) => tally.failed += 1,
                    FileOutcome::Unreadable(_) => tally.unreadable += 1,
                }
                tally
            })
    }

    /// Failing and unreadable files only, then the summary line.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (path, outcome) in &self.files {
            match outcome {
                FileOutcome::Passed => {}
                FileOutcome::Failed(analysis) => {
                    out.push_str(&format!("File: {}\n", path.display()));
                    out.push_str(&format!("{}\n", analysis.summary()));
                    out.push_str(&analysis.format_issues());
                    out.push('\n');
                }
                FileOutcome::Unreadable(reason) => {
                    out.push_str(&format!("File: {}\n", path.display()));
                    out.push_str(&format!("could not be read: {reason}\n\n"));
                }
            }
        }
        out.push_str(&self.tally().summary_line());
        out
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut errors = Vec::new();
        let mut unreadable = Vec::new();

        for (path, outcome) in &self.files {
            let filename = path.display().to_string();
            match outcome {
                FileOutcome::Passed => {}
                FileOutcome::Failed(analysis) => {
                    errors.extend(analysis.errors.iter().map(|error| {
                        let mut entry = error.to_json();
                        entry["filename"] = serde_json::Value::String(filename.clone());
                        entry
                    }));
                }
                FileOutcome::Unreadable(reason) => unreadable.push(serde_json::json!({
                    "filename": filename,
                    "reason": reason,
                })),
            }
        }

        let tally = self.tally();
        serde_json::json!({
            "summary": {
                "total_files": tally.total(),
                "valid_files": tally.passed,
                "invalid_files": tally.failed,
                "unreadable_files": tally.unreadable,
            },
            "errors": errors,
            "unreadable": unreadable,
        })
    }

    pub fn print(&self, format: OutputFormat) {
        match format {
            OutputFormat::Text => println!("{}", self.to_text()),
            OutputFormat::Json => match serde_json::to_string_pretty(&self.to_json()) {
                Ok(json) => println!("{json}"),
                Err(e) => tracing::error!("Failed to serialize results: {}", e),
            },
        }
    }
}
