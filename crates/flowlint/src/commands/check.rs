use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use rayon::prelude::*;

use crate::{
    ExitStatus,
    output::{FileOutcome, OutputFormat, RunReport},
};
use flowlint_linter::FlowLinter;

pub fn run_check(
    files: Vec<PathBuf>,
    output_format: String,
    suffixes: Vec<String>,
    exit_zero: bool,
) -> Result<ExitStatus, anyhow::Error> {
    let target_files = if files.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        files
    };

    let report = check_files(&target_files, &suffixes)?;
    report.print(OutputFormat::from(output_format.as_str()));

    Ok(if report.tally().is_success() || exit_zero {
        ExitStatus::Success
    } else {
        ExitStatus::LintFailure
    })
}

fn check_files(paths: &[PathBuf], suffixes: &[String]) -> Result<RunReport, anyhow::Error> {
    for file_path in paths {
        if !file_path.exists() {
            anyhow::bail!("Path does not exist: {}", file_path.display());
        }
    }

    let files = discover_files(paths, suffixes);
    tracing::debug!("Discovered {} flow file(s)", files.len());

    if files.is_empty() {
        eprintln!(
            "Warning: No files found that end with: {}",
            suffixes.join(", ")
        );
        return Ok(RunReport::default());
    }

    let linter = FlowLinter::new();
    let files = files
        .into_par_iter()
        .map(|file_path| {
            let outcome = match fs::read_to_string(&file_path) {
                Ok(content) => FileOutcome::from_analysis(linter.analyze(&content)),
                Err(e) => {
                    tracing::warn!("Error reading file {}: {}", file_path.display(), e);
                    FileOutcome::Unreadable(e.to_string())
                }
            };
            (file_path, outcome)
        })
        .collect();

    Ok(RunReport { files })
}

fn matches_suffixes(file_path: &Path, suffixes: &[String]) -> bool {
    file_path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| suffixes.iter().any(|suffix| name.ends_with(suffix.as_str())))
}

fn discover_files(paths: &[PathBuf], suffixes: &[String]) -> Vec<PathBuf> {
    let mut discovered_files = Vec::new();

    for path in paths {
        if path.is_file() {
            // explicit file arguments are linted whatever their name
            discovered_files.push(path.clone());
        } else if path.is_dir() {
            let mut builder = WalkBuilder::new(path);
            builder.hidden(false);

            for dir_entry in builder.build().flatten() {
                let file_path = dir_entry.path();
                if file_path.is_file() && matches_suffixes(file_path, suffixes) {
                    discovered_files.push(file_path.to_path_buf());
                }
            }
        }
    }

    discovered_files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_suffixes() {
        let suffixes = vec!["-test.yaml".to_string()];
        assert!(matches_suffixes(Path::new("flows/login-test.yaml"), &suffixes));
        assert!(!matches_suffixes(Path::new("flows/login.yaml"), &suffixes));
        assert!(!matches_suffixes(Path::new("flows/login-test.yml"), &suffixes));
    }
}
