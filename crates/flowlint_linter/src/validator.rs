use serde_yaml::Value;

use crate::ast::{FlowHeader, Segments, is_blank, lookup, parse_yaml};
use crate::error::{LintError, LintReport};
use crate::indentation::validate_indentation;
use crate::locator::LineLocator;
use crate::path::is_valid_flow_path;
use crate::schema::{
    NAME_PATTERN, SETUP_FLOW, TAG_ONE_OF, TEARDOWN_FLOW, VALID_PROPERTIES, canonical_subflow,
    suggest_property,
};
use crate::validation::{CommandValidator, Occurrences};

const ON_FLOW_START: &str = "onFlowStart";
const ON_FLOW_COMPLETE: &str = "onFlowComplete";

/// Document-level validator: header, lifecycle hooks and the command body.
#[derive(Debug, Default)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, text: &str) -> LintReport {
        let mut report = LintReport::new();
        report.extend(validate_indentation(text));

        let segments = Segments::split(text);
        let header = match parse_yaml(segments.header) {
            Ok(value) => value,
            Err(error) => {
                tracing::debug!("Header parse failed: {}", error);
                report.add_error(error);
                return report;
            }
        };
        let Some(header) = FlowHeader::from_value(header) else {
            report.add_error(LintError::EmptyHeader { line: None });
            return report;
        };

        let lines: Vec<&str> = text.lines().collect();
        let locator = LineLocator::new(&lines);

        self.check_header_properties(&header, &locator, &mut report);
        self.check_required_fields(&header, &locator, &mut report);

        let on_start = header.get_ignore_case(ON_FLOW_START).filter(|v| !v.is_null());
        let on_complete = header.get_ignore_case(ON_FLOW_COMPLETE).filter(|v| !v.is_null());

        if let Some(hook) = on_start {
            self.check_lifecycle_hook(hook, ON_FLOW_START, SETUP_FLOW, &locator, &mut report);
        }
        if let Some(hook) = on_complete {
            self.check_lifecycle_hook(hook, ON_FLOW_COMPLETE, TEARDOWN_FLOW, &locator, &mut report);
        }

        let commands = CommandValidator::new(locator);
        let mut occurrences = Occurrences::new();

        for hook in [on_start, on_complete].into_iter().flatten() {
            if let Some(steps) = hook.as_sequence() {
                report.extend(commands.validate_all(steps, &mut occurrences));
            }
        }

        // Body parse failures are not reported; only the header parse is.
        if let Some(segment) = segments.commands {
            match parse_yaml(segment) {
                Ok(Value::Sequence(steps)) => {
                    report.extend(commands.validate_all(&steps, &mut occurrences));
                }
                Ok(_) => {}
                Err(error) => tracing::debug!("Ignoring command segment parse failure: {}", error),
            }
        }

        report
    }

    fn check_header_properties(
        &self,
        header: &FlowHeader,
        locator: &LineLocator<'_>,
        report: &mut LintReport,
    ) {
        for key in header.keys() {
            if VALID_PROPERTIES.contains(&key.as_str()) {
                continue;
            }
            let line = locator.locate(&key, None, 1);
            match suggest_property(&key) {
                Some(expected) => report.add_error(LintError::HeaderPropertyTypo {
                    line,
                    found: key,
                    expected: expected.to_string(),
                }),
                None => report.add_error(LintError::InvalidHeaderProperty {
                    line,
                    property: key,
                }),
            }
        }
    }

    fn check_required_fields(
        &self,
        header: &FlowHeader,
        locator: &LineLocator<'_>,
        report: &mut LintReport,
    ) {
        if header.get("appId").is_none_or(is_blank) {
            report.add_error(LintError::MissingAppId { line: None });
        }

        if !has_classification_tag(header.get("tags")) {
            report.add_error(LintError::MissingClassificationTag {
                line: None,
                expected: TAG_ONE_OF.join(" or "),
            });
        }

        match header.get("name") {
            None => report.add_error(LintError::MissingName { line: None }),
            Some(name) if is_blank(name) => report.add_error(LintError::MissingName { line: None }),
            Some(name) => {
                let matches = name.as_str().is_some_and(|name| NAME_PATTERN.is_match(name));
                if !matches {
                    report.add_error(LintError::InvalidName {
                        line: locator.locate("name:", None, 1),
                    });
                }
            }
        }
    }

    fn check_lifecycle_hook(
        &self,
        hook: &Value,
        hook_name: &str,
        target_file: &str,
        locator: &LineLocator<'_>,
        report: &mut LintReport,
    ) {
        let references_target = hook.as_sequence().is_some_and(|steps| {
            steps
                .iter()
                .filter_map(flow_path)
                .any(|path| is_valid_flow_path(path, target_file))
        });

        if !references_target {
            report.add_error(LintError::MissingLifecycleFlow {
                line: locator.locate(target_file, None, 1),
                hook: hook_name.to_string(),
                file: target_file.to_string(),
                expected: canonical_subflow(target_file),
            });
        }
    }
}

/// Sub-flow path of a `runFlow: <path>` or `runFlow: {file: <path>}` step.
fn flow_path(step: &Value) -> Option<&str> {
    let step = step.as_mapping()?;
    let run_flow = lookup(step, "runFlow").or_else(|| lookup(step, "runflow"))?;
    match run_flow {
        Value::String(path) => Some(path.as_str()),
        Value::Mapping(properties) => lookup(properties, "file")?.as_str(),
        _ => None,
    }
}

fn has_classification_tag(tags: Option<&Value>) -> bool {
    match tags {
        Some(Value::Sequence(tags)) => tags
            .iter()
            .filter_map(Value::as_str)
            .any(|tag| TAG_ONE_OF.contains(&tag)),
        Some(Value::String(tag)) => TAG_ONE_OF.contains(&tag.as_str()),
        _ => false,
    }
}
