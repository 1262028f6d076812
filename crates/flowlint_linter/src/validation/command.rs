use serde_yaml::{Mapping, Value};

use super::{ClauseValidator, Occurrences};
use crate::ast::{CommandNode, CommandValue, is_blank, key_name, lookup};
use crate::error::LintError;
use crate::locator::LineLocator;
use crate::schema::{
    CLAUSE_KEY, CommandSchema, NESTED_COMMANDS_KEY, command_schema, is_valid_command,
    suggest_command,
};

/// Validates command lists against the command schemas, descending into
/// the `commands` body of control-flow commands.
pub struct CommandValidator<'a> {
    locator: LineLocator<'a>,
    clauses: ClauseValidator<'a>,
}

impl<'a> CommandValidator<'a> {
    pub fn new(locator: LineLocator<'a>) -> Self {
        Self {
            locator,
            clauses: ClauseValidator::new(locator),
        }
    }

    pub fn validate_all(&self, commands: &[Value], occurrences: &mut Occurrences) -> Vec<LintError> {
        let mut errors = Vec::new();

        for item in commands {
            let Some(node) = CommandNode::from_value(item) else {
                continue;
            };
            let occurrence = occurrences.record(&node.name);

            errors.extend(self.validate_one(&node, occurrence));

            if !is_valid_command(&node.name) {
                continue;
            }
            let nested = node
                .properties()
                .and_then(|properties| lookup(properties, NESTED_COMMANDS_KEY))
                .and_then(Value::as_sequence);
            if let Some(nested) = nested {
                errors.extend(self.validate_all(nested, occurrences));
            }
        }

        errors
    }

    pub fn validate_one(&self, node: &CommandNode<'_>, occurrence: usize) -> Vec<LintError> {
        let name = node.name.as_str();
        let Some(schema) = command_schema(name) else {
            return vec![self.unknown_command(name, occurrence)];
        };

        let line = self.locator.locate(name, None, occurrence);
        match node.value {
            CommandValue::Absent => {
                if schema.has_required_group() {
                    vec![LintError::MissingRequiredProperty {
                        line,
                        command: name.to_string(),
                        alternatives: schema.required_alternatives(),
                    }]
                } else if schema.requires_value {
                    vec![LintError::MissingValue {
                        line,
                        command: name.to_string(),
                    }]
                } else {
                    Vec::new()
                }
            }
            CommandValue::Scalar(value) if is_blank(value) => vec![LintError::EmptyValue {
                line,
                command: name.to_string(),
            }],
            CommandValue::Scalar(_) => Vec::new(),
            CommandValue::List(_) => vec![LintError::InvalidValueShape {
                line,
                command: name.to_string(),
            }],
            CommandValue::Properties(properties) => {
                self.validate_properties(schema, properties, line, occurrence)
            }
        }
    }

    fn validate_properties(
        &self,
        schema: &CommandSchema,
        properties: &Mapping,
        command_line: Option<usize>,
        occurrence: usize,
    ) -> Vec<LintError> {
        let name = schema.name;
        let line = |token: &str| self.locator.locate(token, Some(name), occurrence);
        let mut errors = Vec::new();

        let invalid: Vec<String> = properties
            .keys()
            .filter_map(key_name)
            .filter(|key| !schema.allows(key))
            .collect();
        for key in &invalid {
            errors.push(LintError::InvalidProperty {
                line: line(key.as_str()),
                command: name.to_string(),
                property: key.clone(),
            });
        }

        if schema.has_required_group() {
            let has_any = schema
                .required
                .iter()
                .any(|required| lookup(properties, required).is_some());
            if !has_any {
                let token = invalid.first().map(String::as_str).unwrap_or(name);
                errors.push(LintError::MissingRequiredProperty {
                    line: line(token),
                    command: name.to_string(),
                    alternatives: schema.required_alternatives(),
                });
            }

            for &required in schema.required {
                if lookup(properties, required).is_some_and(is_blank) {
                    errors.push(LintError::EmptyProperty {
                        line: line(required),
                        command: name.to_string(),
                        property: required.to_string(),
                    });
                }
            }
        }

        if schema.requires_value && properties.is_empty() {
            errors.push(LintError::MissingValue {
                line: command_line,
                command: name.to_string(),
            });
        }

        if let Some(clause) = lookup(properties, CLAUSE_KEY) {
            errors.extend(self.clauses.validate(clause, name, occurrence));
        }

        errors
    }

    fn unknown_command(&self, name: &str, occurrence: usize) -> LintError {
        let line = self.locator.locate(name, None, occurrence);
        match suggest_command(name) {
            Some(expected) => LintError::CommandTypo {
                line,
                found: name.to_string(),
                expected: expected.to_string(),
            },
            None => LintError::InvalidCommand {
                line,
                command: name.to_string(),
            },
        }
    }
}
