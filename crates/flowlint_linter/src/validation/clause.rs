use serde_yaml::Value;

use crate::ast::{is_blank, key_name, lookup};
use crate::error::LintError;
use crate::locator::LineLocator;
use crate::schema::{
    CLAUSE_PROPERTIES, CLAUSE_SIBLING_PROPERTIES, VALID_PLATFORMS, is_valid_platform,
};

const MATCHER_PROPERTIES: &[&str] = &["visible", "notVisible", "true"];

/// Checks the `when` clause attached to a command.
pub struct ClauseValidator<'a> {
    locator: LineLocator<'a>,
}

impl<'a> ClauseValidator<'a> {
    pub fn new(locator: LineLocator<'a>) -> Self {
        Self { locator }
    }

    pub fn validate(&self, clause: &Value, command: &str, occurrence: usize) -> Vec<LintError> {
        let line = |token: &str| self.locator.locate(token, Some(command), occurrence);

        let Some(clause) = clause.as_mapping() else {
            return vec![LintError::ClauseNotMapping {
                line: line("when"),
                allowed: CLAUSE_PROPERTIES.join(", "),
            }];
        };

        let mut errors = Vec::new();

        for key in clause.keys().filter_map(key_name) {
            if CLAUSE_SIBLING_PROPERTIES.contains(&key.as_str()) {
                errors.push(LintError::ClauseMisplacedProperty {
                    line: line(key.as_str()),
                    property: key,
                });
            } else if !CLAUSE_PROPERTIES.contains(&key.as_str()) {
                errors.push(LintError::ClauseInvalidProperty {
                    line: line(key.as_str()),
                    property: key,
                    allowed: CLAUSE_PROPERTIES.join(", "),
                });
            }
        }

        if let Some(platform) = lookup(clause, "platform") {
            match platform.as_str() {
                None => errors.push(LintError::ClausePlatformType {
                    line: line("platform"),
                    allowed: VALID_PLATFORMS.join(" | "),
                }),
                Some(found) if !is_valid_platform(found) => {
                    errors.push(LintError::ClauseInvalidPlatform {
                        line: line("platform"),
                        found: found.to_string(),
                        allowed: VALID_PLATFORMS.join(" | "),
                    })
                }
                Some(_) => {}
            }
        }

        for &property in MATCHER_PROPERTIES {
            if lookup(clause, property).is_some_and(is_blank) {
                errors.push(LintError::ClauseEmptyMatcher {
                    line: line(property),
                    property: property.to_string(),
                });
            }
        }

        errors
    }
}
