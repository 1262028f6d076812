//! Structural whitespace checks run on raw text before any YAML parsing.
//!
//! A permissive parser happily reattaches a misaligned property to the wrong
//! command, so these rules are enforced line by line on the source itself.

use crate::error::LintError;
use crate::locator::is_skippable;
use crate::schema::NESTED_COMMANDS_KEY;

pub const INDENT_SIZE: usize = 2;

/// Expected offset of a property under `- command:` (list marker + nesting).
pub const COMMAND_PROPERTY_OFFSET: usize = 4;

const PREVIEW_LEN: usize = 40;

#[derive(Debug, Clone, Copy)]
struct PrevItem {
    indent: usize,
    inline_value: bool,
}

#[derive(Debug)]
struct CommandItem<'a> {
    name: &'a str,
    inline_value: bool,
}

#[derive(Debug, Default)]
pub struct IndentationValidator {
    in_command_section: bool,
    /// Indents of the `commands:` keys whose blocks are still open, innermost last.
    open_blocks: Vec<usize>,
    prev_command_item: Option<PrevItem>,
    errors: Vec<LintError>,
}

impl IndentationValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(mut self, text: &str) -> Vec<LintError> {
        for (idx, line) in text.lines().enumerate() {
            if is_skippable(line) {
                continue;
            }
            self.check_line(idx + 1, line);
        }
        self.errors
    }

    fn check_line(&mut self, line_no: usize, line: &str) {
        let is_separator = line.starts_with("---");
        if is_separator {
            self.in_command_section = true;
            self.open_blocks.clear();
            self.prev_command_item = None;
        }

        if line.contains('\t') {
            self.errors.push(LintError::TabIndentation {
                line: Some(line_no),
            });
            self.prev_command_item = None;
            return;
        }
        if is_separator {
            return;
        }

        let content = line.trim_start_matches(' ').trim_end();
        let indent = line.len() - line.trim_start_matches(' ').len();

        if indent % INDENT_SIZE != 0 {
            self.errors.push(LintError::IndentationNotMultiple {
                line: Some(line_no),
                spaces: indent,
                preview: preview(content),
            });
        }

        while self.open_blocks.last().is_some_and(|&block| block >= indent) {
            self.open_blocks.pop();
        }

        let command_item = command_list_item(content);

        if let Some(prev) = self.prev_command_item {
            // a dedented line after `- name: value` closes the item instead
            let closes_item = prev.inline_value && indent <= prev.indent;
            if command_item.is_none() && is_key_value(content) && !closes_item {
                self.check_property_indent(line_no, prev.indent, indent);
            }
        }

        if self.in_command_section {
            if let Some(item) = &command_item {
                if indent != 0 && self.open_blocks.is_empty() {
                    self.errors.push(LintError::MisplacedCommandItem {
                        line: Some(line_no),
                        command: item.name.to_string(),
                        spaces: indent,
                    });
                }
            }
        }

        if mapping_key(content) == Some(NESTED_COMMANDS_KEY) {
            self.open_blocks.push(indent);
        }
        self.prev_command_item = command_item.map(|item| PrevItem {
            indent,
            inline_value: item.inline_value,
        });
    }

    fn check_property_indent(&mut self, line_no: usize, item_indent: usize, indent: usize) {
        if self.in_command_section {
            let expected = item_indent + COMMAND_PROPERTY_OFFSET;
            if indent > expected {
                self.errors.push(LintError::PropertyOverIndented {
                    line: Some(line_no),
                    expected,
                    found: indent,
                    extra: indent - expected,
                });
            } else if indent < expected {
                self.errors.push(LintError::PropertyUnderIndented {
                    line: Some(line_no),
                    expected,
                    found: indent,
                    missing: expected - indent,
                });
            }
        } else if indent != 0 && indent <= item_indent {
            // a line at column 0 starts a new header key
            self.errors.push(LintError::ListPropertyNotNested {
                line: Some(line_no),
                item: item_indent,
                found: indent,
            });
        }
    }
}

pub fn validate_indentation(text: &str) -> Vec<LintError> {
    IndentationValidator::new().validate(text)
}

/// The single-key mapping opened by a `- name:` list item.
fn command_list_item(content: &str) -> Option<CommandItem<'_>> {
    let rest = content.strip_prefix("- ")?.trim_start();
    let name = mapping_key(rest)?;
    let value = rest[name.len() + 1..].trim();
    Some(CommandItem {
        name,
        inline_value: !value.is_empty() && !value.starts_with('#'),
    })
}

fn mapping_key(content: &str) -> Option<&str> {
    let (key, rest) = content.split_once(':')?;
    let is_key = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'));
    let ends_key = rest.is_empty() || rest.starts_with(char::is_whitespace);
    (is_key && ends_key).then_some(key)
}

fn is_key_value(content: &str) -> bool {
    !content.starts_with('-') && content.contains(':')
}

fn preview(content: &str) -> String {
    if content.chars().count() > PREVIEW_LEN {
        let truncated: String = content.chars().take(PREVIEW_LEN).collect();
        format!("{truncated}...")
    } else {
        content.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn codes(text: &str) -> Vec<&'static str> {
        validate_indentation(text).iter().map(|e| e.code()).collect()
    }

    #[test]
    fn test_well_formed_flow() {
        let text = "\
appId: com.example.app
tags:
  - smoke
onFlowStart:
  - runFlow:
      file: ../../common/subflows/setup.yaml
---
- tapOn:
    id: login
- repeat:
    times: 2
    commands:
      - tapOn:
          id: next
      - back
- assertVisible: Welcome
";
        assert_eq!(codes(text), Vec::<&str>::new());
    }

    #[test]
    fn test_tab_suppresses_other_checks() {
        let errors = validate_indentation("appId: x\n\t name: y\n");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0], LintError::TabIndentation { line: Some(2) });
    }

    #[test]
    fn test_odd_indentation_reports_count() {
        let errors = validate_indentation("env:\n   USER: x\n");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line(), Some(2));
        assert!(errors[0].to_string().contains("(3 spaces)"));
    }

    #[test]
    fn test_command_item_must_start_at_column_zero() {
        let text = "appId: x\n---\n- back\n  - tapOn: login\n";
        assert_eq!(codes(text), vec!["E003"]);
    }

    #[test]
    fn test_nested_command_items_allowed_inside_block() {
        let text = "\
---
- retry:
    maxRetries: 3
    commands:
      - tapOn: ok
      - inputText: hello
- tapOn: done
";
        assert_eq!(codes(text), Vec::<&str>::new());
    }

    #[test]
    fn test_leaving_block_clears_nesting() {
        let text = "\
---
- retry:
    commands:
      - tapOn: ok
    maxRetries: 3
  - tapOn: stray
";
        assert_eq!(codes(text), vec!["E003"]);
    }

    #[test]
    fn test_nested_blocks_stay_open_after_inner_block_closes() {
        let text = "\
---
- repeat:
    times: 2
    commands:
      - retry:
          maxRetries: 2
          commands:
            - tapOn: a
      - tapOn: b
- back
";
        assert_eq!(codes(text), Vec::<&str>::new());
    }

    #[test]
    fn test_item_dedented_out_of_every_block() {
        let text = "\
---
- repeat:
    commands:
      - retry:
          commands:
            - tapOn: a
  - tapOn: b
";
        assert_eq!(codes(text), vec!["E003"]);
    }

    #[test]
    fn test_separator_with_tab_still_opens_command_section() {
        let errors = validate_indentation("appId: x\n---\t\n- tapOn:\n      id: x\n");
        let codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
        assert_eq!(codes, vec!["E001", "E004"]);
        assert_eq!(errors[0].line(), Some(2));
    }

    #[test]
    fn test_command_property_offset_is_exact() {
        let over = validate_indentation("---\n- tapOn:\n      id: x\n");
        assert_eq!(
            over,
            vec![LintError::PropertyOverIndented {
                line: Some(3),
                expected: 4,
                found: 6,
                extra: 2,
            }]
        );

        let under = validate_indentation("---\n- tapOn:\n  id: x\n");
        assert_eq!(
            under,
            vec![LintError::PropertyUnderIndented {
                line: Some(3),
                expected: 4,
                found: 2,
                missing: 2,
            }]
        );
    }

    #[test]
    fn test_header_properties_only_need_nesting() {
        let loose = "onFlowStart:\n  - runFlow:\n        file: setup.yaml\n";
        assert_eq!(codes(loose), Vec::<&str>::new());

        let flat = "onFlowStart:\n  - runFlow:\n  file: setup.yaml\n";
        assert_eq!(codes(flat), vec!["E006"]);

        let root_key = "onFlowStart:\n  - runFlow: setup.yaml\nname: x\n";
        assert_eq!(codes(root_key), Vec::<&str>::new());
    }

    #[test]
    fn test_comments_and_blank_lines_are_ignored() {
        let text = "---\n- tapOn:\n\n   # odd comment\n    id: x\n";
        assert_eq!(codes(text), Vec::<&str>::new());
    }

    #[test]
    fn test_preview_truncation() {
        let long = format!("   {}: x", "k".repeat(60));
        let errors = validate_indentation(&long);
        let LintError::IndentationNotMultiple { preview, .. } = &errors[0] else {
            panic!("expected indentation error, got {errors:?}");
        };
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), PREVIEW_LEN + 3);
    }
}
