use serde_yaml::{Mapping, Sequence, Value};

use crate::error::{LintError, LintResult};
use crate::locator::is_skippable;

/// Raw text of a flow file split on line-start `---` markers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segments<'a> {
    pub header: &'a str,
    pub commands: Option<&'a str>,
}

impl<'a> Segments<'a> {
    pub fn split(text: &'a str) -> Self {
        let mut separators = Vec::with_capacity(2);
        let mut offset = 0;
        for line in text.split_inclusive('\n') {
            if line.starts_with("---") {
                separators.push((offset, offset + line.len()));
                if separators.len() == 2 {
                    break;
                }
            }
            offset += line.len();
        }

        match separators.as_slice() {
            [] => Self {
                header: text,
                commands: None,
            },
            [(start, end)] => Self {
                header: &text[..*start],
                commands: Some(&text[*end..]),
            },
            [(start, end), (next, _), ..] => Self {
                header: &text[..*start],
                commands: Some(&text[*end..*next]),
            },
        }
    }
}

pub fn parse_yaml(segment: &str) -> LintResult<Value> {
    if segment.lines().all(is_skippable) {
        return Ok(Value::Null);
    }
    serde_yaml::from_str(segment).map_err(|e| LintError::YamlParse {
        line: e.location().map(|location| location.line()),
        message: e.to_string(),
    })
}

/// Header mapping of a flow file.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowHeader {
    pub properties: Mapping,
}

impl FlowHeader {
    /// `None` for an empty document or a non-mapping root.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Mapping(properties) if !properties.is_empty() => Some(Self { properties }),
            Value::Tagged(tagged) => Self::from_value(tagged.value),
            _ => None,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = String> + '_ {
        self.properties.keys().filter_map(key_name)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        lookup(&self.properties, key)
    }

    /// Exact key first, then the first key equal to `key` ignoring case.
    pub fn get_ignore_case(&self, key: &str) -> Option<&Value> {
        self.get(key).or_else(|| {
            let lowered = key.to_lowercase();
            self.properties
                .iter()
                .find(|(k, _)| key_name(k).is_some_and(|name| name.to_lowercase() == lowered))
                .map(|(_, v)| v)
        })
    }
}

/// Shape of the value attached to a command name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommandValue<'a> {
    Absent,
    Scalar(&'a Value),
    Properties(&'a Mapping),
    List(&'a Sequence),
}

impl<'a> CommandValue<'a> {
    pub fn from_value(value: &'a Value) -> Self {
        match value {
            Value::Null => Self::Absent,
            Value::Bool(_) | Value::Number(_) | Value::String(_) => Self::Scalar(value),
            Value::Mapping(mapping) => Self::Properties(mapping),
            Value::Sequence(sequence) => Self::List(sequence),
            Value::Tagged(tagged) => Self::from_value(&tagged.value),
        }
    }
}

/// One step of a flow: `- name: value` or a bare `- name`.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandNode<'a> {
    pub name: String,
    pub value: CommandValue<'a>,
}

impl<'a> CommandNode<'a> {
    pub fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::Mapping(mapping) => {
                let (key, value) = mapping.iter().next()?;
                Some(Self {
                    name: key_name(key)?,
                    value: CommandValue::from_value(value),
                })
            }
            Value::String(name) => Some(Self {
                name: name.clone(),
                value: CommandValue::Absent,
            }),
            Value::Tagged(tagged) => Self::from_value(&tagged.value),
            _ => None,
        }
    }

    pub fn properties(&self) -> Option<&'a Mapping> {
        match self.value {
            CommandValue::Properties(mapping) => Some(mapping),
            _ => None,
        }
    }
}

/// Mapping keys as authors wrote them; YAML resolves `true:` to a boolean.
pub fn key_name(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Null => Some("null".to_string()),
        _ => None,
    }
}

pub fn lookup<'a>(mapping: &'a Mapping, key: &str) -> Option<&'a Value> {
    mapping
        .iter()
        .find(|(k, _)| key_name(k).as_deref() == Some(key))
        .map(|(_, v)| v)
}

/// Null, or a string holding only whitespace.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}
