use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LintError {
    #[error("uses a TAB character instead of spaces; indent with multiples of 2 spaces")]
    TabIndentation { line: Option<usize> },

    #[error("incorrect indentation ({spaces} spaces), must be a multiple of 2: \"{preview}\"")]
    IndentationNotMultiple {
        line: Option<usize>,
        spaces: usize,
        preview: String,
    },

    #[error(
        "command list item \"{command}\" must start at column 0 ({spaces} spaces found) unless nested inside a commands block"
    )]
    MisplacedCommandItem {
        line: Option<usize>,
        command: String,
        spaces: usize,
    },

    #[error(
        "command property has {extra} space(s) too many (expected {expected} spaces, found {found})"
    )]
    PropertyOverIndented {
        line: Option<usize>,
        expected: usize,
        found: usize,
        extra: usize,
    },

    #[error(
        "command property has {missing} space(s) too few (expected {expected} spaces, found {found})"
    )]
    PropertyUnderIndented {
        line: Option<usize>,
        expected: usize,
        found: usize,
        missing: usize,
    },

    #[error(
        "list item property must be indented more than its item (expected > {item} spaces, found {found})"
    )]
    ListPropertyNotNested {
        line: Option<usize>,
        item: usize,
        found: usize,
    },

    #[error("YAML parse error: {message}")]
    YamlParse { line: Option<usize>, message: String },

    #[error("empty or invalid YAML header")]
    EmptyHeader { line: Option<usize> },

    #[error("header property \"{found}\" should be spelled \"{expected}\"")]
    HeaderPropertyTypo {
        line: Option<usize>,
        found: String,
        expected: String,
    },

    #[error("invalid header property \"{property}\"")]
    InvalidHeaderProperty { line: Option<usize>, property: String },

    #[error("missing appId (application identifier)")]
    MissingAppId { line: Option<usize> },

    #[error("missing classification tag ({expected})")]
    MissingClassificationTag { line: Option<usize>, expected: String },

    #[error("missing name")]
    MissingName { line: Option<usize> },

    #[error("name does not follow the pattern \"[testKey] - Test name\"")]
    InvalidName { line: Option<usize> },

    #[error("{hook} must include {file} ({expected})")]
    MissingLifecycleFlow {
        line: Option<usize>,
        hook: String,
        file: String,
        expected: String,
    },

    #[error("command \"{found}\" has wrong capitalization, should be \"{expected}\"")]
    CommandTypo {
        line: Option<usize>,
        found: String,
        expected: String,
    },

    #[error("invalid command \"{command}\"")]
    InvalidCommand { line: Option<usize>, command: String },

    #[error("{command}: must have at least one property: {alternatives}")]
    MissingRequiredProperty {
        line: Option<usize>,
        command: String,
        alternatives: String,
    },

    #[error("{command}: requires a value")]
    MissingValue { line: Option<usize>, command: String },

    #[error("{command}: selector/value cannot be empty")]
    EmptyValue { line: Option<usize>, command: String },

    #[error("{command}: invalid property \"{property}\"")]
    InvalidProperty {
        line: Option<usize>,
        command: String,
        property: String,
    },

    #[error("{command}: property \"{property}\" cannot be empty")]
    EmptyProperty {
        line: Option<usize>,
        command: String,
        property: String,
    },

    #[error("{command}: value must be a scalar or a mapping, not a list")]
    InvalidValueShape { line: Option<usize>, command: String },

    #[error("when: must be a mapping with properties ({allowed})")]
    ClauseNotMapping { line: Option<usize>, allowed: String },

    #[error("when: property \"{property}\" belongs beside \"when\", not inside it")]
    ClauseMisplacedProperty { line: Option<usize>, property: String },

    #[error("when: invalid property \"{property}\" (valid: {allowed})")]
    ClauseInvalidProperty {
        line: Option<usize>,
        property: String,
        allowed: String,
    },

    #[error("when: platform must be a string ({allowed})")]
    ClausePlatformType { line: Option<usize>, allowed: String },

    #[error("when: platform must be one of {allowed}, got \"{found}\"")]
    ClauseInvalidPlatform {
        line: Option<usize>,
        found: String,
        allowed: String,
    },

    #[error("when: {property} cannot be empty")]
    ClauseEmptyMatcher { line: Option<usize>, property: String },
}

impl LintError {
    pub fn code(&self) -> &'static str {
        match self {
            LintError::TabIndentation { .. } => "E001",
            LintError::IndentationNotMultiple { .. } => "E002",
            LintError::MisplacedCommandItem { .. } => "E003",
            LintError::PropertyOverIndented { .. } => "E004",
            LintError::PropertyUnderIndented { .. } => "E005",
            LintError::ListPropertyNotNested { .. } => "E006",
            LintError::YamlParse { .. } => "E007",
            LintError::EmptyHeader { .. } => "E008",
            LintError::HeaderPropertyTypo { .. } => "E009",
            LintError::InvalidHeaderProperty { .. } => "E010",
            LintError::MissingAppId { .. } => "E011",
            LintError::MissingClassificationTag { .. } => "E012",
            LintError::MissingName { .. } => "E013",
            LintError::InvalidName { .. } => "E014",
            LintError::MissingLifecycleFlow { .. } => "E015",
            LintError::CommandTypo { .. } => "E016",
            LintError::InvalidCommand { .. } => "E017",
            LintError::MissingRequiredProperty { .. } => "E018",
            LintError::MissingValue { .. } => "E019",
            LintError::EmptyValue { .. } => "E020",
            LintError::InvalidProperty { .. } => "E021",
            LintError::EmptyProperty { .. } => "E022",
            LintError::InvalidValueShape { .. } => "E023",
            LintError::ClauseNotMapping { .. } => "E024",
            LintError::ClauseMisplacedProperty { .. } => "E025",
            LintError::ClauseInvalidProperty { .. } => "E026",
            LintError::ClausePlatformType { .. } => "E027",
            LintError::ClauseInvalidPlatform { .. } => "E028",
            LintError::ClauseEmptyMatcher { .. } => "E029",
        }
    }

    /// Best-effort 1-based source line, `None` when it could not be resolved.
    pub fn line(&self) -> Option<usize> {
        match self {
            LintError::TabIndentation { line }
            | LintError::IndentationNotMultiple { line, .. }
            | LintError::MisplacedCommandItem { line, .. }
            | LintError::PropertyOverIndented { line, .. }
            | LintError::PropertyUnderIndented { line, .. }
            | LintError::ListPropertyNotNested { line, .. }
            | LintError::YamlParse { line, .. }
            | LintError::EmptyHeader { line }
            | LintError::HeaderPropertyTypo { line, .. }
            | LintError::InvalidHeaderProperty { line, .. }
            | LintError::MissingAppId { line }
            | LintError::MissingClassificationTag { line, .. }
            | LintError::MissingName { line }
            | LintError::InvalidName { line }
            | LintError::MissingLifecycleFlow { line, .. }
            | LintError::CommandTypo { line, .. }
            | LintError::InvalidCommand { line, .. }
            | LintError::MissingRequiredProperty { line, .. }
            | LintError::MissingValue { line, .. }
            | LintError::EmptyValue { line, .. }
            | LintError::InvalidProperty { line, .. }
            | LintError::EmptyProperty { line, .. }
            | LintError::InvalidValueShape { line, .. }
            | LintError::ClauseNotMapping { line, .. }
            | LintError::ClauseMisplacedProperty { line, .. }
            | LintError::ClauseInvalidProperty { line, .. }
            | LintError::ClausePlatformType { line, .. }
            | LintError::ClauseInvalidPlatform { line, .. }
            | LintError::ClauseEmptyMatcher { line, .. } => *line,
        }
    }

    /// Message with the resolved line appended, e.g. `... (linha 12)`.
    pub fn render(&self) -> String {
        match self.line() {
            Some(line) => format!("{self} (linha {line})"),
            None => self.to_string(),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "code": self.code(),
            "message": format!("{}", self),
            "line": self.line()
        })
    }
}

pub type LintResult<T> = Result<T, LintError>;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LintReport {
    pub errors: Vec<LintError>,
}

impl LintReport {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add_error(&mut self, error: LintError) {
        self.errors.push(error);
    }

    pub fn extend(&mut self, errors: impl IntoIterator<Item = LintError>) {
        self.errors.extend(errors);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn rendered(&self) -> Vec<String> {
        self.errors.iter().map(LintError::render).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_appends_line() {
        let error = LintError::MissingValue {
            line: Some(7),
            command: "inputText".to_string(),
        };
        assert_eq!(error.render(), "inputText: requires a value (linha 7)");

        let error = LintError::MissingAppId { line: None };
        assert_eq!(error.render(), "missing appId (application identifier)");
    }

    #[test]
    fn test_json_shape() {
        let error = LintError::InvalidCommand {
            line: Some(3),
            command: "tapTwice".to_string(),
        };
        let json = error.to_json();
        assert_eq!(json["code"], "E017");
        assert_eq!(json["line"], 3);
        assert_eq!(json["message"], "invalid command \"tapTwice\"");
    }
}
