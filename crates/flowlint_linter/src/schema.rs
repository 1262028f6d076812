//! Closed-world tables for flow files: header properties, the command
//! vocabulary with per-command property schemas, and the `when` clause keys.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

pub const VALID_PROPERTIES: &[&str] = &[
    "appId",
    "tags",
    "name",
    "onFlowStart",
    "onFlowComplete",
    "env",
];

pub const TAG_ONE_OF: &[&str] = &["smoke", "functional"];

/// `[testKey] - Test name`
pub static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[.+\]\s-\s.+$").expect("static regex must compile"));

pub const CLAUSE_KEY: &str = "when";

pub const NESTED_COMMANDS_KEY: &str = "commands";

pub const CLAUSE_PROPERTIES: &[&str] = &["platform", "visible", "notVisible", "true"];

/// Command-level keys that authors commonly misplace inside `when`.
pub const CLAUSE_SIBLING_PROPERTIES: &[&str] = &["commands", "file", "env"];

pub const VALID_PLATFORMS: &[&str] = &["android", "ios", "web"];

pub const PROJECT_ROOT: &str = "workspace";

pub const SUBFLOWS_SEGMENT: &str = "common/subflows";

pub const SETUP_FLOW: &str = "setup.yaml";

pub const TEARDOWN_FLOW: &str = "teardown.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSchema {
    pub name: &'static str,
    /// At least one of these must be present when non-empty.
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
    /// The raw value itself must be non-empty.
    pub requires_value: bool,
}

impl CommandSchema {
    const fn new(
        name: &'static str,
        required: &'static [&'static str],
        optional: &'static [&'static str],
        requires_value: bool,
    ) -> Self {
        Self {
            name,
            required,
            optional,
            requires_value,
        }
    }

    pub fn allows(&self, property: &str) -> bool {
        self.required.contains(&property) || self.optional.contains(&property)
    }

    pub fn has_required_group(&self) -> bool {
        !self.required.is_empty()
    }

    pub fn required_alternatives(&self) -> String {
        self.required.join(" or ")
    }
}

const TAP_PROPERTIES: &[&str] = &[
    "id",
    "text",
    "point",
    "repeat",
    "delay",
    "retryTapIfNoChange",
    "waitToSettleTimeoutMs",
    "index",
    "above",
    "optional",
    "enabled",
    "when",
];

const ASSERT_PROPERTIES: &[&str] = &["text", "id", "enabled", "checked", "focused", "selected"];

const NONE: &[&str] = &[];

/// Ordered command vocabulary; the order is the one suggestions are searched in.
pub const COMMANDS: &[CommandSchema] = &[
    CommandSchema::new("assertVisible", NONE, ASSERT_PROPERTIES, true),
    CommandSchema::new("assertNotVisible", NONE, ASSERT_PROPERTIES, true),
    CommandSchema::new("assertTrue", NONE, &["label", "condition"], false),
    CommandSchema::new("copyTextFrom", NONE, &["id", "text"], true),
    CommandSchema::new("evalScript", NONE, NONE, true),
    CommandSchema::new("eraseText", NONE, NONE, false),
    CommandSchema::new(
        "extendedWaitUntil",
        &["visible", "notVisible"],
        &["timeout"],
        false,
    ),
    CommandSchema::new("inputText", NONE, NONE, true),
    CommandSchema::new("killApp", NONE, NONE, false),
    CommandSchema::new(
        "pressKey",
        NONE,
        &[
            "home",
            "back",
            "volume up",
            "volume down",
            "enter",
            "tab",
            "lock",
            "power",
            "backspace",
        ],
        true,
    ),
    CommandSchema::new("pasteText", NONE, NONE, false),
    CommandSchema::new("repeat", &["times", "while"], &["commands"], false),
    CommandSchema::new("retry", &["commands"], &["maxRetries"], false),
    CommandSchema::new("runFlow", NONE, &["env", "when", "file", "commands"], false),
    CommandSchema::new("runScript", NONE, NONE, true),
    CommandSchema::new("scroll", NONE, NONE, false),
    CommandSchema::new(
        "scrollUntilVisible",
        &["element"],
        &[
            "direction",
            "timeout",
            "speed",
            "visibilityPercentage",
            "centerElement",
            "when",
        ],
        false,
    ),
    CommandSchema::new("stopApp", NONE, NONE, false),
    CommandSchema::new("swipe", NONE, &["from", "direction", "start", "end"], true),
    CommandSchema::new("takeScreenshot", NONE, &["path"], false),
    CommandSchema::new("tapOn", NONE, TAP_PROPERTIES, true),
    CommandSchema::new("doubleTapOn", NONE, TAP_PROPERTIES, true),
    CommandSchema::new("longPressOn", NONE, TAP_PROPERTIES, true),
    CommandSchema::new("waitForAnimationToEnd", NONE, &["timeout"], false),
    CommandSchema::new("launchApp", NONE, NONE, false),
    CommandSchema::new("clearState", NONE, NONE, false),
    CommandSchema::new("clearKeychain", NONE, NONE, false),
    CommandSchema::new("back", NONE, NONE, false),
    CommandSchema::new("hide", NONE, NONE, false),
    CommandSchema::new("openLink", NONE, NONE, true),
];

static REGISTRY: LazyLock<HashMap<&'static str, &'static CommandSchema>> =
    LazyLock::new(|| COMMANDS.iter().map(|schema| (schema.name, schema)).collect());

pub fn command_schema(name: &str) -> Option<&'static CommandSchema> {
    REGISTRY.get(name).copied()
}

pub fn is_valid_command(name: &str) -> bool {
    REGISTRY.contains_key(name)
}

/// First vocabulary entry equal to `name` ignoring case.
pub fn suggest_command(name: &str) -> Option<&'static str> {
    suggest(COMMANDS.iter().map(|schema| schema.name), name)
}

pub fn suggest_property(name: &str) -> Option<&'static str> {
    suggest(VALID_PROPERTIES.iter().copied(), name)
}

pub fn is_valid_platform(platform: &str) -> bool {
    let platform = platform.to_lowercase();
    VALID_PLATFORMS.contains(&platform.as_str())
}

pub fn canonical_subflow(file: &str) -> String {
    format!("{PROJECT_ROOT}/{SUBFLOWS_SEGMENT}/{file}")
}

fn suggest(mut candidates: impl Iterator<Item = &'static str>, name: &str) -> Option<&'static str> {
    let lowered = name.to_lowercase();
    candidates.find(|candidate| candidate.to_lowercase() == lowered)
}
