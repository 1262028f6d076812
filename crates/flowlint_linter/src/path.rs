//! Canonical form for sub-flow references.
//!
//! Lifecycle hooks point at shared setup/teardown flows with differing
//! relative depths, quoting and separators. Two references are equivalent
//! when they normalize to the same string.

use crate::schema::{PROJECT_ROOT, SUBFLOWS_SEGMENT, canonical_subflow};

pub fn normalize_flow_path(path: &str) -> String {
    let unquoted = strip_quotes(path.trim());
    let mut normalized = unquoted.replace('\\', "/");

    if normalized.starts_with("../") {
        let mut rest = normalized.as_str();
        while let Some(stripped) = rest.strip_prefix("../") {
            rest = stripped;
        }
        normalized = with_root(rest);
    }

    if normalized.contains(SUBFLOWS_SEGMENT) {
        normalized = with_root(&normalized);
    }

    normalized
}

/// True when `path` is an equivalent spelling of
/// `workspace/common/subflows/<target_file>`.
pub fn is_valid_flow_path(path: &str, target_file: &str) -> bool {
    !path.trim().is_empty() && normalize_flow_path(path) == canonical_subflow(target_file)
}

fn strip_quotes(path: &str) -> &str {
    let path = path.strip_prefix(['"', '\'']).unwrap_or(path);
    path.strip_suffix(['"', '\'']).unwrap_or(path)
}

fn with_root(path: &str) -> String {
    let root = format!("{PROJECT_ROOT}/");
    if path.starts_with(&root) {
        path.to_string()
    } else {
        format!("{root}{path}")
    }
}
