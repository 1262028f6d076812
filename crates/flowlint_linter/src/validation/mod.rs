use std::collections::HashMap;

pub mod clause;
pub mod command;

pub use clause::ClauseValidator;
pub use command::CommandValidator;

/// How many times each command name has been seen so far in one document.
///
/// Shared by every command list of a file (hooks and body alike) so the N-th
/// physical occurrence of a name maps to the N-th textual match.
#[derive(Debug, Clone, Default)]
pub struct Occurrences {
    seen: HashMap<String, usize>,
}

impl Occurrences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more `name` and return its 1-based occurrence.
    pub fn record(&mut self, name: &str) -> usize {
        let count = self.seen.entry(name.to_string()).or_insert(0);
        *count += 1;
        *count
    }
}
