//! Heuristic line lookup.
//!
//! The parsed YAML tree carries no source positions, so diagnostics are
//! correlated back to the text by substring search. Blank and comment lines
//! never match. A token that is also a substring of an unrelated identifier
//! (`text` inside `inputText`, for instance) can resolve to the wrong line;
//! callers must treat the result as a hint.

/// Lines searched after an anchor before falling back to a plain search.
pub const ANCHOR_WINDOW: usize = 20;

#[derive(Debug, Clone, Copy)]
pub struct LineLocator<'a> {
    lines: &'a [&'a str],
}

impl<'a> LineLocator<'a> {
    pub fn new(lines: &'a [&'a str]) -> Self {
        Self { lines }
    }

    /// 1-based line of `token`, searched after the `occurrence`-th line
    /// containing `anchor` when one is given, otherwise (or when that fails)
    /// the `occurrence`-th line containing `token` itself.
    pub fn locate(&self, token: &str, anchor: Option<&str>, occurrence: usize) -> Option<usize> {
        if token.is_empty() {
            return None;
        }

        if let Some(anchor) = anchor.filter(|anchor| !anchor.is_empty()) {
            if let Some(line) = self.locate_near(token, anchor, occurrence) {
                return Some(line);
            }
        }

        self.searchable()
            .filter(|(_, line)| line.contains(token))
            .nth(occurrence.max(1) - 1)
            .map(|(idx, _)| idx + 1)
    }

    fn locate_near(&self, token: &str, anchor: &str, occurrence: usize) -> Option<usize> {
        let (anchor_idx, _) = self
            .searchable()
            .filter(|(_, line)| line.contains(anchor))
            .nth(occurrence.max(1) - 1)?;

        let window_end = (anchor_idx + ANCHOR_WINDOW).min(self.lines.len());
        self.searchable()
            .skip_while(|(idx, _)| *idx < anchor_idx)
            .take_while(|(idx, _)| *idx < window_end)
            .find(|(_, line)| line.contains(token))
            .map(|(idx, _)| idx + 1)
    }

    fn searchable(&self) -> impl Iterator<Item = (usize, &'a str)> + 'a {
        self.lines
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, line)| !is_skippable(line))
    }
}

pub(crate) fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Convenience wrapper over raw text.
pub fn find_line(text: &str, token: &str, anchor: Option<&str>, occurrence: usize) -> Option<usize> {
    let lines: Vec<&str> = text.lines().collect();
    LineLocator::new(&lines).locate(token, anchor, occurrence)
}
