//! Match-context extraction from a line buffer.

/// Trimmed, blank-filtered lines surrounding a match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineContext {
    pub before: Vec<String>,
    pub after: Vec<String>,
}

/// Up to `context_lines` lines on each side of `index`, truncated at buffer
/// boundaries. Each context line is trimmed; blank lines are dropped after
/// trimming. `context_lines == 0` is the fast path and always yields two
/// empty vectors.
pub fn surrounding_lines<S: AsRef<str>>(
    lines: &[S],
    index: usize,
    context_lines: usize,
) -> LineContext {
    if context_lines == 0 {
        return LineContext::default();
    }

    let start = index.saturating_sub(context_lines);
    let end = (index + context_lines + 1).min(lines.len());

    let before = lines[start..index]
        .iter()
        .map(|l| l.as_ref().trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();
    let after = if index + 1 < end {
        lines[index + 1..end]
            .iter()
            .map(|l| l.as_ref().trim().to_string())
            .filter(|l| !l.is_empty())
            .collect()
    } else {
        Vec::new()
    };

    LineContext { before, after }
}
