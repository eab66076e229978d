//! Bold-marker run splitting.

use crate::model::Run;

/// The bold delimiter.
pub const BOLD_MARKER: &str = "**";

/// Count non-overlapping `**` tokens in a line.
pub fn marker_count(line: &str) -> usize {
    line.matches(BOLD_MARKER).count()
}

/// Check whether a line carries a usable (even, non-zero) set of bold markers.
pub fn has_balanced_markers(line: &str) -> bool {
    let count = marker_count(line);
    count > 0 && count % 2 == 0
}

/// Split a line into alternating plain and bold runs.
///
/// The earliest `**` opens a span and the next `**` closes it. Empty runs are
/// not emitted. A line with an odd number of markers (or none) comes back as a
/// single plain run equal to the input. The result is never empty: a line made
/// only of markers yields one empty plain run.
pub fn split_runs(line: &str) -> Vec<Run> {
    if !has_balanced_markers(line) {
        return vec![Run::plain(line)];
    }

    let mut runs = Vec::new();
    let mut bold = false;
    for part in line.split(BOLD_MARKER) {
        if !part.is_empty() {
            runs.push(Run::new(part, bold));
        }
        bold = !bold;
    }

    if runs.is_empty() {
        runs.push(Run::plain(""));
    }
    runs
}

/// Remove balanced bold markers, keeping the enclosed text.
pub fn strip_markers(line: &str) -> String {
    if !has_balanced_markers(line) {
        return line.to_string();
    }
    split_runs(line).into_iter().map(|r| r.text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain_line() {
        assert_eq!(split_runs("Normal text"), vec![Run::plain("Normal text")]);
    }

    #[test]
    fn test_split_leading_bold() {
        assert_eq!(
            split_runs("**Bold** and normal"),
            vec![Run::bold("Bold"), Run::plain(" and normal")]
        );
    }

    #[test]
    fn test_split_multiple_spans() {
        assert_eq!(
            split_runs("a **b** c **d**"),
            vec![
                Run::plain("a "),
                Run::bold("b"),
                Run::plain(" c "),
                Run::bold("d"),
            ]
        );
    }

    #[test]
    fn test_unbalanced_is_plain() {
        assert_eq!(
            split_runs("unbalanced **bold"),
            vec![Run::plain("unbalanced **bold")]
        );
        assert_eq!(
            split_runs("**a** and **b"),
            vec![Run::plain("**a** and **b")]
        );
    }

    #[test]
    fn test_empty_spans_dropped() {
        assert_eq!(split_runs("x****y"), vec![Run::plain("x"), Run::plain("y")]);
        assert_eq!(split_runs("****"), vec![Run::plain("")]);
    }

    #[test]
    fn test_triple_asterisks() {
        // "***x***" tokenizes as "**" "*x" "**" "*"
        assert_eq!(
            split_runs("***x***"),
            vec![Run::bold("*x"), Run::plain("*")]
        );
    }

    #[test]
    fn test_strip_markers() {
        assert_eq!(strip_markers("**Key:** value"), "Key: value");
        assert_eq!(strip_markers("5 ** 2"), "5 ** 2");
    }
}
