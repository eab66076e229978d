//! Plain text rendering for the remote document service.

use crate::model::Block;
use crate::parser::parse_line;

/// Convert blocks to formatting-free text.
///
/// One line per block: heading and bullet text, concatenated run text, or an
/// empty line for a blank line. Lines are joined with `\n`. Trailing blank
/// lines are dropped since they do not survive a line split.
///
/// Each line is flattened until the parser reads it back unchanged, so
/// converting the output a second time returns the same text.
pub fn to_plain_text(blocks: &[Block]) -> String {
    let mut lines: Vec<String> = blocks.iter().map(flatten).collect();
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

/// Flatten one block to a line the parser classifies as plain text.
///
/// Block text can itself begin with `#` or `*`, or hold only whitespace,
/// and would be reclassified on a second parse. Every pass that changes the
/// line makes it shorter, so the loop ends.
fn flatten(block: &Block) -> String {
    let mut line = settle(block.plain_text());
    loop {
        let next = settle(parse_line(&line).plain_text());
        if next == line {
            return line;
        }
        line = next;
    }
}

fn settle(mut line: String) -> String {
    // A trailing CR is eaten by the `\r\n` line split.
    while line.ends_with('\r') {
        line.pop();
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn twice(text: &str) -> (String, String) {
        let once = to_plain_text(&parse(text));
        let twice = to_plain_text(&parse(&once));
        (once, twice)
    }

    #[test]
    fn test_markers_removed() {
        let blocks = parse("# Title\nNormal text\n* Bullet one\n*  Sub bullet\n**Bold** and normal");
        assert_eq!(
            to_plain_text(&blocks),
            "Title\nNormal text\nBullet one\nSub bullet\nBold and normal"
        );
    }

    #[test]
    fn test_blank_lines_kept() {
        let blocks = parse("Dear Hiring Manager,\n\nThank you.");
        assert_eq!(to_plain_text(&blocks), "Dear Hiring Manager,\n\nThank you.");
    }

    #[test]
    fn test_unbalanced_markers_kept() {
        let blocks = parse("unbalanced **bold");
        assert_eq!(to_plain_text(&blocks), "unbalanced **bold");
    }

    #[test]
    fn test_nested_markers_flattened_once() {
        assert_eq!(twice("* # Skills"), ("Skills".to_string(), "Skills".to_string()));
        assert_eq!(twice("# * Note"), ("Note".to_string(), "Note".to_string()));
    }

    #[test]
    fn test_whitespace_bold_run_is_blank() {
        let (once, again) = twice("before\n** **\nafter");
        assert_eq!(once, "before\n\nafter");
        assert_eq!(once, again);
    }

    #[test]
    fn test_trailing_blank_lines_dropped() {
        let (once, again) = twice("a\n\n\n");
        assert_eq!(once, "a");
        assert_eq!(once, again);
    }

    #[test]
    fn test_carriage_returns_settled() {
        let (once, again) = twice("a\r\r\nb\r");
        assert_eq!(once, "a\nb");
        assert_eq!(once, again);
    }
}
