//! Line classification into blocks.

use super::runs::{has_balanced_markers, split_runs, strip_markers, BOLD_MARKER};
use crate::model::{Block, Run};

/// Heading line prefix.
const HEADING_MARKER: char = '#';

/// Bullet line prefix.
const BULLET_MARKER: char = '*';

/// Deepest heading level the notation recognizes.
const MAX_HEADING_LEVEL: usize = 6;

/// Parse notation text into blocks, one block per line.
///
/// Lines are split with [`str::lines`], so both `\n` and `\r\n` endings are
/// accepted and a trailing newline does not add a line. This never fails:
/// unknown or malformed markup degrades to plain paragraphs.
pub fn parse(text: &str) -> Vec<Block> {
    let blocks: Vec<Block> = text.lines().map(parse_line).collect();
    log::debug!("Parsed {} lines into blocks", blocks.len());
    blocks
}

/// Classify a single line.
///
/// Priority: blank, heading, bullet, bold paragraph, plain paragraph.
pub fn parse_line(line: &str) -> Block {
    if line.trim().is_empty() {
        return Block::BlankLine;
    }

    if line.starts_with(HEADING_MARKER) {
        return parse_heading(line);
    }

    if line.starts_with(BULLET_MARKER) && !line.starts_with(BOLD_MARKER) {
        return parse_bullet(line);
    }

    if has_balanced_markers(line) {
        return Block::Paragraph {
            runs: split_runs(line),
        };
    }

    Block::Paragraph {
        runs: vec![Run::plain(line)],
    }
}

fn parse_heading(line: &str) -> Block {
    let rest = line.trim_start_matches(HEADING_MARKER);
    let hashes = line.len() - rest.len();
    let level = hashes.clamp(1, MAX_HEADING_LEVEL) as u8;

    Block::Heading {
        level,
        text: strip_markers(rest.trim()),
    }
}

fn parse_bullet(line: &str) -> Block {
    let rest = &line[BULLET_MARKER.len_utf8()..];

    // One separator after the marker is expected; whitespace beyond it marks a sub-bullet.
    let mut chars = rest.chars();
    let after_separator = match chars.next() {
        Some(c) if c.is_whitespace() => chars.as_str(),
        _ => rest,
    };
    let indent_level = match after_separator.chars().next() {
        Some(c) if c.is_whitespace() => 1,
        _ => 0,
    };

    Block::BulletItem {
        indent_level,
        text: strip_markers(rest.trim()),
    }
}
