//! Notation parsing: lines to blocks, and lines to bold/plain runs.
//!
//! The parser is the single source of block kinds and bold spans for every
//! backend. It is a total function: any string parses.

mod blocks;
mod runs;

pub use blocks::{parse, parse_line};
pub use runs::{has_balanced_markers, marker_count, split_runs, strip_markers, BOLD_MARKER};
