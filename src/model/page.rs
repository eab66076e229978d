//! Page-level types produced by the pagination engine.

use serde::{Deserialize, Serialize};

/// A single laid-out page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutPage {
    /// Page number (1-indexed)
    pub number: u32,

    /// Text fragments in placement order
    pub fragments: Vec<PositionedFragment>,
}

impl LayoutPage {
    /// Create a new empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            fragments: Vec::new(),
        }
    }

    /// Add a fragment to the page.
    pub fn add_fragment(&mut self, fragment: PositionedFragment) {
        self.fragments.push(fragment);
    }

    /// Check if the page has no fragments.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Get the number of fragments on the page.
    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    /// Get the text of the page, one line per distinct `y` position.
    pub fn plain_text(&self) -> String {
        let mut lines: Vec<String> = Vec::new();
        let mut last_y: Option<f32> = None;
        for fragment in &self.fragments {
            match (last_y, lines.last_mut()) {
                (Some(y), Some(line)) if y == fragment.y => line.push_str(&fragment.text),
                _ => lines.push(fragment.text.clone()),
            }
            last_y = Some(fragment.y);
        }
        lines.join("\n")
    }
}

/// A measured run of text at a fixed position.
///
/// `x` and `y` are millimetres from the top-left corner of the page; `y` is
/// the top of the line box. `font_size` is in points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedFragment {
    /// Left edge
    pub x: f32,
    /// Top of the line box
    pub y: f32,
    /// Text content
    pub text: String,
    /// Whether to use the bold face
    pub bold: bool,
    /// Font size in points
    pub font_size: f32,
}

impl PositionedFragment {
    /// Create a new fragment.
    pub fn new(x: f32, y: f32, text: impl Into<String>, bold: bool, font_size: f32) -> Self {
        Self {
            x,
            y,
            text: text.into(),
            bold,
            font_size,
        }
    }
}
