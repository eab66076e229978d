//! Text measurement capability.
//!
//! The layout engine has no font knowledge of its own; it asks a
//! [`TextMeasure`] implementation for the extent of every piece of text.
//! [`StandardFontMetrics`] covers the built-in PDF Helvetica faces used by the
//! print backend.

use unicode_normalization::UnicodeNormalization;

use super::options::PT_TO_MM;

/// Width and height of a measured piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextExtent {
    /// Advance width
    pub width: f32,
    /// Line height
    pub height: f32,
}

impl TextExtent {
    /// Create a new extent.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Measures text for a given font size and weight.
///
/// Implementations must be deterministic: identical inputs must produce
/// identical extents.
pub trait TextMeasure {
    /// Measure `text` at `font_size` points in the plain or bold face.
    fn measure(&self, text: &str, font_size: f32, bold: bool) -> TextExtent;
}

impl<F> TextMeasure for F
where
    F: Fn(&str, f32, bool) -> TextExtent,
{
    fn measure(&self, text: &str, font_size: f32, bold: bool) -> TextExtent {
        self(text, font_size, bold)
    }
}

/// Line height as a multiple of the font size (about 7 mm at 12 pt).
pub const LINE_HEIGHT_FACTOR: f32 = 1.65;

/// Helvetica advance widths for U+0020..=U+007E, in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

/// Helvetica-Bold advance widths for U+0020..=U+007E, in 1/1000 em.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // '0'..'?'
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 'P'..'_'
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // '`'..'o'
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 'p'..'~'
];

/// Metrics of the standard PDF Helvetica and Helvetica-Bold faces.
///
/// Widths are returned in millimetres, heights are `font_size *
/// LINE_HEIGHT_FACTOR` points converted to millimetres.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFontMetrics;

impl StandardFontMetrics {
    /// Create the metrics.
    pub fn new() -> Self {
        Self
    }

    /// Advance width of one character in 1/1000 em.
    pub fn char_width(c: char, bold: bool) -> u16 {
        let table = if bold {
            &HELVETICA_BOLD_WIDTHS
        } else {
            &HELVETICA_WIDTHS
        };
        match c {
            ' '..='~' => table[c as usize - 0x20],
            '\t' => table[0] * 4,
            '•' => 350,
            '◦' => table['o' as usize - 0x20],
            '–' => 556,
            '—' => 1000,
            '‘' | '’' | '‚' => {
                if bold {
                    278
                } else {
                    222
                }
            }
            '“' | '”' | '„' => {
                if bold {
                    500
                } else {
                    333
                }
            }
            '…' => 1000,
            '€' => 556,
            '\u{a0}' => table[0],
            c if c.is_control() => 0,
            _ => {
                if bold {
                    611
                } else {
                    556
                }
            }
        }
    }
}

impl TextMeasure for StandardFontMetrics {
    fn measure(&self, text: &str, font_size: f32, bold: bool) -> TextExtent {
        let units: u32 = text
            .nfc()
            .map(|c| u32::from(Self::char_width(c, bold)))
            .sum();
        TextExtent {
            width: units as f32 / 1000.0 * font_size * PT_TO_MM,
            height: font_size * LINE_HEIGHT_FACTOR * PT_TO_MM,
        }
    }
}
