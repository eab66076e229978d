//! Pagination layout engine.
//!
//! Consumes parsed blocks and produces pages of positioned, measured text
//! fragments ready for a print backend. Font metrics are injected through
//! [`TextMeasure`].

mod engine;
mod measure;
mod options;

pub use engine::{
    bullet_glyph, layout, step, wrap_runs, LayoutState, LineBox, LinePiece, BULLET_GLYPH,
    SUB_BULLET_GLYPH,
};
pub use measure::{StandardFontMetrics, TextExtent, TextMeasure, LINE_HEIGHT_FACTOR};
pub use options::{LayoutOptions, PageSize, PT_TO_MM};
