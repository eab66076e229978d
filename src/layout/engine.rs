//! Pagination as a pure fold over blocks.
//!
//! Each block is turned into wrapped [`LineBox`]es, and every line is placed
//! with its own page-fit check. The state threaded through the fold is
//! [`LayoutState`], so page transitions can be tested without any backend.

use super::measure::TextMeasure;
use super::options::LayoutOptions;
use crate::model::{Block, LayoutPage, PositionedFragment, Run};

/// Glyph drawn before a top-level bullet.
pub const BULLET_GLYPH: char = '•';

/// Glyph drawn before a sub-bullet.
pub const SUB_BULLET_GLYPH: char = '◦';

/// A piece of a line, positioned relative to the line start.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePiece {
    /// Offset from the line start
    pub x: f32,
    /// Text content
    pub text: String,
    /// Bold face
    pub bold: bool,
    /// Font size in points
    pub font_size: f32,
}

/// One wrapped line ready for placement.
#[derive(Debug, Clone, PartialEq)]
pub struct LineBox {
    /// Pieces in left-to-right order
    pub pieces: Vec<LinePiece>,
    /// Height of the tallest piece
    pub height: f32,
}

/// Pagination state: finished pages, the page being filled, and the cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutState {
    finished: Vec<LayoutPage>,
    current: LayoutPage,
    cursor_y: f32,
    top: f32,
}

impl LayoutState {
    /// Start on page 1 with the cursor at the top margin.
    pub fn new(options: &LayoutOptions) -> Self {
        Self {
            finished: Vec::new(),
            current: LayoutPage::new(1),
            cursor_y: options.margin,
            top: options.margin,
        }
    }

    /// Number of the page currently being filled.
    pub fn page_number(&self) -> u32 {
        self.current.number
    }

    /// Current vertical position.
    pub fn cursor_y(&self) -> f32 {
        self.cursor_y
    }

    /// The page currently being filled.
    pub fn current_page(&self) -> &LayoutPage {
        &self.current
    }

    /// Whether anything has been placed on the current page.
    ///
    /// Blank lines move the cursor but do not count.
    pub fn page_has_content(&self) -> bool {
        !self.current.is_empty()
    }

    /// Close the current page and open the next one.
    pub fn break_page(mut self) -> Self {
        let next = LayoutPage::new(self.current.number + 1);
        let full = std::mem::replace(&mut self.current, next);
        log::debug!(
            "Page {} full at y={:.1}, starting page {}",
            full.number,
            self.cursor_y,
            self.current.number
        );
        self.finished.push(full);
        self.cursor_y = self.top;
        self
    }

    /// Place one line at horizontal offset `x`.
    ///
    /// Breaks the page first when the line does not fit below the cursor. On a
    /// page with nothing placed yet the cursor returns to the top instead, so
    /// leading blank lines never leave an empty page behind. An oversized line
    /// is placed anyway and overflows.
    pub fn place_line(mut self, line: LineBox, x: f32, options: &LayoutOptions) -> Self {
        if self.cursor_y + line.height > options.bottom_limit() {
            if self.page_has_content() {
                self = self.break_page();
            } else {
                self.cursor_y = self.top;
            }
        }

        let y = self.cursor_y;
        for piece in line.pieces {
            self.current.add_fragment(PositionedFragment::new(
                x + piece.x,
                y,
                piece.text,
                piece.bold,
                piece.font_size,
            ));
        }
        self.cursor_y += line.height;
        self
    }

    /// Place several lines at the same horizontal offset.
    pub fn place_lines(self, lines: Vec<LineBox>, x: f32, options: &LayoutOptions) -> Self {
        lines
            .into_iter()
            .fold(self, |state, line| state.place_line(line, x, options))
    }

    /// Move the cursor down without placing anything.
    pub fn advance(mut self, dy: f32) -> Self {
        self.cursor_y += dy;
        self
    }

    /// Finish layout and return all pages in order.
    pub fn finish(mut self) -> Vec<LayoutPage> {
        self.finished.push(self.current);
        self.finished
    }
}

/// Lay out blocks into pages.
///
/// Always returns at least one page. Every non-blank block contributes at
/// least one fragment, and blocks are consumed strictly in order.
pub fn layout<M>(blocks: &[Block], options: &LayoutOptions, measure: &M) -> Vec<LayoutPage>
where
    M: TextMeasure + ?Sized,
{
    let pages = blocks
        .iter()
        .fold(LayoutState::new(options), |state, block| {
            step(state, block, options, measure)
        })
        .finish();
    log::debug!("Laid out {} blocks on {} pages", blocks.len(), pages.len());
    pages
}

/// Advance the layout state by one block.
pub fn step<M>(state: LayoutState, block: &Block, options: &LayoutOptions, measure: &M) -> LayoutState
where
    M: TextMeasure + ?Sized,
{
    match block {
        Block::Heading { level, text } => {
            let size = options.heading_font_size(*level);
            let runs = [Run::bold(text.as_str())];
            let lines = wrap_runs(&runs, size, options.content_width(), measure);
            state
                .place_lines(lines, options.margin, options)
                .advance(options.heading_spacing)
        }
        Block::BulletItem { indent_level, text } => {
            let indent = options.bullet_indent_for(*indent_level);
            let runs = [Run::plain(format!("{} {}", bullet_glyph(*indent_level), text))];
            let width = (options.content_width() - indent).max(0.0);
            let lines = wrap_runs(&runs, options.body_font_size, width, measure);
            state
                .place_lines(lines, options.margin + indent, options)
                .advance(options.bullet_spacing)
        }
        Block::Paragraph { runs } => {
            let lines = wrap_runs(runs, options.body_font_size, options.content_width(), measure);
            state
                .place_lines(lines, options.margin, options)
                .advance(options.paragraph_spacing)
        }
        Block::BlankLine => state.advance(options.blank_line_height),
    }
}

/// Bullet glyph for an indent level.
pub fn bullet_glyph(indent_level: u8) -> char {
    if indent_level == 0 {
        BULLET_GLYPH
    } else {
        SUB_BULLET_GLYPH
    }
}

/// Greedy word wrap over styled runs.
///
/// Breaks only between words. A word may span several runs (`**Rust**ing`)
/// and is measured whole, so it is never split at a style change, and each
/// piece keeps its bold attribute on whichever line it lands. A word wider
/// than `max_width` gets a line of its own. Always returns at least one line.
pub fn wrap_runs<M>(runs: &[Run], font_size: f32, max_width: f32, measure: &M) -> Vec<LineBox>
where
    M: TextMeasure + ?Sized,
{
    let default_bold = runs.first().map(|r| r.bold).unwrap_or(false);
    let mut lines = Vec::new();
    let mut current: Vec<(String, bool)> = Vec::new();
    let mut width = 0.0;

    for word in split_words(runs) {
        let blank = word.iter().all(|(text, _)| text.trim().is_empty());

        // A wrapped line does not start with bare whitespace.
        if current.is_empty() && !lines.is_empty() && blank {
            continue;
        }

        let fit = word_width(&word, font_size, measure, true);
        if !current.is_empty() && width + fit > max_width {
            lines.push(finish_line(
                std::mem::take(&mut current),
                font_size,
                default_bold,
                measure,
            ));
            width = 0.0;
            if blank {
                continue;
            }
        }

        width += word_width(&word, font_size, measure, false);
        for (text, bold) in word {
            push_piece(&mut current, text, bold);
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(finish_line(current, font_size, default_bold, measure));
    }
    lines
}

/// Split runs into words, each ending after its trailing space.
///
/// Words continue across run boundaries, so one word can hold pieces of
/// different weight.
fn split_words(runs: &[Run]) -> Vec<Vec<(String, bool)>> {
    let mut words = Vec::new();
    let mut word: Vec<(String, bool)> = Vec::new();

    for run in runs {
        for piece in run.text.split_inclusive(' ') {
            push_piece(&mut word, piece.to_string(), run.bold);
            if piece.ends_with(' ') {
                words.push(std::mem::take(&mut word));
            }
        }
    }

    if !word.is_empty() {
        words.push(word);
    }
    words
}

fn push_piece(pieces: &mut Vec<(String, bool)>, text: String, bold: bool) {
    match pieces.last_mut() {
        Some((last, last_bold)) if *last_bold == bold => last.push_str(&text),
        _ => pieces.push((text, bold)),
    }
}

/// Width of a word, optionally without its trailing space.
fn word_width<M>(word: &[(String, bool)], font_size: f32, measure: &M, trim_end: bool) -> f32
where
    M: TextMeasure + ?Sized,
{
    let last = word.len().saturating_sub(1);
    word.iter()
        .enumerate()
        .map(|(i, (text, bold))| {
            let text = if trim_end && i == last {
                text.trim_end_matches(' ')
            } else {
                text.as_str()
            };
            measure.measure(text, font_size, *bold).width
        })
        .sum()
}

fn finish_line<M>(pieces: Vec<(String, bool)>, font_size: f32, default_bold: bool, measure: &M) -> LineBox
where
    M: TextMeasure + ?Sized,
{
    if pieces.is_empty() {
        let height = measure.measure("", font_size, default_bold).height;
        return LineBox {
            pieces: vec![LinePiece {
                x: 0.0,
                text: String::new(),
                bold: default_bold,
                font_size,
            }],
            height,
        };
    }

    let mut x = 0.0;
    let mut height: f32 = 0.0;
    let mut out = Vec::with_capacity(pieces.len());
    for (text, bold) in pieces {
        let extent = measure.measure(&text, font_size, bold);
        out.push(LinePiece {
            x,
            text,
            bold,
            font_size,
        });
        x += extent.width;
        height = height.max(extent.height);
    }
    LineBox { pieces: out, height }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::TextExtent;

    /// Every character is 1 unit wide; lines are 15 units tall.
    fn fixed(text: &str, _size: f32, _bold: bool) -> TextExtent {
        TextExtent::new(text.chars().count() as f32, 15.0)
    }

    fn small_page() -> LayoutOptions {
        LayoutOptions::new()
            .with_page(100.0, 100.0, 10.0)
            .with_block_spacing(0.0)
    }

    #[test]
    fn test_empty_input_has_one_page() {
        let pages = layout(&[], &LayoutOptions::default(), &fixed);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].number, 1);
        assert!(pages[0].is_empty());
    }

    #[test]
    fn test_sixth_paragraph_starts_second_page() {
        let blocks: Vec<Block> = (1..=10)
            .map(|i| Block::plain(format!("Paragraph {}", i)))
            .collect();
        let pages = layout(&blocks, &small_page(), &fixed);

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].fragment_count(), 5);
        assert_eq!(pages[1].fragment_count(), 5);
        assert_eq!(pages[1].fragments[0].text, "Paragraph 6");
        assert_eq!(pages[1].fragments[0].y, 10.0);
    }

    #[test]
    fn test_fold_step_transitions() {
        let options = small_page();
        let block = Block::plain("x");
        let mut state = LayoutState::new(&options);
        for _ in 0..5 {
            state = step(state, &block, &options, &fixed);
        }
        assert_eq!(state.page_number(), 1);
        assert_eq!(state.cursor_y(), 85.0);

        let state = step(state, &block, &options, &fixed);
        assert_eq!(state.page_number(), 2);
        assert_eq!(state.cursor_y(), 25.0);
    }

    #[test]
    fn test_oversized_line_still_placed() {
        let tall = |_: &str, _: f32, _: bool| TextExtent::new(1.0, 500.0);
        let blocks = vec![Block::plain("a"), Block::plain("b"), Block::plain("c")];
        let pages = layout(&blocks, &small_page(), &tall);

        assert_eq!(pages.len(), 3);
        assert!(pages.iter().all(|p| p.fragment_count() == 1));
    }

    #[test]
    fn test_blank_line_has_no_fragment() {
        let blocks = vec![Block::plain("a"), Block::BlankLine, Block::plain("b")];
        let pages = layout(&blocks, &small_page().with_blank_line_height(7.0), &fixed);
        let fragments = &pages[0].fragments;

        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[1].y, 10.0 + 15.0 + 7.0);
    }

    #[test]
    fn test_bullet_indent_and_glyph() {
        let blocks = vec![Block::bullet(0, "one"), Block::bullet(1, "two")];
        let pages = layout(&blocks, &small_page(), &fixed);
        let fragments = &pages[0].fragments;

        assert_eq!(fragments[0].x, 15.0);
        assert_eq!(fragments[0].text, "• one");
        assert_eq!(fragments[1].x, 20.0);
        assert_eq!(fragments[1].text, "◦ two");
    }

    #[test]
    fn test_heading_is_bold_and_sized() {
        let pages = layout(&[Block::heading(2, "Skills")], &small_page(), &fixed);
        let fragment = &pages[0].fragments[0];

        assert!(fragment.bold);
        assert_eq!(fragment.font_size, 12.0);
        assert_eq!(fragment.text, "Skills");
    }

    #[test]
    fn test_mixed_runs_share_baseline() {
        let block = Block::paragraph(vec![Run::bold("Bold"), Run::plain(" and normal")]);
        let pages = layout(&[block], &small_page(), &fixed);
        let fragments = &pages[0].fragments;

        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].x, 10.0);
        assert_eq!(fragments[1].x, 14.0);
        assert_eq!(fragments[0].y, fragments[1].y);
        assert!(fragments[0].bold);
        assert!(!fragments[1].bold);
    }

    #[test]
    fn test_wrap_keeps_bold_across_lines() {
        let runs = vec![Run::plain("aaa "), Run::bold("bbb ccc ddd")];
        let lines = wrap_runs(&runs, 12.0, 8.0, &fixed);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].pieces[0].text, "aaa ");
        assert!(!lines[0].pieces[0].bold);
        assert_eq!(lines[0].pieces[1].text, "bbb ");
        assert!(lines[0].pieces[1].bold);
        assert_eq!(lines[1].pieces.len(), 1);
        assert_eq!(lines[1].pieces[0].text, "ccc ddd");
        assert!(lines[1].pieces[0].bold);
    }

    #[test]
    fn test_wrapped_lines_checked_individually() {
        // 8 units of content width: "aaaa bbbb" wraps into two lines of 15.
        let options = LayoutOptions::new()
            .with_page(28.0, 60.0, 10.0)
            .with_block_spacing(0.0);
        let blocks = vec![Block::plain("x"), Block::plain("aaaa bbbb")];
        let pages = layout(&blocks, &options, &fixed);

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].plain_text(), "x\naaaa ");
        assert_eq!(pages[1].plain_text(), "bbbb");
    }

    #[test]
    fn test_word_across_runs_stays_whole() {
        let runs = vec![Run::plain("aaaa "), Run::bold("Rust"), Run::plain("ing")];
        let lines = wrap_runs(&runs, 12.0, 10.0, &fixed);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].pieces.len(), 1);
        assert_eq!(lines[0].pieces[0].text, "aaaa ");
        assert_eq!(lines[1].pieces.len(), 2);
        assert_eq!(lines[1].pieces[0].text, "Rust");
        assert!(lines[1].pieces[0].bold);
        assert_eq!(lines[1].pieces[1].text, "ing");
        assert!(!lines[1].pieces[1].bold);
        assert_eq!(lines[1].pieces[1].x, 4.0);
    }

    #[test]
    fn test_leading_blank_lines_do_not_leave_empty_page() {
        let mut blocks = vec![Block::BlankLine; 12];
        blocks.push(Block::plain("Hello"));
        let pages = layout(&blocks, &small_page().with_blank_line_height(7.0), &fixed);

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].fragment_count(), 1);
        assert_eq!(pages[0].fragments[0].y, 10.0);
    }

    #[test]
    fn test_blank_lines_after_content_break_page() {
        let mut blocks = vec![Block::plain("a")];
        blocks.extend(vec![Block::BlankLine; 10]);
        blocks.push(Block::plain("b"));
        let pages = layout(&blocks, &small_page().with_blank_line_height(7.0), &fixed);

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].fragments[0].text, "b");
        assert_eq!(pages[1].fragments[0].y, 10.0);
    }

    #[test]
    fn test_empty_heading_emits_fragment() {
        let pages = layout(&[Block::heading(1, "")], &small_page(), &fixed);
        assert_eq!(pages[0].fragment_count(), 1);
        assert!(pages[0].fragments[0].bold);
    }
}
