//! Layout options and page geometry.

/// Millimetres per typographic point.
pub const PT_TO_MM: f32 = 25.4 / 72.0;

/// Page size for print output. All dimensions are in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PageSize {
    /// ISO A4 (210 x 297 mm)
    #[default]
    A4,
    /// US Letter (8.5 x 11 inches)
    Letter,
    /// Any other size
    Custom {
        /// Width in millimetres
        width: f32,
        /// Height in millimetres
        height: f32,
    },
}

impl PageSize {
    /// Width in millimetres.
    pub fn width(&self) -> f32 {
        match self {
            PageSize::A4 => 210.0,
            PageSize::Letter => 215.9,
            PageSize::Custom { width, .. } => *width,
        }
    }

    /// Height in millimetres.
    pub fn height(&self) -> f32 {
        match self {
            PageSize::A4 => 297.0,
            PageSize::Letter => 279.4,
            PageSize::Custom { height, .. } => *height,
        }
    }

    /// Width and height in points (1 point = 1/72 inch).
    pub fn points(&self) -> (f32, f32) {
        (self.width() / PT_TO_MM, self.height() / PT_TO_MM)
    }

    /// Parse a page size name ("a4", "letter").
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "a4" => Some(PageSize::A4),
            "letter" | "us-letter" => Some(PageSize::Letter),
            _ => None,
        }
    }
}

/// Options for the pagination layout engine.
///
/// Lengths are millimetres, font sizes are points.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    /// Page size
    pub page_size: PageSize,

    /// Margin on all four sides
    pub margin: f32,

    /// Font size for paragraphs and bullets
    pub body_font_size: f32,

    /// Heading size before the per-level reduction
    pub base_heading_size: f32,

    /// Smallest heading size
    pub min_heading_size: f32,

    /// Space after a heading
    pub heading_spacing: f32,

    /// Space after a paragraph
    pub paragraph_spacing: f32,

    /// Space after a bullet item
    pub bullet_spacing: f32,

    /// Vertical advance for a blank line
    pub blank_line_height: f32,

    /// Indent of a top-level bullet
    pub bullet_indent: f32,

    /// Extra indent per bullet level
    pub bullet_indent_step: f32,
}

impl LayoutOptions {
    /// Create new layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size.
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set page dimensions and margin in one call.
    pub fn with_page(mut self, width: f32, height: f32, margin: f32) -> Self {
        self.page_size = PageSize::Custom { width, height };
        self.margin = margin;
        self
    }

    /// Set the margin.
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin.max(0.0);
        self
    }

    /// Set the body font size.
    pub fn with_body_font_size(mut self, size: f32) -> Self {
        self.body_font_size = size;
        self
    }

    /// Set the heading base size and its floor.
    pub fn with_heading_sizes(mut self, base: f32, min: f32) -> Self {
        self.base_heading_size = base;
        self.min_heading_size = min;
        self
    }

    /// Set the same spacing after headings, paragraphs and bullets.
    pub fn with_block_spacing(mut self, spacing: f32) -> Self {
        self.heading_spacing = spacing;
        self.paragraph_spacing = spacing;
        self.bullet_spacing = spacing;
        self
    }

    /// Set the blank line advance.
    pub fn with_blank_line_height(mut self, height: f32) -> Self {
        self.blank_line_height = height;
        self
    }

    /// Set the bullet indent and per-level step.
    pub fn with_bullet_indent(mut self, indent: f32, step: f32) -> Self {
        self.bullet_indent = indent;
        self.bullet_indent_step = step;
        self
    }

    /// Page width.
    pub fn page_width(&self) -> f32 {
        self.page_size.width()
    }

    /// Page height.
    pub fn page_height(&self) -> f32 {
        self.page_size.height()
    }

    /// Width available between the margins.
    pub fn content_width(&self) -> f32 {
        (self.page_width() - 2.0 * self.margin).max(0.0)
    }

    /// Lowest `y` a line may reach before a page break.
    pub fn bottom_limit(&self) -> f32 {
        self.page_height() - self.margin
    }

    /// Font size for a heading level.
    pub fn heading_font_size(&self, level: u8) -> f32 {
        (self.base_heading_size - 2.0 * f32::from(level)).max(self.min_heading_size)
    }

    /// Indent for a bullet level.
    pub fn bullet_indent_for(&self, level: u8) -> f32 {
        self.bullet_indent + self.bullet_indent_step * f32::from(level)
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            margin: 20.0,
            body_font_size: 12.0,
            base_heading_size: 16.0,
            min_heading_size: 8.0,
            heading_spacing: 2.0,
            paragraph_spacing: 2.0,
            bullet_spacing: 2.0,
            blank_line_height: 7.0,
            bullet_indent: 5.0,
            bullet_indent_step: 5.0,
        }
    }
}
