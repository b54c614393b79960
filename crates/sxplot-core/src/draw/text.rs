//! Text definitions, measurement and SVG rendering.
//!
//! Layout of a figure depends on how much room its labels take: tick labels
//! push the plot area inward, the legend box is sized by its widest entry.
//! [`Text::calculate_size`] measures text with cosmic-text against the fonts
//! installed on the host, falling back to an estimate when no font is found.

use std::sync::{Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::{debug, info};
use svg::node::{Text as SvgText, element as svg_element};

use crate::{
    color::Color,
    geometry::{Insets, Point, Size},
};

/// Horizontal alignment of rendered text relative to its anchor point.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    #[default]
    Middle,
    End,
}

impl TextAnchor {
    /// Returns the SVG `text-anchor` value.
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// Font and color settings shared by a group of text elements.
///
/// # Examples
///
/// ```
/// use sxplot_core::draw::{Text, TextDefinition};
///
/// let mut definition = TextDefinition::new();
/// definition.set_font_size(14);
///
/// let title = Text::new(&definition, "Coupler");
/// assert!(title.calculate_size().width() > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct TextDefinition {
    font_family: String,
    font_size: u16,
    color: Color,
    padding: Insets,
}

impl TextDefinition {
    /// Creates a definition with the default font (sans-serif, 10pt, black).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size;
    }

    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Sets the space reserved around the text when measuring it.
    pub fn set_padding(&mut self, padding: Insets) {
        self.padding = padding;
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn padding(&self) -> Insets {
        self.padding
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_size: 10,
            color: Color::default(),
            padding: Insets::default(),
        }
    }
}

/// A piece of text paired with the definition it is drawn with.
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    content: &'a str,
}

impl<'a> Text<'a> {
    pub fn new(definition: &'a TextDefinition, content: &'a str) -> Self {
        Self {
            definition,
            content,
        }
    }

    pub fn content(&self) -> &str {
        self.content
    }

    /// Calculate the total size required to display this text, including padding.
    pub fn calculate_size(&self) -> Size {
        let padding = self.definition.padding();
        self.calculate_size_without_padding().add_padding(padding)
    }

    fn calculate_size_without_padding(&self) -> Size {
        TEXT_MANAGER
            .get_or_init(TextManager::new)
            .calculate_text_size(self.content, self.definition)
    }

    /// Renders the text as a single SVG `<text>` element.
    ///
    /// `position` is the anchor point: its x is aligned according to
    /// `anchor`, its y is the vertical center of the text. A `rotation` in
    /// degrees turns the text around `position` (axis labels use `-90`).
    pub fn render(
        &self,
        position: Point,
        anchor: TextAnchor,
        rotation: Option<f32>,
    ) -> svg_element::Text {
        let color = self.definition.color();
        let mut text = svg_element::Text::new("")
            .set("x", position.x())
            .set("y", position.y())
            .set("text-anchor", anchor.to_svg_value())
            .set("dominant-baseline", "central")
            .set("font-family", self.definition.font_family())
            .set("font-size", self.definition.font_size())
            .set("fill", color.to_string())
            .set("fill-opacity", color.alpha())
            .add(SvgText::new(self.content));

        if let Some(angle) = rotation {
            text = text.set(
                "transform",
                format!("rotate({angle} {} {})", position.x(), position.y()),
            );
        }

        text
    }
}

/// Owns the shared cosmic-text `FontSystem`; loading system fonts is slow,
/// so it happens once per process.
struct TextManager {
    font_system: Mutex<FontSystem>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
        }
    }

    /// Measures `text` in pixels. Multi-line text stacks one line height per
    /// line; without usable fonts the width is estimated from the character
    /// count.
    fn calculate_text_size(&self, text: &str, text_def: &TextDefinition) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        // Points to pixels at 96 DPI
        let font_size_px = text_def.font_size() as f32 * 1.33;
        let line_height = font_size_px * 1.15;
        let metrics = Metrics::new(font_size_px, line_height);

        let mut font_system = match self.font_system.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);
        let attrs = Attrs::new().family(Family::Name(text_def.font_family()));

        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut max_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;
        let mut runs = 0;
        for run in buffer.layout_runs() {
            if let Some(last) = run.glyphs.last() {
                max_width = max_width.max(last.x + last.w);
            }
            total_height += metrics.line_height;
            runs += 1;
        }

        if runs == 0 || max_width == 0.0 {
            debug!(text; "No glyphs shaped, estimating text size");
            let lines = text.lines().count().max(1);
            let longest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
            max_width = longest as f32 * font_size_px * 0.55;
            total_height = lines as f32 * metrics.line_height;
        }

        Size::new(max_width, total_height)
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();
