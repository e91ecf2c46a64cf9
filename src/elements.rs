//! Custom elements layered on top of `genpdf` primitives.
//!
//! `genpdf` has no native underline support, so the title line draws its own
//! stroke underneath the printed text.

use genpdf::error::Error;
use genpdf::style::{Style, StyledString};
use genpdf::{render, Alignment, Element, Mm, Position, RenderResult, Size};

const DEFAULT_UNDERLINE_OFFSET_MM: f64 = 0.6;

/// A single line of styled text with an underline stroke drawn beneath it.
///
/// Used for sheet titles, which render centered in a large bold style. The
/// element does not wrap; a title that exceeds the page width is clipped by
/// the renderer.
pub struct UnderlinedTitle {
    text: String,
    style: Style,
    alignment: Alignment,
    underline_offset: Mm,
}

impl UnderlinedTitle {
    /// Creates a centered underlined line with the given style.
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
            alignment: Alignment::Center,
            underline_offset: Mm::from(DEFAULT_UNDERLINE_OFFSET_MM),
        }
    }

    /// Sets the alignment and returns the updated element.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Sets the distance between the glyph box and the underline stroke.
    pub fn with_underline_offset(mut self, offset: impl Into<Mm>) -> Self {
        self.underline_offset = offset.into();
        self
    }
}

impl Element for UnderlinedTitle {
    fn render(
        &mut self,
        context: &genpdf::Context,
        mut area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let string = StyledString::new(self.text.clone(), style.and(self.style));
        let width = string.width(&context.font_cache);
        let line_height = string.style.line_height(&context.font_cache);

        let mut result = RenderResult::default();
        if line_height > area.size().height {
            result.has_more = true;
            return Ok(result);
        }

        let available_width = area.size().width;
        let x_offset = match self.alignment {
            Alignment::Left => Mm::default(),
            Alignment::Center => (available_width - width) / 2.0,
            Alignment::Right => available_width - width,
        };

        if let Some(mut section) =
            area.text_section(&context.font_cache, Position::new(x_offset, 0), string.style)
        {
            section.print_str(&string.s, string.style)?;
        } else {
            result.has_more = true;
            return Ok(result);
        }

        let glyph_height = string
            .style
            .font(&context.font_cache)
            .glyph_height(string.style.font_size());
        let baseline = glyph_height + self.underline_offset;

        let mut stroke_style = Style::new();
        if let Some(color) = string.style.color() {
            stroke_style = stroke_style.with_color(color);
        }
        area.draw_line(
            vec![
                Position::new(x_offset, baseline),
                Position::new(x_offset + width, baseline),
            ],
            stroke_style,
        );

        result.size = Size::new(width, line_height);
        Ok(result)
    }
}
