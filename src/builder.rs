//! Sheet assembly on top of `genpdf`.
//!
//! [`SheetBuilder`] collects pages of text blocks, then renders them through
//! `genpdf` with the standard worksheet page chrome: a centered brand line at
//! the top of every page and a gray page number at the bottom.

use std::fs;
use std::path::Path;
use std::rc::Rc;

use genpdf::elements::{Break, PageBreak, Paragraph};
use genpdf::error::{Error as RenderError, ErrorKind};
use genpdf::style::{Color, Style};
use genpdf::{self, Alignment, Element, Margins, Mm, PageDecorator, Position};
use log::debug;
use serde_json::Value;

use crate::elements::UnderlinedTitle;
use crate::error::{PageError, Result};
use crate::fonts;
use crate::model::{Block, FontConfig, Page};

const TITLE_FONT_SIZE: u8 = 30;
const CHROME_FONT_SIZE: u8 = 8;
const CHROME_GRAY: u8 = 128;

const PAGE_MARGIN_MM: f64 = 10.0;
const HEADER_GAP_MM: f64 = 4.0;
const FOOTER_HEIGHT_MM: f64 = 15.0;

const TITLE_GAP_LINES: f64 = 1.0;
const BODY_GAP_LINES: f64 = 4.0;

const BRAND_TEXT: &str =
    "Created by lazyworksheets.ai, AI powered free language teaching resources!";
const BRAND_LINK: &str = "www.lazyworksheets.io";

type ChromeFactory = dyn Fn(usize) -> Box<dyn Element>;

/// Assembles a sheet as an append-only sequence of pages and renders it to
/// PDF bytes.
///
/// The builder enforces the page-ordering contract: a title, if present, must
/// be the first thing added and may be added at most once.
pub struct SheetBuilder {
    pages: Vec<Page>,
    doc_title: Option<String>,
    font: FontConfig,
    header: Option<Rc<ChromeFactory>>,
    footer: Option<FooterSpec>,
}

impl SheetBuilder {
    /// Creates a builder with the default body font and the standard
    /// worksheet page chrome.
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            doc_title: None,
            font: FontConfig::default(),
            header: Some(Rc::new(|page| Box::new(brand_header(page)))),
            footer: Some(FooterSpec::new(FOOTER_HEIGHT_MM, page_number_footer)),
        }
    }

    /// Overrides the body font configuration.
    pub fn with_font(mut self, font: FontConfig) -> Self {
        self.font = font;
        self
    }

    /// Replaces the per-page header with a caller-supplied callback.
    ///
    /// The callback receives the 1-based page number.
    pub fn with_header<F, E>(mut self, header: F) -> Self
    where
        F: Fn(usize) -> E + 'static,
        E: Element + 'static,
    {
        self.header = Some(Rc::new(move |page| Box::new(header(page))));
        self
    }

    /// Replaces the per-page footer with a caller-supplied callback rendered
    /// into a reserved strip of `height_mm` at the bottom of every page.
    pub fn with_footer<F, E>(mut self, height_mm: f64, footer: F) -> Self
    where
        F: Fn(usize) -> E + 'static,
        E: Element + 'static,
    {
        self.footer = Some(FooterSpec::new(height_mm, footer));
        self
    }

    /// Adds the sheet title, which must come before any other content.
    ///
    /// Opens the first page, places the centered title block on it and
    /// records the document metadata title.
    pub fn add_title(&mut self, title: &Value) -> std::result::Result<(), PageError> {
        let text = title.as_str().ok_or(PageError::TitleNotText)?;

        if !self.pages.is_empty() {
            return Err(PageError::TitleAfterPages);
        }

        let mut page = Page::new();
        page.push(Block::Title(text.to_owned()));
        self.pages.push(page);
        self.doc_title = Some(text.to_owned());
        Ok(())
    }

    /// Appends a body text block to the current page.
    ///
    /// The value is stringified; strings keep their text, other scalars use
    /// their JSON form. Array values are rejected. If no page exists yet, a
    /// first page is opened.
    pub fn add_text(&mut self, text: &Value) -> std::result::Result<(), PageError> {
        if text.is_array() {
            return Err(PageError::UnsupportedList);
        }

        let text = crate::record::display_text(text);
        self.current_page().push(Block::Body(text));
        Ok(())
    }

    /// Appends a new blank page; content continues at its top.
    pub fn add_page(&mut self) {
        self.pages.push(Page::new());
    }

    /// Returns the pages assembled so far.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Renders the assembled sheet and returns the PDF bytes.
    pub fn render(&self) -> Result<Vec<u8>> {
        let family = fonts::font_family(&self.font.family)?;
        let mut document = genpdf::Document::new(family);
        document.set_paper_size(genpdf::PaperSize::A4);
        document.set_font_size(self.font.size);
        if let Some(title) = &self.doc_title {
            document.set_title(title.clone());
        }

        document.set_page_decorator(SheetDecorator::new(
            Margins::trbl(PAGE_MARGIN_MM, PAGE_MARGIN_MM, PAGE_MARGIN_MM, PAGE_MARGIN_MM),
            self.header.clone(),
            self.footer.clone(),
        ));

        for (index, page) in self.pages.iter().enumerate() {
            if index > 0 {
                document.push(PageBreak::new());
            }
            for block in page.blocks() {
                match block {
                    Block::Title(text) => {
                        let style = Style::new().bold().with_font_size(TITLE_FONT_SIZE);
                        document.push(UnderlinedTitle::new(text.clone(), style));
                        document.push(Break::new(TITLE_GAP_LINES));
                    }
                    Block::Body(text) => {
                        for line in text.split('\n') {
                            if line.trim().is_empty() {
                                document.push(Break::new(1.0));
                            } else {
                                document.push(Paragraph::new(line));
                            }
                        }
                        document.push(Break::new(BODY_GAP_LINES));
                    }
                }
            }
        }

        let mut bytes = Vec::new();
        document.render(&mut bytes)?;
        Ok(bytes)
    }

    /// Renders the sheet and writes it to `path`.
    ///
    /// Consumes the builder; saving is the final operation. An existing file
    /// at `path` is overwritten.
    pub fn save(self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.render()?;
        fs::write(path, &bytes)?;
        debug!("rendered {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }

    fn current_page(&mut self) -> &mut Page {
        if self.pages.is_empty() {
            self.pages.push(Page::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }
}

impl Default for SheetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Footer rendered into a strip of fixed height reserved at the page bottom.
#[derive(Clone)]
struct FooterSpec {
    height: Mm,
    factory: Rc<ChromeFactory>,
}

impl FooterSpec {
    fn new<F, E>(height_mm: f64, factory: F) -> Self
    where
        F: Fn(usize) -> E + 'static,
        E: Element + 'static,
    {
        Self {
            height: Mm::from(height_mm),
            factory: Rc::new(move |page| Box::new(factory(page)) as Box<dyn Element>),
        }
    }
}

/// Page decorator applying margins and the configured header and footer to
/// every page.
struct SheetDecorator {
    page: usize,
    margins: Margins,
    header: Option<Rc<ChromeFactory>>,
    footer: Option<FooterSpec>,
}

impl SheetDecorator {
    fn new(
        margins: Margins,
        header: Option<Rc<ChromeFactory>>,
        footer: Option<FooterSpec>,
    ) -> Self {
        Self {
            page: 0,
            margins,
            header,
            footer,
        }
    }
}

impl PageDecorator for SheetDecorator {
    fn decorate_page<'a>(
        &mut self,
        context: &genpdf::Context,
        mut area: genpdf::render::Area<'a>,
        style: Style,
    ) -> std::result::Result<genpdf::render::Area<'a>, RenderError> {
        self.page += 1;
        area.add_margins(self.margins);

        if let Some(header) = &self.header {
            let mut element = header(self.page);
            let rendered = element.render(context, area.clone(), style)?;
            area.add_offset(Position::new(0, rendered.size.height));
        }

        if let Some(footer) = &self.footer {
            let available = area.size().height;
            if footer.height > available {
                return Err(RenderError::new(
                    "footer is taller than the page body",
                    ErrorKind::InvalidData,
                ));
            }

            let mut footer_area = area.clone();
            footer_area.add_offset(Position::new(0, available - footer.height));
            let mut element = (footer.factory)(self.page);
            let rendered = element.render(context, footer_area, style)?;
            if rendered.has_more {
                return Err(RenderError::new(
                    "footer does not fit into its reserved strip",
                    ErrorKind::PageSizeExceeded,
                ));
            }

            area.set_height(available - footer.height);
        }

        Ok(area)
    }
}

fn brand_header(_page: usize) -> impl Element {
    let style = Style::new().italic().with_font_size(CHROME_FONT_SIZE);
    let mut line = Paragraph::default();
    line.push_styled(BRAND_TEXT, style);
    line.push_styled(" ", style);
    line.push_styled(BRAND_LINK, style);
    line.set_alignment(Alignment::Center);
    line.padded(Margins::trbl(0.0, 0.0, HEADER_GAP_MM, 0.0))
}

fn page_number_footer(page: usize) -> impl Element {
    let style = Style::new()
        .italic()
        .with_font_size(CHROME_FONT_SIZE)
        .with_color(Color::Greyscale(CHROME_GRAY));
    Paragraph::new(format!("Page {page}"))
        .aligned(Alignment::Center)
        .styled(style)
}
