//! Content model for assembled sheets.
//!
//! The types here describe what ends up on each page without referencing the
//! rendering crate, so the assembler can be driven and inspected before any
//! fonts are loaded or bytes are produced.

use crate::fonts;

/// Body text size used when no font configuration is supplied.
pub const DEFAULT_BODY_FONT_SIZE: u8 = 10;

/// Font configuration applied to body text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontConfig {
    /// Name of the font family, resolved against the bundled font assets.
    pub family: String,
    /// Body text size in points.
    pub size: u8,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: fonts::DEFAULT_FONT_FAMILY_NAME.to_owned(),
            size: DEFAULT_BODY_FONT_SIZE,
        }
    }
}

/// A block of text placed on a sheet page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    /// Centered line rendered in the large bold/underline title style.
    Title(String),
    /// Wrapped multi-line text at the body font, followed by a spacer gap.
    Body(String),
}

/// An ordered sequence of blocks rendered onto one page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Page {
    blocks: Vec<Block>,
}

impl Page {
    /// Creates an empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the blocks placed on this page so far.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub(crate) fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }
}
