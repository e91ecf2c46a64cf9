//! Turns validated gap-fill exercise records into printable worksheet PDFs.
//!
//! A worksheet record arrives as a `serde_json::Value` object; [`sheets`]
//! validates it, derives an output filename, and assembles the student
//! worksheet or the matching answer sheet through [`builder::SheetBuilder`].

pub mod builder;
pub mod elements;
pub mod error;
pub mod filename;
pub mod fonts;
pub mod model;
pub mod record;
pub mod sheets;

pub use error::{Error, PageError, Result, ShapeError};
pub use filename::{derive_filename, derive_filename_at, SheetKind};
pub use sheets::{write_answer_sheet, write_worksheet};
