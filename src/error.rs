//! Error types for the worksheet-pdf crate.

use std::io;

use thiserror::Error;

/// Result type alias for worksheet-pdf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The input record does not have the expected shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// The record is not a JSON object.
    #[error("input record is not an object")]
    NotAnObject,

    /// One or more required keys are absent from the record.
    #[error("incomplete keys: missing {}", .0.join(", "))]
    IncompleteKeys(Vec<String>),
}

/// The page-ordering contract of the document assembler was violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    /// The title value is not a string.
    #[error("title must be a string")]
    TitleNotText,

    /// A title was added after the document already had a page.
    #[error("title must be added before any other content")]
    TitleAfterPages,

    /// Array values cannot be rendered as body text.
    #[error("list values are not supported as body text")]
    UnsupportedList,
}

/// Error types that can occur while producing a worksheet PDF.
#[derive(Error, Debug)]
pub enum Error {
    /// The input record failed shape validation.
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// The document assembler was driven out of order.
    #[error(transparent)]
    Page(#[from] PageError),

    /// The underlying renderer failed, including font discovery and layout.
    #[error("failed to render PDF: {0}")]
    Render(#[from] genpdf::error::Error),

    /// Writing the finished document to disk failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
