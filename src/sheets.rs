//! Straight-line assembly of the two sheet documents.
//!
//! Each entry point validates the record, derives the output filename, drives
//! the assembler through a fixed sequence of blocks and writes the result. A
//! failure at any step aborts before the save, so no file is produced.

use std::path::{Path, PathBuf};

use log::{debug, info};
use serde_json::Value;

use crate::builder::SheetBuilder;
use crate::error::Result;
use crate::filename::{derive_filename, SheetKind};
use crate::record::{self, REQUIRED_KEYS};

/// Writes the student worksheet for `record` into `output_dir` and returns
/// the path of the generated file.
///
/// The worksheet carries the title, the instructions, the gapped main text
/// with a source attribution line, and the removed-words list on its own
/// page. An existing file at the derived path is overwritten.
pub fn write_worksheet(record: &Value, output_dir: impl AsRef<Path>) -> Result<PathBuf> {
    record::validate(record, REQUIRED_KEYS)?;

    let url = record::display_text(&record["url"]);
    let exercise_type = record::display_text(&record["exercise_type"]);
    let path = output_dir
        .as_ref()
        .join(derive_filename(&url, &exercise_type, SheetKind::Worksheet));
    debug!("assembling worksheet for {url} at {}", path.display());

    let mut sheet = SheetBuilder::new();
    sheet.add_title(&record["title"])?;
    sheet.add_text(&record["instructions"])?;
    let main_text = attributed_text(&record::display_text(&record["main_text_final"]), &url);
    sheet.add_text(&Value::String(main_text))?;
    sheet.add_page();
    sheet.add_text(&record["removed_words_final"])?;
    sheet.save(&path)?;

    info!("wrote worksheet to {}", path.display());
    Ok(path)
}

/// Writes the answer sheet for `record` into `output_dir` and returns the
/// path of the generated file.
///
/// The answer sheet carries the title and the answer key, followed by a
/// blank page. An existing file at the derived path is overwritten.
pub fn write_answer_sheet(record: &Value, output_dir: impl AsRef<Path>) -> Result<PathBuf> {
    record::validate(record, REQUIRED_KEYS)?;

    let url = record::display_text(&record["url"]);
    let exercise_type = record::display_text(&record["exercise_type"]);
    let path = output_dir
        .as_ref()
        .join(derive_filename(&url, &exercise_type, SheetKind::Answers));
    debug!("assembling answer sheet for {url} at {}", path.display());

    let mut sheet = SheetBuilder::new();
    sheet.add_title(&record["title"])?;
    sheet.add_text(&record["answers_final"])?;
    sheet.add_page();
    sheet.save(&path)?;

    info!("wrote answer sheet to {}", path.display());
    Ok(path)
}

fn attributed_text(main_text: &str, url: &str) -> String {
    format!("{main_text}\n\nText extracted from {url}.")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::error::{Error, ShapeError};

    use super::*;

    #[test]
    fn attribution_cites_the_source_url() {
        assert_eq!(
            attributed_text("The cat sat.", "example.com/cats"),
            "The cat sat.\n\nText extracted from example.com/cats."
        );
    }

    #[test]
    fn worksheet_rejects_incomplete_records_before_writing() {
        let record = json!({ "title": "Gaps" });
        let err = write_worksheet(&record, std::env::temp_dir()).unwrap_err();
        assert!(matches!(
            err,
            Error::Shape(ShapeError::IncompleteKeys(_))
        ));
    }

    #[test]
    fn answer_sheet_rejects_non_object_records() {
        let err = write_answer_sheet(&json!("not a record"), std::env::temp_dir()).unwrap_err();
        assert!(matches!(err, Error::Shape(ShapeError::NotAnObject)));
    }
}
