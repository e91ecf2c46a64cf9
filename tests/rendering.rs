use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use worksheet_pdf::builder::SheetBuilder;
use worksheet_pdf::fonts;
use worksheet_pdf::{write_answer_sheet, write_worksheet};

const OUTPUT_DIR: &str = "target/rendered_sheets";

const FONTS_MISSING: &str =
    "bundled fonts missing. Set WORKSHEET_FONTS_DIR or copy assets/fonts next to the binary.";

fn output_dir() -> PathBuf {
    let dir = PathBuf::from(OUTPUT_DIR);
    fs::create_dir_all(&dir).expect("create test output directory");
    dir
}

fn sample_record() -> Value {
    json!({
        "title": "Fill the Gaps!",
        "instructions": "Read the text below. Can you fill the gaps with the words from the list?",
        "main_text_final": "The ____ sat on the mat while the ____ barked outside. ".repeat(40),
        "question_title": "Missing words",
        "removed_words_final": "cat,\n dog,\n bird",
        "answer_title": "Answer key",
        "answers_final": "1. cat\n2. dog\n3. bird",
        "url": "example.com/articles/cats",
        "exercise_type": "gap_fill",
    })
}

fn page_count(path: &Path) -> usize {
    lopdf::Document::load(path)
        .expect("parse generated PDF")
        .get_pages()
        .len()
}

#[test]
fn worksheet_spans_at_least_two_pages() {
    if !fonts::default_fonts_available() {
        eprintln!("Skipping worksheet_spans_at_least_two_pages: {FONTS_MISSING}");
        return;
    }

    let path = write_worksheet(&sample_record(), output_dir()).expect("write worksheet");

    let bytes = fs::read(&path).expect("read generated file");
    assert!(!bytes.is_empty(), "generated worksheet must not be empty");
    assert!(
        page_count(&path) >= 2,
        "worksheet needs a body page and a removed-words page"
    );

    let name = path.file_name().expect("file name").to_string_lossy();
    assert!(name.ends_with("_gap_fill_worksheet.pdf"), "got {name}");
}

#[test]
fn answer_sheet_ends_with_a_blank_page() {
    if !fonts::default_fonts_available() {
        eprintln!("Skipping answer_sheet_ends_with_a_blank_page: {FONTS_MISSING}");
        return;
    }

    let path = write_answer_sheet(&sample_record(), output_dir()).expect("write answer sheet");

    assert!(
        page_count(&path) >= 2,
        "answer sheet needs an answers page and a trailing blank page"
    );

    let name = path.file_name().expect("file name").to_string_lossy();
    assert!(name.ends_with("_gap_fill_answers.pdf"), "got {name}");
}

#[test]
fn invalid_record_writes_nothing() {
    let dir = output_dir().join("invalid");
    fs::create_dir_all(&dir).expect("create directory");

    let record = json!({ "title": "no other keys" });
    assert!(write_worksheet(&record, &dir).is_err());

    let entries = fs::read_dir(&dir).expect("read directory").count();
    assert_eq!(entries, 0, "validation failures must not produce files");
}

#[test]
fn repeated_renders_are_structurally_identical() {
    let (Some(first), Some(second)) = (render_sample_sheet(), render_sample_sheet()) else {
        eprintln!("Skipping repeated_renders_are_structurally_identical: {FONTS_MISSING}");
        return;
    };

    assert_eq!(first.len(), second.len(), "PDF sizes should match");

    let first_hash = Sha256::digest(scrub_metadata(&first));
    let second_hash = Sha256::digest(scrub_metadata(&second));
    assert_eq!(
        first_hash, second_hash,
        "renders must match after metadata normalization"
    );
}

#[test]
fn page_chrome_can_be_replaced() {
    if !fonts::default_fonts_available() {
        eprintln!("Skipping page_chrome_can_be_replaced: {FONTS_MISSING}");
        return;
    }

    let record = sample_record();
    let mut sheet = SheetBuilder::new()
        .with_header(|_| genpdf::elements::Paragraph::new("Mock School"))
        .with_footer(12.0, |page| {
            genpdf::elements::Paragraph::new(format!("{page} of many"))
        });
    sheet.add_title(&record["title"]).expect("add title");
    sheet.add_text(&record["instructions"]).expect("add instructions");

    let bytes = sheet.render().expect("render with custom chrome");
    assert!(!bytes.is_empty());
}

fn render_sample_sheet() -> Option<Vec<u8>> {
    if !fonts::default_fonts_available() {
        return None;
    }

    let record = sample_record();
    let mut sheet = SheetBuilder::new();
    sheet.add_title(&record["title"]).expect("add title");
    sheet.add_text(&record["instructions"]).expect("add instructions");
    sheet.add_page();
    sheet
        .add_text(&record["removed_words_final"])
        .expect("add word list");

    Some(sheet.render().expect("render sample sheet"))
}

/// Zeroes the timestamp and identifier fields the PDF writer stamps into each
/// document so that two renders of the same content compare equal.
fn scrub_metadata(bytes: &[u8]) -> Vec<u8> {
    let mut scrubbed = bytes.to_vec();

    let segments: [(&[u8], u8); 3] = [
        (b"/CreationDate(", b')'),
        (b"/ModDate(", b')'),
        (b"/ID[", b']'),
    ];
    for (tag, terminator) in segments {
        zero_after_tag(&mut scrubbed, tag, terminator);
    }

    let fields: [&[u8]; 5] = [
        b"xmp:CreateDate",
        b"xmp:ModifyDate",
        b"xmp:MetadataDate",
        b"xmpMM:DocumentID",
        b"xmpMM:InstanceID",
    ];
    for field in fields {
        let start = [&b"<"[..], field, &b">"[..]].concat();
        let end = [&b"</"[..], field, &b">"[..]].concat();
        zero_between(&mut scrubbed, &start, &end);
    }

    scrubbed
}

fn zero_after_tag(data: &mut [u8], tag: &[u8], terminator: u8) {
    let mut index = 0;
    while index + tag.len() < data.len() {
        if !data[index..].starts_with(tag) {
            index += 1;
            continue;
        }

        let mut cursor = index + tag.len();
        while cursor < data.len() && data[cursor] != terminator {
            if !data[cursor].is_ascii_whitespace() {
                data[cursor] = b'0';
            }
            cursor += 1;
        }
        index = cursor;
    }
}

fn zero_between(data: &mut [u8], start: &[u8], end: &[u8]) {
    let mut offset = 0;
    while let Some(position) = find(&data[offset..], start) {
        let begin = offset + position + start.len();
        let Some(length) = find(&data[begin..], end) else {
            break;
        };
        for byte in &mut data[begin..begin + length] {
            if !byte.is_ascii_whitespace() {
                *byte = b'0';
            }
        }
        offset = begin + length + end.len();
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
