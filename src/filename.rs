//! Output filename derivation for generated sheets.

use std::time::{SystemTime, UNIX_EPOCH};

use md5::{Digest, Md5};

/// Which of the two output documents a filename refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SheetKind {
    /// The student-facing worksheet.
    Worksheet,
    /// The companion answer key.
    Answers,
}

impl SheetKind {
    /// Returns the filename suffix for this sheet kind.
    pub fn suffix(self) -> &'static str {
        match self {
            SheetKind::Worksheet => "worksheet",
            SheetKind::Answers => "answers",
        }
    }
}

/// Derives the output filename for a sheet from the current wall-clock time.
///
/// The name is `<md5(url)>_<unixtime>_<exercise_type>_<suffix>.pdf`. The hash
/// ties the file to its source URL; the timestamp keeps repeated runs apart
/// at second resolution. Two calls within the same second produce the same
/// name.
pub fn derive_filename(url: &str, exercise_type: &str, kind: SheetKind) -> String {
    derive_filename_at(url, exercise_type, kind, unix_seconds())
}

/// Pure core of [`derive_filename`] with the timestamp supplied by the caller.
pub fn derive_filename_at(
    url: &str,
    exercise_type: &str,
    kind: SheetKind,
    timestamp: u64,
) -> String {
    format!(
        "{}_{}_{}_{}.pdf",
        url_hash(url),
        timestamp,
        exercise_type,
        kind.suffix()
    )
}

fn url_hash(url: &str) -> String {
    Md5::digest(url.as_bytes())
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
        .round() as u64
}
