//! Font discovery for the bundled worksheet font families.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use genpdf::error::Error;
use genpdf::fonts::{self, FontData, FontFamily};

/// Name of the bundled font family used when no override is configured.
pub const DEFAULT_FONT_FAMILY_NAME: &str = "Roboto";

/// Environment variable that overrides the font search path.
pub const FONT_DIR_ENV: &str = "WORKSHEET_FONTS_DIR";

const STYLE_SUFFIXES: &[&str] = &["Regular", "Bold", "Italic", "BoldItalic"];

fn font_file_names(family: &str) -> Vec<String> {
    STYLE_SUFFIXES
        .iter()
        .map(|suffix| format!("{family}-{suffix}.ttf"))
        .collect()
}

fn font_directory_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(path) = env::var(FONT_DIR_ENV) {
        if !path.trim().is_empty() {
            candidates.push(PathBuf::from(path));
        }
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            let candidate = bin_dir.join("assets/fonts");
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }
    }

    let manifest_candidate = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts");
    if !candidates.contains(&manifest_candidate) {
        candidates.push(manifest_candidate);
    }

    candidates
}

fn missing_font_files(directory: &Path, family: &str) -> Vec<String> {
    font_file_names(family)
        .into_iter()
        .filter(|name| !directory.join(name).is_file())
        .collect()
}

fn resolve_font_directory(family: &str) -> Result<PathBuf, Error> {
    let mut attempts = Vec::new();

    for candidate in font_directory_candidates() {
        if !candidate.is_dir() {
            attempts.push(format!("{} (directory missing)", candidate.display()));
            continue;
        }

        let missing = missing_font_files(&candidate, family);
        if missing.is_empty() {
            return Ok(candidate);
        }

        attempts.push(format!(
            "{} (missing files [{}])",
            candidate.display(),
            missing.join(", ")
        ));
    }

    Err(Error::new(
        format!(
            "Unable to locate fonts for family '{}'. Checked: {}. \
             See assets/fonts/README.md or set {}.",
            family,
            attempts.join(", "),
            FONT_DIR_ENV
        ),
        io::Error::new(io::ErrorKind::NotFound, "font directory not found"),
    ))
}

/// Loads the named font family from the first search path carrying all of its
/// style files.
pub fn font_family(family: &str) -> Result<FontFamily<FontData>, Error> {
    let directory = resolve_font_directory(family)?;

    fonts::from_files(&directory, family, None).map_err(|err| {
        Error::new(
            format!(
                "Failed to load font family '{}' from {}: {}",
                family,
                directory.display(),
                err
            ),
            io::Error::new(io::ErrorKind::Other, err.to_string()),
        )
    })
}

/// Loads the bundled default font family.
pub fn default_font_family() -> Result<FontFamily<FontData>, Error> {
    font_family(DEFAULT_FONT_FAMILY_NAME)
}

/// Indicates whether the bundled default font family is present on disk.
pub fn default_fonts_available() -> bool {
    resolve_font_directory(DEFAULT_FONT_FAMILY_NAME).is_ok()
}
