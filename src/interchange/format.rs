//! Interchange format detection.

use std::path::Path;

use clap::ValueEnum;

use crate::error::{Error, Result};

/// One of the three interchange formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Html,
    Csv,
}

impl Format {
    /// Human-readable name, used in error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Html => "HTML",
            Self::Csv => "CSV",
        }
    }
}

/// Detect a format from a file name's extension.
///
/// Matches the lowercased extension: `.json`, `.html`/`.htm`, `.csv`.
/// Anything else, including a missing extension, is `None`. Pure function,
/// no I/O; an unmatched name is a valid answer, not an error.
#[must_use]
pub fn detect(path: &Path) -> Option<Format> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "json" => Some(Format::Json),
        "html" | "htm" => Some(Format::Html),
        "csv" => Some(Format::Csv),
        _ => None,
    }
}

/// User-facing format selector: an explicit format or `auto` detection.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormatSelector {
    /// Detect from the file extension
    #[default]
    Auto,
    Json,
    Html,
    Csv,
}

impl FormatSelector {
    /// Resolve to a concrete format, detecting from `path` when `auto`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFormat`] when `auto` cannot match the
    /// extension.
    pub fn resolve(self, path: &Path) -> Result<Format> {
        match self {
            Self::Json => Ok(Format::Json),
            Self::Html => Ok(Format::Html),
            Self::Csv => Ok(Format::Csv),
            Self::Auto => detect(path).ok_or_else(|| Error::UnknownFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}
