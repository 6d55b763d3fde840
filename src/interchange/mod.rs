//! Bookmark interchange: format detection, the three serialization
//! formats, and the reconciliation engine.
//!
//! - [`format`] - extension-based format detection
//! - [`record`] - the canonical bookmark record all codecs share
//! - [`json`] / [`html`] / [`csv`] - parsers and serializers
//! - [`engine`] - reconciliation against the remote collection

pub mod csv;
pub mod engine;
pub mod format;
pub mod html;
pub mod json;
pub mod record;

pub use engine::{wipe, ImportOptions, ImportReport, Reconciler};
pub use format::{detect, Format, FormatSelector};
pub use record::{Bookmark, ImportError, ParsedFile, SourcedBookmark};

use chrono::{DateTime, Utc};

use crate::error::Result;

/// Parse `input` in the given format.
///
/// # Errors
///
/// Fails only for file-level problems: a top-level container that cannot
/// be parsed at all. Row-level failures ride along in the returned
/// [`ParsedFile`].
pub fn parse(format: Format, input: &str) -> Result<ParsedFile> {
    match format {
        Format::Json => json::parse(input),
        Format::Html => html::parse(input),
        Format::Csv => csv::parse(input),
    }
}

/// Serialize `records` in the given format.
///
/// `exported_at` is stamped into the JSON envelope; the other formats have
/// no place for it.
///
/// # Errors
///
/// Serialization failures are internal errors; they do not occur for valid
/// records in practice.
pub fn serialize(
    format: Format,
    records: &[Bookmark],
    exported_at: DateTime<Utc>,
) -> Result<String> {
    match format {
        Format::Json => json::serialize(records, exported_at),
        Format::Html => Ok(html::serialize(records)),
        Format::Csv => csv::serialize(records),
    }
}
