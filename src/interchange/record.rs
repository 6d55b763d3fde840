//! The canonical bookmark record shared by every interchange format.
//!
//! Parsers produce ordered sequences of [`SourcedBookmark`] and serializers
//! consume [`Bookmark`] slices. The `url` field is the sole identity key:
//! two records sharing a URL are the same logical bookmark no matter what
//! their other fields say.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Format version written into (and accepted from) the JSON envelope.
pub const FORMAT_VERSION: &str = "1";

/// Source tag written into the JSON envelope.
pub const SOURCE_TAG: &str = "linkding";

/// A bookmark in the format-agnostic in-memory shape.
///
/// All fields except `url` default to their zero value when a format does
/// not carry them. `date_added` / `date_modified` are assigned by the remote
/// server; they survive export but are ignored on import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    /// Remote record ID, present only on exported records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub notes: String,
    /// Ordered, not deduplicated. Deduplication is a reconciliation-time
    /// concern, never the data model's.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<DateTime<Utc>>,
    #[serde(default)]
    pub unread: bool,
    #[serde(default)]
    pub shared: bool,
    #[serde(default)]
    pub archived: bool,
}

impl Bookmark {
    /// Minimal constructor used by parsers.
    #[must_use]
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

/// A parsed bookmark tagged with its 1-based position in the source file.
///
/// For line-oriented formats (HTML, CSV) `line` is the physical line number;
/// for JSON it is the 1-based index within the `bookmarks` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcedBookmark {
    pub line: usize,
    pub bookmark: Bookmark,
}

/// A per-record failure, reported with the source position it came from.
///
/// Lifetime is one import call: collected, printed, discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportError {
    pub line: usize,
    pub message: String,
}

/// The result of parsing one interchange file.
///
/// Row-level failures (a CSV row that does not tokenize) land in `errors`
/// rather than aborting the file; only an unreadable top-level container is
/// a parse-call failure.
#[derive(Debug, Default)]
pub struct ParsedFile {
    pub records: Vec<SourcedBookmark>,
    pub errors: Vec<ImportError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bookmark_defaults() {
        let b = Bookmark::with_url("https://example.com");
        assert_eq!(b.url, "https://example.com");
        assert!(b.title.is_empty());
        assert!(b.tags.is_empty());
        assert!(!b.unread && !b.shared && !b.archived);
        assert!(b.id.is_none());
        assert!(b.date_added.is_none());
    }

    #[test]
    fn test_bookmark_json_defaults_on_absent_fields() {
        let b: Bookmark = serde_json::from_str(r#"{"url":"https://a.com"}"#).unwrap();
        assert_eq!(b.url, "https://a.com");
        assert!(b.description.is_empty());
        assert!(!b.archived);
    }
}
