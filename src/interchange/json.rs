//! JSON interchange: the structured-document export envelope.
//!
//! The envelope is bit-compatible with linkding's own export format:
//! a top-level object carrying `version`, `exported_at`, `source`, and the
//! `bookmarks` array. Field order is stable (struct declaration order).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::interchange::record::{
    Bookmark, ParsedFile, SourcedBookmark, FORMAT_VERSION, SOURCE_TAG,
};

/// The export envelope wrapping the full ordered record sequence.
///
/// Built once per export call and immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub source: String,
    pub bookmarks: Vec<Bookmark>,
}

impl Envelope {
    /// Wrap `bookmarks` in a fresh envelope stamped `exported_at`.
    #[must_use]
    pub fn new(bookmarks: Vec<Bookmark>, exported_at: DateTime<Utc>) -> Self {
        Self {
            version: FORMAT_VERSION.to_string(),
            exported_at,
            source: SOURCE_TAG.to_string(),
            bookmarks,
        }
    }
}

/// Serialize records into the JSON envelope.
///
/// # Errors
///
/// Returns an error only if serde fails, which cannot happen for these
/// types in practice.
pub fn serialize(records: &[Bookmark], exported_at: DateTime<Utc>) -> Result<String> {
    let envelope = Envelope::new(records.to_vec(), exported_at);
    let mut out = serde_json::to_string_pretty(&envelope)?;
    out.push('\n');
    Ok(out)
}

/// Parse a JSON envelope into ordered records.
///
/// Records are tagged with their 1-based index in the `bookmarks` array.
/// A `version` other than the supported one is logged and tolerated; there
/// is no schema migration.
///
/// # Errors
///
/// Returns [`Error::MalformedFile`] when the top-level container cannot be
/// parsed. Per-record problems (an empty `url`) are left in place for the
/// reconciliation engine to record; absence of any other field is not a
/// problem at all.
pub fn parse(input: &str) -> Result<ParsedFile> {
    let envelope: Envelope =
        serde_json::from_str(input).map_err(|e| Error::MalformedFile {
            format: "JSON",
            message: e.to_string(),
        })?;

    if envelope.version != FORMAT_VERSION {
        tracing::warn!(
            version = %envelope.version,
            "unsupported export format version, attempting to read anyway"
        );
    }

    let records = envelope
        .bookmarks
        .into_iter()
        .enumerate()
        .map(|(i, bookmark)| SourcedBookmark {
            line: i + 1,
            bookmark,
        })
        .collect();

    Ok(ParsedFile {
        records,
        errors: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Vec<Bookmark> {
        vec![
            Bookmark {
                id: Some(1),
                url: "https://example.com".into(),
                title: "Example".into(),
                description: "A site".into(),
                notes: "keep".into(),
                tags: vec!["web".into(), "ref".into()],
                date_added: Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()),
                date_modified: Some(Utc.with_ymd_and_hms(2024, 3, 2, 12, 0, 0).unwrap()),
                unread: true,
                shared: false,
                archived: false,
            },
            Bookmark::with_url("https://other.example.com"),
        ]
    }

    #[test]
    fn test_round_trip_is_exact() {
        let records = sample();
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let text = serialize(&records, now).unwrap();
        let parsed = parse(&text).unwrap();

        let back: Vec<Bookmark> = parsed.records.into_iter().map(|r| r.bookmark).collect();
        assert_eq!(back, records);
        assert!(parsed.errors.is_empty());
    }

    #[test]
    fn test_envelope_field_order_is_stable() {
        let text = serialize(&[], Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()).unwrap();
        let v_pos = text.find("\"version\"").unwrap();
        let e_pos = text.find("\"exported_at\"").unwrap();
        let s_pos = text.find("\"source\"").unwrap();
        let b_pos = text.find("\"bookmarks\"").unwrap();
        assert!(v_pos < e_pos && e_pos < s_pos && s_pos < b_pos);
        assert!(text.contains("\"source\": \"linkding\""));
        assert!(text.contains("\"version\": \"1\""));
    }

    #[test]
    fn test_records_are_tagged_with_array_position() {
        let text = serialize(
            &sample(),
            Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
        )
        .unwrap();
        let parsed = parse(&text).unwrap();
        assert_eq!(parsed.records[0].line, 1);
        assert_eq!(parsed.records[1].line, 2);
    }

    #[test]
    fn test_malformed_container_is_file_level_error() {
        let err = parse("{not json").unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedFile { format: "JSON", .. }
        ));
    }

    #[test]
    fn test_unknown_version_is_tolerated() {
        let text = r#"{"version":"2","exported_at":"2024-06-01T00:00:00Z","source":"linkding","bookmarks":[]}"#;
        let parsed = parse(text).unwrap();
        assert!(parsed.records.is_empty());
    }

    #[test]
    fn test_empty_url_passes_through_for_engine() {
        let text = r#"{"version":"1","exported_at":"2024-06-01T00:00:00Z","source":"linkding","bookmarks":[{"url":""}]}"#;
        let parsed = parse(text).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert!(parsed.records[0].bookmark.url.is_empty());
    }
}
