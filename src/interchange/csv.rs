//! CSV interchange (tabular format).
//!
//! Fixed column set `url, title, description, tags, date_added, unread,
//! shared, archived`, but column *order* is free: the parser builds a
//! name-to-index map from the header row instead of assuming positions.
//! Field tokenizing and quoting are the `csv` crate's; the logical-row
//! splitter, header mapping, and the permissive boolean coercion are ours.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::interchange::record::{Bookmark, ImportError, ParsedFile, SourcedBookmark};

const COLUMNS: [&str; 8] = [
    "url",
    "title",
    "description",
    "tags",
    "date_added",
    "unread",
    "shared",
    "archived",
];

/// Parse CSV into ordered records.
///
/// Rows are split quote-aware before tokenizing, so a quoted field may span
/// physical lines; each record is reported at the line it starts on (the
/// header is line 1, so a single-line data row *n* lands on line *n + 1*).
/// A row whose quoted field is never terminated is recorded as a failure at
/// its line number and the scan continues with the next physical line; a
/// single bad row never aborts the file. Short rows are tolerated: absent
/// cells read as empty.
///
/// # Errors
///
/// Returns [`Error::MalformedFile`] only when the header row cannot be read
/// or carries no `url` column.
pub fn parse(input: &str) -> Result<ParsedFile> {
    let mut rows = logical_rows(input).into_iter();

    let Some(header) = rows.next() else {
        return Err(Error::MalformedFile {
            format: "CSV",
            message: "missing required column: url".to_string(),
        });
    };
    if !header.terminated {
        return Err(Error::MalformedFile {
            format: "CSV",
            message: "unterminated quoted field in header row".to_string(),
        });
    }

    let index: HashMap<String, usize> = split_fields(&header.text)
        .map_err(|e| Error::MalformedFile {
            format: "CSV",
            message: e.to_string(),
        })?
        .iter()
        .enumerate()
        .map(|(i, name)| (name.trim().to_ascii_lowercase(), i))
        .collect();

    if !index.contains_key("url") {
        return Err(Error::MalformedFile {
            format: "CSV",
            message: "missing required column: url".to_string(),
        });
    }

    let mut out = ParsedFile::default();

    for row in rows {
        if !row.terminated {
            out.errors.push(ImportError {
                line: row.line,
                message: "unterminated quoted field".to_string(),
            });
            continue;
        }
        if row.text.trim().is_empty() {
            continue;
        }

        let record = match split_fields(&row.text) {
            Ok(record) => record,
            Err(e) => {
                out.errors.push(ImportError {
                    line: row.line,
                    message: format!("malformed row: {e}"),
                });
                continue;
            }
        };
        let cell = |name: &str| -> &str {
            index.get(name).and_then(|&col| record.get(col)).unwrap_or("")
        };

        out.records.push(SourcedBookmark {
            line: row.line,
            bookmark: Bookmark {
                url: cell("url").to_string(),
                title: cell("title").to_string(),
                description: cell("description").to_string(),
                tags: parse_tags(cell("tags")),
                date_added: parse_timestamp(cell("date_added")),
                unread: parse_bool(cell("unread")),
                shared: parse_bool(cell("shared")),
                archived: parse_bool(cell("archived")),
                ..Bookmark::default()
            },
        });
    }

    Ok(out)
}

/// One logical row: a header or data record starting at 1-based `line`.
/// `terminated: false` marks a row whose quoted field ran to end of input.
struct RawRow {
    line: usize,
    text: String,
    terminated: bool,
}

/// Split input into logical rows, letting quoted fields span physical
/// lines. A quote that is still open at end of input marks the row it
/// started on as unterminated; scanning resumes at the next physical line
/// so one bad row cannot swallow the rest of the file.
fn logical_rows(input: &str) -> Vec<RawRow> {
    let lines: Vec<&str> = input.lines().collect();
    let mut rows = Vec::new();
    let mut idx = 0;

    while idx < lines.len() {
        let mut end = idx;
        let mut text = lines[idx].to_string();
        while !quotes_balanced(&text) && end + 1 < lines.len() {
            end += 1;
            text.push('\n');
            text.push_str(lines[end]);
        }

        if quotes_balanced(&text) {
            rows.push(RawRow {
                line: idx + 1,
                text,
                terminated: true,
            });
            idx = end + 1;
        } else {
            rows.push(RawRow {
                line: idx + 1,
                text: String::new(),
                terminated: false,
            });
            idx += 1;
        }
    }

    rows
}

/// Whether `row` ends outside any quoted field, per CSV quoting rules:
/// a quote opens a field only at field start, and `""` inside a quoted
/// field is an escaped quote, not a terminator.
fn quotes_balanced(row: &str) -> bool {
    let mut chars = row.chars().peekable();
    let mut in_quotes = false;
    let mut at_field_start = true;

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
        } else {
            match c {
                '"' if at_field_start => {
                    in_quotes = true;
                    at_field_start = false;
                }
                ',' => at_field_start = true,
                _ => at_field_start = false,
            }
        }
    }

    !in_quotes
}

/// Tokenize one logical row into fields.
fn split_fields(row: &str) -> std::result::Result<csv::StringRecord, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(row.as_bytes());
    let mut record = csv::StringRecord::new();
    reader.read_record(&mut record)?;
    Ok(record)
}

/// Serialize records as CSV with the fixed header row.
///
/// Tags are comma-joined inside one cell (the format's own quoting covers
/// embedded commas), booleans are lowercase `true`/`false`, and
/// `date_added` is RFC 3339 with offset. `id`, `notes`, and
/// `date_modified` have no column and are dropped by design.
///
/// # Errors
///
/// Returns an error if the writer fails, which cannot happen for an
/// in-memory buffer in practice.
pub fn serialize(records: &[Bookmark]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(COLUMNS)
        .map_err(|e| Error::Other(e.to_string()))?;

    for record in records {
        let date_added = record
            .date_added
            .map(|d| d.to_rfc3339())
            .unwrap_or_default();
        writer
            .write_record([
                record.url.as_str(),
                record.title.as_str(),
                record.description.as_str(),
                &record.tags.join(","),
                &date_added,
                bool_str(record.unread),
                bool_str(record.shared),
                bool_str(record.archived),
            ])
            .map_err(|e| Error::Other(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Other(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| Error::Other(e.to_string()))
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Permissive boolean: `true`, `1`, or `yes` (case-insensitive) is true;
/// every other value, including garbage, is silently false.
fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}

fn parse_tags(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_basic_row() {
        let input = "url,title,description,tags,date_added,unread,shared,archived\n\
                     https://a.com,Site A,About A,\"one,two\",2024-03-01T12:00:00+00:00,true,false,1\n";
        let parsed = parse(input).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert!(parsed.errors.is_empty());

        let rec = &parsed.records[0];
        assert_eq!(rec.line, 2);
        assert_eq!(rec.bookmark.url, "https://a.com");
        assert_eq!(rec.bookmark.title, "Site A");
        assert_eq!(rec.bookmark.tags, vec!["one", "two"]);
        assert_eq!(
            rec.bookmark.date_added,
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())
        );
        assert!(rec.bookmark.unread);
        assert!(!rec.bookmark.shared);
        assert!(rec.bookmark.archived);
    }

    #[test]
    fn test_columns_matched_by_name_not_position() {
        let input = "title,url\nMoved,https://a.com\n";
        let parsed = parse(input).unwrap();
        assert_eq!(parsed.records[0].bookmark.url, "https://a.com");
        assert_eq!(parsed.records[0].bookmark.title, "Moved");
    }

    #[test]
    fn test_header_names_are_case_insensitive() {
        let input = "URL,Title\nhttps://a.com,Caps\n";
        let parsed = parse(input).unwrap();
        assert_eq!(parsed.records[0].bookmark.url, "https://a.com");
        assert_eq!(parsed.records[0].bookmark.title, "Caps");
    }

    #[test]
    fn test_garbled_booleans_are_silently_false() {
        // Short row: the archived cell is simply absent.
        let input = "url,title,description,tags,date_added,unread,shared,archived\n\
                     https://x.com,Title,,tags,notabool,notabool,notabool\n";
        let parsed = parse(input).unwrap();
        assert!(parsed.errors.is_empty(), "no diagnostic for garbled booleans");

        let b = &parsed.records[0].bookmark;
        assert!(!b.unread && !b.shared && !b.archived);
        assert!(b.date_added.is_none());
        assert_eq!(b.tags, vec!["tags"]);
    }

    #[test]
    fn test_boolean_synonyms() {
        assert!(parse_bool("true"));
        assert!(parse_bool("TRUE"));
        assert!(parse_bool("1"));
        assert!(parse_bool("Yes"));
        assert!(!parse_bool("0"));
        assert!(!parse_bool("no"));
        assert!(!parse_bool(""));
        assert!(!parse_bool("maybe"));
    }

    #[test]
    fn test_unterminated_quote_fails_its_row_and_scan_continues() {
        let input = "url,title\n\"https://b.com,broken\nhttps://c.com,C\n";
        let parsed = parse(input).unwrap();

        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.errors[0].line, 2);
        assert!(parsed.errors[0].message.contains("unterminated"));

        // The bad row does not swallow the one after it.
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].line, 3);
        assert_eq!(parsed.records[0].bookmark.url, "https://c.com");
        assert_eq!(parsed.records[0].bookmark.title, "C");
    }

    #[test]
    fn test_quoted_field_may_span_lines() {
        let input = "url,title,description\nhttps://a.com,A,\"first\nsecond\"\nhttps://b.com,B,\n";
        let parsed = parse(input).unwrap();
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[0].line, 2);
        assert_eq!(parsed.records[0].bookmark.description, "first\nsecond");
        // The next record is reported at the physical line it starts on.
        assert_eq!(parsed.records[1].line, 4);
    }

    #[test]
    fn test_escaped_quotes_do_not_terminate_a_field() {
        let input = "url,title\nhttps://a.com,\"say \"\"hi\"\"\"\n";
        let parsed = parse(input).unwrap();
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.records[0].bookmark.title, "say \"hi\"");
    }

    #[test]
    fn test_missing_url_column_is_file_level() {
        let err = parse("title,tags\nA,one\n").unwrap_err();
        assert!(matches!(err, Error::MalformedFile { format: "CSV", .. }));
    }

    #[test]
    fn test_round_trip() {
        let records = vec![
            Bookmark {
                url: "https://a.com".into(),
                title: "Quoted, \"title\"".into(),
                description: "multi\nline".into(),
                tags: vec!["one".into(), "two".into()],
                date_added: Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()),
                unread: true,
                shared: true,
                archived: false,
                ..Bookmark::default()
            },
            Bookmark::with_url("https://b.com"),
        ];

        let text = serialize(&records).unwrap();
        let parsed = parse(&text).unwrap();
        assert!(parsed.errors.is_empty());

        for (orig, back) in records.iter().zip(&parsed.records) {
            let b = &back.bookmark;
            assert_eq!(b.url, orig.url);
            assert_eq!(b.title, orig.title);
            assert_eq!(b.description, orig.description);
            assert_eq!(b.tags, orig.tags);
            assert_eq!(b.date_added, orig.date_added);
            assert_eq!(b.unread, orig.unread);
            assert_eq!(b.shared, orig.shared);
            assert_eq!(b.archived, orig.archived);
        }
    }

    #[test]
    fn test_serialize_header_row() {
        let text = serialize(&[]).unwrap();
        assert_eq!(
            text.trim_end(),
            "url,title,description,tags,date_added,unread,shared,archived"
        );
    }
}
