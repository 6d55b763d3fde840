//! Netscape bookmark file (anchor-list HTML) interchange.
//!
//! The source format is a loosely-structured markup dialect, not a
//! well-formed document, so this is a line scanner rather than a DOM parse.
//! The scanner has two states:
//!
//! - **Scanning**: looking for an anchor line. An anchor line yields the
//!   URL (`HREF`), the title (anchor text), tags (`TAGS`, comma-joined),
//!   and the add date (`ADD_DATE`, unix seconds).
//! - **Pending**: a bookmark has been read and may still receive a
//!   description from the next `<DD>` line. Another anchor line, or end of
//!   input, emits the pending record with an empty description.
//!
//! Everything else (folder headings, `<DL>` nesting, stray markup) is
//! ignored.

use chrono::{DateTime, TimeZone, Utc};

use crate::error::Result;
use crate::interchange::record::{Bookmark, ParsedFile, SourcedBookmark};

/// Parse a Netscape bookmark file into ordered records.
///
/// Lines are numbered from 1. Never fails at file level: any text is a
/// scannable (possibly empty) bookmark list.
///
/// # Errors
///
/// Infallible in practice; `Result` keeps the signature uniform across the
/// three format parsers.
pub fn parse(input: &str) -> Result<ParsedFile> {
    let mut out = ParsedFile::default();
    let mut pending: Option<SourcedBookmark> = None;

    for (i, raw) in input.lines().enumerate() {
        let line = raw.trim();
        let lower = line.to_ascii_lowercase();

        if lower.starts_with("<dd>") {
            // Description line: completes the pending record, if any.
            if let Some(mut rec) = pending.take() {
                rec.bookmark.description = unescape(line["<dd>".len()..].trim());
                out.records.push(rec);
            }
        } else if let Some(bookmark) = parse_anchor(line, &lower) {
            // A new anchor emits any still-pending record first.
            if let Some(rec) = pending.take() {
                out.records.push(rec);
            }
            pending = Some(SourcedBookmark {
                line: i + 1,
                bookmark,
            });
        }
    }

    // End of input emits the last pending record.
    if let Some(rec) = pending.take() {
        out.records.push(rec);
    }

    Ok(out)
}

/// Serialize records as a Netscape bookmark file.
///
/// Writes the fixed preamble, one `<DT><A ...>` line per record (with a
/// `TAGS` attribute only when tags are non-empty and a `<DD>` line only
/// when the description is non-empty), then the closing marker. The format
/// cannot carry `notes`, `unread`, `shared`, or `archived`; those fields
/// are dropped here by design.
#[must_use]
pub fn serialize(records: &[Bookmark]) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE NETSCAPE-Bookmark-file-1>\n");
    out.push_str("<META HTTP-EQUIV=\"Content-Type\" CONTENT=\"text/html; charset=UTF-8\">\n");
    out.push_str("<TITLE>Bookmarks</TITLE>\n<H1>Bookmarks</H1>\n");
    out.push_str("<DL><p>\n");

    for record in records {
        let add_date = record.date_added.map_or(0, |d| d.timestamp());
        out.push_str(&format!(
            "<DT><A HREF=\"{}\" ADD_DATE=\"{add_date}\"",
            escape(&record.url)
        ));
        if !record.tags.is_empty() {
            out.push_str(&format!(" TAGS=\"{}\"", escape(&record.tags.join(","))));
        }
        out.push_str(&format!(">{}</A>\n", escape(&record.title)));

        if !record.description.is_empty() {
            out.push_str(&format!("<DD>{}\n", escape(&record.description)));
        }
    }

    out.push_str("</DL><p>\n");
    out
}

/// Try to read one anchor line. `lower` is the lowercased `line`.
///
/// An anchor line is any line carrying an `<a ...>` tag with an `HREF`
/// attribute; anything else returns `None`.
fn parse_anchor(line: &str, lower: &str) -> Option<Bookmark> {
    let a_start = lower.find("<a ")?;
    let tag_end = a_start + lower[a_start..].find('>')?;
    let tag = &line[a_start + 3..tag_end];

    let url = attr(tag, "href")?;

    let title = match lower[tag_end..].find("</a>") {
        Some(close) => unescape(line[tag_end + 1..tag_end + close].trim()),
        None => String::new(),
    };

    // Comma-separated, order-preserving, not deduplicated.
    let tags = attr(tag, "tags")
        .map(|raw| {
            raw.split(',')
                .map(|t| unescape(t.trim()))
                .filter(|t| !t.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let date_added = attr(tag, "add_date")
        .and_then(|s| s.trim().parse::<i64>().ok())
        .and_then(parse_unix_seconds);

    Some(Bookmark {
        url: unescape(&url),
        title,
        tags,
        date_added,
        ..Bookmark::default()
    })
}

fn parse_unix_seconds(secs: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(secs, 0).single()
}

/// Extract a quoted attribute value from the inside of an anchor tag.
/// Attribute names are matched case-insensitively; both quote styles are
/// accepted.
fn attr(tag: &str, name: &str) -> Option<String> {
    let lower = tag.to_ascii_lowercase();
    for quote in ['"', '\''] {
        let needle = format!("{name}={quote}");
        if let Some(start) = lower.find(&needle) {
            let rest = &tag[start + needle.len()..];
            let end = rest.find(quote)?;
            return Some(rest[..end].to_string());
        }
    }
    None
}

/// Escape text for markup safety: `&`, `<`, `>`, and both quote characters.
#[must_use]
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Inverse of [`escape`]. `&amp;` is decoded last so escaped entities do
/// not double-decode.
fn unescape(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
