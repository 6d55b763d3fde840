//! The reconciliation engine.
//!
//! Merges an externally supplied bookmark sequence into the remote
//! collection using URL as the sole identity key. Each record is classified
//! as create, update, skip, or failure against a duplicate index built from
//! one full remote fetch; the index reflects pre-existing remote state only
//! and is never refreshed mid-batch, so two records sharing a URL within
//! one file both classify as creates.
//!
//! The [`ImportReport`] is the single error channel: helpers record a
//! failure there and do not also return it, and nothing below file level
//! ever aborts the batch.

use std::collections::HashMap;

use serde::Serialize;

use crate::api::{BookmarkPatch, BookmarkStore};
use crate::error::Result;
use crate::interchange::record::{ImportError, ParsedFile, SourcedBookmark};

/// Explicit per-invocation import configuration. Constructed once by the
/// command layer and passed in; the engine reads no ambient state.
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Classify and count without calling the remote store.
    pub dry_run: bool,
    /// Skip records whose URL already exists remotely instead of
    /// overwriting the remote record.
    pub skip_duplicates: bool,
    /// Tags appended to every imported record (not deduplicated against
    /// the record's own tags).
    pub additional_tags: Vec<String>,
}

/// Outcome counters plus the ordered per-record error list.
///
/// Counters are monotonically incremented over one import call and never
/// decremented. Reported once, then discarded.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    pub added: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
    pub errors: Vec<ImportError>,
}

impl ImportReport {
    /// Record a per-record failure. This is the only error channel: the
    /// caller gets no second signal to discard.
    pub fn fail(&mut self, line: usize, message: impl Into<String>) {
        self.failed += 1;
        self.errors.push(ImportError {
            line,
            message: message.into(),
        });
    }

    /// Total records accounted for.
    #[must_use]
    pub fn total(&self) -> usize {
        self.added + self.updated + self.skipped + self.failed
    }
}

/// Classifies parsed records and applies them to the remote store.
pub struct Reconciler<'a, S: BookmarkStore + ?Sized> {
    store: &'a S,
    options: ImportOptions,
}

impl<'a, S: BookmarkStore + ?Sized> Reconciler<'a, S> {
    #[must_use]
    pub fn new(store: &'a S, options: ImportOptions) -> Self {
        Self { store, options }
    }

    /// Reconcile a parsed file against the remote collection.
    ///
    /// Records are processed strictly in document order, one at a time.
    /// Row-level parse failures carried in `parsed.errors` seed the report
    /// before the loop starts.
    ///
    /// # Errors
    ///
    /// Fails only when the duplicate-index fetch fails; everything
    /// per-record is absorbed into the report.
    pub fn run(&self, parsed: ParsedFile) -> Result<ImportReport> {
        let mut report = ImportReport::default();
        for err in parsed.errors {
            report.fail(err.line, err.message);
        }

        // One full unfiltered fetch, held for the duration of the call.
        // Dry runs skip it: without mutations the index buys nothing, and
        // every unseen record reports as "would add".
        let index = if self.options.dry_run {
            HashMap::new()
        } else {
            self.duplicate_index()?
        };

        for record in parsed.records {
            self.apply(record, &index, &mut report);
        }

        Ok(report)
    }

    /// Build the ephemeral url-to-id map from one full paginated fetch,
    /// archived bookmarks included so an archived duplicate is not
    /// re-created.
    fn duplicate_index(&self) -> Result<HashMap<String, i64>> {
        let existing = self.store.fetch_all(None, true)?;
        tracing::debug!(count = existing.len(), "built duplicate index");
        Ok(existing.into_iter().map(|b| (b.url, b.id)).collect())
    }

    /// Classify one record and, outside dry-run, invoke the store.
    fn apply(
        &self,
        record: SourcedBookmark,
        index: &HashMap<String, i64>,
        report: &mut ImportReport,
    ) {
        let SourcedBookmark { line, mut bookmark } = record;

        if bookmark.url.is_empty() {
            report.fail(line, "bookmark has no URL");
            return;
        }

        bookmark
            .tags
            .extend(self.options.additional_tags.iter().cloned());

        match index.get(&bookmark.url) {
            None => {
                if self.options.dry_run {
                    report.added += 1;
                } else {
                    match self.store.create(&bookmark) {
                        Ok(_) => report.added += 1,
                        Err(e) => report.fail(line, e.to_string()),
                    }
                }
            }
            Some(_) if self.options.skip_duplicates => {
                report.skipped += 1;
            }
            Some(&id) => {
                if self.options.dry_run {
                    report.updated += 1;
                } else {
                    let patch = BookmarkPatch::overwrite_from(&bookmark);
                    match self.store.update(id, &patch) {
                        Ok(_) => report.updated += 1,
                        Err(e) => report.fail(line, e.to_string()),
                    }
                }
            }
        }
    }
}

/// Delete every existing remote bookmark, archived included.
///
/// Returns the number actually deleted; records that vanished between the
/// enumeration and the delete call are not counted.
///
/// # Errors
///
/// Fails on the first fetch or delete call the store rejects.
pub fn wipe<S: BookmarkStore + ?Sized>(store: &S) -> Result<usize> {
    let existing = store.fetch_all(None, true)?;
    let mut deleted = 0;
    for bookmark in existing {
        if store.delete(bookmark.id)? {
            deleted += 1;
        }
    }
    Ok(deleted)
}
