//! The remote collection port: the abstract interface to the
//! externally-owned bookmark store, plus the concrete linkding client.
//!
//! The reconciliation engine only ever talks to [`BookmarkStore`], so its
//! tests run against an in-memory fake instead of a live server.

mod client;
pub mod types;

pub use client::LinkdingClient;
pub use types::{BookmarkPatch, CreateBookmark, PageResponse, RemoteBookmark};

use crate::error::Result;
use crate::interchange::record::Bookmark;

/// Page size used by [`BookmarkStore::fetch_all`].
pub const FETCH_PAGE_SIZE: usize = 100;

/// Parameters for one page fetch.
#[derive(Debug, Clone, Default)]
pub struct FetchQuery {
    /// Free-text search expression.
    pub search: Option<String>,
    /// Restrict to bookmarks carrying this tag.
    pub tag: Option<String>,
    /// Read the archived partition instead of the main one.
    pub archived: bool,
    pub limit: usize,
    pub offset: usize,
}

/// One fetched page with a continuation signal.
#[derive(Debug, Clone)]
pub struct Page {
    pub items: Vec<RemoteBookmark>,
    pub has_more: bool,
}

/// The externally-owned bookmark collection.
///
/// All calls are synchronous and blocking; there is no batching and no
/// cancellation. A failed call affects only the record being processed.
pub trait BookmarkStore {
    /// Fetch one page of bookmarks.
    fn fetch_page(&self, query: &FetchQuery) -> Result<Page>;

    /// Create a bookmark; the server assigns the ID and timestamps.
    fn create(&self, bookmark: &Bookmark) -> Result<RemoteBookmark>;

    /// Partially update a bookmark. Only fields set in `patch` change.
    fn update(&self, id: i64, patch: &BookmarkPatch) -> Result<RemoteBookmark>;

    /// Delete a bookmark. Returns `false` when it did not exist.
    fn delete(&self, id: i64) -> Result<bool>;

    /// Fetch the whole collection by looping [`fetch_page`] until
    /// exhausted. With `include_archived`, the archived partition is
    /// drained after the main one.
    ///
    /// # Errors
    ///
    /// Fails on the first page that cannot be fetched.
    ///
    /// [`fetch_page`]: BookmarkStore::fetch_page
    fn fetch_all(&self, tag: Option<&str>, include_archived: bool) -> Result<Vec<RemoteBookmark>> {
        let mut all = Vec::new();

        let partitions: &[bool] = if include_archived {
            &[false, true]
        } else {
            &[false]
        };

        for &archived in partitions {
            let mut offset = 0;
            loop {
                let page = self.fetch_page(&FetchQuery {
                    search: None,
                    tag: tag.map(str::to_string),
                    archived,
                    limit: FETCH_PAGE_SIZE,
                    offset,
                })?;
                let fetched = page.items.len();
                all.extend(page.items);
                if !page.has_more || fetched == 0 {
                    break;
                }
                offset += fetched;
            }
        }

        Ok(all)
    }
}
