//! Wire types for the linkding REST API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::interchange::record::Bookmark;

/// A bookmark as the server returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteBookmark {
    pub id: i64,
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tag_names: Vec<String>,
    #[serde(default)]
    pub date_added: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date_modified: Option<DateTime<Utc>>,
    #[serde(default)]
    pub unread: bool,
    #[serde(default)]
    pub shared: bool,
    #[serde(default)]
    pub is_archived: bool,
}

impl From<RemoteBookmark> for Bookmark {
    fn from(remote: RemoteBookmark) -> Self {
        Self {
            id: Some(remote.id),
            url: remote.url,
            title: remote.title,
            description: remote.description,
            notes: remote.notes,
            tags: remote.tag_names,
            date_added: remote.date_added,
            date_modified: remote.date_modified,
            unread: remote.unread,
            shared: remote.shared,
            archived: remote.is_archived,
        }
    }
}

/// Request body for creating a bookmark.
///
/// The server assigns `id`, `date_added`, and `date_modified` itself, so
/// they never appear here.
#[derive(Debug, Clone, Serialize)]
pub struct CreateBookmark {
    pub url: String,
    pub title: String,
    pub description: String,
    pub notes: String,
    pub tag_names: Vec<String>,
    pub unread: bool,
    pub shared: bool,
    pub is_archived: bool,
}

impl From<&Bookmark> for CreateBookmark {
    fn from(b: &Bookmark) -> Self {
        Self {
            url: b.url.clone(),
            title: b.title.clone(),
            description: b.description.clone(),
            notes: b.notes.clone(),
            tag_names: b.tags.clone(),
            unread: b.unread,
            shared: b.shared,
            is_archived: b.archived,
        }
    }
}

/// Partial-field update body. Only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BookmarkPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unread: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
}

impl BookmarkPatch {
    /// Full overwrite of every imported field: the remote record's
    /// pre-existing values are discarded, not merged.
    #[must_use]
    pub fn overwrite_from(b: &Bookmark) -> Self {
        Self {
            url: None,
            title: Some(b.title.clone()),
            description: Some(b.description.clone()),
            notes: Some(b.notes.clone()),
            tag_names: Some(b.tags.clone()),
            unread: Some(b.unread),
            shared: Some(b.shared),
            is_archived: Some(b.archived),
        }
    }

    /// True when no field is set; sending this patch would be a no-op.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.url.is_none()
            && self.title.is_none()
            && self.description.is_none()
            && self.notes.is_none()
            && self.tag_names.is_none()
            && self.unread.is_none()
            && self.shared.is_none()
            && self.is_archived.is_none()
    }
}

/// One page of a paginated listing response.
#[derive(Debug, Clone, Deserialize)]
pub struct PageResponse {
    pub count: usize,
    pub next: Option<String>,
    pub results: Vec<RemoteBookmark>,
}
