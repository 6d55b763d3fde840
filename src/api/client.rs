//! Blocking HTTP client for the linkding REST API.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use url::Url;

use crate::api::types::{BookmarkPatch, CreateBookmark, PageResponse, RemoteBookmark};
use crate::api::{BookmarkStore, FetchQuery, Page};
use crate::error::{Error, Result};
use crate::interchange::record::Bookmark;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for one linkding server, authenticated with an API token.
pub struct LinkdingClient {
    http: Client,
    base: Url,
    token: String,
}

impl LinkdingClient {
    /// Create a client for `server` (e.g. `https://linkding.example.com`).
    ///
    /// # Errors
    ///
    /// Returns a config error when the server URL does not parse.
    pub fn new(server: &str, token: &str) -> Result<Self> {
        let mut base = Url::parse(server)
            .map_err(|e| Error::Config(format!("invalid server URL '{server}': {e}")))?;
        // Url::join treats a path without a trailing slash as a file.
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            http,
            base,
            token: token.to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| Error::Config(format!("invalid API path '{path}': {e}")))
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header("Authorization", format!("Token {}", self.token))
    }

    /// Map a non-success response to a structured error, preserving the
    /// server's error body.
    fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::Unauthorized);
        }
        let message = response
            .text()
            .unwrap_or_default()
            .trim()
            .chars()
            .take(500)
            .collect::<String>();
        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Fetch a single bookmark by ID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BookmarkNotFound`] on 404.
    pub fn get(&self, id: i64) -> Result<RemoteBookmark> {
        let url = self.endpoint(&format!("api/bookmarks/{id}/"))?;
        let response = self.authed(self.http.get(url)).send()?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::BookmarkNotFound { id });
        }
        Ok(Self::check(response)?.json()?)
    }
}

impl BookmarkStore for LinkdingClient {
    fn fetch_page(&self, query: &FetchQuery) -> Result<Page> {
        let path = if query.archived {
            "api/bookmarks/archived/"
        } else {
            "api/bookmarks/"
        };
        let mut url = self.endpoint(path)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("limit", &query.limit.to_string());
            pairs.append_pair("offset", &query.offset.to_string());
            // linkding's search syntax: free text plus #tag restrictions,
            // space-joined in a single q parameter.
            let mut q = query.search.clone().unwrap_or_default();
            if let Some(tag) = &query.tag {
                if !q.is_empty() {
                    q.push(' ');
                }
                q.push('#');
                q.push_str(tag);
            }
            if !q.is_empty() {
                pairs.append_pair("q", &q);
            }
        }

        tracing::debug!(%url, "fetching bookmark page");
        let response = Self::check(self.authed(self.http.get(url)).send()?)?;
        let page: PageResponse = response.json()?;

        Ok(Page {
            has_more: page.next.is_some(),
            items: page.results,
        })
    }

    fn create(&self, bookmark: &Bookmark) -> Result<RemoteBookmark> {
        let url = self.endpoint("api/bookmarks/")?;
        let body = CreateBookmark::from(bookmark);
        let response = self.authed(self.http.post(url)).json(&body).send()?;
        Ok(Self::check(response)?.json()?)
    }

    fn update(&self, id: i64, patch: &BookmarkPatch) -> Result<RemoteBookmark> {
        let url = self.endpoint(&format!("api/bookmarks/{id}/"))?;
        let response = self.authed(self.http.patch(url)).json(patch).send()?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::BookmarkNotFound { id });
        }
        Ok(Self::check(response)?.json()?)
    }

    fn delete(&self, id: i64) -> Result<bool> {
        let url = self.endpoint(&format!("api/bookmarks/{id}/"))?;
        let response = self.authed(self.http.delete(url)).send()?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        Self::check(response)?;
        Ok(true)
    }
}
