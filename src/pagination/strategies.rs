//! Pagination strategy implementations
//!
//! Each strategy handles one of the conventions used by the services.

use super::types::{kind, Page, Paginator};
use crate::decode::lookup;
use crate::error::{Error, Result};
use serde_json::Value;
use url::Url;

// ============================================================================
// Linked Pagination
// ============================================================================

/// Next URL embedded in the response body
///
/// The field at `link_path` is either a URL string:
/// - `{ "items": [...], "links": { "next": "https://.../items?page=2" } }`
///
/// or a list of link objects, of which the one with `rel: "next"` is used:
/// - `{ "servers": [...], "servers_links": [{ "rel": "next", "href": "..." }] }`
///
/// Relative links are resolved against the current page's URL. A missing,
/// `null` or empty link means there are no more pages.
#[derive(Debug, Clone)]
pub struct LinkedPaginator {
    /// Path to the items array
    pub items_path: String,
    /// Path to the next link
    pub link_path: String,
}

impl LinkedPaginator {
    /// Create a linked paginator reading the link from `links.next`
    pub fn new(items_path: impl Into<String>) -> Self {
        Self {
            items_path: items_path.into(),
            link_path: "links.next".to_string(),
        }
    }

    /// Read the next link from a different path
    #[must_use]
    pub fn with_link_path(mut self, path: impl Into<String>) -> Self {
        self.link_path = path.into();
        self
    }
}

impl Paginator for LinkedPaginator {
    /// A page without items still counts while it links onward
    fn is_empty(&self, page: &Page) -> Result<bool> {
        if !page.items(&self.items_path)?.is_empty() {
            return Ok(false);
        }
        Ok(self.next_page_url(page)?.is_none())
    }

    fn next_page_url(&self, page: &Page) -> Result<Option<Url>> {
        let body = page.json()?;
        let href = match lookup(&body, &self.link_path) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.as_str()),
            Some(Value::Array(links)) => links.iter().find_map(|link| {
                let rel = link.get("rel").and_then(Value::as_str)?;
                if rel == "next" {
                    link.get("href").and_then(Value::as_str)
                } else {
                    None
                }
            }),
            Some(other) => {
                return Err(Error::decode(format!(
                    "Expected a link at '{}', found {}",
                    self.link_path,
                    kind(other)
                )))
            }
        };

        match href {
            Some(href) if !href.is_empty() => Ok(Some(page.url().join(href)?)),
            _ => Ok(None),
        }
    }
}

// ============================================================================
// Marker Pagination
// ============================================================================

/// Last item's identifier passed back as a query marker
///
/// The next page is the current page's URL with `marker_param` set to the
/// value of `marker_field` on the last item:
/// - `/os-keypairs` → `/os-keypairs?marker=key-20`
///
/// An empty page ends iteration regardless of markers.
#[derive(Debug, Clone)]
pub struct MarkerPaginator {
    /// Path to the items array
    pub items_path: String,
    /// Field on each item holding its marker (default: "id")
    pub marker_field: String,
    /// Query parameter carrying the marker (default: "marker")
    pub marker_param: String,
}

impl MarkerPaginator {
    /// Create a marker paginator using `id` and `?marker=`
    pub fn new(items_path: impl Into<String>) -> Self {
        Self {
            items_path: items_path.into(),
            marker_field: "id".to_string(),
            marker_param: "marker".to_string(),
        }
    }

    /// Use a different item field as the marker
    #[must_use]
    pub fn with_marker_field(mut self, field: impl Into<String>) -> Self {
        self.marker_field = field.into();
        self
    }

    /// Use a different query parameter for the marker
    #[must_use]
    pub fn with_marker_param(mut self, param: impl Into<String>) -> Self {
        self.marker_param = param.into();
        self
    }

    /// Marker of the last item on the page, `None` for an empty page
    pub fn last_marker(&self, page: &Page) -> Result<Option<String>> {
        let items = page.items(&self.items_path)?;
        let Some(last) = items.last() else {
            return Ok(None);
        };
        match lookup(last, &self.marker_field) {
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            _ => Err(Error::decode(format!(
                "Last item has no usable '{}' marker",
                self.marker_field
            ))),
        }
    }
}

impl Paginator for MarkerPaginator {
    fn is_empty(&self, page: &Page) -> Result<bool> {
        Ok(page.items(&self.items_path)?.is_empty())
    }

    fn next_page_url(&self, page: &Page) -> Result<Option<Url>> {
        let Some(marker) = self.last_marker(page)? else {
            return Ok(None);
        };

        let mut url = page.url().clone();
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| key != self.marker_param.as_str())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        url.set_query(None);
        url.query_pairs_mut()
            .extend_pairs(kept)
            .append_pair(&self.marker_param, &marker);
        Ok(Some(url))
    }
}

// ============================================================================
// Single Page
// ============================================================================

/// Collection returned in one response
#[derive(Debug, Clone, Default)]
pub struct SinglePagePaginator {
    /// Path to the items array
    pub items_path: String,
}

impl SinglePagePaginator {
    /// Create a single page paginator
    pub fn new(items_path: impl Into<String>) -> Self {
        Self {
            items_path: items_path.into(),
        }
    }
}

impl Paginator for SinglePagePaginator {
    fn is_empty(&self, page: &Page) -> Result<bool> {
        Ok(page.items(&self.items_path)?.is_empty())
    }

    fn next_page_url(&self, _page: &Page) -> Result<Option<Url>> {
        Ok(None)
    }
}
