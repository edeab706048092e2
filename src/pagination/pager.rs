//! Sequential page iteration
//!
//! A [`Pager`] fetches one page, hands it to the caller, and only then asks
//! its [`Paginator`] where the next page lives. Nothing is prefetched: page
//! N+1 is requested after the visitor for page N has returned.

use super::strategies::SinglePagePaginator;
use super::types::{Page, Paginator};
use crate::decode::PageExtractor;
use crate::error::{Error, Result};
use crate::http::{RequestConfig, ServiceClient};
use futures::Stream;
use reqwest::Method;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};
use url::Url;

/// Lazy iterator over the pages of a collection
///
/// The pager owns no cursor between calls: every [`each_page`](Pager::each_page)
/// starts again from the initial URL.
#[derive(Clone)]
pub struct Pager {
    client: ServiceClient,
    initial_url: Option<Url>,
    paginator: Arc<dyn Paginator>,
    headers: HashMap<String, String>,
    err: Option<Error>,
}

enum Cursor {
    Fetch(Url),
    After(Page),
    Failed(Error),
    Done,
}

impl Pager {
    /// Create a pager starting at `url`
    ///
    /// A `None` URL is an empty collection: iteration ends without a request.
    pub fn new(
        client: ServiceClient,
        url: impl Into<Option<Url>>,
        paginator: impl Paginator + 'static,
    ) -> Self {
        Self {
            client,
            initial_url: url.into(),
            paginator: Arc::new(paginator),
            headers: HashMap::new(),
            err: None,
        }
    }

    /// Create a pager that fails with `err` as soon as it is iterated
    ///
    /// Lets list functions whose options could not be encoded still hand
    /// back a pager.
    pub fn error(client: ServiceClient, err: Error) -> Self {
        Self {
            client,
            initial_url: None,
            paginator: Arc::new(SinglePagePaginator::default()),
            headers: HashMap::new(),
            err: Some(err),
        }
    }

    /// Add headers sent with every page request
    #[must_use]
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Add a single header sent with every page request
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// URL of the first page
    pub fn initial_url(&self) -> Option<&Url> {
        self.initial_url.as_ref()
    }

    async fn fetch(&self, url: &Url) -> Result<Page> {
        let config = RequestConfig {
            headers: self.headers.clone(),
            ..RequestConfig::default()
        };
        let response = self.client.request(Method::GET, url.clone(), config).await?;
        Ok(Page::from_response(url.clone(), response))
    }

    /// Visit every page in server order
    ///
    /// The visitor returns `Ok(true)` to continue and `Ok(false)` to stop
    /// early, which is not an error. An error from the visitor ends iteration
    /// and is returned as is; so does any fetch or pagination error. Pages
    /// already visited are not revisited or rolled back.
    ///
    /// A page the paginator reports as empty ends iteration without being
    /// passed to the visitor, so an empty collection results in zero visitor
    /// calls. [`LinkedPaginator`](super::LinkedPaginator) only reports a page
    /// empty when it also has no next link.
    pub async fn each_page<F>(&self, mut visitor: F) -> Result<()>
    where
        F: FnMut(&Page) -> Result<bool>,
    {
        if let Some(err) = &self.err {
            return Err(err.clone());
        }
        let Some(mut url) = self.initial_url.clone() else {
            debug!("Pager has no initial URL, nothing to fetch");
            return Ok(());
        };

        let mut visited = 0usize;
        loop {
            let page = self.fetch(&url).await?;
            if self.paginator.is_empty(&page)? {
                debug!("Empty page at {} after {} pages", url, visited);
                return Ok(());
            }

            visited += 1;
            trace!("Visiting page {} from {}", visited, url);
            if !visitor(&page)? {
                debug!("Visitor stopped after {} pages", visited);
                return Ok(());
            }

            match self.paginator.next_page_url(&page)? {
                Some(next) => url = next,
                None => {
                    debug!("Collection exhausted after {} pages", visited);
                    return Ok(());
                }
            }
        }
    }

    /// Collect every page, in order
    pub async fn all_pages(&self) -> Result<Vec<Page>> {
        let mut pages = Vec::new();
        self.each_page(|page| {
            pages.push(page.clone());
            Ok(true)
        })
        .await?;
        Ok(pages)
    }

    /// Extract and flatten the items of every page, in order
    pub async fn extract_all<T, E>(&self, extractor: &E) -> Result<Vec<T>>
    where
        E: PageExtractor<T> + ?Sized,
    {
        let mut items = Vec::new();
        self.each_page(|page| {
            items.extend(extractor.extract(page)?);
            Ok(true)
        })
        .await?;
        Ok(items)
    }

    /// Turn the pager into a stream of pages
    ///
    /// Each page is fetched when the stream is polled for it. The next URL is
    /// computed on the following poll, so dropping the stream after a page
    /// never triggers another request. The stream ends after the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<Page>> + Send {
        let cursor = match (self.err.clone(), self.initial_url.clone()) {
            (Some(err), _) => Cursor::Failed(err),
            (None, Some(url)) => Cursor::Fetch(url),
            (None, None) => Cursor::Done,
        };

        futures::stream::try_unfold((self, cursor), |(pager, cursor)| pager.step(cursor))
    }

    async fn step(self, cursor: Cursor) -> Result<Option<(Page, (Pager, Cursor))>> {
        let url = match cursor {
            Cursor::Done => return Ok(None),
            Cursor::Failed(err) => return Err(err),
            Cursor::Fetch(url) => url,
            Cursor::After(page) => match self.paginator.next_page_url(&page)? {
                Some(url) => url,
                None => {
                    debug!("Collection exhausted");
                    return Ok(None);
                }
            },
        };

        let page = self.fetch(&url).await?;
        if self.paginator.is_empty(&page)? {
            debug!("Empty page at {}", url);
            return Ok(None);
        }
        trace!("Yielding page from {}", url);
        Ok(Some((page.clone(), (self, Cursor::After(page)))))
    }
}

impl std::fmt::Debug for Pager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("initial_url", &self.initial_url.as_ref().map(Url::as_str))
            .field("headers", &self.headers)
            .field("err", &self.err)
            .finish_non_exhaustive()
    }
}
