//! Pagination module
//!
//! Supports: Linked (next URL in the body), Marker (last item id as a query
//! parameter), Single page
//!
//! # Overview
//!
//! A [`Page`] is one buffered HTTP response. A [`Paginator`] knows, for one
//! resource family, whether a page is empty and where the next page lives.
//! The [`Pager`] drives the loop: fetch, hand the page to a visitor, follow
//! the next URL, strictly one page at a time.
//!
//! An empty page ends iteration before the visitor sees it, so an empty
//! collection produces zero visitor calls. For linked collections a page
//! counts as empty only when it has no items and no next link: an empty
//! first page that still links onward is visited and the link is followed.

mod pager;
mod strategies;
mod types;

pub use pager::Pager;
pub use strategies::{LinkedPaginator, MarkerPaginator, SinglePagePaginator};
pub use types::{Page, Paginator};
