// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]

//! # eclcloud
//!
//! The request/response core shared by the cloud API resource packages:
//! service endpoint URL resolution, authenticated request issuance, lazy
//! page-by-page iteration over collections, and deferred typed extraction.
//!
//! Resource packages (keypairs, system updates, ...) stay thin: they build a
//! URL, pick a pagination strategy, and describe how to decode a body.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use eclcloud::{urls, ClientConfig, JsonExtractor, LinkedPaginator, ServiceClient};
//!
//! #[tokio::main]
//! async fn main() -> eclcloud::Result<()> {
//!     let config = ClientConfig::from_yaml_file("compute.yaml")?;
//!     let client = ServiceClient::from_config(&config)?;
//!
//!     // Iterate one page at a time
//!     let pager = client.list(
//!         urls::collection_url(&client, "servers"),
//!         LinkedPaginator::new("servers").with_link_path("servers_links"),
//!     );
//!     pager
//!         .each_page(|page| {
//!             println!("{} servers", page.items("servers")?.len());
//!             Ok(true)
//!         })
//!         .await?;
//!
//!     // Single resource, decoded on demand
//!     let result = client
//!         .get(urls::resource_url(&client, "servers", "abc"), Default::default())
//!         .await;
//!     let server: serde_json::Value = result.extract_into("server")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                 Resource packages (consumers)                │
//! │   list_url / show_url     List → Pager     Get → Result      │
//! └──────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────────────┼───────────────┬───────────────┐
//! │   URLs   │  ServiceClient    │   Pagination  │    Decode     │
//! ├──────────┼───────────────────┼───────────────┼───────────────┤
//! │ resource │ endpoint          │ Page          │ PageExtractor │
//! │ collect. │ X-Auth-Token      │ Linked/Marker │ JsonExtractor │
//! │          │ status → Error    │ Pager         │ RequestResult │
//! └──────────┴─────────┬─────────┴───────────────┴───────────────┘
//!                      │
//!             Transport (reqwest)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Client configuration
pub mod config;

/// Auth token accessors
pub mod auth;

/// Service client and transport
pub mod http;

/// Resource and collection URLs
pub mod urls;

/// Pages, pagination strategies and the pager
pub mod pagination;

/// Extractors and deferred results
pub mod decode;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};

// Re-export commonly used types
pub use auth::{SharedToken, StaticToken, TokenProvider};
pub use config::ClientConfig;
pub use decode::{JsonExtractor, PageExtractor, RequestResult};
pub use http::{RequestConfig, ServiceClient, Transport};
pub use pagination::{
    LinkedPaginator, MarkerPaginator, Page, Pager, Paginator, SinglePagePaginator,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
