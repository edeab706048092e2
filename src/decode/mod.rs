//! Response extraction
//!
//! # Overview
//!
//! Collections are decoded page by page through a [`PageExtractor`];
//! single-resource calls return a [`RequestResult`] whose body is decoded
//! only when the caller asks for it. Decoding failures are always
//! [`Error::Decode`](crate::Error::Decode), distinct from transport and
//! HTTP status errors.

mod decoders;
mod result;
mod types;

pub use decoders::JsonExtractor;
pub use result::RequestResult;
pub use types::{lookup, PageExtractor};
