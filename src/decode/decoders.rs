//! Extractor implementations

use super::types::{lookup, PageExtractor};
use crate::error::{Error, Result};
use crate::pagination::Page;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;

// ============================================================================
// JSON Extractor
// ============================================================================

/// Decodes the array at a body path into `Vec<T>`
///
/// With an empty path the whole body must be the array. A missing or `null`
/// field yields no items; any other non-array value is a decode error.
#[derive(Debug)]
pub struct JsonExtractor<T> {
    items_path: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonExtractor<T> {
    /// Extract items from the array at `items_path`
    pub fn new(items_path: impl Into<String>) -> Self {
        Self {
            items_path: items_path.into(),
            _marker: PhantomData,
        }
    }

    /// Extract items from a body that is itself an array
    pub fn root() -> Self {
        Self::new("")
    }

    /// Path to the items array
    pub fn items_path(&self) -> &str {
        &self.items_path
    }
}

impl<T> Clone for JsonExtractor<T> {
    fn clone(&self) -> Self {
        Self::new(self.items_path.clone())
    }
}

impl<T: DeserializeOwned> JsonExtractor<T> {
    /// Decode items out of an already parsed body
    pub fn extract_value(&self, body: &Value) -> Result<Vec<T>> {
        match lookup(body, &self.items_path) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    T::deserialize(item).map_err(|e| {
                        Error::decode(format!("Item {i} at '{}': {e}", self.items_path))
                    })
                })
                .collect(),
            Some(_) => Err(Error::decode(format!(
                "Expected an array at '{}'",
                self.items_path
            ))),
        }
    }
}

impl<T: DeserializeOwned> PageExtractor<T> for JsonExtractor<T> {
    fn extract(&self, page: &Page) -> Result<Vec<T>> {
        self.extract_value(&page.json()?)
    }
}
