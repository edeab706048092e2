//! Extraction types and traits
//!
//! Defines the extractor contract and the path lookup shared by extractors
//! and pagination strategies.

use crate::error::Result;
use crate::pagination::Page;
use serde_json::Value;

/// Turns one page into typed items
///
/// Resource packages implement this per resource type, or pass a closure:
///
/// ```rust,ignore
/// let keypairs = pager
///     .extract_all(&|page: &Page| -> Result<Vec<KeyPair>> {
///         let body: ListBody = page.decode()?;
///         Ok(body.keypairs.into_iter().map(|k| k.keypair).collect())
///     })
///     .await?;
/// ```
pub trait PageExtractor<T>: Send + Sync {
    /// Decode the page into items, in page order
    fn extract(&self, page: &Page) -> Result<Vec<T>>;
}

impl<T, F> PageExtractor<T> for F
where
    F: Fn(&Page) -> Result<Vec<T>> + Send + Sync,
{
    fn extract(&self, page: &Page) -> Result<Vec<T>> {
        self(page)
    }
}

/// Find the value at a dotted path
///
/// Supports an optional `$.` prefix, object keys, and array indexes either
/// as their own segment (`items.0`) or in brackets (`items[0]`, `items[-1]`).
/// An empty path (or `$`) is the value itself.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    if path.is_empty() || path == "$" {
        return Some(value);
    }

    let mut current = value;
    for part in path.split('.') {
        let (name, index) = match part.find('[') {
            Some(pos) if part.ends_with(']') => (&part[..pos], Some(&part[pos + 1..part.len() - 1])),
            _ => (part, None),
        };

        if !name.is_empty() {
            current = match current {
                Value::Object(map) => map.get(name)?,
                Value::Array(items) => items.get(name.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }

        if let Some(index) = index {
            let Value::Array(items) = current else {
                return None;
            };
            let index: i64 = index.parse().ok()?;
            let idx = if index < 0 {
                items.len().checked_sub(index.unsigned_abs() as usize)?
            } else {
                index as usize
            };
            current = items.get(idx)?;
        }
    }
    Some(current)
}
