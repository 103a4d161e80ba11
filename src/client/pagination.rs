//! Pagination helpers for Veracode list endpoints
//!
//! List endpoints return HAL documents:
//!
//! ```json
//! {
//!   "_embedded": { "workspaces": [ ... ] },
//!   "page": { "size": 100, "total_elements": 240, "total_pages": 3, "number": 0 }
//! }
//! ```
//!
//! `_embedded` is omitted entirely when a page has no items.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// Pagination parameters for API requests (pages are 0-indexed)
#[derive(Debug, Clone, Copy)]
pub struct PaginationParams {
    pub page: usize,
    pub size: usize,
}

impl PaginationParams {
    pub fn new(size: usize) -> Self {
        Self { page: 0, size }
    }

    /// Parameters for the page after this one.
    pub fn next(self) -> Self {
        Self {
            page: self.page + 1,
            ..self
        }
    }

    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        vec![("page", self.page.to_string()), ("size", self.size.to_string())]
    }
}

/// `page` block of a HAL response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub total_elements: usize,
    #[serde(default)]
    pub total_pages: usize,
    #[serde(default)]
    pub number: usize,
}

impl PageMeta {
    /// Whether another page follows the `requested` one.
    ///
    /// A response whose `number` is not the page that was asked for means the
    /// endpoint ignored the `page` parameter; asking again would never advance.
    pub fn has_next_after(&self, requested: usize) -> bool {
        self.number == requested && requested + 1 < self.total_pages
    }
}

/// One decoded page of a HAL collection
#[derive(Debug)]
pub struct HalPage<T> {
    pub items: Vec<T>,
    pub page: Option<PageMeta>,
}

impl<T: DeserializeOwned> HalPage<T> {
    /// Decode `_embedded.<key>` and the page metadata from a response body.
    pub fn from_value(mut body: Value, key: &str) -> Result<Self, ApiError> {
        let page = match body.get_mut("page").map(Value::take) {
            Some(Value::Null) | None => None,
            Some(raw) => Some(serde_json::from_value(raw).map_err(|e| {
                ApiError::InvalidResponse(format!("Failed to parse page metadata: {}", e))
            })?),
        };

        let items = match body
            .get_mut("_embedded")
            .and_then(|embedded| embedded.get_mut(key))
            .map(Value::take)
        {
            Some(Value::Null) | None => Vec::new(),
            Some(raw) => serde_json::from_value(raw).map_err(|e| {
                ApiError::InvalidResponse(format!("Failed to parse {}: {}", key, e))
            })?,
        };

        Ok(Self { items, page })
    }

    /// Whether to fetch the page after `requested`.
    pub fn has_next_after(&self, requested: usize) -> bool {
        !self.items.is_empty()
            && self
                .page
                .as_ref()
                .is_some_and(|meta| meta.has_next_after(requested))
    }

    /// Total number of items the collection reports, if known.
    pub fn total_elements(&self) -> Option<usize> {
        self.page.as_ref().map(|meta| meta.total_elements)
    }
}
