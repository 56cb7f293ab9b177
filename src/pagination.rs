//! List-result shapes.
//!
//! The API paginates inbound resources by offset and outbound resources by
//! cursor. Both shapes are plain data contracts: the SDK translates the
//! wire envelopes into [`Page`] and [`CursorPage`] and implements no
//! pagination logic of its own.

use serde::Deserialize;

/// An offset-paginated page of results.
///
/// Used by sources, destinations, routes, and events.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Items in this page.
    pub data: Vec<T>,
    /// Total number of items across all pages.
    pub total: u64,
    /// 1-based page number.
    pub page: u64,
    /// Number of items per page.
    pub page_size: u64,
    /// Whether more pages follow this one.
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Items in the current page.
    pub fn items(&self) -> &[T] {
        &self.data
    }

    pub(crate) fn from_offset(data: Vec<T>, pagination: OffsetPagination) -> Self {
        let has_more = pagination.page * pagination.page_size < pagination.total;
        Self {
            data,
            total: pagination.total,
            page: pagination.page,
            page_size: pagination.page_size,
            has_more,
        }
    }
}

/// A cursor-paginated page of results.
///
/// Used by applications, endpoints, and outbound messages.
#[derive(Debug, Clone)]
pub struct CursorPage<T> {
    /// Items in this page.
    pub data: Vec<T>,
    /// Whether more items follow this page.
    pub has_more: bool,
    /// Cursor for the next page, when one exists.
    pub next_cursor: Option<String>,
}

impl<T> CursorPage<T> {
    /// Items in the current page.
    pub fn items(&self) -> &[T] {
        &self.data
    }

    pub(crate) fn from_cursor(data: Vec<T>, pagination: CursorPagination) -> Self {
        Self {
            data,
            has_more: pagination.has_more,
            next_cursor: pagination.next_cursor,
        }
    }
}

/// Offset pagination block of a list response envelope.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OffsetPagination {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u64,
    #[serde(default)]
    pub page_size: u64,
}

/// Cursor pagination block of a list response envelope.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CursorPagination {
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

#[cfg(test)]
#[path = "pagination_tests.rs"]
mod tests;
