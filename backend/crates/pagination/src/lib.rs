//! Pagination primitives shared by content repository list endpoints.
//!
//! The content repository accepts either page-based (`pagination[page]`,
//! `pagination[pageSize]`) or offset-based (`pagination[start]`,
//! `pagination[limit]`) directives and echoes the matching metadata shape in
//! the `meta.pagination` object of list responses.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest page size or limit the repository accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Errors raised when building a pagination request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// Page numbers start at one.
    #[error("page must be at least 1 (got {page})")]
    InvalidPage {
        /// Rejected page number.
        page: u32,
    },
    /// Page size or limit falls outside `1..=MAX_PAGE_SIZE`.
    #[error("page size must be between 1 and {max} (got {size})")]
    InvalidSize {
        /// Rejected size.
        size: u32,
        /// Configured maximum.
        max: u32,
    },
}

/// Pagination directive attached to a list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    /// One-based page number with a fixed page size.
    Page {
        /// One-based page number.
        page: u32,
        /// Items per page.
        page_size: u32,
    },
    /// Zero-based start offset with a result cap.
    Offset {
        /// Number of items to skip.
        start: u32,
        /// Maximum number of items returned.
        limit: u32,
    },
}

impl PageRequest {
    /// Build a page-based request.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pagination::PageRequest;
    ///
    /// let request = PageRequest::page(2, 25).expect("valid page request");
    /// assert_eq!(request.limit(), 25);
    /// ```
    pub fn page(page: u32, page_size: u32) -> Result<Self, PaginationError> {
        if page == 0 {
            return Err(PaginationError::InvalidPage { page });
        }
        validate_size(page_size)?;
        Ok(Self::Page { page, page_size })
    }

    /// Build an offset-based request capping the result count at `limit`.
    pub fn offset(start: u32, limit: u32) -> Result<Self, PaginationError> {
        validate_size(limit)?;
        Ok(Self::Offset { start, limit })
    }

    /// Maximum number of items this request can return.
    pub fn limit(self) -> u32 {
        match self {
            Self::Page { page_size, .. } => page_size,
            Self::Offset { limit, .. } => limit,
        }
    }

    /// Render the request as repository query-string pairs.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pagination::PageRequest;
    ///
    /// let pairs = PageRequest::offset(0, 3).expect("valid").to_query_pairs();
    /// assert_eq!(
    ///     pairs,
    ///     vec![
    ///         ("pagination[start]".to_owned(), "0".to_owned()),
    ///         ("pagination[limit]".to_owned(), "3".to_owned()),
    ///     ]
    /// );
    /// ```
    pub fn to_query_pairs(self) -> Vec<(String, String)> {
        match self {
            Self::Page { page, page_size } => vec![
                ("pagination[page]".to_owned(), page.to_string()),
                ("pagination[pageSize]".to_owned(), page_size.to_string()),
            ],
            Self::Offset { start, limit } => vec![
                ("pagination[start]".to_owned(), start.to_string()),
                ("pagination[limit]".to_owned(), limit.to_string()),
            ],
        }
    }
}

fn validate_size(size: u32) -> Result<(), PaginationError> {
    if size == 0 || size > MAX_PAGE_SIZE {
        return Err(PaginationError::InvalidSize {
            size,
            max: MAX_PAGE_SIZE,
        });
    }
    Ok(())
}

/// Pagination metadata echoed by list responses.
///
/// The repository reports the shape matching the request: page-based
/// requests produce [`PageMeta`], offset-based requests produce
/// [`OffsetMeta`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaginationMeta {
    /// Page-based metadata.
    Page(PageMeta),
    /// Offset-based metadata.
    Offset(OffsetMeta),
}

impl PaginationMeta {
    /// Total number of items matching the query across all pages.
    pub fn total(&self) -> u64 {
        match self {
            Self::Page(meta) => meta.total,
            Self::Offset(meta) => meta.total,
        }
    }
}

/// Page-based pagination metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// One-based page number.
    pub page: u32,
    /// Items per page.
    pub page_size: u32,
    /// Number of pages available.
    pub page_count: u32,
    /// Total matching items.
    pub total: u64,
}

/// Offset-based pagination metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffsetMeta {
    /// Number of items skipped.
    pub start: u32,
    /// Result cap applied.
    pub limit: u32,
    /// Total matching items.
    pub total: u64,
}
