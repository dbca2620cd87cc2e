//! Listing query, sort order and pagination math for the QR code index.
//!
//! Everything here is derived from request parameters on every request and
//! never persisted. The only durable listing state is the URL.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::search::normalize_search;
use crate::types::{DbId, Timestamp};

/// Number of QR codes shown per listing page.
pub const PAGE_SIZE: i64 = 5;

// ---------------------------------------------------------------------------
// Sort order
// ---------------------------------------------------------------------------

/// Ordering applied by the record store when listing QR codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Newest first.
    #[default]
    CreatedDesc,
    CreatedAsc,
    TitleAsc,
    TitleDesc,
    /// Most scanned first.
    ScansDesc,
}

impl SortOrder {
    /// Every supported ordering, in the order the sort menu lists them.
    pub const ALL: [SortOrder; 5] = [
        SortOrder::CreatedDesc,
        SortOrder::CreatedAsc,
        SortOrder::TitleAsc,
        SortOrder::TitleDesc,
        SortOrder::ScansDesc,
    ];

    /// Wire name used in the `sort` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::CreatedDesc => "created_desc",
            SortOrder::CreatedAsc => "created_asc",
            SortOrder::TitleAsc => "title_asc",
            SortOrder::TitleDesc => "title_desc",
            SortOrder::ScansDesc => "scans_desc",
        }
    }

    /// Human label for the sort menu.
    pub fn label(self) -> &'static str {
        match self {
            SortOrder::CreatedDesc => "Date created (newest first)",
            SortOrder::CreatedAsc => "Date created (oldest first)",
            SortOrder::TitleAsc => "Title A-Z",
            SortOrder::TitleDesc => "Title Z-A",
            SortOrder::ScansDesc => "Most scanned",
        }
    }

    /// Parse a raw query parameter, falling back to the default ordering
    /// for absent or unknown values.
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.trim().parse().ok()).unwrap_or_default()
    }

    pub fn is_default(self) -> bool {
        self == SortOrder::default()
    }
}

impl FromStr for SortOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOrder::ALL
            .into_iter()
            .find(|order| order.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown sort order: '{s}'")))
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Listing query
// ---------------------------------------------------------------------------

/// A normalized listing request: which page, which filter, which order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingQuery {
    /// 1-based page number.
    pub page: i64,
    /// Trimmed, non-empty search term. `None` means no filter.
    pub search: Option<String>,
    pub sort: SortOrder,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            page: 1,
            search: None,
            sort: SortOrder::default(),
        }
    }
}

impl ListingQuery {
    /// Build a query from raw request parameters.
    ///
    /// - `page` absent, non-numeric or below 1 becomes 1.
    /// - `search` is trimmed; empty or whitespace-only means no filter.
    /// - `sort` absent or unknown becomes [`SortOrder::CreatedDesc`].
    pub fn from_params(page: Option<&str>, search: Option<&str>, sort: Option<&str>) -> Self {
        Self {
            page: parse_page(page),
            search: search.and_then(normalize_search),
            sort: SortOrder::parse_or_default(sort),
        }
    }

    /// Number of rows to skip: `(page - 1) * PAGE_SIZE`.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(PAGE_SIZE)
    }

    pub fn page_size(&self) -> i64 {
        PAGE_SIZE
    }

    /// True for the first page with no search filter, the only page on
    /// which an empty result means the shop has no QR codes at all.
    pub fn is_unfiltered_first_page(&self) -> bool {
        self.page == 1 && self.search.is_none()
    }
}

/// Parse a `page` parameter, defaulting to 1.
pub fn parse_page(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Pagination state of one listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: i64,
    pub total_count: i64,
    pub page_size: i64,
    /// Rows actually returned for `current_page`.
    pub returned_rows: i64,
}

impl Pagination {
    /// A further page exists only if the rows seen so far fall short of the
    /// total and this page came back full.
    pub fn has_next(&self) -> bool {
        self.current_page.saturating_mul(self.page_size) < self.total_count
            && self.returned_rows == self.page_size
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn next_page(&self) -> Option<i64> {
        self.has_next().then(|| self.current_page + 1)
    }

    pub fn previous_page(&self) -> Option<i64> {
        self.has_previous().then(|| self.current_page - 1)
    }
}

// ---------------------------------------------------------------------------
// View rows
// ---------------------------------------------------------------------------

/// A stored QR code joined with live product metadata, ready for display.
///
/// Built per request and discarded after the response is rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewRow {
    pub id: DbId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_alt: Option<String>,
    /// The referenced product no longer resolves in the catalog.
    pub product_deleted: bool,
    pub created_at: Timestamp,
    pub scans: i64,
}

/// One resolved page of the listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingPage {
    pub rows: Vec<ViewRow>,
    /// Number of records matching the search filter, across all pages.
    pub total_count: i64,
    pub page: i64,
    pub page_size: i64,
    pub search: Option<String>,
    pub sort: SortOrder,
    pub has_next: bool,
    pub has_previous: bool,
}

impl ListingPage {
    pub fn new(query: &ListingQuery, rows: Vec<ViewRow>, total_count: i64) -> Self {
        let pagination = Pagination {
            current_page: query.page,
            total_count,
            page_size: PAGE_SIZE,
            returned_rows: rows.len() as i64,
        };
        Self {
            has_next: pagination.has_next(),
            has_previous: pagination.has_previous(),
            rows,
            total_count,
            page: query.page,
            page_size: PAGE_SIZE,
            search: query.search.clone(),
            sort: query.sort,
        }
    }

    pub fn pagination(&self) -> Pagination {
        Pagination {
            current_page: self.page,
            total_count: self.total_count,
            page_size: self.page_size,
            returned_rows: self.rows.len() as i64,
        }
    }

    /// The query this page answers.
    pub fn query(&self) -> ListingQuery {
        ListingQuery {
            page: self.page,
            search: self.search.clone(),
            sort: self.sort,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
