//! Client-side state machine of the QR code listing.
//!
//! [`ListingView`] owns the local UI state (search input, current page, sort
//! selection) and turns user interactions into [`Navigation`]s. The caller
//! performs the navigation, resolves the query and hands the response back
//! through [`ListingView::receive`]. Every navigation carries a
//! [`RequestToken`]; only the response to the latest one is accepted, so a
//! slow response can never overwrite a newer one.
//!
//! There is no shared state: one view is created per listing screen and
//! dropped with it.

use serde::Serialize;

use crate::display::{
    format_created_date, truncate, DELETED_PRODUCT_LABEL, PLACEHOLDER_THUMBNAIL,
};
use crate::listing::{ListingPage, ListingQuery, Pagination, SortOrder, ViewRow};
use crate::navigation::{listing_url, qr_code_path, NEW_QR_CODE_PATH};
use crate::search::normalize_search;
use crate::types::DbId;

/// Monotonically increasing id of an issued navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// A navigation request produced by the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub token: RequestToken,
    pub query: ListingQuery,
    /// Client URL to push, e.g. `/app?page=2&q=hat`.
    pub url: String,
}

// ---------------------------------------------------------------------------
// Render model
// ---------------------------------------------------------------------------

/// Product column of a table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum ProductCell {
    Title(String),
    /// Critical-tone indicator shown when the product no longer exists.
    Deleted,
}

impl ProductCell {
    pub fn text(&self) -> &str {
        match self {
            ProductCell::Title(title) => title,
            ProductCell::Deleted => DELETED_PRODUCT_LABEL,
        }
    }
}

/// A display-ready table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedRow {
    pub id: DbId,
    /// Link to the QR code's detail page.
    pub href: String,
    pub thumbnail: String,
    pub thumbnail_alt: String,
    pub title: String,
    pub product: ProductCell,
    pub created: String,
    pub scans: i64,
}

/// One entry of the sort menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortOption {
    pub order: SortOrder,
    pub label: &'static str,
    pub selected: bool,
}

/// Call-to-action shown when the shop has no QR codes yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    pub heading: &'static str,
    pub message: &'static str,
    pub action_label: &'static str,
    pub action_href: &'static str,
}

/// The listing table with its controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub query_value: String,
    pub sort_options: Vec<SortOption>,
    pub rows: Vec<RenderedRow>,
    pub has_next: bool,
    pub has_previous: bool,
}

/// What the listing screen shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListingRender {
    Empty(EmptyState),
    Table(TableView),
}

const EMPTY_STATE: EmptyState = EmptyState {
    heading: "Create unique QR codes for your product",
    message: "Allow customers to scan codes and buy products using their phones.",
    action_label: "Create QR code",
    action_href: NEW_QR_CODE_PATH,
};

/// Turn a view row into table cells.
pub fn render_row(row: &ViewRow) -> RenderedRow {
    let product = if row.product_deleted {
        ProductCell::Deleted
    } else {
        ProductCell::Title(truncate(row.product_title.as_deref()))
    };

    RenderedRow {
        id: row.id,
        href: qr_code_path(row.id),
        thumbnail: row
            .product_image
            .clone()
            .unwrap_or_else(|| PLACEHOLDER_THUMBNAIL.to_string()),
        thumbnail_alt: row
            .product_alt
            .clone()
            .or_else(|| row.product_title.clone())
            .unwrap_or_default(),
        title: truncate(Some(&row.title)),
        product,
        created: format_created_date(&row.created_at),
        scans: row.scans,
    }
}

// ---------------------------------------------------------------------------
// Listing view
// ---------------------------------------------------------------------------

/// Local state of the listing screen.
#[derive(Debug, Clone)]
pub struct ListingView {
    input_value: String,
    current_page: i64,
    sort: SortOrder,
    search: Option<String>,
    page: ListingPage,
    issued: u64,
    latest: Option<RequestToken>,
}

impl ListingView {
    /// Create the view from the page rendered with the initial request.
    pub fn new(initial: ListingPage) -> Self {
        Self {
            input_value: initial.search.clone().unwrap_or_default(),
            current_page: initial.page,
            sort: initial.sort,
            search: initial.search.clone(),
            page: initial,
            issued: 0,
            latest: None,
        }
    }

    pub fn input_value(&self) -> &str {
        &self.input_value
    }

    pub fn current_page(&self) -> i64 {
        self.current_page
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    /// Search term currently applied to the listing.
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Last accepted page.
    pub fn page(&self) -> &ListingPage {
        &self.page
    }

    /// Token of the navigation whose response is awaited, if any.
    pub fn pending(&self) -> Option<RequestToken> {
        self.latest
    }

    fn pagination(&self) -> Pagination {
        Pagination {
            current_page: self.current_page,
            total_count: self.page.total_count,
            page_size: self.page.page_size,
            returned_rows: self.page.rows.len() as i64,
        }
    }

    pub fn has_next(&self) -> bool {
        self.pagination().has_next()
    }

    pub fn has_previous(&self) -> bool {
        self.pagination().has_previous()
    }

    /// Update the search box. Navigation happens later, once the debouncer
    /// settles and calls [`ListingView::apply_search`].
    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input_value = value.into();
    }

    /// Go to the next page. `None` when the control is disabled.
    pub fn next(&mut self) -> Option<Navigation> {
        let page = self.pagination().next_page()?;
        self.current_page = page;
        Some(self.navigate())
    }

    /// Go to the previous page. `None` when the control is disabled.
    pub fn previous(&mut self) -> Option<Navigation> {
        let page = self.pagination().previous_page()?;
        self.current_page = page;
        Some(self.navigate())
    }

    /// Change the ordering, restarting from the first page.
    pub fn select_sort(&mut self, sort: SortOrder) -> Navigation {
        self.sort = sort;
        self.current_page = 1;
        self.navigate()
    }

    /// Apply a settled search term, restarting from the first page. An empty
    /// term clears the filter.
    pub fn apply_search(&mut self, term: &str) -> Navigation {
        self.search = normalize_search(term);
        self.current_page = 1;
        self.navigate()
    }

    fn navigate(&mut self) -> Navigation {
        self.issued += 1;
        let token = RequestToken(self.issued);
        self.latest = Some(token);

        let query = ListingQuery {
            page: self.current_page,
            search: self.search.clone(),
            sort: self.sort,
        };
        let url = listing_url(&query);
        tracing::debug!(token = token.0, %url, "Listing navigation issued");
        Navigation { token, query, url }
    }

    /// Accept the response to a navigation. Responses to anything but the
    /// latest navigation are discarded and `false` is returned.
    pub fn receive(&mut self, token: RequestToken, page: ListingPage) -> bool {
        if self.latest != Some(token) {
            tracing::debug!(
                token = token.0,
                latest = self.latest.map(|t| t.0),
                "Discarding stale listing response",
            );
            return false;
        }

        self.latest = None;
        self.current_page = page.page;
        self.sort = page.sort;
        self.search = page.search.clone();
        self.page = page;
        true
    }

    /// Build the render model of the screen.
    pub fn render(&self) -> ListingRender {
        if self.page.rows.is_empty() && self.page.query().is_unfiltered_first_page() {
            return ListingRender::Empty(EMPTY_STATE);
        }

        ListingRender::Table(TableView {
            query_value: self.input_value.clone(),
            sort_options: SortOrder::ALL
                .into_iter()
                .map(|order| SortOption {
                    order,
                    label: order.label(),
                    selected: order == self.sort,
                })
                .collect(),
            rows: self.page.rows.iter().map(render_row).collect(),
            has_next: self.has_next(),
            has_previous: self.has_previous(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
