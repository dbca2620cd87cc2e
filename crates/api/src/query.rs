//! Query string parameter types for API handlers.

use serde::Deserialize;

/// Listing parameters (`?page=&q=&sort=`).
///
/// Kept as raw strings: malformed values fall back to defaults in
/// [`qrcodes_core::listing::ListingQuery::from_params`] instead of rejecting
/// the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListingParams {
    pub page: Option<String>,
    pub q: Option<String>,
    pub sort: Option<String>,
}

/// Autocomplete parameters (`?q=&limit=`).
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub limit: Option<i64>,
}
