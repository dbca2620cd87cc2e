//! Client navigation targets. The URL is the only persisted listing state.

use url::form_urlencoded;

use crate::listing::ListingQuery;
use crate::types::DbId;

/// Path of the QR code listing.
pub const LIST_PATH: &str = "/app";

/// Path of the create form, the empty-state call-to-action target.
pub const NEW_QR_CODE_PATH: &str = "/app/qrcodes/new";

/// Listing URL for `query`.
///
/// `page` is included past the first page, `q` only when a search term is
/// set, `sort` only when it differs from the default. The bare listing path
/// is the unfiltered first page.
///
/// # Examples
///
/// ```
/// use qrcodes_core::listing::ListingQuery;
/// use qrcodes_core::navigation::listing_url;
///
/// let query = ListingQuery::from_params(Some("2"), Some("red hat"), None);
/// assert_eq!(listing_url(&query), "/app?page=2&q=red+hat");
/// assert_eq!(listing_url(&ListingQuery::default()), "/app");
/// ```
pub fn listing_url(query: &ListingQuery) -> String {
    let mut params = form_urlencoded::Serializer::new(String::new());
    let mut any = false;

    if query.page > 1 {
        params.append_pair("page", &query.page.to_string());
        any = true;
    }
    if let Some(term) = query.search.as_deref() {
        params.append_pair("q", term);
        any = true;
    }
    if !query.sort.is_default() {
        params.append_pair("sort", query.sort.as_str());
        any = true;
    }

    if any {
        format!("{LIST_PATH}?{}", params.finish())
    } else {
        LIST_PATH.to_string()
    }
}

/// Detail page of a single QR code.
pub fn qr_code_path(id: DbId) -> String {
    format!("{LIST_PATH}/qrcodes/{id}")
}
