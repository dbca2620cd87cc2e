//! Text formatting for listing cells.

use crate::types::Timestamp;

/// Maximum characters shown for titles in the listing table.
pub const TRUNCATE_LENGTH: usize = 25;

/// Marker appended to truncated text.
pub const ELLIPSIS: char = '…';

/// Shown in place of the product title when the product no longer exists.
pub const DELETED_PRODUCT_LABEL: &str = "product has been deleted";

/// Thumbnail used when a row has no product image.
pub const PLACEHOLDER_THUMBNAIL: &str = "placeholder:image";

/// Truncate to [`TRUNCATE_LENGTH`] characters followed by [`ELLIPSIS`].
///
/// Absent text renders as the empty string; text at or under the limit is
/// returned unchanged.
pub fn truncate(text: Option<&str>) -> String {
    truncate_to(text, TRUNCATE_LENGTH)
}

/// Same as [`truncate`] with an explicit character budget.
pub fn truncate_to(text: Option<&str>, length: usize) -> String {
    let Some(text) = text else {
        return String::new();
    };
    if text.chars().count() <= length {
        return text.to_string();
    }
    let mut out: String = text.chars().take(length).collect();
    out.push(ELLIPSIS);
    out
}

/// Calendar date in the `Fri Oct 16 2026` form.
pub fn format_created_date(created_at: &Timestamp) -> String {
    created_at.format("%a %b %d %Y").to_string()
}
