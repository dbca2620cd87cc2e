//! Search term handling shared by the listing, the autocomplete endpoint and
//! the record store adapters.

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Default number of autocomplete options.
pub const DEFAULT_AUTOCOMPLETE_LIMIT: i64 = 25;

/// Maximum number of autocomplete options.
pub const MAX_AUTOCOMPLETE_LIMIT: i64 = 100;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Trim a raw search term. Empty or whitespace-only input means "no filter".
///
/// # Examples
///
/// ```
/// use qrcodes_core::search::normalize_search;
/// assert_eq!(normalize_search("  hat "), Some("hat".to_string()));
/// assert_eq!(normalize_search("   "), None);
/// ```
pub fn normalize_search(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Build a substring pattern for `ILIKE`, escaping the wildcard characters
/// `%` and `_` (and the escape character itself) so user input matches
/// literally.
///
/// # Examples
///
/// ```
/// use qrcodes_core::search::like_pattern;
/// assert_eq!(like_pattern("hat"), "%hat%");
/// assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
/// ```
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Case-insensitive substring match, the in-memory equivalent of
/// `title ILIKE like_pattern(term)`.
pub fn title_matches(title: &str, term: &str) -> bool {
    title.to_lowercase().contains(&term.to_lowercase())
}

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
