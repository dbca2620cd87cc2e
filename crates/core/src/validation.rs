//! Input validation for QR code creation.

use crate::destination::{gid_numeric_id, is_valid_handle};
use crate::error::CoreError;
use crate::store::NewQrCode;

/// Maximum title length in characters.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Validate a (trimmed) creation request.
pub fn validate_new_qr_code(input: &NewQrCode) -> Result<(), CoreError> {
    validate_title(&input.title)?;

    if gid_numeric_id(&input.product_id, "Product").is_none() {
        return Err(CoreError::Validation(format!(
            "Invalid product id: '{}'. Expected gid://shopify/Product/<id>",
            input.product_id
        )));
    }
    if input.product_handle.is_empty() {
        return Err(CoreError::Validation("Product handle is required".into()));
    }
    if !is_valid_handle(&input.product_handle) {
        return Err(CoreError::Validation(format!(
            "Invalid product handle: '{}'. Only a-z, 0-9 and '-' are allowed",
            input.product_handle.escape_debug()
        )));
    }
    if gid_numeric_id(&input.product_variant_id, "ProductVariant").is_none() {
        return Err(CoreError::Validation(format!(
            "Invalid product variant id: '{}'. Expected gid://shopify/ProductVariant/<id>",
            input.product_variant_id
        )));
    }
    Ok(())
}

/// Validate a QR code title.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title is required".into()));
    }
    let len = title.chars().count();
    if len > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title is {len} characters; maximum is {MAX_TITLE_LENGTH}"
        )));
    }
    Ok(())
}
