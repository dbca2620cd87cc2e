//! Where a scanned QR code sends the shopper.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Scan target of a QR code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    /// The product's storefront page.
    #[default]
    Product,
    /// A cart prefilled with one unit of the product variant.
    Cart,
}

impl Destination {
    pub fn as_str(self) -> &'static str {
        match self {
            Destination::Product => "product",
            Destination::Cart => "cart",
        }
    }
}

impl FromStr for Destination {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "product" => Ok(Destination::Product),
            "cart" => Ok(Destination::Cart),
            other => Err(CoreError::Validation(format!(
                "Unknown destination: '{other}'. Valid destinations: product, cart"
            ))),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prefix shared by every platform global id.
pub const GID_PREFIX: &str = "gid://shopify/";

/// Extract the numeric tail of a global id of the given resource type,
/// e.g. `gid://shopify/ProductVariant/42` -> `42`.
pub fn gid_numeric_id<'a>(gid: &'a str, resource: &str) -> Option<&'a str> {
    let rest = gid.strip_prefix(GID_PREFIX)?;
    let (kind, id) = rest.split_once('/')?;
    if kind != resource || id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(id)
}

/// Whether `handle` is a storefront product handle: non-empty, `[a-z0-9-]` only.
pub fn is_valid_handle(handle: &str) -> bool {
    !handle.is_empty()
        && handle
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// Build the storefront URL a scan redirects to.
///
/// Returns `None` for a product destination with an invalid handle, or a
/// cart destination whose variant id is not a valid `ProductVariant` global
/// id.
pub fn scan_target_url(
    shop: &str,
    destination: Destination,
    product_handle: &str,
    product_variant_id: &str,
) -> Option<String> {
    match destination {
        Destination::Product => is_valid_handle(product_handle)
            .then(|| format!("https://{shop}/products/{product_handle}")),
        Destination::Cart => gid_numeric_id(product_variant_id, "ProductVariant")
            .map(|variant| format!("https://{shop}/cart/{variant}:1")),
    }
}
