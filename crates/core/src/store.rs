//! Seams to the two external collaborators of the listing: the record store
//! that persists QR codes and the catalog that knows about products.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::destination::Destination;
use crate::error::{CatalogError, CoreError};
use crate::listing::SortOrder;
use crate::types::{DbId, Timestamp};

/// A QR code as persisted by the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrCodeRecord {
    pub id: DbId,
    /// Shop domain owning the record, e.g. `demo.myshopify.com`.
    pub shop: String,
    pub title: String,
    /// Product global id, e.g. `gid://shopify/Product/1`.
    pub product_id: String,
    pub product_handle: String,
    /// Variant global id, e.g. `gid://shopify/ProductVariant/1`.
    pub product_variant_id: String,
    pub destination: Destination,
    pub scans: i64,
    pub created_at: Timestamp,
}

/// Input for creating a QR code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQrCode {
    pub title: String,
    pub product_id: String,
    pub product_handle: String,
    pub product_variant_id: String,
    #[serde(default)]
    pub destination: Destination,
}

impl NewQrCode {
    /// Copy with surrounding whitespace stripped from every text field.
    pub fn trimmed(&self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            product_id: self.product_id.trim().to_string(),
            product_handle: self.product_handle.trim().to_string(),
            product_variant_id: self.product_variant_id.trim().to_string(),
            destination: self.destination,
        }
    }
}

/// Live product metadata from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub title: String,
    pub image_url: Option<String>,
    pub image_alt: Option<String>,
}

/// Persistence for QR code records, scoped by shop.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// One window of the shop's records matching `search` (case-insensitive
    /// title substring), in `sort` order.
    async fn list(
        &self,
        shop: &str,
        limit: i64,
        offset: i64,
        search: Option<&str>,
        sort: SortOrder,
    ) -> Result<Vec<QrCodeRecord>, CoreError>;

    /// Number of the shop's records matching `search`.
    async fn count(&self, shop: &str, search: Option<&str>) -> Result<i64, CoreError>;

    async fn find(&self, id: DbId) -> Result<Option<QrCodeRecord>, CoreError>;

    async fn create(&self, shop: &str, input: &NewQrCode) -> Result<QrCodeRecord, CoreError>;

    /// Increment the scan counter, returning the updated record or `None` if
    /// it does not exist.
    async fn record_scan(&self, id: DbId) -> Result<Option<QrCodeRecord>, CoreError>;
}

/// Product metadata lookup.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    /// `Ok(None)` when the product does not exist (e.g. it was deleted).
    async fn resolve_product(
        &self,
        shop: &str,
        product_id: &str,
    ) -> Result<Option<ProductSummary>, CatalogError>;
}
