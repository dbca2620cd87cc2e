//! QR code row model.

use qrcodes_core::error::CoreError;
use qrcodes_core::store::QrCodeRecord;
use qrcodes_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `qr_codes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QrCode {
    pub id: DbId,
    pub shop: String,
    pub title: String,
    pub product_id: String,
    pub product_handle: String,
    pub product_variant_id: String,
    /// `product` or `cart`, enforced by `ck_qr_codes_destination`.
    pub destination: String,
    pub scans: i64,
    pub created_at: Timestamp,
}

impl TryFrom<QrCode> for QrCodeRecord {
    type Error = CoreError;

    fn try_from(row: QrCode) -> Result<Self, Self::Error> {
        let destination = row.destination.parse()?;
        Ok(QrCodeRecord {
            id: row.id,
            shop: row.shop,
            title: row.title,
            product_id: row.product_id,
            product_handle: row.product_handle,
            product_variant_id: row.product_variant_id,
            destination,
            scans: row.scans,
            created_at: row.created_at,
        })
    }
}
