//! Repository for the `qr_codes` table.

use qrcodes_core::listing::SortOrder;
use qrcodes_core::search::like_pattern;
use qrcodes_core::store::NewQrCode;
use qrcodes_core::types::DbId;
use sqlx::PgPool;

use crate::models::qr_code::QrCode;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, shop, title, product_id, product_handle, product_variant_id, \
                       destination, scans, created_at";

/// `ORDER BY` clause for a sort order. `id` breaks ties so offset windows
/// never overlap.
fn order_by(sort: SortOrder) -> &'static str {
    match sort {
        SortOrder::CreatedDesc => "created_at DESC, id DESC",
        SortOrder::CreatedAsc => "created_at ASC, id ASC",
        SortOrder::TitleAsc => "lower(title) ASC, id ASC",
        SortOrder::TitleDesc => "lower(title) DESC, id DESC",
        SortOrder::ScansDesc => "scans DESC, id DESC",
    }
}

/// Provides queries over QR codes.
pub struct QrCodeRepo;

impl QrCodeRepo {
    /// Insert a QR code for `shop`, returning the created row.
    pub async fn create(pool: &PgPool, shop: &str, input: &NewQrCode) -> Result<QrCode, sqlx::Error> {
        let query = format!(
            "INSERT INTO qr_codes (shop, title, product_id, product_handle, product_variant_id, destination)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QrCode>(&query)
            .bind(shop)
            .bind(&input.title)
            .bind(&input.product_id)
            .bind(&input.product_handle)
            .bind(&input.product_variant_id)
            .bind(input.destination.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find a QR code by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<QrCode>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM qr_codes WHERE id = $1");
        sqlx::query_as::<_, QrCode>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one window of a shop's QR codes.
    ///
    /// `search` filters on a case-insensitive title substring; `None` lists
    /// everything.
    pub async fn list(
        pool: &PgPool,
        shop: &str,
        limit: i64,
        offset: i64,
        search: Option<&str>,
        sort: SortOrder,
    ) -> Result<Vec<QrCode>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM qr_codes
             WHERE shop = $1 AND ($2::text IS NULL OR title ILIKE $2)
             ORDER BY {}
             LIMIT $3 OFFSET $4",
            order_by(sort)
        );
        sqlx::query_as::<_, QrCode>(&query)
            .bind(shop)
            .bind(search.map(like_pattern))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count a shop's QR codes matching the same filter as [`Self::list`].
    pub async fn count(pool: &PgPool, shop: &str, search: Option<&str>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM qr_codes
             WHERE shop = $1 AND ($2::text IS NULL OR title ILIKE $2)",
        )
        .bind(shop)
        .bind(search.map(like_pattern))
        .fetch_one(pool)
        .await
    }

    /// Increment the scan counter. Returns the updated row, or `None` if no
    /// row with the given `id` exists.
    pub async fn increment_scans(pool: &PgPool, id: DbId) -> Result<Option<QrCode>, sqlx::Error> {
        let query = format!(
            "UPDATE qr_codes SET scans = scans + 1
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QrCode>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
