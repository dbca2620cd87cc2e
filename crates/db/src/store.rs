//! PostgreSQL-backed [`RecordStore`].

use async_trait::async_trait;
use qrcodes_core::error::CoreError;
use qrcodes_core::listing::SortOrder;
use qrcodes_core::store::{NewQrCode, QrCodeRecord, RecordStore};
use qrcodes_core::types::DbId;

use crate::models::qr_code::QrCode;
use crate::repositories::QrCodeRepo;
use crate::DbPool;

/// Record store over the `qr_codes` table.
#[derive(Debug, Clone)]
pub struct PgRecordStore {
    pool: DbPool,
}

impl PgRecordStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Log a database error and turn it into a store failure.
fn store_error(operation: &'static str) -> impl FnOnce(sqlx::Error) -> CoreError {
    move |err| {
        tracing::error!(operation, error = %err, "QR code store query failed");
        CoreError::Store(format!("{operation} failed"))
    }
}

fn into_records(rows: Vec<QrCode>) -> Result<Vec<QrCodeRecord>, CoreError> {
    rows.into_iter().map(QrCodeRecord::try_from).collect()
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn list(
        &self,
        shop: &str,
        limit: i64,
        offset: i64,
        search: Option<&str>,
        sort: SortOrder,
    ) -> Result<Vec<QrCodeRecord>, CoreError> {
        let rows = QrCodeRepo::list(&self.pool, shop, limit, offset, search, sort)
            .await
            .map_err(store_error("list"))?;
        into_records(rows)
    }

    async fn count(&self, shop: &str, search: Option<&str>) -> Result<i64, CoreError> {
        QrCodeRepo::count(&self.pool, shop, search)
            .await
            .map_err(store_error("count"))
    }

    async fn find(&self, id: DbId) -> Result<Option<QrCodeRecord>, CoreError> {
        QrCodeRepo::find_by_id(&self.pool, id)
            .await
            .map_err(store_error("find"))?
            .map(QrCodeRecord::try_from)
            .transpose()
    }

    async fn create(&self, shop: &str, input: &NewQrCode) -> Result<QrCodeRecord, CoreError> {
        let row = QrCodeRepo::create(&self.pool, shop, input)
            .await
            .map_err(store_error("create"))?;
        tracing::info!(qr_code_id = row.id, shop, "QR code created");
        QrCodeRecord::try_from(row)
    }

    async fn record_scan(&self, id: DbId) -> Result<Option<QrCodeRecord>, CoreError> {
        QrCodeRepo::increment_scans(&self.pool, id)
            .await
            .map_err(store_error("record_scan"))?
            .map(QrCodeRecord::try_from)
            .transpose()
    }
}
