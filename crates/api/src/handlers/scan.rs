//! Public scan endpoint hit by phones reading a printed code.

use axum::extract::{Path, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use qrcodes_core::destination::scan_target_url;
use qrcodes_core::error::CoreError;
use qrcodes_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /qrcodes/{id}/scan
///
/// Counts the scan and answers `302 Found` to the storefront target.
/// The redirect header is built before counting so a broken record is not
/// counted.
pub async fn scan(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<Response> {
    let not_found = || CoreError::NotFound {
        entity: "QrCode",
        id,
    };

    let record = state.records.find(id).await?.ok_or_else(not_found)?;
    let target = scan_target_url(
        &record.shop,
        record.destination,
        &record.product_handle,
        &record.product_variant_id,
    )
    .ok_or_else(|| AppError::InternalError(format!("QR code {id} has no valid scan target")))?;
    let location = HeaderValue::try_from(target).map_err(|e| {
        AppError::InternalError(format!("QR code {id} scan target is not a valid header: {e}"))
    })?;

    let scanned = state.records.record_scan(id).await?.ok_or_else(not_found)?;
    tracing::info!(
        qr_code_id = id,
        shop = %scanned.shop,
        scans = scanned.scans,
        destination = %scanned.destination,
        "QR code scanned"
    );

    Ok((StatusCode::FOUND, [(LOCATION, location)]).into_response())
}
