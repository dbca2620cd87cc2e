//! Handlers for the `/qrcodes` resource.
//!
//! Every handler acts for the shop named by the request's [`ShopSession`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use qrcodes_core::error::CoreError;
use qrcodes_core::listing::{ListingPage, ListingQuery, SortOrder, ViewRow};
use qrcodes_core::resolver::{resolve_listing, to_view_row};
use qrcodes_core::search::{
    clamp_limit, normalize_search, DEFAULT_AUTOCOMPLETE_LIMIT, MAX_AUTOCOMPLETE_LIMIT,
};
use qrcodes_core::store::NewQrCode;
use qrcodes_core::types::DbId;
use qrcodes_core::validation::validate_new_qr_code;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::session::ShopSession;
use crate::query::{ListingParams, SearchParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// One autocomplete option.
#[derive(Debug, Serialize)]
pub struct SearchOption {
    pub id: DbId,
    pub title: String,
}

/// GET /api/v1/qrcodes
///
/// One page of the shop's QR codes joined with live product data.
/// Malformed `page`/`sort` values fall back to their defaults.
pub async fn list(
    State(state): State<AppState>,
    session: ShopSession,
    Query(params): Query<ListingParams>,
) -> AppResult<Json<DataResponse<ListingPage>>> {
    let query = ListingQuery::from_params(
        params.page.as_deref(),
        params.q.as_deref(),
        params.sort.as_deref(),
    );

    let page = resolve_listing(
        state.records.as_ref(),
        state.catalog.as_ref(),
        &session.shop,
        &query,
    )
    .await?;

    tracing::debug!(
        shop = %session.shop,
        page = page.page,
        rows = page.rows.len(),
        total_count = page.total_count,
        "Resolved QR code listing"
    );
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/qrcodes/search
///
/// Title autocomplete, ordered by title.
pub async fn search(
    State(state): State<AppState>,
    session: ShopSession,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<SearchOption>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_AUTOCOMPLETE_LIMIT, MAX_AUTOCOMPLETE_LIMIT);
    let term = params.q.as_deref().and_then(normalize_search);

    let records = state
        .records
        .list(&session.shop, limit, 0, term.as_deref(), SortOrder::TitleAsc)
        .await?;

    let options = records
        .into_iter()
        .map(|r| SearchOption {
            id: r.id,
            title: r.title,
        })
        .collect();
    Ok(Json(DataResponse { data: options }))
}

/// POST /api/v1/qrcodes
pub async fn create(
    State(state): State<AppState>,
    session: ShopSession,
    Json(input): Json<NewQrCode>,
) -> AppResult<(StatusCode, Json<DataResponse<ViewRow>>)> {
    let input = input.trimmed();
    validate_new_qr_code(&input)?;

    let record = state.records.create(&session.shop, &input).await?;
    tracing::info!(
        qr_code_id = record.id,
        shop = %session.shop,
        user_id = session.user_id.as_deref().unwrap_or("unknown"),
        session_id = session.session_id.as_deref().unwrap_or("unknown"),
        "QR code created via admin"
    );
    let row = to_view_row(state.catalog.as_ref(), &session.shop, record).await;
    Ok((StatusCode::CREATED, Json(DataResponse { data: row })))
}

/// GET /api/v1/qrcodes/{id}
///
/// Codes belonging to another shop are reported as missing.
pub async fn get_by_id(
    State(state): State<AppState>,
    session: ShopSession,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ViewRow>>> {
    let record = state
        .records
        .find(id)
        .await?
        .filter(|r| r.shop == session.shop)
        .ok_or(CoreError::NotFound {
            entity: "QrCode",
            id,
        })?;

    let row = to_view_row(state.catalog.as_ref(), &session.shop, record).await;
    Ok(Json(DataResponse { data: row }))
}
