pub mod health;
pub mod qr_code;
pub mod scan;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Every route here requires a session token.
///
/// ```text
/// /qrcodes                      list (?page=&q=&sort=), create
/// /qrcodes/search               autocomplete (?q=&limit=)
/// /qrcodes/{id}                 get
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/qrcodes", qr_code::router())
}
