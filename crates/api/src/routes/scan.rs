use axum::routing::get;
use axum::Router;

use crate::handlers::scan;
use crate::state::AppState;

/// Public scan route, mounted at root level (no session required).
pub fn router() -> Router<AppState> {
    Router::new().route("/qrcodes/{id}/scan", get(scan::scan))
}
