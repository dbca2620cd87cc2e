//! Route definitions for the `/qrcodes` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::qr_code;
use crate::state::AppState;

/// Routes mounted at `/qrcodes`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create
/// GET    /search    -> search
/// GET    /{id}      -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(qr_code::list).post(qr_code::create))
        .route("/search", get(qr_code::search))
        .route("/{id}", get(qr_code::get_by_id))
}
