use axum::routing::get;
use axum::Router;

use crate::handlers::violations;
use crate::state::AppState;

/// Routes mounted at `/violations` (read-only).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(violations::list_violations))
        .route("/{id}", get(violations::get_violation))
}
