use axum::routing::post;
use axum::Router;

use crate::handlers::checks;
use crate::state::AppState;

/// Check engine trigger, merged directly into `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/run-checks", post(checks::run_checks))
}
