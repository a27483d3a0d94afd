pub mod assets;
pub mod checks;
pub mod health;
pub mod notifications;
pub mod violations;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /assets                              list, create
/// /assets/{id}                         get, update (PUT), patch, delete
/// /assets/{id}/mark_serviced           mark serviced (POST)
///
/// /notifications                       list (?type=&asset=&limit=&offset=)
/// /notifications/{id}                  get
///
/// /violations                          list (?type=&asset=&limit=&offset=)
/// /violations/{id}                     get
///
/// /run-checks                          run the check engine (POST)
/// ```
///
/// `{id}` segments are parsed as integers. A non-numeric id (`/assets/abc`)
/// is rejected with `400 BAD_REQUEST` by [`AppPath`](crate::extract::AppPath)
/// before any lookup; only a well-formed id that matches no row is a `404`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/assets", assets::router())
        .nest("/notifications", notifications::router())
        .nest("/violations", violations::router())
        .merge(checks::router())
}
