use axum::routing::{get, post};
use axum::Router;

use crate::handlers::assets;
use crate::state::AppState;

/// Routes mounted at `/assets`.
///
/// ```text
/// GET    /                      list_assets
/// POST   /                      create_asset
/// GET    /{id}                  get_asset
/// PUT    /{id}                  update_asset
/// PATCH  /{id}                  patch_asset
/// DELETE /{id}                  delete_asset
/// POST   /{id}/mark_serviced    mark_serviced
/// ```
///
/// A non-numeric `{id}` is a 400, an unknown numeric `{id}` is a 404.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(assets::list_assets).post(assets::create_asset))
        .route(
            "/{id}",
            get(assets::get_asset)
                .put(assets::update_asset)
                .patch(assets::patch_asset)
                .delete(assets::delete_asset),
        )
        .route("/{id}/mark_serviced", post(assets::mark_serviced))
}
