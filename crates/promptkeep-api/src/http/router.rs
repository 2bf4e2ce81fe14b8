//! Axum router configuration with middleware.
//!
//! All store routes live under `/physton_prompt/`, the path the web UI calls.
//! Middleware: CORS, tracing.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Path prefix for every store route.
pub const ROUTE_PREFIX: &str = "/physton_prompt";

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let store_routes = Router::new()
        // Documents
        .route("/get_data", get(handlers::storage::get_data))
        .route("/get_datas", get(handlers::storage::get_datas))
        .route("/set_data", post(handlers::storage::set_data))
        .route("/set_datas", post(handlers::storage::set_datas))
        // Lists
        .route(
            "/get_data_list_item",
            get(handlers::storage::get_data_list_item),
        )
        .route("/push_data_list", post(handlers::storage::push_data_list))
        .route("/pop_data_list", post(handlers::storage::pop_data_list))
        .route("/shift_data_list", post(handlers::storage::shift_data_list))
        .route("/remove_data_list", post(handlers::storage::remove_data_list))
        .route("/clear_data_list", post(handlers::storage::clear_data_list))
        // History
        .route("/get_histories", get(handlers::history::get_histories))
        .route(
            "/get_latest_history",
            get(handlers::history::get_latest_history),
        )
        .route("/push_history", post(handlers::history::push_history))
        .route("/set_history", post(handlers::history::set_history))
        .route("/set_history_name", post(handlers::history::set_history_name))
        .route("/delete_history", post(handlers::history::delete_history))
        .route("/delete_histories", post(handlers::history::delete_histories))
        .route("/dofavorite", post(handlers::history::do_favorite))
        // Favorites
        .route("/get_favorites", get(handlers::favorite::get_favorites))
        .route("/push_favorite", post(handlers::favorite::push_favorite))
        .route("/move_up_favorite", post(handlers::favorite::move_up_favorite))
        .route(
            "/move_down_favorite",
            post(handlers::favorite::move_down_favorite),
        )
        .route(
            "/set_favorite_name",
            post(handlers::favorite::set_favorite_name),
        )
        .route("/unfavorite", post(handlers::favorite::unfavorite))
        // Translation
        .route("/translate", post(handlers::translate::translate))
        .route("/translates", post(handlers::translate::translates));

    Router::new()
        .route("/health", get(health_check))
        .nest(ROUTE_PREFIX, store_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
