use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::AppState;

/// Build the application router with all routes
pub fn build(state: Arc<AppState>) -> Router {
    let router = Router::new()
        .route("/api/health", get(handlers::healthcheck))
        // Render routes
        .route("/api/render/standard-acls", post(handlers::render::render_standard_acls))
        .route("/api/render/extended-acls", post(handlers::render::render_extended_acls))
        // Filter routes
        .route("/api/filters", get(handlers::filters::list_filters))
        .route("/api/filters/:name", post(handlers::filters::apply_filter))
        // Network OS routes
        .route("/api/network-os/normalize", post(handlers::network_os::normalize));

    #[cfg(feature = "mongo-inventory")]
    let router = router.route("/api/inventory", get(handlers::inventory::get_inventory));

    // Add state and middleware
    router
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
