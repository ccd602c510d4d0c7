use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::state::AppState;

/// Build the HTTP router
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/generate-week", post(api::weeks::generate_week))
        .route("/inputs", get(api::inputs::get_inputs))
        .route("/weeks", get(api::weeks::list_weeks))
        .route("/weeks/:id/calendar", get(api::weeks::week_calendar))
        .route("/calendar", get(api::weeks::latest_calendar))
        .route("/posts/:id/thread", get(api::posts::get_thread))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn health_check() -> &'static str {
    "OK"
}
