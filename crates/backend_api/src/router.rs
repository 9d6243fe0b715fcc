use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{handlers, state::AppState, user_handlers};

/// Create the main application router with all API endpoints
pub fn create_router(state: AppState) -> Router {
    // Create CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Analysis endpoints
        .route("/api/analyze", post(handlers::analyze))
        .route("/api/summary", post(handlers::summary))
        .route("/api/health-report", post(handlers::health_report))
        .route("/api/chat", post(handlers::chat))
        // Users
        .route(
            "/api/users",
            get(user_handlers::list_users).post(user_handlers::create_user),
        )
        .route("/api/users/login", post(user_handlers::login))
        .route("/api/users/:user_id", delete(user_handlers::delete_user))
        .route(
            "/api/users/:user_id/results",
            get(user_handlers::get_user_results),
        )
        // Saved results
        .route("/api/results", get(user_handlers::list_results))
        .route(
            "/api/results/:result_id",
            get(user_handlers::get_result).delete(user_handlers::delete_result),
        )
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
