// src/routes.rs

use axum::{Router, http::Method, routing::post};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{metadata, quiz},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Mounts the quiz endpoints under /api.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (config plus the registry and storage seams).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:5173".parse().unwrap(),
        "http://127.0.0.1:5173".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/encryptQuizAnswers", post(quiz::encrypt_answers))
        .route("/submitQuiz", post(quiz::submit_quiz))
        .route("/uploadMetadata", post(metadata::upload_metadata));

    Router::new()
        .nest("/api", api_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
