pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::view::handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Page (form posts re-render the whole page)
        .route("/", get(handlers::handle_index))
        .route(
            "/s/:id",
            get(handlers::handle_page).post(handlers::handle_form),
        )
        // Session API (same controller, JSON views)
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_end_session),
        )
        .route(
            "/api/v1/sessions/:id/events",
            post(handlers::handle_event),
        )
        .with_state(state)
}
