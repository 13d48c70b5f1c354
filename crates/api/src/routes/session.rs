use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/schedules/:id/sessions",
            post(handlers::session::request_session),
        )
        .route("/api/sessions", get(handlers::session::list_sessions))
        .route("/api/sessions/:id", get(handlers::session::get_session))
        .route(
            "/api/sessions/:id/approve",
            post(handlers::session::approve_session),
        )
        .route("/api/sessions/:id", delete(handlers::session::delete_session))
}
