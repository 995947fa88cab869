/*
 * Responsibility
 * - URL structure of the gate service
 * - /auth is the forward-auth target; the proxy's subrequest may use any method
 */
use axum::{
    Router,
    routing::{any, get},
};

use crate::api::handlers::{authorize::authorize, health::health};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/auth", any(authorize))
}
