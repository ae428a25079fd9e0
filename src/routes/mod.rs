use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::{apply_security_headers, create_cors_layer, Config, ThrottleLayer};
use crate::handlers::{create_ticket, export_tickets, health_check, list_tickets};
use crate::state::AppState;

/// Wire routes, middleware and state into the application router. The
/// throttle layer is outermost so over-quota requests are rejected before
/// any handler runs.
pub fn create_router(state: AppState, config: &Config) -> Router {
    let throttle = ThrottleLayer::new(
        config.rate_limit.max_requests,
        Duration::from_secs(config.rate_limit.window_secs),
    );

    let router = Router::new()
        .route("/health", get(health_check))
        .route("/tickets", post(create_ticket).get(list_tickets))
        .route("/tickets/export", get(export_tickets))
        .with_state(state);

    apply_security_headers(router)
        .layer(create_cors_layer(config.allowed_origins.as_deref()))
        .layer(TraceLayer::new_for_http())
        .layer(throttle)
}
