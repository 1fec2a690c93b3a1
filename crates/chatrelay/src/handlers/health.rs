use axum::extract::State;
use axum::http::StatusCode;

use crate::server::AppState;

/// GET /livez
pub async fn livez() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// GET /readyz
///
/// Ready once at least one provider has credentials. Invocations of an
/// unconfigured provider still answer, but only with error text.
pub async fn readyz(State(state): State<AppState>) -> (StatusCode, &'static str) {
    if state.dispatcher.configured_providers().is_empty() {
        (StatusCode::SERVICE_UNAVAILABLE, "no providers configured")
    } else {
        (StatusCode::OK, "ok")
    }
}
