use std::sync::Arc;
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use chatrelay_types::{BatchRequest, InvokeRequest, Provider};
use tower_http::timeout::TimeoutLayer;

use crate::dispatch::Dispatcher;
use crate::handlers;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

pub fn build_app(state: AppState, request_timeout: Option<Duration>) -> Router {
    let mut api = Router::new()
        .route("/readyz", get(handlers::readyz))
        .route("/models", get(handlers::list_models));

    for provider in Provider::ALL {
        api = api
            .route(
                &provider.invoke_path(),
                post(
                    move |State(state): State<AppState>, Json(req): Json<InvokeRequest>| {
                        handlers::invoke(state, provider, req)
                    },
                ),
            )
            .route(
                &provider.batch_path(),
                post(
                    move |State(state): State<AppState>, Json(req): Json<BatchRequest>| {
                        handlers::batch(state, provider, req)
                    },
                ),
            );
    }

    let router = Router::new()
        .route("/livez", get(handlers::livez))
        .route("/version", get(handlers::version))
        .merge(api.with_state(state));

    match request_timeout {
        Some(timeout) => router.layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        )),
        None => router,
    }
}
