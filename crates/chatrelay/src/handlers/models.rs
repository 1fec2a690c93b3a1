use axum::Json;
use axum::extract::State;
use chatrelay_types::ModelsResponse;

use crate::server::AppState;

/// GET /models
pub async fn list_models(State(state): State<AppState>) -> Json<ModelsResponse> {
    Json(state.dispatcher.catalog().to_response())
}
