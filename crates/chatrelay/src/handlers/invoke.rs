//! Provider invocation handlers.
//!
//! Both endpoints always answer 200: provider failures arrive as text in
//! `output.content`, never as an error status.

use axum::Json;
use chatrelay_types::{
    BatchMetadata, BatchRequest, BatchResponse, InvokeRequest, InvokeResponse, Provider,
    RunMetadata,
};
use tracing::debug;

use crate::server::AppState;

/// POST /{provider}-chat-api/invoke
pub async fn invoke(state: AppState, provider: Provider, req: InvokeRequest) -> Json<InvokeResponse> {
    debug!(provider = %provider, "Invoke request");
    let invocation = state.dispatcher.invoke(provider, &req.input).await;

    Json(InvokeResponse {
        output: invocation.output,
        metadata: RunMetadata {
            run_id: invocation.run_id,
        },
    })
}

/// POST /{provider}-chat-api/batch
pub async fn batch(state: AppState, provider: Provider, req: BatchRequest) -> Json<BatchResponse> {
    debug!(provider = %provider, size = req.inputs.len(), "Batch request");
    let invocations = state.dispatcher.invoke_batch(provider, &req.inputs).await;

    let (run_ids, output): (Vec<_>, Vec<_>) = invocations
        .into_iter()
        .map(|i| (i.run_id, i.output))
        .unzip();

    Json(BatchResponse {
        output,
        metadata: BatchMetadata { run_ids },
    })
}
