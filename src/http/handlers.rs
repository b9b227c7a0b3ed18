//! Axum handlers for the server's HTTP surface
//!
//! `/mcp` decodes JSON-RPC payloads (single or batched) and hands them to
//! the protocol engine; `/health` and `/.well-known/mcp` report liveness and
//! the registered capability surface.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::mcp::rpc::json_rpc_error;
use crate::mcp::server::handle_json_rpc_value;
use crate::registry::CapabilityCounts;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DiscoveryResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub mcp_endpoint: &'static str,
    pub capabilities: CapabilityCounts,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn discovery(State(state): State<AppState>) -> Json<DiscoveryResponse> {
    Json(DiscoveryResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        mcp_endpoint: "/mcp",
        capabilities: state.registry.counts(),
    })
}

pub async fn mcp_endpoint(State(state): State<AppState>, body: Bytes) -> Response {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(_) => {
            return (
                StatusCode::OK,
                Json(json_rpc_error(None, -32700, "Parse error")),
            )
                .into_response()
        }
    };

    match payload {
        Value::Array(batch) => {
            if batch.is_empty() {
                return (
                    StatusCode::OK,
                    Json(vec![json_rpc_error(None, -32600, "Invalid Request")]),
                )
                    .into_response();
            }

            // Notifications produce no entry in the batch response.
            let responses: Vec<Value> = batch
                .into_iter()
                .filter_map(|item| handle_json_rpc_value(&state, item))
                .collect();

            if responses.is_empty() {
                return StatusCode::NO_CONTENT.into_response();
            }

            (StatusCode::OK, Json(Value::Array(responses))).into_response()
        }
        payload => match handle_json_rpc_value(&state, payload) {
            Some(response) => (StatusCode::OK, Json(response)).into_response(),
            None => StatusCode::NO_CONTENT.into_response(),
        },
    }
}
