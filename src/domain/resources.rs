//! Model Context Protocol resource providers
//!
//! Declares the static configuration resource and the per-user profile
//! template, and routes `resources/read` requests through the registry.
//! Exact URIs are consulted before template matching.

use rust_mcp_sdk::schema::{
    ReadResourceContent, ReadResourceRequestParams, ReadResourceResult, Resource,
    ResourceTemplate, TextResourceContents,
};
use serde_json::{json, Value};

use crate::mcp::rpc::{
    app_error_to_json_rpc, json_rpc_error, json_rpc_error_with_data, json_rpc_result,
};
use crate::registry::{CapabilityRegistry, RegistryError, TemplateValues};
use crate::store::ProfileLookup;
use crate::{errors::AppError, AppState};

pub const CONFIG_RESOURCE_URI: &str = "data://config";
pub const USER_PROFILE_TEMPLATE: &str = "users://{user_id}/profile";

pub fn register_resources(registry: &mut CapabilityRegistry) -> Result<(), RegistryError> {
    registry.register_resource(
        Resource {
            annotations: None,
            description: Some("Provides the application configuration.".to_string()),
            icons: vec![],
            meta: None,
            mime_type: Some("application/json".to_string()),
            name: "Application Config".to_string(),
            size: None,
            title: None,
            uri: CONFIG_RESOURCE_URI.to_string(),
        },
        read_config,
    )?;

    registry.register_resource_template(
        ResourceTemplate {
            annotations: None,
            description: Some("Retrieves a user's profile by their ID.".to_string()),
            icons: vec![],
            meta: None,
            mime_type: Some("application/json".to_string()),
            name: "User Profile".to_string(),
            title: None,
            uri_template: USER_PROFILE_TEMPLATE.to_string(),
        },
        read_user_profile,
    )?;

    Ok(())
}

fn read_config(state: &AppState) -> Result<String, AppError> {
    serde_json::to_string(state.config_snapshot.as_ref())
        .map_err(|err| AppError::internal(format!("config snapshot serialization: {err}")))
}

fn read_user_profile(state: &AppState, values: &TemplateValues) -> Result<String, AppError> {
    let raw_id = values
        .get("user_id")
        .ok_or_else(|| AppError::internal("profile template did not capture user_id"))?;
    let user_id: i64 = raw_id.parse().map_err(|_| {
        AppError::bad_request("invalid_user_id", "user_id must be an integer")
    })?;

    match state.directory.lookup(user_id) {
        ProfileLookup::Found(profile) => serde_json::to_string(&profile)
            .map_err(|err| AppError::internal(format!("profile serialization: {err}"))),
        ProfileLookup::NotFound => Ok(json!({"error": "User not found"}).to_string()),
    }
}

pub fn handle_resources_read(state: &AppState, id: Option<Value>, params: Option<Value>) -> Value {
    let Some(raw_params) = params else {
        return json_rpc_error(id, -32602, "Invalid params");
    };

    let resource_read: ReadResourceRequestParams = match serde_json::from_value(raw_params) {
        Ok(value) => value,
        Err(_) => return json_rpc_error(id, -32602, "Invalid params"),
    };

    let read_outcome = if let Some(entry) = state.registry.lookup_resource(&resource_read.uri) {
        (entry.handler)(state)
    } else if let Some((entry, values)) = state.registry.match_resource_template(&resource_read.uri)
    {
        (entry.handler)(state, &values)
    } else {
        return json_rpc_error_with_data(
            id,
            -32601,
            "Method not found",
            Some(json!({
                "code": "resource_not_found",
                "message": "unknown resource uri",
                "details": {
                    "uri": resource_read.uri,
                },
            })),
        );
    };

    match read_outcome {
        Ok(text) => {
            let result = serde_json::to_value(ReadResourceResult {
                contents: vec![ReadResourceContent::from(TextResourceContents {
                    meta: None,
                    mime_type: Some("application/json".to_string()),
                    text,
                    uri: resource_read.uri,
                })],
                meta: None,
            })
            .expect("read resource result serialization");

            json_rpc_result(id, result)
        }
        Err(err) => app_error_to_json_rpc(id, err),
    }
}
