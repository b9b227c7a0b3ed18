//! Interactive tools exposed via Model Context Protocol
//!
//! Declares the greeting and calculator tools and routes `tools/call`
//! requests through the capability registry.

use rust_mcp_sdk::{
    macros,
    schema::{CallToolRequestParams, CallToolResult, ContentBlock, TextContent},
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::domain::calculator;
use crate::mcp::rpc::{
    app_error_to_json_rpc, json_rpc_error, json_rpc_error_with_data, json_rpc_result,
};
use crate::registry::{CapabilityRegistry, RegistryError, ToolOutput};
use crate::{errors::AppError, AppState};

#[macros::mcp_tool(name = "Greeting", description = "Returns a simple greeting.")]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct GreetingTool {
    pub name: String,
}

#[macros::mcp_tool(name = "Add", description = "Adds two numbers together.")]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct AddTool {
    pub a: f64,
    pub b: f64,
}

#[macros::mcp_tool(name = "Subtract", description = "Subtract two numbers.")]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct SubtractTool {
    pub a: f64,
    pub b: f64,
}

#[macros::mcp_tool(name = "Multiply", description = "Multiply two numbers.")]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct MultiplyTool {
    pub a: f64,
    pub b: f64,
}

#[macros::mcp_tool(name = "Divide", description = "Divide two numbers.")]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct DivideTool {
    pub a: f64,
    pub b: f64,
}

pub fn register_tools(registry: &mut CapabilityRegistry) -> Result<(), RegistryError> {
    registry.register_tool(GreetingTool::tool(), handle_greeting)?;
    registry.register_tool(AddTool::tool(), handle_add)?;
    registry.register_tool(SubtractTool::tool(), handle_subtract)?;
    registry.register_tool(MultiplyTool::tool(), handle_multiply)?;
    registry.register_tool(DivideTool::tool(), handle_divide)?;
    Ok(())
}

fn parse_arguments<T: DeserializeOwned>(arguments: Map<String, Value>) -> Result<T, AppError> {
    serde_json::from_value(Value::Object(arguments)).map_err(|_| {
        AppError::bad_request(
            "invalid_arguments",
            "tool arguments do not match the declared schema",
        )
    })
}

fn number_output(value: f64) -> ToolOutput {
    ToolOutput::structured(
        calculator::format_number(value),
        Map::from_iter([("result".to_string(), json!(value))]),
    )
}

fn handle_greeting(_state: &AppState, arguments: Map<String, Value>) -> Result<ToolOutput, AppError> {
    let params: GreetingTool = parse_arguments(arguments)?;
    Ok(ToolOutput::text(format!("Hello, {}!", params.name)))
}

fn handle_add(_state: &AppState, arguments: Map<String, Value>) -> Result<ToolOutput, AppError> {
    let params: AddTool = parse_arguments(arguments)?;
    Ok(number_output(calculator::add(params.a, params.b)))
}

fn handle_subtract(
    _state: &AppState,
    arguments: Map<String, Value>,
) -> Result<ToolOutput, AppError> {
    let params: SubtractTool = parse_arguments(arguments)?;
    Ok(number_output(calculator::subtract(params.a, params.b)))
}

fn handle_multiply(
    _state: &AppState,
    arguments: Map<String, Value>,
) -> Result<ToolOutput, AppError> {
    let params: MultiplyTool = parse_arguments(arguments)?;
    Ok(number_output(calculator::multiply(params.a, params.b)))
}

fn handle_divide(_state: &AppState, arguments: Map<String, Value>) -> Result<ToolOutput, AppError> {
    let params: DivideTool = parse_arguments(arguments)?;
    match calculator::divide(params.a, params.b) {
        Ok(quotient) => Ok(number_output(quotient)),
        Err(error) => Ok(ToolOutput::execution_error(error.to_string())),
    }
}

pub fn handle_tools_call(state: &AppState, id: Option<Value>, params: Option<Value>) -> Value {
    let Some(raw_params) = params else {
        return json_rpc_error(id, -32602, "Invalid params");
    };

    let tool_call: CallToolRequestParams = match serde_json::from_value(raw_params) {
        Ok(value) => value,
        Err(_) => return json_rpc_error(id, -32602, "Invalid params"),
    };

    let Some(entry) = state.registry.lookup_tool(&tool_call.name) else {
        return json_rpc_error_with_data(
            id,
            -32601,
            "Method not found",
            Some(json!({
                "code": "tool_not_found",
                "message": "unknown tool name",
                "details": {
                    "name": tool_call.name,
                },
            })),
        );
    };

    let arguments = tool_call.arguments.unwrap_or_default();
    match (entry.handler)(state, arguments) {
        Ok(output) => json_rpc_result(
            id,
            serde_json::to_value(CallToolResult {
                content: vec![ContentBlock::from(TextContent::new(output.text, None, None))],
                is_error: output.is_error.then_some(true),
                meta: None,
                structured_content: output.structured,
            })
            .expect("tool call result serialization"),
        ),
        Err(err) => app_error_to_json_rpc(id, err),
    }
}
