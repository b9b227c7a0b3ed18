//! Model Context Protocol prompt providers
//!
//! Declares the calculator prompt and routes `prompts/get` requests through
//! the registry. Prompt arguments arrive as strings on the wire and are
//! parsed here.

use std::collections::BTreeMap;

use rust_mcp_sdk::schema::{
    ContentBlock, GetPromptResult, Prompt, PromptArgument, PromptMessage, Role, TextContent,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::domain::calculator;
use crate::mcp::rpc::{
    app_error_to_json_rpc, json_rpc_error, json_rpc_error_with_data, json_rpc_result,
};
use crate::registry::{CapabilityRegistry, PromptArguments, RegistryError};
use crate::{errors::AppError, AppState};

pub const CALCULATOR_PROMPT_NAME: &str = "Calculator_Prompt";
pub const INVALID_OPERATION_GUIDANCE: &str =
    "Invalid operation. Please choose Add, Subtract, Multiply, or Divide.";

pub fn register_prompts(registry: &mut CapabilityRegistry) -> Result<(), RegistryError> {
    registry.register_prompt(
        Prompt {
            arguments: vec![
                PromptArgument {
                    description: Some("First operand.".to_string()),
                    name: "a".to_string(),
                    required: Some(true),
                    title: None,
                },
                PromptArgument {
                    description: Some("Second operand.".to_string()),
                    name: "b".to_string(),
                    required: Some(true),
                    title: None,
                },
                PromptArgument {
                    description: Some("One of Add, Subtract, Multiply, Divide.".to_string()),
                    name: "operation".to_string(),
                    required: Some(true),
                    title: None,
                },
            ],
            description: Some("Prompt for a calculation and return the result.".to_string()),
            icons: vec![],
            meta: None,
            name: CALCULATOR_PROMPT_NAME.to_string(),
            title: None,
        },
        calculator_prompt,
    )
}

fn parse_number(arguments: &PromptArguments, key: &'static str) -> Result<f64, AppError> {
    let raw = arguments.get(key).ok_or_else(|| {
        AppError::bad_request("missing_argument", format!("prompt argument {key} is required"))
    })?;

    raw.trim().parse::<f64>().map_err(|_| {
        AppError::bad_request(
            "invalid_argument",
            format!("prompt argument {key} must be a number"),
        )
    })
}

fn calculator_prompt(_state: &AppState, arguments: &PromptArguments) -> Result<String, AppError> {
    let a = parse_number(arguments, "a")?;
    let b = parse_number(arguments, "b")?;
    let operation = arguments.get("operation").ok_or_else(|| {
        AppError::bad_request("missing_argument", "prompt argument operation is required")
    })?;

    Ok(render_calculation(a, b, operation))
}

/// Dispatches on the exact operation name. The Divide branch converts a
/// division failure into its message text instead of failing the request.
/// Operands and results render with at least one decimal place.
fn render_calculation(a: f64, b: f64, operation: &str) -> String {
    let lhs = calculator::format_number(a);
    let rhs = calculator::format_number(b);
    match operation {
        "Add" => format!(
            "The result of adding {lhs} and {rhs} is {}",
            calculator::format_number(calculator::add(a, b))
        ),
        "Subtract" => format!(
            "The result of subtracting {rhs} from {lhs} is {}",
            calculator::format_number(calculator::subtract(a, b))
        ),
        "Multiply" => format!(
            "The result of multiplying {lhs} and {rhs} is {}",
            calculator::format_number(calculator::multiply(a, b))
        ),
        "Divide" => match calculator::divide(a, b) {
            Ok(quotient) => format!(
                "The result of dividing {lhs} by {rhs} is {}",
                calculator::format_number(quotient)
            ),
            Err(error) => error.to_string(),
        },
        _ => INVALID_OPERATION_GUIDANCE.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct GetPromptParams {
    name: String,
    #[serde(default)]
    arguments: BTreeMap<String, String>,
}

pub fn handle_prompts_get(state: &AppState, id: Option<Value>, params: Option<Value>) -> Value {
    let Some(raw_params) = params else {
        return json_rpc_error(id, -32602, "Invalid params");
    };

    let prompt_get: GetPromptParams = match serde_json::from_value(raw_params) {
        Ok(value) => value,
        Err(_) => return json_rpc_error(id, -32602, "Invalid params"),
    };

    let Some(entry) = state.registry.lookup_prompt(&prompt_get.name) else {
        return json_rpc_error_with_data(
            id,
            -32601,
            "Method not found",
            Some(json!({
                "code": "prompt_not_found",
                "message": "unknown prompt name",
                "details": {
                    "name": prompt_get.name,
                },
            })),
        );
    };

    match (entry.handler)(state, &prompt_get.arguments) {
        Ok(text) => {
            let result = serde_json::to_value(GetPromptResult {
                description: entry.prompt.description.clone(),
                messages: vec![PromptMessage {
                    content: ContentBlock::from(TextContent::new(text, None, None)),
                    role: Role::User,
                }],
                meta: None,
            })
            .expect("get prompt result serialization");

            json_rpc_result(id, result)
        }
        Err(err) => app_error_to_json_rpc(id, err),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::{calculator_prompt, render_calculation, INVALID_OPERATION_GUIDANCE};
    use crate::testing::demo_state;

    #[test]
    fn renders_each_operation() {
        assert_eq!(
            render_calculation(4.0, 2.0, "Add"),
            "The result of adding 4.0 and 2.0 is 6.0"
        );
        assert_eq!(
            render_calculation(4.0, 2.0, "Subtract"),
            "The result of subtracting 2.0 from 4.0 is 2.0"
        );
        assert_eq!(
            render_calculation(4.0, 2.0, "Multiply"),
            "The result of multiplying 4.0 and 2.0 is 8.0"
        );
        assert_eq!(
            render_calculation(4.0, 2.0, "Divide"),
            "The result of dividing 4.0 by 2.0 is 2.0"
        );
    }

    #[test]
    fn divide_by_zero_becomes_plain_text() {
        let rendered = render_calculation(4.0, 0.0, "Divide");
        assert_eq!(rendered, "cannot divide 4 by zero");
    }

    #[test]
    fn unknown_operation_returns_guidance() {
        assert_eq!(
            render_calculation(1.0, 2.0, "Unknown"),
            INVALID_OPERATION_GUIDANCE
        );
        // Dispatch is case sensitive.
        assert_eq!(
            render_calculation(1.0, 2.0, "add"),
            INVALID_OPERATION_GUIDANCE
        );
    }

    #[test]
    fn prompt_arguments_are_parsed_from_strings() {
        let state = demo_state();
        let arguments = BTreeMap::from([
            ("a".to_string(), "4".to_string()),
            ("b".to_string(), "2.5".to_string()),
            ("operation".to_string(), "Multiply".to_string()),
        ]);

        let text = calculator_prompt(&state, &arguments).expect("valid arguments");
        assert_eq!(text, "The result of multiplying 4.0 and 2.5 is 10.0");
    }

    #[test]
    fn non_numeric_operand_is_rejected() {
        let state = demo_state();
        let arguments = BTreeMap::from([
            ("a".to_string(), "four".to_string()),
            ("b".to_string(), "2".to_string()),
            ("operation".to_string(), "Add".to_string()),
        ]);

        let error = calculator_prompt(&state, &arguments).expect_err("invalid operand must fail");
        assert!(error.to_string().contains("bad request"));
    }
}
