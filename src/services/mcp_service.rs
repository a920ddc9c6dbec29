use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::mcp::*;
use crate::models::{FindLocalBusinessParams, ValidateParams};
use crate::services::{AuthError, AuthService, FinderError, FinderService};

pub const SERVER_NAME: &str = "LocalBusinessFinder";
pub const VALIDATE_TOOL: &str = "validate";
pub const FIND_LOCAL_BUSINESS_TOOL: &str = "find_local_business";

/// Failures reported to the caller as `isError` tool results.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Finder(#[from] FinderError),

    #[error("Failed to encode tool output: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Dispatches MCP JSON-RPC messages to the two tools.
#[derive(Clone)]
pub struct McpService {
    auth: AuthService,
    finder: FinderService,
}

impl McpService {
    pub fn new(auth: AuthService, finder: FinderService) -> Self {
        Self { auth, finder }
    }

    /// Handles one message. Notifications produce no response.
    pub async fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id.clone() else {
            self.handle_notification(&request);
            return None;
        };

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::failure(
                id,
                JsonRpcError::new(INVALID_REQUEST, "Invalid Request")
                    .with_data(json!({ "jsonrpc": request.jsonrpc })),
            ));
        }

        debug!("Handling MCP request: method={}", request.method);
        let outcome = match request.method.as_str() {
            "initialize" => self.initialize(request.params),
            "ping" => Ok(json!({})),
            "tools/list" => to_result(ListToolsResult {
                tools: Self::tools(),
            }),
            "tools/call" => match request.params {
                Some(params) => match serde_json::from_value::<CallToolParams>(params) {
                    Ok(call) => self.call_tool(call).await.and_then(to_result),
                    Err(e) => Err(invalid_params(e.to_string())),
                },
                None => Err(invalid_params("Missing params")),
            },
            other => Err(JsonRpcError::new(METHOD_NOT_FOUND, "Method not found")
                .with_data(json!({ "method": other }))),
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        })
    }

    fn handle_notification(&self, notification: &JsonRpcRequest) {
        match notification.method.as_str() {
            "notifications/initialized" => info!("Client confirmed initialization"),
            "notifications/cancelled" => debug!("Request cancelled: {:?}", notification.params),
            other => debug!("Ignoring notification: {}", other),
        }
    }

    fn initialize(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: InitializeParams = params
            .ok_or_else(|| invalid_params("Missing params"))
            .and_then(|p| serde_json::from_value(p).map_err(|e| invalid_params(e.to_string())))?;

        if let Some(client) = &params.client_info {
            info!("Initializing session for {} {}", client.name, client.version);
        }

        to_result(InitializeResult {
            protocol_version: negotiate_version(&params.protocol_version).to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(
                "Local business finder. Call find_local_business with a free-text query \
                 such as \"plumbers near downtown\"; call validate with the bearer token \
                 to retrieve the owner's phone number."
                    .to_string(),
            ),
        })
    }

    pub fn tools() -> Vec<Tool> {
        vec![
            Tool {
                name: VALIDATE_TOOL.to_string(),
                description: "Validate a bearer token and return the owner's phone number"
                    .to_string(),
                input_schema: input_schema::<ValidateParams>(),
            },
            Tool {
                name: FIND_LOCAL_BUSINESS_TOOL.to_string(),
                description:
                    "Search the web for local businesses and summarize them with location links"
                        .to_string(),
                input_schema: input_schema::<FindLocalBusinessParams>(),
            },
        ]
    }

    async fn call_tool(&self, call: CallToolParams) -> Result<CallToolResult, JsonRpcError> {
        let arguments = call.arguments.unwrap_or_else(|| json!({}));

        let outcome = match call.name.as_str() {
            VALIDATE_TOOL => {
                let args: ValidateParams = parse_arguments(arguments)?;
                self.run_validate(&args)
            }
            FIND_LOCAL_BUSINESS_TOOL => {
                let args: FindLocalBusinessParams = parse_arguments(arguments)?;
                self.run_find_local_business(&args).await
            }
            other => {
                return Err(invalid_params(format!("Unknown tool: {}", other)));
            }
        };

        Ok(match outcome {
            Ok(payload) => CallToolResult::success(payload),
            Err(e) => {
                warn!("Tool {} failed: {}", call.name, e);
                CallToolResult::error(format!("Error executing tool {}: {}", call.name, e))
            }
        })
    }

    fn run_validate(&self, args: &ValidateParams) -> Result<Value, ToolError> {
        let phone = self.auth.validate(&args.token)?;
        Ok(serde_json::to_value(phone)?)
    }

    async fn run_find_local_business(
        &self,
        args: &FindLocalBusinessParams,
    ) -> Result<Value, ToolError> {
        let response = self.finder.find_local_business(&args.query).await?;
        Ok(serde_json::to_value(response)?)
    }
}

/// Picks the client's revision when supported, otherwise the newest one.
pub fn negotiate_version(requested: &str) -> &'static str {
    SUPPORTED_PROTOCOL_VERSIONS
        .iter()
        .copied()
        .find(|v| *v == requested)
        .unwrap_or(SUPPORTED_PROTOCOL_VERSIONS[0])
}

fn input_schema<T: JsonSchema>() -> Value {
    serde_json::to_value(schemars::schema_for!(T)).unwrap_or_else(|_| json!({ "type": "object" }))
}

fn parse_arguments<T: DeserializeOwned>(arguments: Value) -> Result<T, JsonRpcError> {
    serde_json::from_value(arguments).map_err(|e| invalid_params(format!("Invalid arguments: {}", e)))
}

fn invalid_params(message: impl Into<String>) -> JsonRpcError {
    JsonRpcError::new(INVALID_PARAMS, message)
}

fn to_result<T: serde::Serialize>(value: T) -> Result<Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError::new(INTERNAL_ERROR, e.to_string()))
}
