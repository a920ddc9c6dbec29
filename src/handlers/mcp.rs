use actix_web::http::header;
use actix_web::{web, HttpResponse, Result};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::models::mcp::{
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, INVALID_REQUEST, PARSE_ERROR,
};
use crate::models::ErrorResponse;
use crate::AppState;

pub const SESSION_HEADER: &str = "Mcp-Session-Id";

/// Single JSON-RPC message per POST. Body is parsed by hand so malformed
/// input gets a JSON-RPC error instead of actix's plain-text 400.
pub async fn mcp_message(state: web::Data<AppState>, body: web::Bytes) -> Result<HttpResponse> {
    let value: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Rejected unparsable MCP message: {}", e);
            return Ok(rpc_error(
                JsonRpcError::new(PARSE_ERROR, "Parse error")
                    .with_data(json!({ "details": e.to_string() })),
            ));
        }
    };

    if value.is_array() {
        return Ok(rpc_error(JsonRpcError::new(
            INVALID_REQUEST,
            "Batch requests are not supported",
        )));
    }

    let request: JsonRpcRequest = match serde_json::from_value(value) {
        Ok(request) => request,
        Err(e) => {
            return Ok(rpc_error(
                JsonRpcError::new(INVALID_REQUEST, "Invalid Request")
                    .with_data(json!({ "details": e.to_string() })),
            ));
        }
    };

    let is_initialize = request.method == "initialize";

    match state.mcp_service.handle(request).await {
        None => Ok(HttpResponse::Accepted().finish()),
        Some(response) => {
            let mut builder = HttpResponse::Ok();
            if is_initialize && response.error.is_none() {
                builder.insert_header((SESSION_HEADER, Uuid::new_v4().to_string()));
            }
            Ok(builder.json(response))
        }
    }
}

/// No server-initiated event stream is offered.
pub async fn mcp_stream() -> Result<HttpResponse> {
    Ok(HttpResponse::MethodNotAllowed()
        .insert_header((header::ALLOW, "POST"))
        .json(ErrorResponse::new("Use POST to send MCP messages")))
}

fn rpc_error(error: JsonRpcError) -> HttpResponse {
    HttpResponse::BadRequest().json(JsonRpcResponse::failure(Value::Null, error))
}
