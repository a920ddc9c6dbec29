use actix_web::{HttpResponse, Result};

use crate::models::{ErrorResponse, HealthResponse};

pub const HEALTH_STATUS: &str = "MCP Server Running";

pub async fn root() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(HealthResponse {
        status: HEALTH_STATUS.to_string(),
    }))
}

pub async fn not_found() -> Result<HttpResponse> {
    Ok(HttpResponse::NotFound().json(ErrorResponse::new(
        "Endpoint not found"
    )))
}
