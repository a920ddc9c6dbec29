use crate::handlers;
use actix_web::{web, Scope};

pub fn config() -> Scope {
    web::scope("/mcp")
        .route("", web::post().to(handlers::mcp_message))
        .route("/", web::post().to(handlers::mcp_message))
        .route("", web::get().to(handlers::mcp_stream))
        .route("/", web::get().to(handlers::mcp_stream))
}
