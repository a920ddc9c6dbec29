pub mod mcp;

use crate::handlers;
use actix_web::web;

/// Health check at the root, MCP tools under `/mcp`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::root))
        .service(mcp::config())
        .default_service(web::route().to(handlers::not_found));
}
