pub mod auth_service;
pub mod finder_service;
pub mod generation_service;
pub mod mcp_service;
pub mod search_service;

pub use auth_service::*;
pub use finder_service::*;
pub use generation_service::*;
pub use mcp_service::*;
pub use search_service::*;
