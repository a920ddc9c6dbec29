pub mod health;
pub mod mcp;

pub use health::*;
pub use mcp::*;
