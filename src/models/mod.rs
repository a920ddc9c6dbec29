pub mod mcp;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const NO_RESULTS_MESSAGE: &str = "No results found";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Arguments of the `validate` tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ValidateParams {
    /// Bearer token to check
    pub token: String,
}

/// Arguments of the `find_local_business` tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FindLocalBusinessParams {
    /// Free-text description of the businesses to look for, e.g. "plumbers near downtown"
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneResponse {
    pub phone: String,
}

/// Payload of `find_local_business`. An empty search is reported in-band
/// rather than as a tool failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FindBusinessResponse {
    Found { results: String },
    Empty { error: String },
}

impl FindBusinessResponse {
    pub fn found(results: impl Into<String>) -> Self {
        Self::Found {
            results: results.into(),
        }
    }

    pub fn no_results() -> Self {
        Self::Empty {
            error: NO_RESULTS_MESSAGE.to_string(),
        }
    }
}
