use serde::{Deserialize, Serialize};

use crate::domain::{Fact, Level};

pub fn generate_route() -> &'static str {
    "/generate"
}

pub fn healthz_route() -> &'static str {
    "/healthz"
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub topic: String,
    #[serde(default)]
    pub level: Level,
}

/// Successful `/generate` payload. `fake_index` is signed on the wire; range
/// checks happen when a round is started from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub topic: String,
    pub level: Level,
    pub facts: Vec<Fact>,
    pub fake_index: i64,
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
