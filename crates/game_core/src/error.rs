use thiserror::Error;

pub const UNKNOWN_API_ERROR: &str = "Unknown API error.";
pub const NETWORK_ERROR_MESSAGE: &str =
    "A network error occurred. Please check your server connection.";

/// Failure of one `/generate` round trip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// The service answered with a non-2xx status.
    #[error("fact service returned status {status}: {}", .message.as_deref().unwrap_or(UNKNOWN_API_ERROR))]
    Service {
        status: u16,
        message: Option<String>,
    },
    /// The request never produced a usable response.
    #[error("fact service request failed: {0}")]
    Transport(String),
}

impl GenerateError {
    pub fn service(status: u16, message: Option<String>) -> Self {
        Self::Service { status, message }
    }

    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport(reason.into())
    }

    /// Text shown in the configuration view.
    pub fn user_message(&self) -> String {
        match self {
            Self::Service { message, .. } => {
                generation_failure_message(message.as_deref().unwrap_or(UNKNOWN_API_ERROR))
            }
            Self::Transport(_) => NETWORK_ERROR_MESSAGE.to_string(),
        }
    }
}

impl From<reqwest::Error> for GenerateError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value.to_string())
    }
}

pub(crate) fn generation_failure_message(reason: &str) -> String {
    format!("Error generating facts: {reason}")
}

/// A decoded payload that cannot start a round.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
    #[error("the service returned no facts")]
    NoFacts,
    #[error("fake statement index {index} is outside the {len} returned facts")]
    FakeIndexOutOfRange { index: i64, len: usize },
}
