//! Client-side game logic: the session controller and the fact service client.

pub mod client;
pub mod error;
pub mod session;

pub use client::{FactService, HttpFactService};
pub use error::{GenerateError, RoundError, NETWORK_ERROR_MESSAGE, UNKNOWN_API_ERROR};
pub use session::{
    FactOption, Feedback, GameSession, GameState, GuessOutcome, OptionMark, Phase, Reveal,
};

/// Result of one generation request, as consumed by
/// [`GameSession::complete_generation`].
pub type GenerationResult = Result<shared::protocol::GenerateResponse, GenerateError>;
