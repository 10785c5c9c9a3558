//! Events delivered from the backend worker to the UI thread.

use game_core::GenerationResult;

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    /// Completion of the request queued by `BackendCommand::Generate`.
    Generated(GenerationResult),
    /// The worker could not start or has stopped.
    BackendUnavailable(String),
}
