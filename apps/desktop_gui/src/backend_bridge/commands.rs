//! Backend commands queued from UI to backend worker.

use shared::protocol::GenerateRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    Generate(GenerateRequest),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Generate(_) => "generate",
        }
    }
}
