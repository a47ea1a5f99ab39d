use thiserror::Error;
use token_rules::error::MalformedRule;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum TrialError {
    #[error(transparent)]
    MalformedRule(#[from] MalformedRule),
    #[error("trial session {0} is closed")]
    SessionClosed(Uuid),
    #[error(transparent)]
    Script(#[from] ScriptError),
}

/// A gesture script line that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {}", .messages.join("; "))]
pub struct ScriptError {
    /// One-based line number within the script.
    pub line: usize,
    pub messages: Vec<String>,
}
