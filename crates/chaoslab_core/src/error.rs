use thiserror::Error;

use crate::viz::Axis;

/// All failure modes of the core. None of these are fatal to the process:
/// form-level errors are re-surfaced as inline messages, collaborator
/// failures leave the current view in place, and `UnsupportedAxis` only
/// aborts the single render that requested a missing channel.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Registry misuse. Unreachable from UI-driven paths, where model ids
    /// only come from the registry's own table.
    #[error("unknown model '{0}'")]
    UnknownModel(String),

    /// A parameter name was used that the model's schema does not declare.
    #[error("model '{model}' has no parameter '{field}'")]
    UnknownParam { model: &'static str, field: String },

    /// The initial-condition text did not yield exactly `expected` numbers.
    #[error("initial conditions must contain exactly {expected} numbers, got {got}")]
    InvalidInitialConditions { expected: usize, got: usize },

    /// The compute collaborator rejected a run request or was unreachable.
    #[error("simulation submission failed: {0}")]
    SubmissionFailed(String),

    /// Fetching the full record for a selected run failed.
    #[error("failed to load simulation detail: {0}")]
    DetailFetchFailed(String),

    /// Fetching the run history listing failed.
    #[error("failed to load simulation history: {0}")]
    HistoryFetchFailed(String),

    /// A projection asked for a channel the trajectory does not carry.
    #[error("trajectory has no '{0}' channel")]
    UnsupportedAxis(Axis),
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn initial_conditions_message_carries_counts() {
        let err = Error::InvalidInitialConditions {
            expected: 3,
            got: 2,
        };
        let message = format!("{err}");
        assert!(message.contains("exactly 3"));
        assert!(message.contains("got 2"));
    }
}
