//! Result of a single call to the completion service.

/// Outcome of one completion attempt
///
/// Transport and HTTP-level failures are both folded into `Failure`; the
/// adapter picks a synthetic 5xx status when the endpoint never answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// Raw text of the first content item in the reply
    Success(String),
    Failure { status: u16, message: String },
}

impl CompletionOutcome {
    pub fn success(text: impl Into<String>) -> Self {
        CompletionOutcome::Success(text.into())
    }

    pub fn failure(status: u16, message: impl Into<String>) -> Self {
        CompletionOutcome::Failure {
            status,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CompletionOutcome::Success(_))
    }

    /// Whether a repeated attempt could plausibly succeed (rate limiting or
    /// a server-side/transport failure). Client errors are never retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            CompletionOutcome::Success(_) => false,
            CompletionOutcome::Failure { status, .. } => *status == 429 || *status >= 500,
        }
    }
}
