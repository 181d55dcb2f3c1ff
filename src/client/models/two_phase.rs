use crate::client::services::api_client::ApiError;

/// Result of two dependent writes with no rollback between them.
#[derive(Debug, Clone, PartialEq)]
pub enum TwoPhaseOutcome<A, B> {
    Completed { first: A, second: B },
    /// Nothing was written.
    FirstFailed(ApiError),
    /// The first write persisted; only the second step needs retrying.
    SecondFailed { first: A, error: ApiError },
}

impl<A, B> TwoPhaseOutcome<A, B> {
    pub fn is_complete(&self) -> bool {
        matches!(self, TwoPhaseOutcome::Completed { .. })
    }

    /// The persisted first write, if any.
    pub fn first(&self) -> Option<&A> {
        match self {
            TwoPhaseOutcome::Completed { first, .. } | TwoPhaseOutcome::SecondFailed { first, .. } => Some(first),
            TwoPhaseOutcome::FirstFailed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            TwoPhaseOutcome::Completed { .. } => None,
            TwoPhaseOutcome::FirstFailed(error) | TwoPhaseOutcome::SecondFailed { error, .. } => Some(error),
        }
    }

    /// One-line summary for the logger bar.
    pub fn summary(&self, done: &str) -> String {
        match self {
            TwoPhaseOutcome::Completed { .. } => done.to_string(),
            TwoPhaseOutcome::FirstFailed(e) => format!("Could not save event: {}", e),
            TwoPhaseOutcome::SecondFailed { error, .. } => {
                format!("Event saved but could not be linked: {}", error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_failure_keeps_first_write() {
        let outcome: TwoPhaseOutcome<i64, ()> = TwoPhaseOutcome::SecondFailed {
            first: 7,
            error: ApiError::Status { status: 500, body: String::new() },
        };
        assert!(!outcome.is_complete());
        assert_eq!(outcome.first(), Some(&7));
        assert_eq!(outcome.summary("Added"), "Event saved but could not be linked: backend error: 500");
    }

    #[test]
    fn first_failure_has_nothing_persisted() {
        let outcome: TwoPhaseOutcome<i64, ()> = TwoPhaseOutcome::FirstFailed(ApiError::NotAuthenticated);
        assert_eq!(outcome.first(), None);
        assert_eq!(outcome.error(), Some(&ApiError::NotAuthenticated));
    }
}
