//! Service and session error types.
//!
//! `ServiceError` represents failures from the quiz backend. It is defined
//! in `quizmate-core` so the session controller can classify failures for
//! navigation-vs-retry decisions without string matching.

use thiserror::Error;

/// Errors that can occur when talking to the quiz backend.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The backend rejected the request as malformed (HTTP 400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The quiz does not exist or belongs to another learner (HTTP 404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Authentication failed (invalid or expired token).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The backend returned an unexpected error response.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("transport error: {0}")]
    Transport(String),
}

impl ServiceError {
    /// Returns `true` if retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ServiceError::Timeout(_) | ServiceError::Transport(_))
    }
}

/// Classified outcomes of the quiz-taking session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The quiz descriptor could not be loaded.
    #[error("failed to load quiz: {0}")]
    LoadFailed(#[source] ServiceError),

    /// The backend rejected the submission payload.
    #[error("submission rejected: {0}")]
    SubmissionRejected(String),

    /// The attempt's quiz is unknown or inaccessible.
    #[error("attempt not found: {0}")]
    AttemptNotFound(String),

    /// A transport-level failure; the caller may retry.
    #[error("transport failure: {0}")]
    TransportFailure(#[source] ServiceError),

    /// Results were requested before the quiz was ever submitted.
    #[error("quiz has not been submitted yet")]
    NotYetSubmitted,

    /// An operation was invoked in a state that does not allow it.
    #[error("invalid session state: expected {expected}, was {actual}")]
    InvalidState {
        expected: &'static str,
        actual: &'static str,
    },
}

impl SessionError {
    /// Map a backend failure during submission onto the session taxonomy.
    pub fn classify_submit(err: ServiceError) -> Self {
        match err {
            ServiceError::BadRequest(detail) => SessionError::SubmissionRejected(detail),
            ServiceError::NotFound(detail) => SessionError::AttemptNotFound(detail),
            other => SessionError::TransportFailure(other),
        }
    }

    /// Map a backend failure when fetching stored results.
    pub fn classify_results(err: ServiceError) -> Self {
        match err {
            // The backend answers 400 for a quiz that was never submitted.
            ServiceError::BadRequest(_) => SessionError::NotYetSubmitted,
            ServiceError::NotFound(detail) => SessionError::AttemptNotFound(detail),
            other => SessionError::TransportFailure(other),
        }
    }

    /// Returns `true` if retrying may succeed rather than navigating away.
    pub fn is_retryable(&self) -> bool {
        match self {
            SessionError::LoadFailed(err) | SessionError::TransportFailure(err) => {
                err.is_retryable()
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_failures_classify() {
        let err = SessionError::classify_submit(ServiceError::BadRequest("bad ids".into()));
        assert!(matches!(err, SessionError::SubmissionRejected(_)));

        let err = SessionError::classify_submit(ServiceError::NotFound("quiz 9".into()));
        assert!(matches!(err, SessionError::AttemptNotFound(_)));

        let err = SessionError::classify_submit(ServiceError::Transport("refused".into()));
        assert!(matches!(err, SessionError::TransportFailure(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn results_bad_request_means_not_submitted() {
        let err = SessionError::classify_results(ServiceError::BadRequest("no score".into()));
        assert!(matches!(err, SessionError::NotYetSubmitted));
        assert!(!err.is_retryable());
    }

    #[test]
    fn retryable_is_transport_only() {
        assert!(ServiceError::Timeout(30).is_retryable());
        assert!(ServiceError::Transport("reset".into()).is_retryable());
        assert!(!ServiceError::NotFound("quiz".into()).is_retryable());
        assert!(!ServiceError::AuthenticationFailed("expired".into()).is_retryable());
    }
}
