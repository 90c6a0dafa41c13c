use thiserror::Error;
use uuid::Uuid;

pub use serde_json::Error as JsonError;

/// Raised when an event can't be folded into an aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// No handler is registered for the event variant. This usually means a malformed history, or a
    /// reader older than the writer of the stream.
    #[error("aggregate `{aggregate}` has no handler for event `{kind}`")]
    MissingHandler { aggregate: &'static str, kind: String },

    /// Applying the event would push the aggregate version past `SequenceNumber::MAX`.
    #[error("aggregate `{aggregate}` version overflow on stream `{stream_id}`")]
    VersionOverflow { aggregate: &'static str, stream_id: String },
}

impl DispatchError {
    pub fn new(aggregate: &'static str, kind: impl Into<String>) -> Self {
        Self::MissingHandler {
            aggregate,
            kind: kind.into(),
        }
    }
}

/// Errors an [`crate::EventPublisher`] can return while publishing a single event.
#[derive(Debug, Error)]
pub enum PublicationError {
    #[error(transparent)]
    Json(#[from] JsonError),

    #[error("event {event_id} rejected: {reason}")]
    Rejected { event_id: Uuid, reason: String },

    #[error("publisher unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}
