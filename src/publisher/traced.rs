use async_trait::async_trait;

use crate::error::PublicationError;
use crate::publisher::EventPublisher;
use crate::{Aggregate, Event};

/// Wraps another publisher and logs every publication through `tracing`.
///
/// Results of the inner publisher are returned unchanged.
pub struct TracingPublisher<P> {
    inner: P,
}

impl<P> TracingPublisher<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn into_inner(self) -> P {
        self.inner
    }
}

#[async_trait]
impl<A, P> EventPublisher<A> for TracingPublisher<P>
where
    A: Aggregate,
    P: EventPublisher<A>,
{
    async fn publish(&self, event: &Event<A::Event>) -> Result<(), PublicationError> {
        let result = EventPublisher::<A>::publish(&self.inner, event).await;

        match &result {
            Ok(()) => tracing::info!({
                aggregate = A::NAME,
                event_id = %event.id(),
                stream_id = event.stream_id(),
                kind = event.kind(),
                version = ?event.version(),
            }, "event published"),
            Err(error) => tracing::error!({
                aggregate = A::NAME,
                event_id = %event.id(),
                stream_id = event.stream_id(),
                kind = event.kind(),
                error = ?error,
            }, "event publication failed"),
        }

        result
    }
}
