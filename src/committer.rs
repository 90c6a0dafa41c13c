use crate::error::PublicationError;
use crate::publisher::EventPublisher;
use crate::{Aggregate, AggregateRoot, Event};

/// The Committer is responsible for handing the events an aggregate recorded over to a publisher.
///
/// It holds nothing but the publisher it is built with; any [`EventPublisher`] can be injected,
/// including shared ones such as `&Publisher` or `Arc<Publisher>`.
pub struct Committer<P> {
    publisher: P,
}

impl<P> Committer<P> {
    /// Creates a new instance of a [`Committer`].
    pub fn new(publisher: P) -> Self {
        Self { publisher }
    }

    /// Returns the configured publisher.
    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    pub fn into_inner(self) -> P {
        self.publisher
    }

    /// Drains the uncommitted events of the aggregate and publishes them one at a time, in the order
    /// they were recorded. Returns how many events were published.
    ///
    /// The first publication error is returned as is. Events published before it stay published;
    /// the failing event and the ones after it are dropped, since the aggregate buffer has already
    /// been emptied. Retrying is up to the caller.
    #[tracing::instrument(skip_all, fields(aggregate = A::NAME, events = tracing::field::Empty), err)]
    pub async fn commit<A>(&self, aggregate_root: &mut AggregateRoot<A>) -> Result<usize, PublicationError>
    where
        A: Aggregate,
        P: EventPublisher<A>,
    {
        let events: Vec<Event<A::Event>> = aggregate_root.pop();
        tracing::Span::current().record("events", events.len());

        for (published, event) in events.iter().enumerate() {
            if let Err(error) = EventPublisher::<A>::publish(&self.publisher, event).await {
                tracing::warn!({
                    event_id = %event.id(),
                    stream_id = event.stream_id(),
                    published = published,
                    dropped = events.len() - published,
                }, "commit interrupted by a publication failure");

                return Err(error);
            }

            tracing::debug!({
                event_id = %event.id(),
                stream_id = event.stream_id(),
                kind = event.kind(),
            }, "event committed");
        }

        Ok(events.len())
    }
}
