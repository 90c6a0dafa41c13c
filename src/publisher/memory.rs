use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::PublicationError;
use crate::publisher::EventPublisher;
use crate::{Aggregate, Event};

/// Keeps every published event in memory, in publication order.
///
/// Stands in for a real event store: the published events can be fed back to
/// [`crate::AggregateRoot::load`] to rebuild an aggregate.
pub struct InMemoryPublisher<A: Aggregate> {
    events: RwLock<Vec<Event<A::Event>>>,
}

impl<A: Aggregate> InMemoryPublisher<A> {
    pub fn new() -> Self {
        Self {
            events: RwLock::new(vec![]),
        }
    }

    /// Returns a copy of every event published so far.
    pub async fn events(&self) -> Vec<Event<A::Event>> {
        self.events.read().await.clone()
    }

    /// Returns a copy of the events published for a single aggregate instance.
    pub async fn events_for(&self, stream_id: &str) -> Vec<Event<A::Event>> {
        self.events
            .read()
            .await
            .iter()
            .filter(|event| event.stream_id() == stream_id)
            .cloned()
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}

impl<A: Aggregate> Default for InMemoryPublisher<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<A> EventPublisher<A> for InMemoryPublisher<A>
where
    A: Aggregate,
{
    async fn publish(&self, event: &Event<A::Event>) -> Result<(), PublicationError> {
        self.events.write().await.push(event.clone());
        Ok(())
    }
}
