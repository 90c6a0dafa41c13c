use std::ops::Deref;

use async_trait::async_trait;

use crate::error::PublicationError;
use crate::{Aggregate, Event};

#[cfg(feature = "memory")]
pub use memory::InMemoryPublisher;
pub use traced::TracingPublisher;

#[cfg(feature = "memory")]
mod memory;
mod traced;

/// The responsibility of the [`EventPublisher`] trait is to make a single event visible to
/// downstream consumers: an event store, a message broker, a log.
///
/// The publisher owns durability and ordering of what it receives. It is called once per event, in
/// the order the events were recorded.
#[async_trait]
pub trait EventPublisher<A>: Sync
where
    A: Aggregate,
{
    /// Publish an [`Aggregate`] event. The event must be visible to consumers once this returns
    /// `Ok`.
    async fn publish(&self, event: &Event<A::Event>) -> Result<(), PublicationError>;
}

/// Blanket implementation making an [`EventPublisher`] every (smart) pointer to an
/// [`EventPublisher`], e.g. `&Publisher`, `Box<Publisher>`, `Arc<Publisher>`.
#[async_trait]
impl<A, P, T> EventPublisher<A> for T
where
    A: Aggregate,
    P: EventPublisher<A> + ?Sized,
    T: Deref<Target = P> + Sync,
{
    /// Deref call to [`EventPublisher::publish`].
    async fn publish(&self, event: &Event<A::Event>) -> Result<(), PublicationError> {
        EventPublisher::<A>::publish(self.deref(), event).await
    }
}
