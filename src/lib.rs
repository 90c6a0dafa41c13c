//! A minimal event sourcing kernel.
//!
//! An [`Aggregate`] describes a consistency boundary: its state type and the handlers that fold
//! each event variant into that state. An [`AggregateRoot`] records new events, replays persisted
//! ones and hands the uncommitted buffer over to a [`Committer`], which forwards every event to an
//! [`EventPublisher`].

pub use crate::aggregate::{Aggregate, AggregateRoot};
pub use crate::committer::Committer;
pub use crate::dispatch::{Handler, Handlers};
pub use crate::event::{Event, EventPayload, Metadata, AGGREGATE_ID_KEY, AGGREGATE_VERSION_KEY};
pub use crate::publisher::EventPublisher;

mod aggregate;
mod committer;
mod dispatch;
mod event;

pub mod error;
pub mod publisher;

pub mod types {
    pub type SequenceNumber = i32;
}
