use std::borrow::Borrow;
use std::fmt::{Debug, Formatter};

use crate::dispatch::{Handler, Handlers};
use crate::error::DispatchError;
use crate::event::{Event, EventPayload};
use crate::types::SequenceNumber;

/// The Aggregate trait describes a consistency boundary: the state it derives from its events and
/// the handlers folding each event variant into that state.
///
/// It carries no behaviour of its own; [`AggregateRoot`] owns the event buffer and drives the
/// handlers. Domain operations are usually written on top of an `AggregateRoot<Self>`, validating
/// their input against the current state before recording any event.
pub trait Aggregate: Sized {
    /// Unique name of the aggregate type, used in errors and logs.
    const NAME: &'static str;

    /// Internal aggregate state. A freshly created aggregate holds `State::default()`.
    type State: Default + Clone + Debug + Send + Sync;

    /// The variants this aggregate emits.
    type Event: EventPayload + Send + Sync;

    /// Returns the handler table of this aggregate. Every variant the aggregate is expected to
    /// replay must be registered here.
    fn handlers() -> Handlers<Self>;
}

/// Generic root of an aggregate instance.
///
/// Holds the events recorded but not yet committed, in recording order, alongside the state derived
/// from every event ever recorded or loaded.
pub struct AggregateRoot<A: Aggregate> {
    uncommitted: Vec<Event<A::Event>>,
    state: A::State,
    version: SequenceNumber,
    handlers: Handlers<A>,
}

impl<A: Aggregate> AggregateRoot<A> {
    pub fn new() -> Self {
        Self {
            uncommitted: vec![],
            state: A::State::default(),
            version: 0,
            handlers: A::handlers(),
        }
    }

    /// Builds a new aggregate instance by replaying the given history.
    pub fn from_history<I, E>(events: I) -> Result<Self, DispatchError>
    where
        I: IntoIterator<Item = E>,
        E: Borrow<Event<A::Event>>,
    {
        let mut root = Self::new();
        root.load(events)?;
        Ok(root)
    }

    pub fn state(&self) -> &A::State {
        &self.state
    }

    pub fn into_state(self) -> A::State {
        self.state
    }

    /// Sequence number of the last applied event, `0` if none.
    pub const fn version(&self) -> SequenceNumber {
        self.version
    }

    /// Sequence number the next recorded event is expected to carry, `None` once the version space
    /// is exhausted.
    pub const fn next_version(&self) -> Option<SequenceNumber> {
        self.version.checked_add(1)
    }

    /// Records a new fact: the event is applied to the state straight away and kept in the
    /// uncommitted buffer until the next [`AggregateRoot::pop`].
    ///
    /// An event without a registered handler, or one that would overflow the aggregate version, is
    /// rejected and never enters the buffer.
    pub fn record(&mut self, event: Event<A::Event>) -> Result<(), DispatchError> {
        let handler: Handler<A> = self.handler(&event)?;
        let version: SequenceNumber = self.advance(self.version, &event)?;
        self.fold(handler, version, &event);
        self.uncommitted.push(event);
        Ok(())
    }

    /// Returns the events recorded since the last [`AggregateRoot::pop`], in recording order.
    pub fn uncommitted_events(&self) -> &[Event<A::Event>] {
        &self.uncommitted
    }

    /// Takes every uncommitted event out of the aggregate, leaving the buffer empty.
    #[must_use = "popped events are no longer held by the aggregate"]
    pub fn pop(&mut self) -> Vec<Event<A::Event>> {
        std::mem::take(&mut self.uncommitted)
    }

    /// Replays previously persisted events, in the given order, without buffering them.
    ///
    /// Handlers and versions for the whole history are resolved before anything is applied: if one
    /// of the events can't be dispatched the aggregate is left untouched.
    pub fn load<I, E>(&mut self, events: I) -> Result<(), DispatchError>
    where
        I: IntoIterator<Item = E>,
        E: Borrow<Event<A::Event>>,
    {
        let events: Vec<E> = events.into_iter().collect();
        let mut version: SequenceNumber = self.version;
        let mut steps: Vec<(Handler<A>, SequenceNumber)> = Vec::with_capacity(events.len());

        for event in &events {
            let event: &Event<A::Event> = event.borrow();
            let handler: Handler<A> = self.handler(event)?;
            version = self.advance(version, event)?;
            steps.push((handler, version));
        }

        for (event, (handler, version)) in events.iter().zip(steps) {
            self.fold(handler, version, event.borrow());
        }

        Ok(())
    }

    /// Applies a single event to the state without buffering it.
    pub fn apply(&mut self, event: &Event<A::Event>) -> Result<(), DispatchError> {
        let handler: Handler<A> = self.handler(event)?;
        let version: SequenceNumber = self.advance(self.version, event)?;
        self.fold(handler, version, event);
        Ok(())
    }

    fn handler(&self, event: &Event<A::Event>) -> Result<Handler<A>, DispatchError> {
        self.handlers.get(event.kind()).ok_or_else(|| {
            tracing::debug!(aggregate = A::NAME, kind = event.kind(), "no handler registered for event");
            DispatchError::new(A::NAME, event.kind())
        })
    }

    /// Version reached once `event` is applied on top of `current`.
    fn advance(&self, current: SequenceNumber, event: &Event<A::Event>) -> Result<SequenceNumber, DispatchError> {
        match event.version() {
            Some(version) if version > current => Ok(version),
            _ => current.checked_add(1).ok_or_else(|| {
                tracing::debug!(aggregate = A::NAME, stream_id = event.stream_id(), "aggregate version overflow");
                DispatchError::VersionOverflow {
                    aggregate: A::NAME,
                    stream_id: event.stream_id().to_string(),
                }
            }),
        }
    }

    fn fold(&mut self, handler: Handler<A>, version: SequenceNumber, event: &Event<A::Event>) {
        let state: A::State = std::mem::take(&mut self.state);
        self.state = handler(state, event);
        self.version = version;

        tracing::trace!(
            aggregate = A::NAME,
            stream_id = event.stream_id(),
            kind = event.kind(),
            version = self.version,
            "event applied"
        );
    }
}

impl<A: Aggregate> Default for AggregateRoot<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Aggregate> Debug for AggregateRoot<A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AggregateRoot")
            .field("aggregate", &A::NAME)
            .field("version", &self.version)
            .field("state", &self.state)
            .field("uncommitted", &self.uncommitted)
            .finish()
    }
}
