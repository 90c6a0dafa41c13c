use std::collections::HashMap;
use std::fmt::{Debug, Formatter};

use crate::aggregate::Aggregate;
use crate::event::{Event, EventPayload};

/// Folds one event into the aggregate state, returning the new state.
pub type Handler<A> = fn(<A as Aggregate>::State, &Event<<A as Aggregate>::Event>) -> <A as Aggregate>::State;

/// The explicit mapping from event variant to handler, registered once per aggregate type.
///
/// ```ignore
/// fn handlers() -> Handlers<Self> {
///     Handlers::new()
///         .on("Created", Self::on_created)
///         .on("Deposited", Self::on_deposited)
/// }
/// ```
///
/// Handlers are keyed by the string [`EventPayload::kind`] returns, so the two must agree: a
/// misspelled key only surfaces as a [`crate::error::DispatchError`] when the variant is first
/// recorded or replayed. [`Handlers::unhandled`] checks a sample of every variant up front.
pub struct Handlers<A: Aggregate> {
    inner: HashMap<&'static str, Handler<A>>,
}

impl<A: Aggregate> Handlers<A> {
    #[must_use]
    pub fn new() -> Self {
        Self { inner: HashMap::new() }
    }

    /// Registers the handler for the given variant. `kind` must be the value the variant returns
    /// from [`EventPayload::kind`]. Registering the same variant twice keeps the last handler.
    #[must_use]
    pub fn on(mut self, kind: &'static str, handler: Handler<A>) -> Self {
        self.inner.insert(kind, handler);
        self
    }

    pub fn get(&self, kind: &str) -> Option<Handler<A>> {
        self.inner.get(kind).copied()
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.inner.contains_key(kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.inner.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the kinds of the given payloads that have no registered handler, in input order and
    /// without duplicates. Feed it one payload per variant to catch a key that doesn't match
    /// [`EventPayload::kind`].
    pub fn unhandled<'a, I>(&self, payloads: I) -> Vec<&'static str>
    where
        I: IntoIterator<Item = &'a A::Event>,
        A::Event: 'a,
    {
        let mut missing: Vec<&'static str> = vec![];

        for kind in payloads.into_iter().map(|payload| payload.kind()) {
            if !self.contains(kind) && !missing.contains(&kind) {
                missing.push(kind);
            }
        }

        missing
    }
}

impl<A: Aggregate> Default for Handlers<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Aggregate> Debug for Handlers<A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<&str> = self.kinds().collect();
        kinds.sort_unstable();
        f.debug_struct("Handlers").field("kinds", &kinds).finish()
    }
}
