use std::fmt::Debug;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use typed_builder::TypedBuilder;
use uuid::Uuid;

use crate::error::JsonError;
use crate::types::SequenceNumber;

/// Cross-cutting data attached to an event.
pub type Metadata = serde_json::Map<String, Value>;

pub const AGGREGATE_ID_KEY: &str = "_aggregate_id";
pub const AGGREGATE_VERSION_KEY: &str = "_aggregate_version";

/// Implemented by the set of variants an aggregate emits, usually an enum.
///
/// `kind` names the variant and is the key handlers are registered under.
pub trait EventPayload: Clone + Debug {
    fn kind(&self) -> &'static str;
}

/// An `Event` contains the payload (the original, typed, variant) alongside the event's metadata.
///
/// Events are immutable once recorded: every field is private and only exposed through getters.
#[derive(TypedBuilder, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Event<P> {
    /// Uniquely identifies an event among all events emitted from all aggregates.
    #[builder(default = Uuid::new_v4())]
    id: Uuid,
    /// The aggregate instance that emitted the event.
    #[builder(setter(into))]
    stream_id: String,
    /// The sequence number of the event, within its specific aggregate instance.
    #[builder(default, setter(strip_option))]
    version: Option<SequenceNumber>,
    /// The timestamp of when the event was created.
    #[builder(default = Utc::now())]
    occurred_on: DateTime<Utc>,
    /// User supplied metadata. Reserved keys are derived from the other fields, see [`Event::metadata`].
    #[builder(default)]
    metadata: Metadata,
    /// The original, emitted, event.
    payload: P,
}

impl<P> Event<P> {
    pub fn new(stream_id: impl Into<String>, payload: P) -> Self {
        Self {
            id: Uuid::new_v4(),
            stream_id: stream_id.into(),
            version: None,
            occurred_on: Utc::now(),
            metadata: Metadata::new(),
            payload,
        }
    }

    #[must_use]
    pub fn with_version(mut self, version: SequenceNumber) -> Self {
        self.version = Some(version);
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub const fn id(&self) -> Uuid {
        self.id
    }

    pub fn stream_id(&self) -> &str {
        &self.stream_id
    }

    pub const fn version(&self) -> Option<SequenceNumber> {
        self.version
    }

    pub const fn occurred_on(&self) -> DateTime<Utc> {
        self.occurred_on
    }

    pub const fn payload(&self) -> &P {
        &self.payload
    }

    pub fn into_payload(self) -> P {
        self.payload
    }

    /// Returns the event metadata. It always carries the aggregate id and, for versioned events,
    /// the aggregate version; those entries win over user supplied values with the same key.
    pub fn metadata(&self) -> Metadata {
        let mut metadata: Metadata = self.metadata.clone();
        metadata.insert(AGGREGATE_ID_KEY.to_string(), Value::String(self.stream_id.clone()));

        if let Some(version) = self.version {
            metadata.insert(AGGREGATE_VERSION_KEY.to_string(), Value::from(version));
        } else {
            metadata.remove(AGGREGATE_VERSION_KEY);
        }

        metadata
    }
}

impl<P: EventPayload> Event<P> {
    /// The variant discriminator of this event.
    pub fn kind(&self) -> &'static str {
        self.payload.kind()
    }
}

impl<P: Serialize> Event<P> {
    /// Renders the payload as a json map. Payloads which are not serialized as an object end up
    /// under the `value` key.
    pub fn payload_map(&self) -> Result<serde_json::Map<String, Value>, JsonError> {
        Ok(match serde_json::to_value(&self.payload)? {
            Value::Object(map) => map,
            Value::Null => serde_json::Map::new(),
            other => {
                let mut map = serde_json::Map::new();
                map.insert("value".to_string(), other);
                map
            }
        })
    }
}
