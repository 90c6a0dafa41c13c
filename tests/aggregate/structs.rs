use serde::{Deserialize, Serialize};

use traya::EventPayload;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub enum TestEvent {
    Added { add: i32 },
    Reset,
    /// Never registered in the handler table.
    Unhandled,
}

impl EventPayload for TestEvent {
    fn kind(&self) -> &'static str {
        match self {
            Self::Added { .. } => "Added",
            Self::Reset => "Reset",
            Self::Unhandled => "Unhandled",
        }
    }
}
