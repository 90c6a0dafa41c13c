use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use traya::EventPayload;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BankAccountEvent {
    Created,
    Deposited { date: DateTime<Utc>, amount: i64 },
    Withdrew { date: DateTime<Utc>, amount: i64 },
}

impl BankAccountEvent {
    /// One payload of each variant.
    pub fn samples() -> Vec<Self> {
        let date: DateTime<Utc> = Utc::now();
        vec![
            Self::Created,
            Self::Deposited { date, amount: 0 },
            Self::Withdrew { date, amount: 0 },
        ]
    }
}

impl EventPayload for BankAccountEvent {
    fn kind(&self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Deposited { .. } => "Deposited",
            Self::Withdrew { .. } => "Withdrew",
        }
    }
}
