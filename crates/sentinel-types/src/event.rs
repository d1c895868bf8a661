use std::fmt;

use serde::{Deserialize, Serialize};

/// Tag distinguishing the synthetic first block from logged security events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// The anchor block created when a ledger is constructed.
    Genesis,
    /// A caller-submitted intrusion record.
    IntrusionLog,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Genesis => "genesis",
            Self::IntrusionLog => "intrusion_log",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
