use serde::{Deserialize, Serialize};

use crate::domain::{AttemptRecord, StatusSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetCause {
    Manual,
    Auto,
}

/// What a `start` command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandOutcome {
    Applied,
    AlreadyRunning,
    Exhausted,
}

/// Notifications published by the engine for presentation adapters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum GameEvent {
    Started,
    Ticked { elapsed_ticks: u64 },
    Stopped(AttemptRecord),
    Exhausted(StatusSnapshot),
    Reset { cause: ResetCause },
}
