use serde::{Deserialize, Serialize};

/// Logical ticks in one nominal second. One tick is a tenth of a second.
pub const TICKS_PER_SECOND: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    Idle,
    Running,
    Exhausted,
}

/// Result of a single start→stop cycle, captured at the instant of the stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub attempt_number: u32,
    pub elapsed_ticks: u64,
    pub successful: bool,
}

/// Copy of the session taken under the engine lock. Never a live view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub elapsed_ticks: u64,
    pub total_attempts: u32,
    pub successful_attempts: u32,
    pub accuracy_percent: f64,
    pub is_paused: bool,
    pub attempts_remaining: u32,
    pub max_attempts: u32,
    pub state: EngineState,
}

impl StatusSnapshot {
    pub fn from_counters(
        elapsed_ticks: u64,
        total_attempts: u32,
        successful_attempts: u32,
        is_paused: bool,
        max_attempts: u32,
    ) -> Self {
        let state = if !is_paused {
            EngineState::Running
        } else if total_attempts >= max_attempts {
            EngineState::Exhausted
        } else {
            EngineState::Idle
        };

        Self {
            elapsed_ticks,
            total_attempts,
            successful_attempts,
            accuracy_percent: accuracy_percent(successful_attempts, total_attempts),
            is_paused,
            attempts_remaining: max_attempts.saturating_sub(total_attempts),
            max_attempts,
            state,
        }
    }
}

/// Whole-second landing: the tenths digit is zero at the moment of the stop.
pub fn is_whole_second(elapsed_ticks: u64) -> bool {
    elapsed_ticks % TICKS_PER_SECOND == 0
}

pub fn accuracy_percent(successful_attempts: u32, total_attempts: u32) -> f64 {
    if total_attempts == 0 {
        return 0.0;
    }
    f64::from(successful_attempts) / f64::from(total_attempts) * 100.0
}
