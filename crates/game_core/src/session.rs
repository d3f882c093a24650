use shared::{
    domain::{is_whole_second, AttemptRecord, StatusSnapshot},
    protocol::CommandOutcome,
};

/// Mutable record of one play session. Owned by the engine and reset in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    elapsed_ticks: u64,
    total_attempts: u32,
    successful_attempts: u32,
    is_paused: bool,
    max_attempts: u32,
}

impl Session {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            elapsed_ticks: 0,
            total_attempts: 0,
            successful_attempts: 0,
            is_paused: true,
            max_attempts,
        }
    }

    pub fn elapsed_ticks(&self) -> u64 {
        self.elapsed_ticks
    }

    pub fn total_attempts(&self) -> u32 {
        self.total_attempts
    }

    pub fn successful_attempts(&self) -> u32 {
        self.successful_attempts
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn is_exhausted(&self) -> bool {
        self.total_attempts >= self.max_attempts
    }

    /// Unpauses the clock unless it is already running or the attempt cap is hit.
    pub fn begin_run(&mut self) -> CommandOutcome {
        if !self.is_paused {
            return CommandOutcome::AlreadyRunning;
        }
        if self.is_exhausted() {
            return CommandOutcome::Exhausted;
        }
        self.is_paused = false;
        CommandOutcome::Applied
    }

    /// Advances the clock by one tick. Returns the new elapsed value, or `None`
    /// when paused.
    pub fn tick(&mut self) -> Option<u64> {
        if self.is_paused {
            return None;
        }
        self.elapsed_ticks += 1;
        Some(self.elapsed_ticks)
    }

    /// Pauses the clock and scores the attempt against the frozen elapsed value.
    pub fn record_stop(&mut self) -> Option<AttemptRecord> {
        if self.is_paused {
            return None;
        }

        let successful = is_whole_second(self.elapsed_ticks);
        self.is_paused = true;
        self.total_attempts += 1;
        if successful {
            self.successful_attempts += 1;
        }
        self.check_invariants();

        Some(AttemptRecord {
            attempt_number: self.total_attempts,
            elapsed_ticks: self.elapsed_ticks,
            successful,
        })
    }

    pub fn clear(&mut self) {
        self.elapsed_ticks = 0;
        self.total_attempts = 0;
        self.successful_attempts = 0;
        self.is_paused = true;
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot::from_counters(
            self.elapsed_ticks,
            self.total_attempts,
            self.successful_attempts,
            self.is_paused,
            self.max_attempts,
        )
    }

    fn check_invariants(&self) {
        assert!(
            self.successful_attempts <= self.total_attempts,
            "successful attempts {} exceed total attempts {}",
            self.successful_attempts,
            self.total_attempts
        );
        assert!(
            self.total_attempts <= self.max_attempts,
            "total attempts {} exceed cap {}",
            self.total_attempts,
            self.max_attempts
        );
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
