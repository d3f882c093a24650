//! Text rendering of elapsed ticks and score, as shown on the stopwatch face.

use crate::domain::TICKS_PER_SECOND;

/// Formats tenths of a second as `A:BC.D`.
pub fn format_clock(ticks: u64) -> String {
    let tenths = ticks % TICKS_PER_SECOND;
    let total_seconds = ticks / TICKS_PER_SECOND;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes}:{seconds:02}.{tenths}")
}

pub fn format_score(successful_attempts: u32, total_attempts: u32) -> String {
    format!("{successful_attempts}/{total_attempts}")
}
