use shared::{
    clock::{format_clock, format_score},
    domain::{AttemptRecord, EngineState, StatusSnapshot},
    protocol::{GameEvent, ResetCause},
};

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    pub json: bool,
    pub follow_ticks: bool,
}

impl Renderer {
    pub fn status(&self, snapshot: &StatusSnapshot) -> String {
        if self.json {
            return serde_json::to_string(snapshot).unwrap_or_default();
        }
        render_status(snapshot)
    }

    /// Line to print for an engine event, if any.
    pub fn event(&self, event: &GameEvent) -> Option<String> {
        if self.json {
            if matches!(event, GameEvent::Ticked { .. }) && !self.follow_ticks {
                return None;
            }
            return serde_json::to_string(event).ok();
        }

        match event {
            GameEvent::Started => Some("running...".to_string()),
            GameEvent::Ticked { elapsed_ticks } => {
                self.follow_ticks.then(|| format_clock(*elapsed_ticks))
            }
            GameEvent::Stopped(record) => Some(render_attempt(record)),
            GameEvent::Exhausted(snapshot) => Some(format!(
                "out of attempts: final score {} ({:.1}%)",
                format_score(snapshot.successful_attempts, snapshot.total_attempts),
                snapshot.accuracy_percent
            )),
            GameEvent::Reset { cause } => Some(match cause {
                ResetCause::Manual => "reset".to_string(),
                ResetCause::Auto => "new round".to_string(),
            }),
        }
    }
}

pub fn render_status(snapshot: &StatusSnapshot) -> String {
    let state = match snapshot.state {
        EngineState::Idle => "idle",
        EngineState::Running => "running",
        EngineState::Exhausted => "exhausted",
    };
    format!(
        "{}  score {}  accuracy {:.1}%  remaining {}  [{state}]",
        format_clock(snapshot.elapsed_ticks),
        format_score(snapshot.successful_attempts, snapshot.total_attempts),
        snapshot.accuracy_percent,
        snapshot.attempts_remaining,
    )
}

fn render_attempt(record: &AttemptRecord) -> String {
    let verdict = if record.successful { "hit" } else { "miss" };
    format!(
        "attempt {}: {} {verdict}",
        record.attempt_number,
        format_clock(record.elapsed_ticks)
    )
}
