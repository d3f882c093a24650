use super::*;

use shared::domain::EngineState;

fn run_attempt(session: &mut Session, ticks: u64) -> AttemptRecord {
    assert_eq!(session.begin_run(), CommandOutcome::Applied);
    for _ in 0..ticks {
        session.tick();
    }
    session.record_stop().expect("session was running")
}

#[test]
fn new_session_is_idle_and_zeroed() {
    let session = Session::new(5);
    let snapshot = session.snapshot();

    assert_eq!(snapshot.elapsed_ticks, 0);
    assert_eq!(snapshot.total_attempts, 0);
    assert_eq!(snapshot.successful_attempts, 0);
    assert!(snapshot.is_paused);
    assert_eq!(snapshot.attempts_remaining, 5);
    assert_eq!(snapshot.state, EngineState::Idle);
}

#[test]
fn tick_is_ignored_while_paused() {
    let mut session = Session::new(5);
    assert_eq!(session.tick(), None);
    assert_eq!(session.elapsed_ticks(), 0);
}

#[test]
fn tick_counts_while_running() {
    let mut session = Session::new(5);
    session.begin_run();
    assert_eq!(session.tick(), Some(1));
    assert_eq!(session.tick(), Some(2));
    assert_eq!(session.snapshot().state, EngineState::Running);
}

#[test]
fn begin_run_twice_reports_already_running() {
    let mut session = Session::new(5);
    assert_eq!(session.begin_run(), CommandOutcome::Applied);
    assert_eq!(session.begin_run(), CommandOutcome::AlreadyRunning);
}

#[test]
fn stop_on_whole_second_scores_success() {
    let mut session = Session::new(5);
    let record = run_attempt(&mut session, 10);

    assert_eq!(
        record,
        AttemptRecord {
            attempt_number: 1,
            elapsed_ticks: 10,
            successful: true,
        }
    );
    assert_eq!(session.successful_attempts(), 1);
    assert_eq!(session.snapshot().accuracy_percent, 100.0);
}

#[test]
fn stop_off_whole_second_scores_miss() {
    let mut session = Session::new(5);
    let record = run_attempt(&mut session, 13);

    assert!(!record.successful);
    assert_eq!(session.total_attempts(), 1);
    assert_eq!(session.successful_attempts(), 0);
    assert_eq!(session.snapshot().accuracy_percent, 0.0);
}

#[test]
fn stop_while_paused_is_noop() {
    let mut session = Session::new(5);
    assert_eq!(session.record_stop(), None);
    run_attempt(&mut session, 3);
    assert_eq!(session.record_stop(), None);
    assert_eq!(session.total_attempts(), 1);
}

#[test]
fn elapsed_carries_across_runs_until_reset() {
    let mut session = Session::new(5);
    run_attempt(&mut session, 7);
    let record = run_attempt(&mut session, 3);

    assert_eq!(record.elapsed_ticks, 10);
    assert!(record.successful);
}

#[test]
fn begin_run_refuses_when_exhausted() {
    let mut session = Session::new(2);
    run_attempt(&mut session, 1);
    run_attempt(&mut session, 1);

    assert!(session.is_exhausted());
    assert_eq!(session.snapshot().state, EngineState::Exhausted);
    assert_eq!(session.begin_run(), CommandOutcome::Exhausted);
    assert!(session.is_paused());
}

#[test]
fn clear_returns_to_initial_state() {
    let mut session = Session::new(3);
    run_attempt(&mut session, 10);
    session.begin_run();
    session.tick();

    session.clear();

    assert_eq!(session, Session::new(3));
}
