use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use shared::{
    domain::{AttemptRecord, StatusSnapshot},
    error::ConfigError,
    protocol::{CommandOutcome, GameEvent, ResetCause},
};
use tick_scheduler::{IntervalScheduler, Scheduler, TickHandler};
use tokio::{sync::broadcast, task::JoinHandle};
use tracing::{debug, info};

pub mod config;
mod session;

pub use config::EngineConfig;
pub use session::Session;

const EVENT_CHANNEL_CAPACITY: usize = 256;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Reaction game: stop the clock exactly on a whole second.
///
/// Commands (`start`, `stop`, `reset`) are serialized by an async command lock
/// that is held across scheduler start/cancel. Session counters sit behind a
/// separate short-lived lock shared with the tick callback.
pub struct GameEngine {
    config: EngineConfig,
    scheduler: Arc<dyn Scheduler>,
    session: Mutex<Session>,
    commands: tokio::sync::Mutex<()>,
    pending_reset: Mutex<Option<JoinHandle<()>>>,
    events: broadcast::Sender<GameEvent>,
}

impl GameEngine {
    pub fn new(
        config: EngineConfig,
        scheduler: Arc<dyn Scheduler>,
    ) -> Result<Arc<Self>, ConfigError> {
        config.validate()?;
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Ok(Arc::new(Self {
            config,
            scheduler,
            session: Mutex::new(Session::new(config.max_attempts)),
            commands: tokio::sync::Mutex::new(()),
            pending_reset: Mutex::new(None),
            events,
        }))
    }

    /// Engine ticking in real time at `config.tick_interval_ms`.
    pub fn with_interval_scheduler(config: EngineConfig) -> Result<Arc<Self>, ConfigError> {
        let scheduler = Arc::new(IntervalScheduler::new(config.tick_interval()));
        Self::new(config, scheduler)
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<GameEvent> {
        self.events.subscribe()
    }

    pub fn status(&self) -> StatusSnapshot {
        lock(&self.session).snapshot()
    }

    pub async fn start(self: &Arc<Self>) -> CommandOutcome {
        let _command = self.commands.lock().await;

        let outcome = lock(&self.session).begin_run();
        match outcome {
            CommandOutcome::Applied => {
                self.scheduler.start(self.tick_handler()).await;
                info!("run started");
                let _ = self.events.send(GameEvent::Started);
            }
            CommandOutcome::AlreadyRunning => debug!("start ignored: already running"),
            CommandOutcome::Exhausted => debug!("start ignored: attempts exhausted"),
        }
        outcome
    }

    /// Freezes the clock and scores the attempt. Returns `None` if the clock
    /// was not running.
    pub async fn stop(self: &Arc<Self>) -> Option<AttemptRecord> {
        let _command = self.commands.lock().await;

        // The session is paused before the scheduler is cancelled; a tick still
        // in flight is dropped by the paused session.
        let (record, exhausted) = {
            let mut session = lock(&self.session);
            let record = session.record_stop();
            let exhausted = session.is_exhausted().then(|| session.snapshot());
            (record, exhausted)
        };
        let Some(record) = record else {
            debug!("stop ignored: not running");
            return None;
        };

        info!(
            attempt = record.attempt_number,
            elapsed_ticks = record.elapsed_ticks,
            successful = record.successful,
            "attempt recorded"
        );
        let _ = self.events.send(GameEvent::Stopped(record));

        if let Some(snapshot) = exhausted {
            info!(
                successful = snapshot.successful_attempts,
                total = snapshot.total_attempts,
                accuracy = snapshot.accuracy_percent,
                "attempts exhausted"
            );
            let _ = self.events.send(GameEvent::Exhausted(snapshot));
            self.schedule_auto_reset();
        }

        self.scheduler.cancel().await;
        Some(record)
    }

    pub async fn reset(self: &Arc<Self>) {
        let _command = self.commands.lock().await;

        self.clear_session(ResetCause::Manual);
        let pending = lock(&self.pending_reset).take();
        if let Some(pending) = pending {
            pending.abort();
        }
        self.scheduler.cancel().await;
    }

    /// Advances the clock by one tick. Returns `false` if the tick arrived
    /// while paused and was dropped.
    pub fn tick(&self) -> bool {
        let elapsed = lock(&self.session).tick();
        match elapsed {
            Some(elapsed_ticks) => {
                let _ = self.events.send(GameEvent::Ticked { elapsed_ticks });
                true
            }
            None => {
                debug!("tick dropped: session is paused");
                false
            }
        }
    }

    fn tick_handler(self: &Arc<Self>) -> TickHandler {
        let engine: Weak<Self> = Arc::downgrade(self);
        Arc::new(move || {
            if let Some(engine) = engine.upgrade() {
                engine.tick();
            }
        })
    }

    /// Caller must hold the command lock.
    fn schedule_auto_reset(self: &Arc<Self>) {
        let delay = self.config.auto_reset_delay();
        if delay.is_zero() {
            self.clear_session(ResetCause::Auto);
            return;
        }

        let engine = Arc::downgrade(self);
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(engine) = engine.upgrade() {
                engine.finish_auto_reset().await;
            }
        });
        debug!(?delay, "auto reset scheduled");

        if let Some(previous) = lock(&self.pending_reset).replace(task) {
            previous.abort();
        }
    }

    async fn finish_auto_reset(&self) {
        let _command = self.commands.lock().await;

        lock(&self.pending_reset).take();
        let exhausted = lock(&self.session).is_exhausted();
        if !exhausted {
            debug!("auto reset skipped: session no longer exhausted");
            return;
        }
        self.clear_session(ResetCause::Auto);
    }

    fn clear_session(&self, cause: ResetCause) {
        lock(&self.session).clear();
        info!(?cause, "session reset");
        let _ = self.events.send(GameEvent::Reset { cause });
    }
}

impl Drop for GameEngine {
    fn drop(&mut self) {
        if let Some(pending) = lock(&self.pending_reset).take() {
            pending.abort();
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
