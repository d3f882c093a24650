//! Periodic tick sources with no game knowledge.

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard, PoisonError,
    },
    time::Duration,
};

use async_trait::async_trait;
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::debug;

/// Callback invoked once per tick. Runs synchronously on the tick source.
pub type TickHandler = Arc<dyn Fn() + Send + Sync>;

#[async_trait]
pub trait Scheduler: Send + Sync {
    /// Begins delivering ticks to `on_tick`. Returns `false` without touching the
    /// running activation if one is already active.
    async fn start(&self, on_tick: TickHandler) -> bool;

    /// Stops delivery. Once this returns, no tick of the cancelled activation
    /// will be delivered. Returns `false` if nothing was running.
    async fn cancel(&self) -> bool;

    fn is_running(&self) -> bool;
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct Activation {
    generation: u64,
    task: JoinHandle<()>,
}

/// Real-time tick source driven by `tokio::time::interval`.
///
/// Must be used from within a tokio runtime.
pub struct IntervalScheduler {
    period: Duration,
    generation: Arc<AtomicU64>,
    active: Mutex<Option<Activation>>,
}

impl IntervalScheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            generation: Arc::new(AtomicU64::new(0)),
            active: Mutex::new(None),
        }
    }
}

#[async_trait]
impl Scheduler for IntervalScheduler {
    async fn start(&self, on_tick: TickHandler) -> bool {
        let mut active = lock(&self.active);
        if active
            .as_ref()
            .is_some_and(|activation| !activation.task.is_finished())
        {
            return false;
        }

        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let current = Arc::clone(&self.generation);
        let period = self.period;
        let first = Instant::now() + period;
        let task = tokio::spawn(async move {
            let mut interval = interval_at(first, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if current.load(Ordering::Acquire) != generation {
                    break;
                }
                on_tick();
            }
        });

        debug!(generation, ?period, "tick scheduler started");
        *active = Some(Activation { generation, task });
        true
    }

    async fn cancel(&self) -> bool {
        let Some(activation) = lock(&self.active).take() else {
            return false;
        };

        self.generation.fetch_add(1, Ordering::AcqRel);
        activation.task.abort();
        // The callback is synchronous, so once the task has finished no tick of
        // this activation can still be in flight.
        let _ = activation.task.await;

        debug!(generation = activation.generation, "tick scheduler cancelled");
        true
    }

    fn is_running(&self) -> bool {
        lock(&self.active)
            .as_ref()
            .is_some_and(|activation| !activation.task.is_finished())
    }
}

impl Drop for IntervalScheduler {
    fn drop(&mut self) {
        if let Some(activation) = lock(&self.active).take() {
            activation.task.abort();
        }
    }
}

#[derive(Default)]
struct ManualState {
    handler: Option<TickHandler>,
    activations: u64,
    delivered: u64,
}

/// Virtual clock: ticks are delivered only when [`ManualScheduler::advance`]
/// is called.
#[derive(Default)]
pub struct ManualScheduler {
    state: Mutex<ManualState>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers up to `ticks` ticks, stopping early if the activation is
    /// cancelled in between. Returns how many were delivered.
    ///
    /// Each tick runs under the scheduler lock so `cancel` waits for an
    /// in-flight tick; the handler must not call back into this scheduler.
    pub fn advance(&self, ticks: u64) -> u64 {
        let mut delivered = 0;
        for _ in 0..ticks {
            let mut state = lock(&self.state);
            let Some(handler) = state.handler.clone() else {
                break;
            };
            handler();
            state.delivered += 1;
            delivered += 1;
        }
        delivered
    }

    /// Number of times a new activation was started.
    pub fn activations(&self) -> u64 {
        lock(&self.state).activations
    }

    /// Total ticks delivered across all activations.
    pub fn delivered(&self) -> u64 {
        lock(&self.state).delivered
    }
}

#[async_trait]
impl Scheduler for ManualScheduler {
    async fn start(&self, on_tick: TickHandler) -> bool {
        let mut state = lock(&self.state);
        if state.handler.is_some() {
            return false;
        }
        state.handler = Some(on_tick);
        state.activations += 1;
        true
    }

    async fn cancel(&self) -> bool {
        lock(&self.state).handler.take().is_some()
    }

    fn is_running(&self) -> bool {
        lock(&self.state).handler.is_some()
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
