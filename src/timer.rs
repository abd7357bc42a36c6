//! Tick sources and the background task that drives a session countdown.
//!
//! The controller has no clock of its own. A [`BrewTimer`] shares the
//! controller behind a lock, subscribes it to a [`TickSource`], and publishes a
//! [`SessionUpdate`] after every tick. Dropping the returned
//! [`TickSubscription`] unsubscribes.

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tokio::task::{AbortHandle, JoinHandle};
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::controller::{BrewSessionController, TickOutcome};
use crate::data::SessionSnapshot;
use crate::error::{Error, Result};

/// A source of periodic ticks.
#[async_trait]
pub trait TickSource: Send {
    /// Wait for the next tick. Returns `None` once the source is exhausted.
    async fn next_tick(&mut self) -> Option<()>;
}

/// Ticks on a fixed wall-clock period using `tokio::time::interval`.
pub struct IntervalTickSource {
    interval: Interval,
}

impl IntervalTickSource {
    /// Countdown resolution.
    pub const DEFAULT_PERIOD: Duration = Duration::from_secs(1);

    /// Create a source ticking every `period`, first tick one period from now.
    pub fn new(period: Duration) -> Self {
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        // A stalled runtime should not fire a burst of catch-up ticks.
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }

    /// Create a source ticking once per second.
    pub fn every_second() -> Self {
        Self::new(Self::DEFAULT_PERIOD)
    }
}

#[async_trait]
impl TickSource for IntervalTickSource {
    async fn next_tick(&mut self) -> Option<()> {
        self.interval.tick().await;
        Some(())
    }
}

/// Ticks delivered explicitly through a [`ManualTicker`].
pub struct ManualTickSource {
    rx: mpsc::UnboundedReceiver<()>,
}

/// Sending half of a [`ManualTickSource`].
#[derive(Clone)]
pub struct ManualTicker {
    tx: mpsc::UnboundedSender<()>,
}

impl ManualTicker {
    /// Deliver one tick.
    pub fn tick(&self) -> Result<()> {
        self.tx.send(()).map_err(|_| Error::TickSourceClosed)
    }

    /// Deliver `count` ticks.
    pub fn tick_n(&self, count: u32) -> Result<()> {
        for _ in 0..count {
            self.tick()?;
        }
        Ok(())
    }
}

/// Create a manually driven tick source.
///
/// The source is exhausted once every [`ManualTicker`] has been dropped.
pub fn manual_ticks() -> (ManualTicker, ManualTickSource) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ManualTicker { tx }, ManualTickSource { rx })
}

#[async_trait]
impl TickSource for ManualTickSource {
    async fn next_tick(&mut self) -> Option<()> {
        self.rx.recv().await
    }
}

/// Published after every tick delivered to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUpdate {
    /// Session state after the tick.
    pub snapshot: SessionSnapshot,
    /// What the tick did.
    pub outcome: TickOutcome,
}

/// Handle for an active tick subscription.
///
/// Dropping the handle stops delivery of ticks.
pub struct TickSubscription {
    task: Option<JoinHandle<Result<()>>>,
}

impl TickSubscription {
    /// Check if ticks are still being delivered.
    pub fn is_active(&self) -> bool {
        self.task.as_ref().map(|t| !t.is_finished()).unwrap_or(false)
    }

    /// Stop delivering ticks.
    pub fn cancel(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Wait for the subscription to end on its own.
    ///
    /// Returns [`Error::TickSourceClosed`] when the source ran dry.
    pub async fn join(mut self) -> Result<()> {
        let Some(task) = self.task.take() else {
            return Err(Error::TimerNotRunning);
        };
        match task.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Ok(()),
            Err(e) => Err(Error::Internal(format!("tick task failed: {}", e))),
        }
    }
}

impl Drop for TickSubscription {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Drives a shared [`BrewSessionController`] from a tick source.
///
/// At most one source is attached at a time.
pub struct BrewTimer {
    controller: Arc<RwLock<BrewSessionController>>,
    update_tx: broadcast::Sender<SessionUpdate>,
    active: Mutex<Option<AbortHandle>>,
}

impl BrewTimer {
    /// Create a timer owning `controller`.
    pub fn new(controller: BrewSessionController) -> Self {
        let (update_tx, _) = broadcast::channel(64);
        Self {
            controller: Arc::new(RwLock::new(controller)),
            update_tx,
            active: Mutex::new(None),
        }
    }

    /// Get the shared controller.
    pub fn controller(&self) -> Arc<RwLock<BrewSessionController>> {
        self.controller.clone()
    }

    /// Apply a transition to the controller under the lock.
    pub fn with_controller<R>(&self, f: impl FnOnce(&mut BrewSessionController) -> R) -> R {
        f(&mut self.controller.write())
    }

    /// Get the current session snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.controller.read().snapshot()
    }

    /// Subscribe to per-tick session updates.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionUpdate> {
        self.update_tx.subscribe()
    }

    /// Check if a tick source is currently driving the session.
    pub fn is_attached(&self) -> bool {
        self.active
            .lock()
            .as_ref()
            .map(|task| !task.is_finished())
            .unwrap_or(false)
    }

    /// Stop the attached tick source, if any.
    pub fn detach(&self) {
        if let Some(task) = self.active.lock().take() {
            debug!("Detaching tick source from brew session");
            task.abort();
        }
    }

    /// Start delivering ticks from `source` to the controller.
    ///
    /// Any previously attached source is stopped first, so the countdown is
    /// only ever driven by one source.
    pub fn attach<S>(&self, mut source: S) -> TickSubscription
    where
        S: TickSource + 'static,
    {
        let controller = self.controller.clone();
        let update_tx = self.update_tx.clone();

        let mut active = self.active.lock();
        if let Some(previous) = active.take() {
            debug!("Replacing previously attached tick source");
            previous.abort();
        }

        info!("Attaching tick source to brew session");
        let task = tokio::spawn(async move {
            while source.next_tick().await.is_some() {
                let update = {
                    let mut controller = controller.write();
                    let outcome = controller.tick();
                    SessionUpdate {
                        snapshot: controller.snapshot(),
                        outcome,
                    }
                };
                debug!(
                    "Tick: {} {} remaining",
                    update.snapshot.phase, update.snapshot.time_remaining
                );
                let _ = update_tx.send(update);
            }
            debug!("Tick source exhausted");
            Err(Error::TickSourceClosed)
        });

        *active = Some(task.abort_handle());

        TickSubscription { task: Some(task) }
    }
}

impl Drop for BrewTimer {
    fn drop(&mut self) {
        self.detach();
    }
}

impl Default for BrewTimer {
    fn default() -> Self {
        Self::new(BrewSessionController::new())
    }
}
