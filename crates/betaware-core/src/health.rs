//! Remote API availability tracking.
//!
//! The availability flag is advisory: a gateway call may read a value that a
//! concurrent probe is about to overwrite.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio::time::{Interval, MissedTickBehavior};

use crate::remote::RemoteApi;

/// Default delay between two health probes
pub const DEFAULT_HEALTH_CHECK_INTERVAL: Duration = Duration::from_secs(30);

const MIN_SCHEDULE_PERIOD: Duration = Duration::from_millis(1);
const MAX_SCHEDULE_PERIOD: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Shared, last-known reachability of the remote API.
#[derive(Debug, Clone)]
pub struct HealthState {
    available: Arc<AtomicBool>,
}

impl HealthState {
    #[must_use]
    pub fn new(available: bool) -> Self {
        Self {
            available: Arc::new(AtomicBool::new(available)),
        }
    }

    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }

    /// Store a new value and return the previous one
    pub fn set_available(&self, available: bool) -> bool {
        self.available.swap(available, Ordering::Relaxed)
    }
}

impl Default for HealthState {
    /// Assume the API is reachable until a probe says otherwise
    fn default() -> Self {
        Self::new(true)
    }
}

/// Drives periodic work; return `false` from `tick` to stop.
#[async_trait]
pub trait Schedule: Send {
    async fn tick(&mut self) -> bool;
}

/// Fixed-period schedule backed by a tokio interval.
pub struct IntervalSchedule {
    interval: Interval,
}

impl IntervalSchedule {
    /// First tick fires one full `period` from now. The period is clamped to
    /// between one millisecond and one year.
    #[must_use]
    pub fn every(period: Duration) -> Self {
        let period = period.clamp(MIN_SCHEDULE_PERIOD, MAX_SCHEDULE_PERIOD);
        let now = tokio::time::Instant::now();
        let start = now.checked_add(period).unwrap_or(now);
        let mut interval = tokio::time::interval_at(start, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }
}

#[async_trait]
impl Schedule for IntervalSchedule {
    async fn tick(&mut self) -> bool {
        self.interval.tick().await;
        true
    }
}

/// Probes `GET /health` and records the result in a [`HealthState`].
pub struct HealthMonitor<R> {
    remote: R,
    state: HealthState,
}

impl<R: RemoteApi> HealthMonitor<R> {
    pub const fn new(remote: R, state: HealthState) -> Self {
        Self { remote, state }
    }

    pub const fn state(&self) -> &HealthState {
        &self.state
    }

    /// Probe once and update the flag; any error counts as unavailable.
    pub async fn check_now(&self) -> bool {
        let available = match self.remote.health().await {
            Ok(()) => true,
            Err(error) => {
                tracing::debug!("Health probe failed: {}", error);
                false
            }
        };

        let previous = self.state.set_available(available);
        if previous != available {
            if available {
                tracing::info!("Remote API is reachable again");
            } else {
                tracing::info!("Remote API is unreachable, switching to the local mirror");
            }
        }
        available
    }

    /// Probe on every tick until the schedule stops.
    pub async fn run<T: Schedule>(self, mut schedule: T) {
        while schedule.tick().await {
            self.check_now().await;
        }
        tracing::debug!("Health monitor stopped");
    }
}

impl<R: RemoteApi + 'static> HealthMonitor<R> {
    /// Run the monitor on a background tokio task.
    pub fn spawn<T: Schedule + 'static>(self, schedule: T) -> JoinHandle<()> {
        tokio::spawn(self.run(schedule))
    }
}
