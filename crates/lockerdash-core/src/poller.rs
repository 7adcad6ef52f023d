//! Fixed-interval background refresh.
//!
//! The first tick fires immediately, then one per period for as long as the
//! owner keeps the [`Poller`] alive. There is no jitter and no backoff: a
//! failing tick is simply repeated on schedule. Each tick runs as its own
//! task, so a hung request never delays the next one.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Shortest period a poll loop will run with.
pub const MIN_PERIOD: Duration = Duration::from_secs(1);

/// Handle to a running poll loop. Dropping it stops the loop.
#[derive(Debug)]
pub struct Poller {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl Poller {
    /// Spawn a loop calling `tick` now and then every `period`.
    ///
    /// A zero `period` is raised to [`MIN_PERIOD`].
    pub fn spawn<F, Fut>(period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let period = if period.is_zero() {
            warn!("poll period is zero, using {}ms", MIN_PERIOD.as_millis());
            MIN_PERIOD
        } else {
            period
        };
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    () = token.cancelled() => break,
                    _ = interval.tick() => {
                        tokio::spawn(tick());
                    }
                }
            }
            debug!("poller stopped");
        });
        Self { cancel, handle }
    }

    /// Stop scheduling further ticks. Ticks already running finish on their own.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
