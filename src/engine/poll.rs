use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use crate::config::POLL_INTERVAL;
use crate::engine::channel::{ResultChannel, ResultSender};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Called again before the interval elapsed.
    NotDue,
    /// Nothing in the channel.
    Idle,
    Applied,
    /// Applying the result failed. The loop keeps going.
    Fault(String),
}

/// Fixed-interval, non-blocking consumer of one tab's result channel.
///
/// Owned by the UI thread and driven from the frame loop. At most one message is applied
/// per tick; messages are applied in arrival order, so with two fetches of the same kind
/// in flight the later arrival wins.
pub struct PollLoop<T> {
    channel: ResultChannel<T>,
    interval: Duration,
    last_tick: Option<Instant>,
}

impl<T> Default for PollLoop<T> {
    fn default() -> Self {
        Self::new(POLL_INTERVAL)
    }
}

impl<T> PollLoop<T> {
    pub fn new(interval: Duration) -> Self {
        Self {
            channel: ResultChannel::new(),
            interval,
            last_tick: None,
        }
    }

    /// Producer handle for a fetch about to be spawned. Marks the loop busy until the
    /// result has been taken.
    pub fn dispatch(&mut self) -> ResultSender<T> {
        self.channel.sender()
    }

    pub fn is_busy(&self) -> bool {
        self.channel.pending() > 0
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn tick<F>(&mut self, apply: F) -> TickOutcome
    where
        F: FnOnce(T) -> anyhow::Result<()>,
    {
        self.tick_at(Instant::now(), apply)
    }

    pub fn tick_at<F>(&mut self, now: Instant, apply: F) -> TickOutcome
    where
        F: FnOnce(T) -> anyhow::Result<()>,
    {
        if let Some(last) = self.last_tick {
            if now.saturating_duration_since(last) < self.interval {
                return TickOutcome::NotDue;
            }
        }
        self.last_tick = Some(now);

        let Some(msg) = self.channel.try_take() else {
            return TickOutcome::Idle;
        };

        match panic::catch_unwind(AssertUnwindSafe(|| apply(msg))) {
            Ok(Ok(())) => TickOutcome::Applied,
            Ok(Err(e)) => {
                let reason = format!("{:#}", e);
                log::error!("Poll loop: failed to apply result: {}", reason);
                TickOutcome::Fault(reason)
            }
            Err(payload) => {
                let reason = panic_message(payload.as_ref());
                log::error!("Poll loop: panic while applying result: {}", reason);
                TickOutcome::Fault(reason)
            }
        }
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
