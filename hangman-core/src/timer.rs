use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Per-session countdown in whole seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
    running: bool,
    halted: bool,
}

impl Countdown {
    pub fn new(seconds: u32) -> Self {
        Self {
            remaining: seconds,
            running: false,
            halted: false,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
        self.halted = false;
    }

    /// Stop for good; only `start` brings the countdown back.
    pub fn halt(&mut self) {
        self.running = false;
        self.halted = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        if !self.halted {
            self.running = true;
        }
    }

    /// Count down one second. Returns `false` if the countdown is not running.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(1);
        true
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }
}

/// Owns the background task that delivers one tick per period.
///
/// Every tick is stamped with the generation it was started for, so a tick
/// that was already queued when the ticker got cancelled can be recognised
/// and dropped by the receiver.
pub struct TickScheduler {
    period: Duration,
    handle: Option<JoinHandle<()>>,
}

impl TickScheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            handle: None,
        }
    }

    /// Start ticking for `generation`, replacing any running ticker.
    pub fn start<T, F>(&mut self, generation: u64, sender: mpsc::UnboundedSender<T>, make_tick: F)
    where
        T: Send + 'static,
        F: Fn(u64) -> T + Send + 'static,
    {
        self.cancel();

        let period = self.period;
        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if sender.send(make_tick(generation)).is_err() {
                    break;
                }
            }
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
