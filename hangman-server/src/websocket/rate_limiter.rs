use std::time::Duration;
use tokio::time::Instant;

/// Token bucket guarding one connection against message floods.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    tokens: u32,
    max_tokens: u32,
    refill_every: Duration,
    last_refill: Instant,
}

impl RateLimiter {
    pub fn new() -> Self {
        // Bursts of 20 messages, one more every 250ms
        Self::with_limits(20, Duration::from_millis(250))
    }

    pub fn with_limits(max_tokens: u32, refill_every: Duration) -> Self {
        Self {
            tokens: max_tokens,
            max_tokens,
            refill_every,
            last_refill: Instant::now(),
        }
    }

    /// Take one token. Returns `false` when the bucket is empty.
    pub fn try_acquire(&mut self) -> bool {
        self.refill();

        if self.tokens > 0 {
            self.tokens -= 1;
            true
        } else {
            false
        }
    }

    pub fn remaining(&mut self) -> u32 {
        self.refill();
        self.tokens
    }

    fn refill(&mut self) {
        let elapsed = self.last_refill.elapsed();
        let earned = (elapsed.as_nanos() / self.refill_every.as_nanos().max(1)) as u32;
        if earned == 0 {
            return;
        }

        self.tokens = self.tokens.saturating_add(earned).min(self.max_tokens);
        self.last_refill += self.refill_every * earned;
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
