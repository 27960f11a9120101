//! Throttle for bulk LED writes.
//!
//! The device drops messages when its input buffer overflows, and it never
//! acknowledges writes. After a batch of `n` messages the pacer waits
//! `n / messages_per_ms` milliseconds. That wait is an estimate of how long
//! the device needs to drain the batch; it is not flow control.

use std::time::Duration;

use tracing::trace;

use crate::config::PacerConfig;

#[derive(Debug, Clone, Copy, Default)]
pub struct Pacer {
    config: PacerConfig,
}

impl Pacer {
    pub fn new(config: PacerConfig) -> Self {
        Self { config }
    }

    /// Time to wait after sending `count` messages.
    pub fn delay_for(&self, count: usize) -> Duration {
        let rate = u128::from(self.config.messages_per_ms.max(1));
        let nanos = count as u128 * 1_000_000 / rate;
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }

    /// Sleep for the delay owed after `count` messages.
    pub async fn pace(&self, count: usize) {
        let delay = self.delay_for(count);
        if delay.is_zero() {
            return;
        }
        trace!("Pacing {} messages for {:?}", count, delay);
        tokio::time::sleep(delay).await;
    }
}
