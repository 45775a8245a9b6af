//! Minimum spacing between dispatches to the model endpoint.
//!
//! Only the most recent dispatch time is tracked, so this is a plain
//! cooperative delay rather than a token bucket.

use std::cell::Cell;
use crate::ports::ClockPort;

#[derive(Debug, Clone)]
pub struct Throttle {
    min_spacing_ms: u64,
    last_dispatch_ms: Cell<Option<u64>>,
}

impl Throttle {
    pub fn new(min_spacing_ms: u64) -> Self {
        Self {
            min_spacing_ms,
            last_dispatch_ms: Cell::new(None),
        }
    }

    pub fn min_spacing_ms(&self) -> u64 {
        self.min_spacing_ms
    }

    pub fn last_dispatch_ms(&self) -> Option<u64> {
        self.last_dispatch_ms.get()
    }

    /// How long a dispatch at `now_ms` would have to wait.
    pub fn wait_needed(&self, now_ms: u64) -> u64 {
        match self.last_dispatch_ms.get() {
            Some(last) => {
                let elapsed = now_ms.saturating_sub(last);
                self.min_spacing_ms.saturating_sub(elapsed)
            }
            None => 0,
        }
    }

    /// Suspend until the spacing has elapsed, then record a dispatch.
    /// Returns how long it waited.
    pub async fn acquire(&self, clock: &dyn ClockPort) -> u64 {
        let wait = self.wait_needed(clock.now_ms());
        if wait > 0 {
            log::info!("Request spacing active, waiting {}s", wait.div_ceil(1000));
            clock.sleep_ms(wait).await;
        }
        self.record_dispatch(clock.now_ms());
        wait
    }

    pub fn record_dispatch(&self, at_ms: u64) {
        self.last_dispatch_ms.set(Some(at_ms));
    }

    pub fn reset(&self) {
        self.last_dispatch_ms.set(None);
    }
}
