//! Wall clock and non-blocking sleeps for the browser event loop.

use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;
use sitegen_core::ports::ClockPort;

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClock;

impl BrowserClock {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait(?Send)]
impl ClockPort for BrowserClock {
    fn now_ms(&self) -> u64 {
        js_sys::Date::now() as u64
    }

    async fn sleep_ms(&self, ms: u64) {
        // setTimeout takes a 32-bit delay
        let ms = u32::try_from(ms).unwrap_or(u32::MAX);
        TimeoutFuture::new(ms).await;
    }
}
