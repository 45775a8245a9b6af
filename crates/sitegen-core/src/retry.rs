//! Generic "retry on predicate" combinator driven by a `RetryPolicy`.
//!
//! The combinator knows nothing about the transport: the caller supplies the
//! operation, the predicate deciding which failures are transient, and an
//! observer notified before every backoff sleep.

use std::future::Future;
use sitegen_types::{Result, SitegenError, config::RetryPolicy};
use crate::ports::ClockPort;

/// Run `op` until it succeeds, fails with a non-retryable error, or the
/// policy's attempt budget is spent.
///
/// `op` receives the 1-based attempt number. `on_retry(attempt, delay_ms)` is
/// called after a retryable failure, before sleeping.
/// Exhausting the budget yields `SitegenError::RetriesExhausted`.
pub async fn retry_on<T, Op, Fut, P, W>(
    policy: &RetryPolicy,
    clock: &dyn ClockPort,
    mut op: Op,
    should_retry: P,
    mut on_retry: W,
) -> Result<T>
where
    Op: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T>>,
    P: Fn(&SitegenError) -> bool,
    W: FnMut(u32, u64),
{
    let mut attempt = 1;
    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) if should_retry(&e) => {
                log::warn!("Attempt {}/{} failed: {}", attempt, policy.max_attempts, e);
                if !policy.allows_retry(attempt) {
                    return Err(SitegenError::RetriesExhausted { attempts: attempt });
                }
                let delay = policy.delay_for(attempt);
                on_retry(attempt, delay);
                clock.sleep_ms(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
