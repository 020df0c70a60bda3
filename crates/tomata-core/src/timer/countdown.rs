//! Blocking second-resolution countdown.
//!
//! The countdown suspends the calling thread for its whole duration. The
//! remaining time is recomputed each tick from a fixed end instant, so
//! processing delay between ticks never accumulates drift. An external
//! [`CancelToken`] aborts the run, observable within one tick boundary.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Shared cancellation flag, trippable from a signal handler or another
/// thread.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Clear the flag so the token can arm the next countdown.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Terminal outcome of one countdown run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownStatus {
    Completed,
    Aborted,
}

/// Cancellable countdown over wall-clock time.
#[derive(Debug, Clone)]
pub struct Countdown {
    cancel: CancelToken,
}

impl Countdown {
    pub fn new(cancel: CancelToken) -> Self {
        Self { cancel }
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Run a countdown of `duration`, invoking `on_tick` with the whole
    /// seconds remaining once per elapsed second.
    ///
    /// For a duration of D whole seconds the emitted values are exactly
    /// D-1 down to 0, strictly decreasing. Cancellation returns
    /// [`CountdownStatus::Aborted`] without further emissions; a tick
    /// callback error propagates immediately.
    pub fn run<F>(&self, duration: Duration, mut on_tick: F) -> Result<CountdownStatus, CoreError>
    where
        F: FnMut(u64) -> Result<(), CoreError>,
    {
        let end = Instant::now() + duration;
        // Highest value a tick may carry; keeps the emission count at D even
        // when the first iteration lands on the exact start instant.
        let first = (duration.as_secs_f64().ceil().max(1.0) as u64) - 1;
        let mut last_emitted: Option<u64> = None;
        loop {
            if self.cancel.is_cancelled() {
                return Ok(CountdownStatus::Aborted);
            }
            let now = Instant::now();
            if now >= end {
                break;
            }
            let left = end - now;
            let remaining = left.as_secs().min(first);
            if last_emitted.map_or(true, |prev| remaining < prev) {
                on_tick(remaining)?;
                last_emitted = Some(remaining);
            }
            thread::sleep(left.min(Duration::from_secs(1)));
        }
        if last_emitted != Some(0) {
            on_tick(0)?;
        }
        Ok(CountdownStatus::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_collecting(countdown: &Countdown, duration: Duration) -> (Vec<u64>, CountdownStatus) {
        let mut ticks = Vec::new();
        let status = countdown
            .run(duration, |remaining| {
                ticks.push(remaining);
                Ok(())
            })
            .unwrap();
        (ticks, status)
    }

    #[test]
    fn emits_each_second_down_to_zero() {
        let countdown = Countdown::new(CancelToken::new());
        let (ticks, status) = run_collecting(&countdown, Duration::from_secs(2));
        assert_eq!(status, CountdownStatus::Completed);
        assert_eq!(ticks, vec![1, 0]);
    }

    #[test]
    fn subsecond_duration_still_reaches_zero() {
        let countdown = Countdown::new(CancelToken::new());
        let (ticks, status) = run_collecting(&countdown, Duration::from_millis(200));
        assert_eq!(status, CountdownStatus::Completed);
        assert_eq!(ticks, vec![0]);
    }

    #[test]
    fn pre_cancelled_token_aborts_without_ticks() {
        let token = CancelToken::new();
        token.cancel();
        let countdown = Countdown::new(token);
        let mut ticks = 0;
        let status = countdown
            .run(Duration::from_secs(5), |_| {
                ticks += 1;
                Ok(())
            })
            .unwrap();
        assert_eq!(status, CountdownStatus::Aborted);
        assert_eq!(ticks, 0);
    }

    #[test]
    fn cancel_mid_flight_aborts_within_one_tick() {
        let token = CancelToken::new();
        let countdown = Countdown::new(token.clone());
        let canceller = {
            let token = token.clone();
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(150));
                token.cancel();
            })
        };
        let (ticks, status) = run_collecting(&countdown, Duration::from_secs(10));
        canceller.join().unwrap();
        assert_eq!(status, CountdownStatus::Aborted);
        assert_eq!(ticks, vec![9]);
    }

    #[test]
    fn reset_rearms_a_cancelled_token() {
        let token = CancelToken::new();
        token.cancel();
        token.reset();
        let countdown = Countdown::new(token);
        let (_, status) = run_collecting(&countdown, Duration::from_millis(100));
        assert_eq!(status, CountdownStatus::Completed);
    }

    #[test]
    fn tick_error_propagates() {
        let countdown = Countdown::new(CancelToken::new());
        let result = countdown.run(Duration::from_secs(1), |_| {
            Err(CoreError::Io(std::io::Error::other("sink gone")))
        });
        assert!(result.is_err());
    }
}
