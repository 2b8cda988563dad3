//! Capped retry policy shared by session validation and reservation

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RetryPolicy {
    pub(crate) max_attempts: u32,
    pub(crate) initial_delay: Duration,
    pub(crate) multiplier: f64,
    pub(crate) max_delay: Duration,
}

impl RetryPolicy {
    /// Stored cookies are probed 5 times, waiting 1s, 2s, 4s, 8s in between
    pub(crate) const SESSION_VALIDATION: RetryPolicy = RetryPolicy {
        max_attempts: 5,
        initial_delay: Duration::from_secs(1),
        multiplier: 2.0,
        max_delay: Duration::from_secs(30),
    };

    pub(crate) const RESERVATION: RetryPolicy = RetryPolicy {
        max_attempts: 600,
        initial_delay: Duration::from_millis(500),
        multiplier: 1.0,
        max_delay: Duration::from_secs(30),
    };

    /// Attempts actually made; a policy always makes at least one
    pub(crate) fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Start from `delay`, lifting the cap so it is never below `delay`
    pub(crate) fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self.max_delay = self.max_delay.max(delay);
        self
    }

    /// Delay to wait after failed attempt `attempt` (1-based)
    pub(crate) fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        let factor = self.multiplier.max(0.0).powi(exponent);
        let secs = self.initial_delay.as_secs_f64() * factor;
        if !secs.is_finite() || secs >= self.max_delay.as_secs_f64() {
            return self.max_delay;
        }
        Duration::from_secs_f64(secs)
    }

    /// Run `op` until it yields `Some`, sleeping between attempts. Returns
    /// the value and the attempt number it succeeded on.
    pub(crate) fn run<T, F>(&self, mut op: F) -> Option<(T, u32)>
    where
        F: FnMut(u32) -> Option<T>,
    {
        let attempts = self.attempts();
        for attempt in 1..=attempts {
            if let Some(value) = op(attempt) {
                return Some((value, attempt));
            }
            if attempt < attempts {
                std::thread::sleep(self.delay_after(attempt));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            initial_delay: Duration::ZERO,
            multiplier: 1.0,
            max_delay: Duration::ZERO,
        }
    }

    #[test]
    fn session_validation_doubles_from_one_second() {
        let p = RetryPolicy::SESSION_VALIDATION;
        let delays: Vec<u64> = (1..p.attempts()).map(|n| p.delay_after(n).as_secs()).collect();
        assert_eq!(delays, vec![1, 2, 4, 8]);
    }

    #[test]
    fn reservation_delay_is_fixed() {
        let p = RetryPolicy::RESERVATION;
        assert_eq!(p.delay_after(1), Duration::from_millis(500));
        assert_eq!(p.delay_after(400), Duration::from_millis(500));
    }

    #[test]
    fn delay_is_capped() {
        let p = RetryPolicy {
            max_attempts: 100,
            initial_delay: Duration::from_secs(1),
            multiplier: 2.0,
            max_delay: Duration::from_secs(10),
        };
        assert_eq!(p.delay_after(4), Duration::from_secs(8));
        assert_eq!(p.delay_after(5), Duration::from_secs(10));
        assert_eq!(p.delay_after(90), Duration::from_secs(10));
    }

    #[test]
    fn initial_delay_above_cap_lifts_cap() {
        let p = RetryPolicy::RESERVATION.with_initial_delay(Duration::from_secs(45));
        assert_eq!(p.max_delay, Duration::from_secs(45));
        assert_eq!(p.delay_after(1), Duration::from_secs(45));
        assert_eq!(p.delay_after(10), Duration::from_secs(45));

        let p = RetryPolicy::RESERVATION.with_initial_delay(Duration::from_millis(100));
        assert_eq!(p.max_delay, Duration::from_secs(30));
        assert_eq!(p.delay_after(1), Duration::from_millis(100));
    }

    #[test]
    fn zero_attempts_still_runs_once() {
        let mut calls = 0;
        let result: Option<((), u32)> = instant(0).run(|_| {
            calls += 1;
            None
        });
        assert!(result.is_none());
        assert_eq!(calls, 1);
    }

    #[test]
    fn run_stops_on_first_success() {
        let mut calls = 0;
        let result = instant(5).run(|attempt| {
            calls += 1;
            (attempt == 3).then_some("ok")
        });
        assert_eq!(result, Some(("ok", 3)));
        assert_eq!(calls, 3);
    }

    #[test]
    fn run_gives_up_after_max_attempts() {
        let mut calls = 0;
        let result: Option<((), u32)> = instant(4).run(|_| {
            calls += 1;
            None
        });
        assert!(result.is_none());
        assert_eq!(calls, 4);
    }
}
