//! Retry policy: attempt limit and fixed inter-attempt delay.

use std::time::Duration;

use crate::config::ZddConfig;

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Give up on this file for the current pass.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Fixed-delay retry policy. Network, size-mismatch and I/O failures are all
/// treated as transient here; a file that keeps failing is picked up again by
/// the next pass.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,
    /// Pause between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    pub fn from_config(cfg: &ZddConfig) -> Self {
        Self {
            max_attempts: cfg.max_retries,
            delay: cfg.retry_delay(),
        }
    }

    /// Decide what to do after a failed attempt. `attempt` is 1-based.
    pub fn decide(&self, attempt: u32) -> RetryDecision {
        if attempt >= self.max_attempts {
            RetryDecision::NoRetry
        } else {
            RetryDecision::RetryAfter(self.delay)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn respects_max_attempts() {
        let p = RetryPolicy {
            max_attempts: 3,
            delay: Duration::from_millis(1),
        };
        assert!(matches!(p.decide(1), RetryDecision::RetryAfter(_)));
        assert!(matches!(p.decide(2), RetryDecision::RetryAfter(_)));
        assert_eq!(p.decide(3), RetryDecision::NoRetry);
    }

    #[test]
    fn delay_is_fixed() {
        let p = RetryPolicy {
            max_attempts: 10,
            delay: Duration::from_secs(5),
        };
        for attempt in 1..9 {
            assert_eq!(
                p.decide(attempt),
                RetryDecision::RetryAfter(Duration::from_secs(5))
            );
        }
    }

    #[test]
    fn from_config_picks_up_settings() {
        let cfg = ZddConfig {
            max_retries: 7,
            retry_delay_secs: 2,
            ..ZddConfig::default()
        };
        let p = RetryPolicy::from_config(&cfg);
        assert_eq!(p.max_attempts, 7);
        assert_eq!(p.delay, Duration::from_secs(2));
    }
}
