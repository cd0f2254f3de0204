//! Retry loop: run an attempt until success or the policy says stop.

use crate::transfer::TransferError;

use super::policy::{RetryDecision, RetryPolicy};

/// Runs `attempt` until it succeeds or the policy exhausts its attempts.
/// On a retryable failure, sleeps for the policy delay then tries again.
/// The closure is expected to re-derive any resume state itself.
pub fn run_with_retry<T, F>(policy: &RetryPolicy, name: &str, mut attempt: F) -> Result<T, TransferError>
where
    F: FnMut() -> Result<T, TransferError>,
{
    let mut attempt_no = 1u32;
    loop {
        match attempt() {
            Ok(v) => return Ok(v),
            Err(e) => match policy.decide(attempt_no) {
                RetryDecision::NoRetry => {
                    tracing::warn!(
                        file = %name,
                        attempts = attempt_no,
                        "giving up after {} attempt(s): {}",
                        attempt_no,
                        e
                    );
                    return Err(e);
                }
                RetryDecision::RetryAfter(delay) => {
                    tracing::warn!(
                        file = %name,
                        attempt = attempt_no,
                        max = policy.max_attempts,
                        "attempt failed ({}), retrying in {:?}",
                        e,
                        delay
                    );
                    std::thread::sleep(delay);
                    attempt_no += 1;
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            delay: Duration::from_millis(0),
        }
    }

    #[test]
    fn stops_after_exactly_max_attempts() {
        let mut calls = 0u32;
        let result: Result<(), _> = run_with_retry(&fast_policy(5), "f.bin", || {
            calls += 1;
            Err(TransferError::Http(500))
        });
        assert!(result.is_err());
        assert_eq!(calls, 5);
    }

    #[test]
    fn succeeds_midway_without_further_attempts() {
        let mut calls = 0u32;
        let result = run_with_retry(&fast_policy(5), "f.bin", || {
            calls += 1;
            if calls < 3 {
                Err(TransferError::Http(503))
            } else {
                Ok(calls)
            }
        });
        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls, 3);
    }

    #[test]
    fn first_try_success_means_one_call() {
        let mut calls = 0u32;
        let result = run_with_retry(&fast_policy(5), "f.bin", || {
            calls += 1;
            Ok(())
        });
        assert!(result.is_ok());
        assert_eq!(calls, 1);
    }
}
