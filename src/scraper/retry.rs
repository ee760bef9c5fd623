//! Bounded polling with a wall-clock deadline.
//!
//! The retrieval loop repeats one action (look up the locator element on
//! the current page) until it succeeds, a transient failure predicate stops
//! holding, or the deadline passes. There is deliberately no backoff: the
//! poll interval stays constant so per-link timing is predictable.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

/// Outcome of a bounded poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome<T> {
    /// The operation succeeded within the deadline.
    Completed(T),
    /// The deadline passed without a successful attempt.
    DeadlineExpired,
}

/// Repeatedly run `op` until it succeeds or `deadline` elapses.
///
/// Errors for which `is_transient` returns true are swallowed and the
/// operation is retried after `interval`; any other error propagates
/// immediately. The elapsed-time check happens before each attempt, so an
/// attempt already in flight when the deadline passes is still allowed to
/// finish.
pub async fn poll_until<T, E, F, Fut, P>(
    deadline: Duration,
    interval: Duration,
    is_transient: P,
    mut op: F,
) -> Result<PollOutcome<T>, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
{
    let started = Instant::now();

    loop {
        if started.elapsed() > deadline {
            return Ok(PollOutcome::DeadlineExpired);
        }

        match op().await {
            Ok(value) => return Ok(PollOutcome::Completed(value)),
            Err(e) if is_transient(&e) => {
                tracing::trace!("transient failure, re-polling");
                tokio::time::sleep(interval).await;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_success_first_try() {
        let outcome: Result<_, &str> = poll_until(
            Duration::from_secs(15),
            Duration::from_millis(10),
            |_| true,
            || async { Ok(42) },
        )
        .await;

        assert_eq!(outcome, Ok(PollOutcome::Completed(42)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_failures_retried() {
        let mut calls = 0;

        let outcome: Result<_, &str> = poll_until(
            Duration::from_secs(15),
            Duration::from_millis(10),
            |_| true,
            || {
                calls += 1;
                let calls = calls;
                async move {
                    if calls < 4 {
                        Err("not yet")
                    } else {
                        Ok("text")
                    }
                }
            },
        )
        .await;

        assert_eq!(outcome, Ok(PollOutcome::Completed("text")));
        assert_eq!(calls, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_expires() {
        let outcome: Result<PollOutcome<()>, &str> = poll_until(
            Duration::from_secs(15),
            Duration::from_millis(100),
            |_| true,
            || async { Err("never there") },
        )
        .await;

        assert_eq!(outcome, Ok(PollOutcome::DeadlineExpired));
    }

    #[tokio::test]
    async fn test_fatal_error_propagates() {
        let mut calls = 0;

        let outcome: Result<PollOutcome<()>, &str> = poll_until(
            Duration::from_secs(15),
            Duration::from_millis(10),
            |e: &&str| *e == "transient",
            || {
                calls += 1;
                let calls = calls;
                async move {
                    if calls == 1 {
                        Err("transient")
                    } else {
                        Err("boom")
                    }
                }
            },
        )
        .await;

        assert_eq!(outcome, Err("boom"));
        assert_eq!(calls, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_deadline_never_attempts_after_elapse() {
        // With a zero deadline the first check still allows one pass only
        // when no time has elapsed yet.
        let outcome: Result<_, &str> = poll_until(
            Duration::ZERO,
            Duration::from_millis(10),
            |_| true,
            || async { Ok(1) },
        )
        .await;

        assert_eq!(outcome, Ok(PollOutcome::Completed(1)));
    }
}
