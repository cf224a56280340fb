//! Sleep abstraction for testability

use std::time::Duration;

use async_trait::async_trait;

/// Trait for suspending the current task for a duration.
///
/// The returned future must be cancel-safe: dropping it before completion
/// abandons the wait without side effects.
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Suspend the calling task for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Real sleeper backed by the tokio timer.
///
/// Use this in production code.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_tokio_sleeper_waits_for_duration() {
        let start = tokio::time::Instant::now();
        TokioSleeper.sleep(Duration::from_secs(60)).await;
        assert!(start.elapsed() >= Duration::from_secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_sleeper_is_abandoned_on_timeout() {
        let result =
            tokio::time::timeout(Duration::from_secs(1), TokioSleeper.sleep(Duration::from_secs(60)))
                .await;
        assert!(result.is_err());
    }
}
