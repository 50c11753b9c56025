use crate::domain::ports::Backoff;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioBackoff;

impl Backoff for TokioBackoff {
    async fn wait(&self, delay: Duration) {
        if !delay.is_zero() {
            tracing::debug!("Backing off for {:?}", delay);
            tokio::time::sleep(delay).await;
        }
    }
}

/// 不等待，直接進行下一次嘗試
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateBackoff;

impl Backoff for ImmediateBackoff {
    async fn wait(&self, _delay: Duration) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_tokio_backoff_sleeps_for_delay() {
        let start = tokio::time::Instant::now();
        TokioBackoff.wait(Duration::from_millis(20)).await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_immediate_backoff_returns_at_once() {
        let start = tokio::time::Instant::now();
        ImmediateBackoff.wait(Duration::from_secs(60)).await;
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
