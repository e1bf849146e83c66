//! Reconnection backoff policy for the remote cache connection.

use std::time::Duration;

/// Bounded linear backoff used while the remote cache is unreachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    /// Failures tolerated before automatic retries stop.
    pub max_attempts: u32,
    /// Delay added per failed attempt.
    pub step: Duration,
    /// Upper bound of the backoff delay.
    pub max_delay: Duration,
    /// Delay before the single retry scheduled after an unexpected close.
    pub close_retry_delay: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            step: Duration::from_millis(100),
            max_delay: Duration::from_millis(3000),
            close_retry_delay: Duration::from_millis(5000),
        }
    }
}

impl ReconnectPolicy {
    /// Returns the delay before the next attempt after `attempts` failures,
    /// or `None` once the attempt budget is exhausted.
    pub fn next_delay(&self, attempts: u32) -> Option<Duration> {
        if attempts > self.max_attempts {
            return None;
        }
        Some(self.step.saturating_mul(attempts).min(self.max_delay))
    }

    /// Returns true if a close-triggered retry may still be scheduled.
    pub fn allows_close_retry(&self, attempts: u32) -> bool {
        attempts < self.max_attempts
    }
}

/// Backoff delay of the default policy: `min(attempts * 100ms, 3000ms)`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use folio_core::cache::reconnect_delay;
///
/// assert_eq!(reconnect_delay(1), Some(Duration::from_millis(100)));
/// assert_eq!(reconnect_delay(5), Some(Duration::from_millis(500)));
/// assert_eq!(reconnect_delay(6), None);
/// ```
pub fn reconnect_delay(attempts: u32) -> Option<Duration> {
    ReconnectPolicy::default().next_delay(attempts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_grows_linearly() {
        let policy = ReconnectPolicy::default();
        assert_eq!(policy.next_delay(1), Some(Duration::from_millis(100)));
        assert_eq!(policy.next_delay(2), Some(Duration::from_millis(200)));
        assert_eq!(policy.next_delay(5), Some(Duration::from_millis(500)));
    }

    #[test]
    fn test_delay_is_capped() {
        let policy = ReconnectPolicy {
            max_attempts: 100,
            ..ReconnectPolicy::default()
        };
        assert_eq!(policy.next_delay(30), Some(Duration::from_millis(3000)));
        assert_eq!(policy.next_delay(99), Some(Duration::from_millis(3000)));
    }

    #[test]
    fn test_budget_exhausted_after_max_attempts() {
        let policy = ReconnectPolicy::default();
        assert!(policy.next_delay(5).is_some());
        assert_eq!(policy.next_delay(6), None);
        assert_eq!(policy.next_delay(u32::MAX), None);
    }

    #[test]
    fn test_close_retry_only_under_max() {
        let policy = ReconnectPolicy::default();
        assert!(policy.allows_close_retry(0));
        assert!(policy.allows_close_retry(4));
        assert!(!policy.allows_close_retry(5));
    }
}
