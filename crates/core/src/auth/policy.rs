use std::time::Duration;

/// Failed-login limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginPolicy {
    /// Failures allowed inside one window before the client is blocked.
    pub max_attempts: i64,
    /// Window over which failures are counted.
    pub attempt_window: Duration,
    /// How long a blocked client must wait.
    pub block_duration: Duration,
}

impl Default for LoginPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            attempt_window: Duration::from_secs(900),
            block_duration: Duration::from_secs(3600),
        }
    }
}

impl LoginPolicy {
    /// Returns true once `failures` reaches the limit.
    pub fn should_block(&self, failures: i64) -> bool {
        failures >= self.max_attempts
    }
}

/// Extracts the token of an `Authorization: Bearer <token>` header value.
pub fn parse_bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
