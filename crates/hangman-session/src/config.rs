//! Session configuration.

use std::time::Duration;

use hangman_protocol::Topic;

/// The game the server hosts out of the box.
pub const DEFAULT_TOPIC: &str = "games:1";

/// How long to wait for the server to answer a join.
pub const DEFAULT_JOIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Settings for one game session.
///
/// Start from `SessionConfig::default()` and override what you need.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// The game to join.
    pub topic: Topic,

    /// Upper bound on the join handshake. Default: 5 seconds.
    pub join_timeout: Duration,
}

impl SessionConfig {
    /// Config for `topic` with default timeouts.
    pub fn new(topic: impl Into<Topic>) -> Self {
        Self {
            topic: topic.into(),
            ..Self::default()
        }
    }

    /// Sets the join timeout.
    #[must_use]
    pub fn with_join_timeout(mut self, timeout: Duration) -> Self {
        self.join_timeout = timeout;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            topic: Topic::new(DEFAULT_TOPIC),
            join_timeout: DEFAULT_JOIN_TIMEOUT,
        }
    }
}
