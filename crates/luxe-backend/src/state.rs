use luxe_bridge::config::Config;

use crate::rate_limit::RateLimiter;

/// The core application state that holds configuration and other shared
/// resources.
///
/// It is designed to be wrapped in thread-safe, async-friendly concurrency
/// primitives (see [`SharedState`]) to allow safe concurrent reads and
/// occasional writes from multiple tasks.
#[derive(Debug)]
pub struct State {
    /// The loaded application configuration.
    pub config: Config,
    /// Submission attempts per sender.
    pub rate_limiter: RateLimiter,
}

impl State {
    pub fn new(config: Config) -> Self {
        let rate_limiter = RateLimiter::new(
            config.submissions.max_attempts,
            std::time::Duration::from_secs(config.submissions.window_secs),
        );
        Self {
            config,
            rate_limiter,
        }
    }
}

/// Thread-safe, async-friendly shared reference to the application [`State`].
pub type SharedState = std::sync::Arc<tokio::sync::RwLock<State>>;
