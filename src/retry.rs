//! Opt-in retry policy for callers that want one.
//! `DraftingEngine::generate` never retries on its own.

use std::time::Duration;

use log::debug;

use crate::error::{Error, ErrorKind};

/// How many extra attempts `generate_with_retry` makes, and how long it
/// waits between them
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy
{   /// Extra attempts after the first one
    pub max_retries: usize
  , /// Growth factor applied per attempt
    pub backoff_multiplier: f32
  , /// Wait before the first retry
    pub initial_backoff: Duration
  , /// Upper bound on any single wait
    pub max_backoff: Duration
}

impl RetryPolicy
{   pub fn new(
      max_retries: usize
    , backoff_multiplier: f32
    , initial_backoff_ms: u64
    ) -> Self
    {   RetryPolicy
        {   max_retries
          , backoff_multiplier: backoff_multiplier.max(1.0)
          , initial_backoff: Duration::from_millis(initial_backoff_ms)
          , max_backoff: Duration::from_secs(30)
        }
    }

    /// Policy that never retries
    pub fn none() -> Self
    {   RetryPolicy::new(0, 1.0, 0)
    }

    /// Cap every wait at `max_backoff`
    pub fn with_max_backoff(mut self, max_backoff: Duration) -> Self
    {   self.max_backoff = max_backoff;
        self
    }

    /// Wait before retry number `attempt` (0-based), capped at `max_backoff`
    pub fn backoff_for_attempt(&self, attempt: usize) -> Duration
    {   let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let factor = f64::from(self.backoff_multiplier.powi(exponent));
        let nanos = (self.initial_backoff.as_nanos() as f64 * factor).round();
        let wait = if nanos.is_finite()
          && nanos < self.max_backoff.as_nanos() as f64
        {   Duration::from_nanos(nanos as u64)
        } else
        {   self.max_backoff
        };
        debug!("Backoff for retry {}: {:?}", attempt, wait);
        wait
    }
}

impl Default for RetryPolicy
{   fn default() -> Self
    {   RetryPolicy::new(2, 2.0, 500)
    }
}

/// Whether a failure is worth another attempt.
/// Network failures, rate limits and upstream 5xx qualify.
pub fn is_retryable(error: &Error) -> bool
{   match error.kind()
    {   ErrorKind::ValidationError => false
      , ErrorKind::NetworkError => true
      , ErrorKind::ApiError => match error.status()
        {   Some(429) => true
          , Some(status) => (500..600).contains(&status)
          , None => false
        }
    }
}
