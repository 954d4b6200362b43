//! KAM loading with bounded status polling.
//!
//! `LoadKam` answers immediately with a load status. The caller re-issues the
//! same request until the service reports `COMPLETE` (hand back the handle)
//! or `FAILED` (give up without retrying). Any other status is pending.
//!
//! ## Policy
//!
//! - **Fixed interval**: every pending poll waits the same delay (500ms by default).
//! - **Attempt cap**: optional upper bound on the number of `LoadKam` calls.
//! - **Elapsed cap**: optional upper bound on total wall-clock time (600s by default).
//!
//! Exceeding either bound yields [`WsError::LoadTimeout`]. Disabling both
//! polls until the service answers, however long that takes.
//!
//! ```rust,ignore
//! use openbel_ws_client::loader::{KamLoader, LoadPolicy};
//!
//! let loader = KamLoader::new(LoadPolicy::default().with_max_attempts(Some(20)));
//! let handle = loader.load(&client, "small").await?;
//! ```

use crate::api::WebApi;
use crate::error::{Result, WsError};
use crate::model::{KamHandle, KamLoadStatus};
use crate::requests::LoadKamRequest;
use std::time::Duration;
use tokio::time::{Instant, sleep};
use tracing::{debug, info};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);
pub const DEFAULT_MAX_ELAPSED: Duration = Duration::from_secs(600);

/// Bounds for polling a KAM load to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadPolicy {
    /// Delay between a pending status and the next poll
    pub interval: Duration,
    /// Maximum number of `LoadKam` calls, `None` for no limit
    pub max_attempts: Option<u32>,
    /// Maximum total time spent polling, `None` for no limit
    pub max_elapsed: Option<Duration>,
}

impl Default for LoadPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: None,
            max_elapsed: Some(DEFAULT_MAX_ELAPSED),
        }
    }
}

impl LoadPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Poll at the default interval with no attempt or time limit.
    pub fn unbounded() -> Self {
        Self {
            max_elapsed: None,
            ..Self::default()
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: Option<u32>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_max_elapsed(mut self, max_elapsed: Option<Duration>) -> Self {
        self.max_elapsed = max_elapsed;
        self
    }

    pub fn is_bounded(&self) -> bool {
        self.max_attempts.is_some() || self.max_elapsed.is_some()
    }

    fn exhausted(&self, attempts: u32, elapsed: Duration) -> bool {
        self.max_attempts.is_some_and(|max| attempts >= max)
            || self.max_elapsed.is_some_and(|max| elapsed >= max)
    }
}

/// Loads KAMs and waits for them to become usable.
#[derive(Debug, Clone, Default)]
pub struct KamLoader {
    policy: LoadPolicy,
}

impl KamLoader {
    pub fn new(policy: LoadPolicy) -> Self {
        Self { policy }
    }

    /// Load `kam_name` and return its handle once the service reports `COMPLETE`.
    ///
    /// # Errors
    ///
    /// - [`WsError::LoadFailed`] on the first `FAILED` status; no retry.
    /// - [`WsError::LoadTimeout`] when the policy bounds are exceeded.
    /// - Transport errors from any poll are returned unchanged.
    pub async fn load<A>(&self, api: &A, kam_name: &str) -> Result<KamHandle>
    where
        A: WebApi + ?Sized,
    {
        self.load_request(api, &LoadKamRequest::new(kam_name)?).await
    }

    /// Same as [`KamLoader::load`] for a prepared request, e.g. a catalog entry.
    pub async fn load_request<A>(&self, api: &A, request: &LoadKamRequest) -> Result<KamHandle>
    where
        A: WebApi + ?Sized,
    {
        let kam = request.kam_name();
        let started = Instant::now();
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;
            let response = api.load_kam(request).await?;
            debug!(kam, attempt = attempts, status = %response.status, "LoadKam poll");

            match response.status {
                KamLoadStatus::Failed => {
                    return Err(WsError::LoadFailed {
                        kam: kam.to_string(),
                        detail: response
                            .message
                            .unwrap_or_else(|| "service reported load status FAILED".to_string()),
                    });
                }
                KamLoadStatus::Complete => {
                    let handle = response
                        .into_handle()
                        .ok_or_else(|| WsError::missing("LoadKamResponse", "handle"))?;
                    info!(kam, handle = %handle, attempts, "KAM loaded");
                    return Ok(handle);
                }
                KamLoadStatus::Pending => {}
            }

            let elapsed = started.elapsed();
            if self.policy.exhausted(attempts, elapsed) {
                return Err(WsError::LoadTimeout {
                    kam: kam.to_string(),
                    attempts,
                    elapsed,
                });
            }

            sleep(self.policy.interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_bounded_by_time_only() {
        let policy = LoadPolicy::default();
        assert_eq!(policy.interval, Duration::from_millis(500));
        assert_eq!(policy.max_attempts, None);
        assert_eq!(policy.max_elapsed, Some(Duration::from_secs(600)));
        assert!(policy.is_bounded());
        assert!(!LoadPolicy::unbounded().is_bounded());
    }

    #[test]
    fn exhausted_checks_each_bound() {
        let policy = LoadPolicy::unbounded().with_max_attempts(Some(3));
        assert!(!policy.exhausted(2, Duration::from_secs(9999)));
        assert!(policy.exhausted(3, Duration::ZERO));

        let policy = LoadPolicy::unbounded().with_max_elapsed(Some(Duration::from_secs(1)));
        assert!(!policy.exhausted(1000, Duration::from_millis(999)));
        assert!(policy.exhausted(1, Duration::from_secs(1)));
    }
}
