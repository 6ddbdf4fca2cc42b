// Copyright 2026 The Vault Admin Rust Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Defines the trait for polling backoff policies and a common implementation.
//!
//! The client libraries can automatically poll long-running operations until
//! completion. When doing so they wait between polls to avoid overloading the
//! service.
//!
//! These policies should not be confused with retry backoff policies. Their
//! purpose is different: a poll is expected to report "still running" many
//! times, so the wait period is a cadence, not a penalty. Polling backoff
//! policies should not use jitter.
//!
//! # Example
//! ```
//! # use vault_admin_common::polling_backoff_policy::{Error, FixedDelay};
//! use std::time::Duration;
//!
//! let policy = FixedDelay::new(Duration::from_secs(5))?;
//! // `policy` implements the `PollingBackoffPolicy` trait.
//! # Ok::<(), Error>(())
//! ```

use crate::polling_state::PollingState;
use std::time::Duration;

/// Defines the trait implemented by all polling backoff strategies.
pub trait PollingBackoffPolicy: Send + Sync + std::fmt::Debug {
    /// Returns the wait period before the next status query.
    ///
    /// # Parameters
    /// * `state` - the state of the polling loop. This method is always called
    ///   after at least one attempt.
    fn wait_period(&self, state: &PollingState) -> Duration;
}

/// The error type for polling backoff policy creation.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("the polling delay ({0:?}) should be greater than zero")]
    InvalidDelay(Duration),
}

/// Polls at a fixed cadence.
///
/// The default cadence is one second. That is a conservative value for
/// operations that take from seconds to minutes, such as a full vault backup.
#[derive(Clone, Debug)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    /// Creates a policy waiting `delay` between successive polls.
    ///
    /// # Example
    /// ```
    /// # use vault_admin_common::polling_backoff_policy::{Error, FixedDelay};
    /// use std::time::Duration;
    /// let policy = FixedDelay::new(Duration::from_secs(2))?;
    /// # Ok::<(), Error>(())
    /// ```
    pub fn new(delay: Duration) -> Result<Self, Error> {
        if delay.is_zero() {
            return Err(Error::InvalidDelay(delay));
        }
        Ok(Self { delay })
    }

    /// Creates a policy clamping the delay towards recommended values.
    ///
    /// The delay is clamped to be between one millisecond and one day. The
    /// lower value is rarely useful outside of tests, but it is unlikely to
    /// cause problems.
    pub fn clamp(delay: Duration) -> Self {
        Self {
            delay: delay.clamp(Duration::from_millis(1), Duration::from_secs(24 * 60 * 60)),
        }
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(1),
        }
    }
}

impl PollingBackoffPolicy for FixedDelay {
    fn wait_period(&self, _state: &PollingState) -> Duration {
        self.delay
    }
}
