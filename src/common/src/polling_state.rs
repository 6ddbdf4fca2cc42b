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

//! Bookkeeping for polling loops.

/// The observable state of a single polling loop.
///
/// Polling backoff policies receive this state to compute the wait period
/// before the next status query.
#[derive(Clone, Debug)]
pub struct PollingState {
    /// When the polling loop started.
    pub loop_start: std::time::Instant,

    /// The number of status queries issued so far. The call that starts the
    /// operation is not counted.
    pub attempt_count: u32,
}

impl Default for PollingState {
    fn default() -> Self {
        Self {
            loop_start: std::time::Instant::now(),
            attempt_count: 0,
        }
    }
}
