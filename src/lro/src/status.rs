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

//! Canonical lifecycle states and the mapping from remote status strings.

/// The error code reported when the status of an operation could not be
/// determined, either because the status query failed or because the service
/// returned a status string outside the known vocabulary.
pub const POLLING_FAILED: &str = "PollingFailed";

/// The canonical lifecycle of a long-running vault operation.
///
/// The remote status vocabulary is not contractually stable, so the service
/// strings are folded into this fixed set. States where no further polling
/// occurs are *terminal*, see [is_terminal][LifecycleState::is_terminal].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleState {
    /// The operation was created but its status has not been observed yet.
    NotStarted,
    /// The remote operation is running.
    InProgress,
    /// The remote operation finished successfully.
    Succeeded,
    /// The remote operation finished with an error.
    Failed,
    /// The caller requested cancellation and the service honored it.
    Cancelled,
    /// The status of the remote operation could not be determined. Terminal,
    /// reported with the [POLLING_FAILED] error code.
    PollingFailed,
}

impl LifecycleState {
    /// Returns true if no further polling occurs in this state.
    pub fn is_terminal(&self) -> bool {
        match self {
            Self::Succeeded | Self::Failed | Self::Cancelled | Self::PollingFailed => true,
            Self::NotStarted | Self::InProgress => false,
        }
    }

    /// Returns true if the operation terminated without success.
    pub fn is_failure(&self) -> bool {
        match self {
            Self::Failed | Self::PollingFailed => true,
            Self::NotStarted | Self::InProgress | Self::Succeeded | Self::Cancelled => false,
        }
    }

    /// Maps a remote status string to a canonical state.
    ///
    /// The mapping is total and case-insensitive. Anything outside the known
    /// vocabulary, including the empty string, maps to
    /// [PollingFailed][LifecycleState::PollingFailed] so that an unexpected
    /// server payload terminates the polling loop with a diagnosable failure
    /// instead of an error thrown from deep inside it.
    pub fn from_raw(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("inprogress") {
            Self::InProgress
        } else if raw.eq_ignore_ascii_case("success") {
            Self::Succeeded
        } else if raw.eq_ignore_ascii_case("failed") {
            Self::Failed
        } else {
            Self::PollingFailed
        }
    }
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::NotStarted => "NotStarted",
            Self::InProgress => "InProgress",
            Self::Succeeded => "Succeeded",
            Self::Failed => "Failed",
            Self::Cancelled => "Cancelled",
            Self::PollingFailed => POLLING_FAILED,
        };
        write!(f, "{name}")
    }
}
