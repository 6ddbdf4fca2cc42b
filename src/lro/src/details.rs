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

//! Simplifies the implementation of `PollerImpl`.

use crate::PollResponse;
use crate::model::PollableOperation;
use crate::status::{self, LifecycleState};
use common::Result;
use common::error::Status;
use time::OffsetDateTime;

/// Handles the outcome of one status query.
///
/// A query error is absorbed into a terminal response. The operation is
/// already in flight, so an error raised from the middle of the polling loop
/// is less useful to the caller than a terminal failure signal.
pub(crate) fn handle_poll<O>(
    job: String,
    result: Result<O>,
    count: u32,
) -> (Option<String>, PollResponse<O>)
where
    O: PollableOperation,
{
    match result {
        Err(e) => {
            tracing::warn!(job = %job, error = %e, "resolving the operation as failed after a poll error");
            let status = Status::default()
                .set_code(status::POLLING_FAILED)
                .set_message(format!("the status query failed: {e}"));
            let response =
                PollResponse::new(LifecycleState::PollingFailed, None, Some(status), count);
            (None, response)
        }
        Ok(op) => handle_status(op, count),
    }
}

/// Folds a status document into a `PollResponse` and the job identifier for
/// the next query, if any.
pub(crate) fn handle_status<O>(op: O, count: u32) -> (Option<String>, PollResponse<O>)
where
    O: PollableOperation,
{
    match LifecycleState::from_raw(op.raw_status()) {
        LifecycleState::InProgress => match op.job_id().map(str::to_string) {
            Some(id) => {
                tracing::debug!(job = %id, "the operation is in progress");
                let response = PollResponse::new(LifecycleState::InProgress, Some(op), None, count);
                (Some(id), response)
            }
            None => {
                let status = Status::default()
                    .set_code(status::POLLING_FAILED)
                    .set_message("the service did not return a job identifier");
                let response = PollResponse::new(
                    LifecycleState::PollingFailed,
                    Some(stamp_end_time(op)),
                    Some(status),
                    count,
                );
                (None, response)
            }
        },
        LifecycleState::Succeeded => {
            let response = PollResponse::new(
                LifecycleState::Succeeded,
                Some(stamp_end_time(op)),
                None,
                count,
            );
            (None, response)
        }
        LifecycleState::Failed => {
            let status = op.error().cloned().unwrap_or_else(|| {
                Status::default()
                    .set_message("the operation failed and the service reported no error details")
            });
            let response = PollResponse::new(
                LifecycleState::Failed,
                Some(stamp_end_time(op)),
                Some(status),
                count,
            );
            (None, response)
        }
        LifecycleState::PollingFailed => {
            let status = Status::default()
                .set_code(status::POLLING_FAILED)
                .set_message(format!("unrecognized operation status {:?}", op.raw_status()));
            let response = PollResponse::new(
                LifecycleState::PollingFailed,
                Some(stamp_end_time(op)),
                Some(status),
                count,
            );
            (None, response)
        }
        LifecycleState::NotStarted | LifecycleState::Cancelled => {
            unreachable!("LifecycleState::from_raw never produces NotStarted or Cancelled")
        }
    }
}

fn stamp_end_time<O>(mut op: O) -> O
where
    O: PollableOperation,
{
    op.record_end_time(OffsetDateTime::now_utc());
    op
}
