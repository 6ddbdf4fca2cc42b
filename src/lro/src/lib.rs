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

//! Types and functions to poll vault administration long-running operations.
//!
//! A full backup, a full restore, and a selective key restore cannot complete
//! within a single request. The service starts a job and the client tracks it
//! by querying a status endpoint until the job reaches a terminal outcome.
//! This crate drives that lifecycle: it starts the operation once, queries
//! its status at a configurable cadence, folds every raw status into a
//! canonical [LifecycleState], and latches the first terminal result.
//!
//! The transport is not implemented here. Callers supply two closures: one to
//! start the operation and one to query its status. The closures capture
//! whatever the request needs, such as the blob storage URL, the SAS token,
//! and the underlying client stubs.

use common::Result;
use common::error::{Error, Status};
use common::polling_backoff_policy::{FixedDelay, PollingBackoffPolicy};
use common::polling_state::PollingState;
use std::future::Future;
use std::sync::Arc;

pub mod model;
pub mod status;

pub use model::PollableOperation;
pub use status::LifecycleState;

mod details;

/// A snapshot of a long-running operation, produced by one poll tick.
///
/// A new instance is produced on every tick and never mutated in place. Once
/// a response with a terminal [state][PollResponse::state] is produced, the
/// poller caches it and returns it for any further observation.
#[derive(Clone, Debug, PartialEq)]
pub struct PollResponse<O> {
    state: LifecycleState,
    snapshot: Option<O>,
    error: Option<Status>,
    poll_count: u32,
}

impl<O> PollResponse<O> {
    pub(crate) fn new(
        state: LifecycleState,
        snapshot: Option<O>,
        error: Option<Status>,
        poll_count: u32,
    ) -> Self {
        Self {
            state,
            snapshot,
            error,
            poll_count,
        }
    }

    /// The canonical lifecycle state observed by this tick.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// The operation status document observed by this tick, if any.
    ///
    /// The snapshot is absent when the status query itself failed, as there
    /// is no document to report.
    pub fn snapshot(&self) -> Option<&O> {
        self.snapshot.as_ref()
    }

    /// The failure diagnostics, set only when [state][PollResponse::state] is
    /// a failure state.
    pub fn error(&self) -> Option<&Status> {
        self.error.as_ref()
    }

    /// The number of status queries completed when this response was
    /// produced. The response observed from starting the operation is `0`.
    pub fn poll_count(&self) -> u32 {
        self.poll_count
    }

    /// Applies a projection to the snapshot, keeping everything else.
    ///
    /// # Example
    /// ```
    /// # use vault_admin_lro::PollResponse;
    /// # use vault_admin_lro::model::{RestoreOperation, SelectiveKeyRestoreOperation};
    /// fn selective_view(
    ///     response: PollResponse<RestoreOperation>,
    /// ) -> PollResponse<SelectiveKeyRestoreOperation> {
    ///     response.map(SelectiveKeyRestoreOperation::from)
    /// }
    /// ```
    pub fn map<U>(self, f: impl FnOnce(O) -> U) -> PollResponse<U> {
        PollResponse {
            state: self.state,
            snapshot: self.snapshot.map(f),
            error: self.error,
            poll_count: self.poll_count,
        }
    }
}

mod sealed {
    pub trait Poller {}
}

/// The trait implemented by LRO helpers.
///
/// # Parameters
/// * `O` - the operation status document. Each operation flavor supplies its
///   own type, see [model].
///
/// # Example
/// ```
/// # use vault_admin_lro::Poller;
/// # use vault_admin_lro::model::BackupOperation;
/// async fn monitor(mut poller: impl Poller<BackupOperation>) -> common::Result<String> {
///     let response = poller.until_done().await?;
///     println!("the backup completed as {}", response.state());
///     poller.final_result()
/// }
/// ```
pub trait Poller<O>: sealed::Poller
where
    O: PollableOperation,
{
    /// Performs exactly one step of the operation lifecycle.
    ///
    /// The first call starts the operation. An error starting the operation
    /// propagates to the caller: there is no job to poll yet, so the failure
    /// is a hard one. Subsequent calls query the status of the job once. An
    /// error from the status query does not propagate, it resolves the
    /// operation into a terminal response, see [status::POLLING_FAILED].
    ///
    /// Once a terminal response is produced, further calls return it without
    /// any remote interaction.
    fn poll(&mut self) -> impl Future<Output = Result<PollResponse<O>>> + Send;

    /// Polls at the configured cadence until a terminal response is produced.
    ///
    /// The returned response always has a terminal
    /// [state][PollResponse::state]. The only errors reported by this
    /// function are those raised when starting the operation.
    fn until_done(&mut self) -> impl Future<Output = Result<PollResponse<O>>> + Send;

    /// Extracts the operation payload after a successful completion.
    ///
    /// Calling this function before the operation completed, or after it
    /// completed without success, is a usage error.
    fn final_result(&self) -> Result<O::Output>;

    /// Requests cancellation of the remote operation.
    ///
    /// None of the vault administration flavors define a remote cancellation
    /// protocol, so this always reports an unsupported-operation error.
    /// Local observation can simply be abandoned instead: dropping the poller
    /// or its stream never affects the remote operation.
    fn cancel(&mut self) -> Result<()>;

    /// Converts the poller into a [futures::Stream] of poll responses.
    ///
    /// The stream performs one lifecycle step per pulled item and finishes
    /// after yielding the first terminal response. Dropping the stream early
    /// stops the local observation and nothing else.
    #[cfg(feature = "unstable-stream")]
    fn into_stream(self) -> impl futures::Stream<Item = Result<PollResponse<O>>> + Unpin;
}

/// Creates a poller driving one operation at the default cadence.
///
/// The default cadence is a fixed one second delay between status queries,
/// see [FixedDelay].
///
/// # Parameters
/// * `start` - starts the operation. Invoked at most once. All request
///   parameters, including the destination and its access token, are expected
///   to be captured by this closure.
/// * `query` - queries the status of the operation started by `start`. It
///   receives the job identifier as its only input parameter.
///
/// # Example
/// ```
/// # use vault_admin_lro::{Poller, new_poller};
/// # use vault_admin_lro::model::BackupOperation;
/// # tokio_test::block_on(async {
/// let start = || async move {
///     Ok(BackupOperation::default()
///         .set_job_id("backup-001")
///         .set_status("Success")
///         .set_folder_url("https://storage.example/backups/b-001"))
/// };
/// let query = |job: String| async move {
///     Ok(BackupOperation::default().set_job_id(job).set_status("Success"))
/// };
/// let mut poller = new_poller(start, query);
/// let response = poller.until_done().await?;
/// assert!(response.state().is_terminal());
/// # Ok::<(), common::error::Error>(())
/// # });
/// ```
pub fn new_poller<O, S, SF, Q, QF>(start: S, query: Q) -> impl Poller<O>
where
    O: PollableOperation,
    S: FnOnce() -> SF + Send + Sync,
    SF: Future<Output = Result<O>> + Send + 'static,
    Q: Fn(String) -> QF + Send + Sync,
    QF: Future<Output = Result<O>> + Send + 'static,
{
    PollerImpl::new(Arc::new(FixedDelay::default()), start, query)
}

/// Creates a poller driving one operation at a caller-supplied cadence.
pub fn new_poller_with_backoff<O, S, SF, Q, QF>(
    polling_backoff_policy: Arc<dyn PollingBackoffPolicy>,
    start: S,
    query: Q,
) -> impl Poller<O>
where
    O: PollableOperation,
    S: FnOnce() -> SF + Send + Sync,
    SF: Future<Output = Result<O>> + Send + 'static,
    Q: Fn(String) -> QF + Send + Sync,
    QF: Future<Output = Result<O>> + Send + 'static,
{
    PollerImpl::new(polling_backoff_policy, start, query)
}

/// An implementation of `Poller` based on closures.
///
/// # Parameters
/// * `O` - the operation status document.
/// * `S` - the start closure. Starts the operation. This implementation
///   expects that all necessary parameters and request options are captured
///   by this closure.
/// * `Q` - the query closure. Queries the status of the operation created by
///   `start`. It receives the job identifier as its only input parameter.
struct PollerImpl<O, S, Q>
where
    O: PollableOperation,
{
    backoff: Arc<dyn PollingBackoffPolicy>,
    start: Option<S>,
    query: Q,
    job: Option<String>,
    state: PollingState,
    terminal: Option<PollResponse<O>>,
}

impl<O, S, Q> PollerImpl<O, S, Q>
where
    O: PollableOperation,
{
    pub fn new(backoff: Arc<dyn PollingBackoffPolicy>, start: S, query: Q) -> Self {
        Self {
            backoff,
            start: Some(start),
            query,
            job: None,
            state: PollingState::default(),
            terminal: None,
        }
    }

    fn record(&mut self, job: Option<String>, response: PollResponse<O>) -> PollResponse<O> {
        self.job = job;
        if response.state().is_terminal() {
            self.terminal = Some(response.clone());
        }
        response
    }
}

impl<O, S, Q> sealed::Poller for PollerImpl<O, S, Q> where O: PollableOperation {}

impl<O, S, SF, Q, QF> Poller<O> for PollerImpl<O, S, Q>
where
    O: PollableOperation,
    S: FnOnce() -> SF + Send + Sync,
    SF: Future<Output = Result<O>> + Send + 'static,
    Q: Fn(String) -> QF + Send + Sync,
    QF: Future<Output = Result<O>> + Send + 'static,
{
    async fn poll(&mut self) -> Result<PollResponse<O>> {
        if let Some(response) = self.terminal.as_ref() {
            return Ok(response.clone());
        }
        if let Some(start) = self.start.take() {
            let op = start().await?;
            let (job, response) = details::handle_status(op, self.state.attempt_count);
            return Ok(self.record(job, response));
        }
        if let Some(job) = self.job.take() {
            self.state.attempt_count += 1;
            let result = (self.query)(job.clone()).await;
            let (job, response) = details::handle_poll(job, result, self.state.attempt_count);
            return Ok(self.record(job, response));
        }
        // Only reachable when the start closure failed: the operation was
        // never created and there is nothing left to drive.
        Err(Error::invalid_state("the operation was never started"))
    }

    async fn until_done(&mut self) -> Result<PollResponse<O>> {
        loop {
            let response = self.poll().await?;
            if response.state().is_terminal() {
                return Ok(response);
            }
            tokio::time::sleep(self.backoff.wait_period(&self.state)).await;
        }
    }

    fn final_result(&self) -> Result<O::Output> {
        match self.terminal.as_ref() {
            Some(response) if response.state() == LifecycleState::Succeeded => response
                .snapshot()
                .cloned()
                .ok_or_else(|| Error::invalid_state("the completed operation has no snapshot"))?
                .into_output(),
            Some(response) => Err(Error::invalid_state(format!(
                "the operation completed as {}",
                response.state()
            ))),
            None => Err(Error::invalid_state("the operation has not completed yet")),
        }
    }

    fn cancel(&mut self) -> Result<()> {
        Err(Error::unsupported(
            "backup and restore operations do not support cancellation",
        ))
    }

    #[cfg(feature = "unstable-stream")]
    fn into_stream(self) -> impl futures::Stream<Item = Result<PollResponse<O>>> + Unpin {
        use futures::stream::unfold;
        Box::pin(unfold(Some(self), move |state| async move {
            let mut poller = state?;
            match poller.poll().await {
                Err(e) => Some((Err(e), None)),
                Ok(response) => {
                    let next = if response.state().is_terminal() {
                        None
                    } else {
                        Some(poller)
                    };
                    Some((Ok(response), next))
                }
            }
        }))
    }
}
