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

//! Operation status documents for the vault administration flavors.
//!
//! The service reports the status of backup, restore, and selective key
//! restore operations as similar documents, differing only in the
//! operation-specific payload. The [PollableOperation] trait is the seam the
//! polling engine uses to drive all of them with a single loop.

use common::Result;
use common::error::{Error, Status};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Implemented by the status document of each operation flavor.
///
/// The polling engine only needs a handful of fields from a status document:
/// the job identifier to poll with, the raw status string, the error payload
/// when the operation failed, and the completion timestamp. Everything else
/// is flavor-specific and only surfaces through [Output][Self::Output].
pub trait PollableOperation: Clone + Send + 'static {
    /// The operation-specific payload extracted after a successful completion.
    type Output: Clone + Send;

    /// The identifier used to query the status of the operation.
    fn job_id(&self) -> Option<&str>;

    /// The last status string reported by the service, verbatim.
    fn raw_status(&self) -> &str;

    /// The error payload, if the service reported one.
    fn error(&self) -> Option<&Status>;

    /// When the operation reached a terminal state.
    fn end_time(&self) -> Option<OffsetDateTime>;

    /// Records when a terminal state was first observed. The first recorded
    /// value wins, later calls are ignored.
    fn record_end_time(&mut self, v: OffsetDateTime);

    /// Extracts the operation-specific payload.
    ///
    /// Only meaningful on a document describing a successfully completed
    /// operation.
    fn into_output(self) -> Result<Self::Output>;
}

/// The status document of a full vault backup.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct BackupOperation {
    /// The identifier of the backup job.
    pub job_id: Option<String>,

    /// The status string reported by the service.
    pub status: String,

    /// Additional human-readable details about the status.
    pub status_details: Option<String>,

    /// Set when the backup failed.
    pub error: Option<Status>,

    #[serde(with = "time::serde::rfc3339::option")]
    pub start_time: Option<OffsetDateTime>,

    #[serde(with = "time::serde::rfc3339::option")]
    pub end_time: Option<OffsetDateTime>,

    /// The URL of the storage folder holding the completed backup.
    pub folder_url: Option<String>,
}

impl BackupOperation {
    /// Sets the value of [job_id][BackupOperation::job_id].
    pub fn set_job_id<T: Into<String>>(mut self, v: T) -> Self {
        self.job_id = Some(v.into());
        self
    }

    /// Sets the value of [status][BackupOperation::status].
    pub fn set_status<T: Into<String>>(mut self, v: T) -> Self {
        self.status = v.into();
        self
    }

    /// Sets the value of [status_details][BackupOperation::status_details].
    pub fn set_status_details<T: Into<String>>(mut self, v: T) -> Self {
        self.status_details = Some(v.into());
        self
    }

    /// Sets the value of [error][BackupOperation::error].
    pub fn set_error(mut self, v: Status) -> Self {
        self.error = Some(v);
        self
    }

    /// Sets the value of [start_time][BackupOperation::start_time].
    pub fn set_start_time(mut self, v: OffsetDateTime) -> Self {
        self.start_time = Some(v);
        self
    }

    /// Sets the value of [end_time][BackupOperation::end_time].
    pub fn set_end_time(mut self, v: OffsetDateTime) -> Self {
        self.end_time = Some(v);
        self
    }

    /// Sets the value of [folder_url][BackupOperation::folder_url].
    pub fn set_folder_url<T: Into<String>>(mut self, v: T) -> Self {
        self.folder_url = Some(v.into());
        self
    }
}

impl PollableOperation for BackupOperation {
    type Output = String;

    fn job_id(&self) -> Option<&str> {
        self.job_id.as_deref()
    }
    fn raw_status(&self) -> &str {
        &self.status
    }
    fn error(&self) -> Option<&Status> {
        self.error.as_ref()
    }
    fn end_time(&self) -> Option<OffsetDateTime> {
        self.end_time
    }
    fn record_end_time(&mut self, v: OffsetDateTime) {
        self.end_time.get_or_insert(v);
    }
    fn into_output(self) -> Result<String> {
        self.folder_url
            .ok_or_else(|| Error::deser("the completed backup has no storage folder URL"))
    }
}

/// The status document of a full vault restore.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct RestoreOperation {
    /// The identifier of the restore job.
    pub job_id: Option<String>,

    /// The status string reported by the service.
    pub status: String,

    /// Additional human-readable details about the status.
    pub status_details: Option<String>,

    /// Set when the restore failed.
    pub error: Option<Status>,

    #[serde(with = "time::serde::rfc3339::option")]
    pub start_time: Option<OffsetDateTime>,

    #[serde(with = "time::serde::rfc3339::option")]
    pub end_time: Option<OffsetDateTime>,
}

impl RestoreOperation {
    /// Sets the value of [job_id][RestoreOperation::job_id].
    pub fn set_job_id<T: Into<String>>(mut self, v: T) -> Self {
        self.job_id = Some(v.into());
        self
    }

    /// Sets the value of [status][RestoreOperation::status].
    pub fn set_status<T: Into<String>>(mut self, v: T) -> Self {
        self.status = v.into();
        self
    }

    /// Sets the value of [status_details][RestoreOperation::status_details].
    pub fn set_status_details<T: Into<String>>(mut self, v: T) -> Self {
        self.status_details = Some(v.into());
        self
    }

    /// Sets the value of [error][RestoreOperation::error].
    pub fn set_error(mut self, v: Status) -> Self {
        self.error = Some(v);
        self
    }

    /// Sets the value of [start_time][RestoreOperation::start_time].
    pub fn set_start_time(mut self, v: OffsetDateTime) -> Self {
        self.start_time = Some(v);
        self
    }

    /// Sets the value of [end_time][RestoreOperation::end_time].
    pub fn set_end_time(mut self, v: OffsetDateTime) -> Self {
        self.end_time = Some(v);
        self
    }
}

impl PollableOperation for RestoreOperation {
    type Output = ();

    fn job_id(&self) -> Option<&str> {
        self.job_id.as_deref()
    }
    fn raw_status(&self) -> &str {
        &self.status
    }
    fn error(&self) -> Option<&Status> {
        self.error.as_ref()
    }
    fn end_time(&self) -> Option<OffsetDateTime> {
        self.end_time
    }
    fn record_end_time(&mut self, v: OffsetDateTime) {
        self.end_time.get_or_insert(v);
    }
    fn into_output(self) -> Result<()> {
        Ok(())
    }
}

/// The status document of a selective key restore.
///
/// The service drives selective key restores through the same protocol as a
/// full restore. This type is a view over a [RestoreOperation], produced by
/// [From], not a separate poll path.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct SelectiveKeyRestoreOperation {
    /// The identifier of the restore job.
    pub job_id: Option<String>,

    /// The status string reported by the service.
    pub status: String,

    /// Additional human-readable details about the status.
    pub status_details: Option<String>,

    /// Set when the restore failed.
    pub error: Option<Status>,

    #[serde(with = "time::serde::rfc3339::option")]
    pub start_time: Option<OffsetDateTime>,

    #[serde(with = "time::serde::rfc3339::option")]
    pub end_time: Option<OffsetDateTime>,
}

impl From<RestoreOperation> for SelectiveKeyRestoreOperation {
    fn from(op: RestoreOperation) -> Self {
        Self {
            job_id: op.job_id,
            status: op.status,
            status_details: op.status_details,
            error: op.error,
            start_time: op.start_time,
            end_time: op.end_time,
        }
    }
}

impl PollableOperation for SelectiveKeyRestoreOperation {
    type Output = ();

    fn job_id(&self) -> Option<&str> {
        self.job_id.as_deref()
    }
    fn raw_status(&self) -> &str {
        &self.status
    }
    fn error(&self) -> Option<&Status> {
        self.error.as_ref()
    }
    fn end_time(&self) -> Option<OffsetDateTime> {
        self.end_time
    }
    fn record_end_time(&mut self, v: OffsetDateTime) {
        self.end_time.get_or_insert(v);
    }
    fn into_output(self) -> Result<()> {
        Ok(())
    }
}
