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

use super::service::FakeResponse;
use serde_json::json;

pub fn pending(job: &str) -> FakeResponse {
    FakeResponse::Payload(json!({
        "jobId": job,
        "status": "InProgress",
        "statusDetails": "transferring blobs",
        "startTime": "2026-08-06T10:00:00Z",
    }))
}

pub fn success(job: &str, folder_url: &str) -> FakeResponse {
    FakeResponse::Payload(json!({
        "jobId": job,
        "status": "Success",
        "startTime": "2026-08-06T10:00:00Z",
        "endTime": "2026-08-06T10:09:00Z",
        "folderUrl": folder_url,
    }))
}

pub fn restore_success(job: &str) -> FakeResponse {
    FakeResponse::Payload(json!({
        "jobId": job,
        "status": "Success",
        "statusDetails": "42 keys restored",
        "startTime": "2026-08-06T10:00:00Z",
        "endTime": "2026-08-06T10:09:00Z",
    }))
}

pub fn failure(job: &str, code: &str, message: &str) -> FakeResponse {
    FakeResponse::Payload(json!({
        "jobId": job,
        "status": "Failed",
        "startTime": "2026-08-06T10:00:00Z",
        "error": {"code": code, "message": message},
    }))
}

pub fn unknown_status(job: &str) -> FakeResponse {
    FakeResponse::Payload(json!({
        "jobId": job,
        "status": "Paused",
    }))
}

pub fn transport_error(message: &str) -> FakeResponse {
    FakeResponse::TransportError(message.to_string())
}
