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

use common::Result;
use common::error::Error;
use lro::model::{BackupOperation, RestoreOperation};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A scripted response: a status document or a transport failure.
pub enum FakeResponse {
    Payload(Value),
    TransportError(String),
}

/// The scripted responses for one test, in the order they are served.
pub struct ServerState {
    pub activate: VecDeque<FakeResponse>,
    pub poll: VecDeque<FakeResponse>,
}

/// An in-process stand-in for the vault administration service.
///
/// The polling engine consumes the transport through closures, so the fake
/// terminates the same seam. Each call pops the next scripted response and
/// deserializes it the way a real transport layer would.
#[derive(Clone)]
pub struct FakeVaultService {
    state: Arc<Mutex<ServerState>>,
}

impl FakeVaultService {
    pub fn new(state: ServerState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub async fn begin_backup(&self, _blob_url: &str, _sas_token: &str) -> Result<BackupOperation> {
        self.activate()
    }

    pub async fn backup_status(&self, _job_id: String) -> Result<BackupOperation> {
        self.poll()
    }

    pub async fn begin_restore(
        &self,
        _blob_url: &str,
        _sas_token: &str,
    ) -> Result<RestoreOperation> {
        self.activate()
    }

    pub async fn restore_status(&self, _job_id: String) -> Result<RestoreOperation> {
        self.poll()
    }

    fn activate<T: DeserializeOwned>(&self) -> Result<T> {
        let next = self
            .state
            .lock()
            .expect("shared state is poisoned")
            .activate
            .pop_front();
        respond(next)
    }

    fn poll<T: DeserializeOwned>(&self) -> Result<T> {
        let next = self
            .state
            .lock()
            .expect("shared state is poisoned")
            .poll
            .pop_front();
        respond(next)
    }
}

fn respond<T: DeserializeOwned>(next: Option<FakeResponse>) -> Result<T> {
    match next {
        None => Err(Error::other("the response script is exhausted")),
        Some(FakeResponse::TransportError(message)) => Err(Error::io(message)),
        Some(FakeResponse::Payload(value)) => serde_json::from_value(value).map_err(Error::deser),
    }
}
