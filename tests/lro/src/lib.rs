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

pub mod fake;

#[cfg(test)]
mod tests {
    use super::fake::responses;
    use super::fake::service::{FakeVaultService, ServerState};
    use anyhow::Result;
    use common::polling_backoff_policy::{FixedDelay, PollingBackoffPolicy};
    use lro::model::{BackupOperation, RestoreOperation, SelectiveKeyRestoreOperation};
    use lro::{LifecycleState, Poller, status};
    use std::sync::Arc;
    use std::time::Duration;

    #[cfg(feature = "log-integration-tests")]
    fn init_tracing() {
        let _ = tracing_subscriber::fmt::try_init();
    }

    #[cfg(not(feature = "log-integration-tests"))]
    fn init_tracing() {}

    fn fast_backoff() -> Arc<dyn PollingBackoffPolicy> {
        Arc::new(FixedDelay::clamp(Duration::from_millis(1)))
    }

    fn backup_poller(service: &FakeVaultService) -> impl Poller<BackupOperation> + use<> {
        let start_service = service.clone();
        let start = move || async move {
            start_service
                .begin_backup("https://storage.test/container", "sas-token")
                .await
        };
        let query_service = service.clone();
        let query = move |job: String| {
            let service = query_service.clone();
            async move { service.backup_status(job).await }
        };
        lro::new_poller_with_backoff(fast_backoff(), start, query)
    }

    fn restore_poller(service: &FakeVaultService) -> impl Poller<RestoreOperation> + use<> {
        let start_service = service.clone();
        let start = move || async move {
            start_service
                .begin_restore("https://storage.test/container/f-001", "sas-token")
                .await
        };
        let query_service = service.clone();
        let query = move |job: String| {
            let service = query_service.clone();
            async move { service.restore_status(job).await }
        };
        lro::new_poller_with_backoff(fast_backoff(), start, query)
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn backup_until_done_success() -> Result<()> {
        init_tracing();
        let service = FakeVaultService::new(ServerState {
            activate: vec![responses::pending("backup-001")].into(),
            poll: vec![
                responses::pending("backup-001"),
                responses::success("backup-001", "https://storage.test/container/f-001"),
            ]
            .into(),
        });
        let mut poller = backup_poller(&service);
        let response = poller.until_done().await?;
        assert_eq!(response.state(), LifecycleState::Succeeded);
        assert_eq!(response.poll_count(), 2);
        assert_eq!(
            poller.final_result()?,
            "https://storage.test/container/f-001"
        );
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn backup_immediate_failure() -> Result<()> {
        init_tracing();
        let service = FakeVaultService::new(ServerState {
            activate: vec![responses::failure(
                "backup-002",
                "BackupFailed",
                "blob container is gone",
            )]
            .into(),
            poll: vec![].into(),
        });
        let mut poller = backup_poller(&service);
        let response = poller.poll().await?;
        assert_eq!(response.state(), LifecycleState::Failed);
        assert_eq!(response.poll_count(), 0);
        let diag = response.error().unwrap();
        assert_eq!(diag.code, "BackupFailed");
        assert_eq!(diag.message, "blob container is gone");

        // No status query is issued once the operation is terminal.
        let done = poller.until_done().await?;
        assert_eq!(done, response);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn backup_poll_transport_error() -> Result<()> {
        init_tracing();
        let service = FakeVaultService::new(ServerState {
            activate: vec![responses::pending("backup-003")].into(),
            poll: vec![responses::transport_error("connection reset")].into(),
        });
        let mut poller = backup_poller(&service);
        let response = poller.until_done().await?;
        assert_eq!(response.state(), LifecycleState::PollingFailed);
        let diag = response.error().unwrap();
        assert_eq!(diag.code, status::POLLING_FAILED);
        assert!(diag.message.contains("connection reset"), "{diag:?}");
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn backup_unknown_status() -> Result<()> {
        init_tracing();
        let service = FakeVaultService::new(ServerState {
            activate: vec![responses::pending("backup-004")].into(),
            poll: vec![responses::unknown_status("backup-004")].into(),
        });
        let mut poller = backup_poller(&service);
        let response = poller.until_done().await?;
        assert_eq!(response.state(), LifecycleState::PollingFailed);
        let diag = response.error().unwrap();
        assert_eq!(diag.code, status::POLLING_FAILED);
        assert!(diag.message.contains("Paused"), "{diag:?}");
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn restore_until_done_success() -> Result<()> {
        init_tracing();
        let service = FakeVaultService::new(ServerState {
            activate: vec![responses::pending("restore-001")].into(),
            poll: vec![responses::restore_success("restore-001")].into(),
        });
        let mut poller = restore_poller(&service);
        let response = poller.until_done().await?;
        assert_eq!(response.state(), LifecycleState::Succeeded);
        poller.final_result()?;
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn selective_restore_view() -> Result<()> {
        init_tracing();
        let service = FakeVaultService::new(ServerState {
            activate: vec![responses::pending("restore-002")].into(),
            poll: vec![responses::restore_success("restore-002")].into(),
        });
        let mut poller = restore_poller(&service);
        let response = poller
            .until_done()
            .await?
            .map(SelectiveKeyRestoreOperation::from);
        assert_eq!(response.state(), LifecycleState::Succeeded);
        let snapshot = response.snapshot().unwrap();
        assert_eq!(snapshot.job_id.as_deref(), Some("restore-002"));
        assert_eq!(snapshot.status_details.as_deref(), Some("42 keys restored"));
        assert!(snapshot.end_time.is_some(), "{snapshot:?}");
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn cancel_is_unsupported() -> Result<()> {
        init_tracing();
        let service = FakeVaultService::new(ServerState {
            activate: vec![responses::pending("backup-005")].into(),
            poll: vec![].into(),
        });
        let mut poller = backup_poller(&service);
        poller.poll().await?;
        let err = poller.cancel().unwrap_err();
        assert!(err.is_unsupported(), "{err:?}");
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn until_done_is_send() -> Result<()> {
        init_tracing();
        let service = FakeVaultService::new(ServerState {
            activate: vec![responses::pending("backup-006")].into(),
            poll: vec![responses::success(
                "backup-006",
                "https://storage.test/container/f-006",
            )]
            .into(),
        });
        let mut poller = backup_poller(&service);
        let join = tokio::spawn(async move {
            let response = poller.until_done().await?;
            poller.final_result().map(|url| (response.state(), url))
        });
        let (state, url) = join.await??;
        assert_eq!(state, LifecycleState::Succeeded);
        assert_eq!(url, "https://storage.test/container/f-006");
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn backup_stream() -> Result<()> {
        use futures::StreamExt;
        init_tracing();
        let service = FakeVaultService::new(ServerState {
            activate: vec![responses::pending("backup-007")].into(),
            poll: vec![responses::success(
                "backup-007",
                "https://storage.test/container/f-007",
            )]
            .into(),
        });
        let mut stream = backup_poller(&service).into_stream();
        let p0 = stream.next().await.unwrap()?;
        assert_eq!(p0.state(), LifecycleState::InProgress);
        let p1 = stream.next().await.unwrap()?;
        assert_eq!(p1.state(), LifecycleState::Succeeded);
        let snapshot = p1.snapshot().unwrap();
        assert_eq!(
            snapshot.folder_url.as_deref(),
            Some("https://storage.test/container/f-007")
        );
        let p2 = stream.next().await;
        assert!(p2.is_none(), "{p2:?}");
        Ok(())
    }
}
