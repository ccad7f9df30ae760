//! HashService - トランスポート層から呼ばれる唯一の入口
//!
//! # 主要な操作
//! - submit: 受付 → 採番 → Pending 作成 → ワーカー起動 → ID を即座に返す
//! - retrieve: JobStore のスナップショットを返す（待たない）
//! - stats: 完了件数と平均所要時間
//! - request_shutdown: 受付停止 → 処理中ジョブの完了を待つ
//!
//! 4 つとも `&self` で呼べるので、`Arc<HashService>` を共有して並行に使える。

use std::sync::Arc;

use secrecy::SecretSlice;

use super::config::ServiceConfig;
use super::shutdown::{ShutdownCoordinator, ShutdownOutcome, ShutdownPhase};
use super::stats::{ServiceStats, StatsAggregator};
use super::worker::{CompletionSink, HashWorker};
use crate::domain::{HashgenError, JobId, JobStatus};
use crate::ports::{Clock, IdGenerator, JobStore, SecretHasher};

/// HashService は各コンポーネントを所有し、結線する
///
/// `submit` はワーカーを `tokio::spawn` するので、tokio ランタイム上で呼ぶこと。
pub struct HashService {
    config: ServiceConfig,
    clock: Arc<dyn Clock>,
    id_generator: Arc<dyn IdGenerator>,
    store: Arc<dyn JobStore>,
    stats: Arc<StatsAggregator>,
    shutdown: ShutdownCoordinator,
    worker: Arc<HashWorker>,
}

impl HashService {
    pub(crate) fn from_parts(
        config: ServiceConfig,
        clock: Arc<dyn Clock>,
        id_generator: Arc<dyn IdGenerator>,
        hasher: Arc<dyn SecretHasher>,
        store: Arc<dyn JobStore>,
    ) -> Self {
        let stats = Arc::new(StatsAggregator::new());
        let worker = Arc::new(HashWorker {
            hasher,
            clock: Arc::clone(&clock),
            sink: CompletionSink::new(Arc::clone(&store), Arc::clone(&stats)),
            delay: config.hash_delay,
        });
        Self {
            config,
            clock,
            id_generator,
            store,
            stats,
            shutdown: ShutdownCoordinator::new(),
            worker,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// シークレットを受け付けて JobId を返す
    ///
    /// ハッシュ計算は待たない。shutdown 開始後は `ServiceUnavailable`。
    pub fn submit(&self, secret: impl Into<SecretSlice<u8>>) -> Result<JobId, HashgenError> {
        // 受付判定が先。拒否されたら ID を消費しない
        let admission = self.shutdown.admit()?;
        let id = self.id_generator.next_job_id();

        if let Err(err) = self.store.create(id, self.clock.now()) {
            tracing::error!(job_id = %id, error = %err, "job store rejected a freshly allocated id");
            return Err(err);
        }

        Arc::clone(&self.worker).spawn(id, secret.into(), admission);
        tracing::debug!(job_id = %id, "job submitted");
        Ok(id)
    }

    /// ジョブの現在の状態を返す（Pending なら即座に Pending）
    pub fn retrieve(&self, id: JobId) -> Result<JobStatus, HashgenError> {
        self.store.get(id).map(|record| record.status())
    }

    pub fn stats(&self) -> ServiceStats {
        self.stats.snapshot()
    }

    /// 受付を止め、処理中のジョブがすべて終わるまで待つ
    ///
    /// 既に要求済みなら `AlreadyRequested` を返す（Stopped になるまでは同様に待つ）。
    pub async fn request_shutdown(&self) -> ShutdownOutcome {
        self.shutdown.request_shutdown().await
    }

    /// Stopped になったら完了する（サーバーの graceful shutdown 用）
    pub fn stopped(&self) -> impl Future<Output = ()> + Send + use<> {
        let token = self.shutdown.stopped_token();
        async move { token.cancelled_owned().await }
    }

    pub fn phase(&self) -> ShutdownPhase {
        self.shutdown.phase()
    }

    /// まだ終端状態になっていないジョブ数
    pub fn outstanding(&self) -> u64 {
        self.shutdown.outstanding()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::builder::ServiceBuilder;
    use crate::domain::JobState;
    use crate::ports::{FixedClock, SequentialIdGenerator};
    use chrono::Utc;
    use std::time::Duration;

    fn quick_service() -> HashService {
        ServiceBuilder::new()
            .hash_delay(Duration::from_millis(20))
            .build()
            .unwrap()
    }

    async fn wait_until_done(service: &HashService, id: JobId) -> JobStatus {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let status = service.retrieve(id).unwrap();
                if status.state().is_terminal() {
                    return status;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("job should finish")
    }

    #[tokio::test]
    async fn submit_returns_sequential_ids() {
        let service = quick_service();
        assert_eq!(service.submit(b"a".to_vec()).unwrap(), JobId::new(1));
        assert_eq!(service.submit(b"b".to_vec()).unwrap(), JobId::new(2));
        assert_eq!(service.outstanding(), 2);
    }

    #[tokio::test]
    async fn retrieve_is_pending_then_done() {
        let service = quick_service();
        let id = service.submit(b"abc123".to_vec()).unwrap();
        assert_eq!(service.retrieve(id).unwrap(), JobStatus::Pending);

        let status = wait_until_done(&service, id).await;
        assert_eq!(status.state(), JobState::Done);
        // 一度 Done になったら戻らない
        assert_eq!(service.retrieve(id).unwrap(), status);
    }

    #[tokio::test]
    async fn retrieve_unknown_is_not_found() {
        let service = quick_service();
        assert_eq!(
            service.retrieve(JobId::new(9999)).unwrap_err(),
            HashgenError::NotFound(JobId::new(9999))
        );
    }

    #[tokio::test]
    async fn submit_after_shutdown_is_unavailable_and_consumes_no_id() {
        let service = ServiceBuilder::new()
            .id_generator(Arc::new(SequentialIdGenerator::starting_at(100)))
            .hash_delay(Duration::ZERO)
            .build()
            .unwrap();
        assert_eq!(service.submit(b"x".to_vec()).unwrap(), JobId::new(100));
        service.request_shutdown().await;

        assert_eq!(
            service.submit(b"y".to_vec()).unwrap_err(),
            HashgenError::ServiceUnavailable
        );
        assert_eq!(service.phase(), ShutdownPhase::Stopped);
        assert!(service.retrieve(JobId::new(101)).is_err());
    }

    #[tokio::test]
    async fn stats_use_injected_clock() {
        // FixedClock は進めない限り止まっているので所要時間は 0
        let clock = Arc::new(FixedClock::new(Utc::now()));
        let service = ServiceBuilder::new()
            .clock(clock)
            .hash_delay(Duration::ZERO)
            .build()
            .unwrap();
        let id = service.submit(b"abc".to_vec()).unwrap();
        wait_until_done(&service, id).await;

        let stats = service.stats();
        assert_eq!(stats.total, 1);
        assert_eq!(stats.average, Duration::ZERO);
    }

    #[tokio::test]
    async fn stopped_future_resolves_after_drain() {
        let service = quick_service();
        let stopped = service.stopped();
        service.submit(b"abc".to_vec()).unwrap();

        service.request_shutdown().await;
        tokio::time::timeout(Duration::from_millis(100), stopped)
            .await
            .expect("stopped future should be ready");
        assert_eq!(service.outstanding(), 0);
    }
}
