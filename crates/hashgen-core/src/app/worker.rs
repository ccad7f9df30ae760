//! HashWorker - 1 ジョブ = 1 タスクのハッシュ計算
//!
//! # フロー
//! 1. 模擬的な処理遅延（tokio::time::sleep、ロックは持たない）
//! 2. SecretHasher を spawn_blocking で実行
//! 3. 結果を Completion メッセージにまとめる
//! 4. CompletionSink が JobStore → StatsAggregator → ShutdownCoordinator の順に反映
//!
//! ワーカーが途中で止まっても Admission の drop で outstanding は戻る。

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretSlice};

use super::shutdown::Admission;
use super::stats::StatsAggregator;
use crate::domain::{HashgenError, JobId, JobRecord};
use crate::ports::{Clock, JobStore, SecretHasher};

/// ワーカーから完了処理へ渡す唯一のメッセージ
#[derive(Debug)]
pub struct Completion {
    pub id: JobId,
    pub outcome: Result<Vec<u8>, HashgenError>,
    pub finished_at: DateTime<Utc>,
}

/// 完了メッセージを各コンポーネントに反映する
///
/// ワーカーはこれだけを持てばよく、ストアや集計の詳細を知らない。
#[derive(Clone)]
pub struct CompletionSink {
    store: Arc<dyn JobStore>,
    stats: Arc<StatsAggregator>,
}

impl CompletionSink {
    pub fn new(store: Arc<dyn JobStore>, stats: Arc<StatsAggregator>) -> Self {
        Self { store, stats }
    }

    /// Completion を反映し、遷移後のレコードを返す
    ///
    /// `InvalidTransition` はバグなので error ログを出したうえで呼び出し元に返す。
    pub fn apply(&self, completion: Completion) -> Result<JobRecord, HashgenError> {
        let Completion {
            id,
            outcome,
            finished_at,
        } = completion;

        let result = match outcome {
            Ok(digest) => self.store.complete(id, digest, finished_at).inspect(|record| {
                self.stats.record(record.duration().unwrap_or_default());
                tracing::debug!(job_id = %id, elapsed = ?record.duration(), "job done");
            }),
            Err(err) => {
                tracing::warn!(job_id = %id, error = %err, "hash computation failed");
                self.store.fail(id, err.to_string(), finished_at)
            }
        };

        if let Err(err) = &result {
            tracing::error!(job_id = %id, error = %err, "failed to record job completion");
        }
        result
    }
}

/// HashWorker は 1 件のジョブを非同期に処理する
pub struct HashWorker {
    pub hasher: Arc<dyn SecretHasher>,
    pub clock: Arc<dyn Clock>,
    pub sink: CompletionSink,
    pub delay: Duration,
}

impl HashWorker {
    /// ワーカーを tokio タスクとして起動する
    ///
    /// 呼び出し元は待たない。Admission はタスクが終わるときに解放される。
    pub fn spawn(
        self: Arc<Self>,
        id: JobId,
        secret: SecretSlice<u8>,
        admission: Admission,
    ) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let completion = self.compute(id, secret).await;
            // 失敗してもログ済み。Admission はここで解放
            let _ = self.sink.apply(completion);
            admission.release();
        })
    }

    /// 遅延 → ハッシュ計算 → Completion 作成
    pub async fn compute(&self, id: JobId, secret: SecretSlice<u8>) -> Completion {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let hasher = Arc::clone(&self.hasher);
        let outcome = tokio::task::spawn_blocking(move || {
            hasher
                .digest(secret.expose_secret())
                .map_err(HashgenError::from)
        })
        .await
        .unwrap_or_else(|join_err| {
            Err(HashgenError::ComputationFailure(format!(
                "hash task aborted: {join_err}"
            )))
        });

        Completion {
            id,
            outcome,
            finished_at: self.clock.now(),
        }
    }
}
