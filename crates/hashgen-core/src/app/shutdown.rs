//! ShutdownCoordinator - 受付停止と処理中ジョブの排出
//!
//! # 状態遷移
//! - Running: 受付中。admit() のたびに outstanding += 1
//! - Draining: shutdown 要求済み。新規受付は ServiceUnavailable
//! - Stopped: Draining かつ outstanding == 0。完了シグナルを一度だけ発火
//!
//! # 学習ポイント
//! - 受付判定と outstanding の加算を同じロック内で行う（取りこぼし防止）
//! - 完了シグナルは CancellationToken（一度 cancel されたら戻らないラッチ）
//! - Admission（RAII ガード）の drop で必ず outstanding を戻す

use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::domain::HashgenError;

/// Coordinator phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShutdownPhase {
    Running,
    Draining,
    Stopped,
}

/// 最初の shutdown 要求か、既に要求済みだったか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    Initiated,
    AlreadyRequested,
}

#[derive(Debug)]
struct CoordinatorState {
    phase: ShutdownPhase,
    outstanding: u64,
}

#[derive(Debug)]
struct Inner {
    state: Mutex<CoordinatorState>,
    stopped: CancellationToken,
}

impl Inner {
    fn lock(&self) -> std::sync::MutexGuard<'_, CoordinatorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn release(&self) {
        let mut state = self.lock();
        match state.outstanding.checked_sub(1) {
            Some(left) => state.outstanding = left,
            None => {
                tracing::error!("outstanding job count would go negative; release ignored");
                return;
            }
        }
        if state.phase == ShutdownPhase::Draining && state.outstanding == 0 {
            state.phase = ShutdownPhase::Stopped;
            drop(state);
            tracing::info!("all outstanding jobs finished, service stopped");
            self.stopped.cancel();
        }
    }
}

/// ShutdownCoordinator は処理中ジョブ数を追跡し、drain の完了を通知する
///
/// clone すると同じ状態を共有する（ワーカーへ渡すため）。
#[derive(Debug, Clone)]
pub struct ShutdownCoordinator {
    inner: Arc<Inner>,
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(CoordinatorState {
                    phase: ShutdownPhase::Running,
                    outstanding: 0,
                }),
                stopped: CancellationToken::new(),
            }),
        }
    }

    /// 新しいジョブを受け付ける
    ///
    /// Running でなければ `ServiceUnavailable`。
    /// 返された Admission を drop するまでジョブは outstanding として数えられる。
    pub fn admit(&self) -> Result<Admission, HashgenError> {
        let mut state = self.inner.lock();
        if state.phase != ShutdownPhase::Running {
            return Err(HashgenError::ServiceUnavailable);
        }
        state.outstanding += 1;
        Ok(Admission {
            inner: Some(Arc::clone(&self.inner)),
        })
    }

    /// Running -> Draining（outstanding == 0 なら即 Stopped）
    ///
    /// 二度目以降の呼び出しは何もしない。
    pub fn begin_shutdown(&self) -> ShutdownOutcome {
        let mut state = self.inner.lock();
        if state.phase != ShutdownPhase::Running {
            return ShutdownOutcome::AlreadyRequested;
        }
        tracing::info!(outstanding = state.outstanding, "shutdown requested, draining");
        if state.outstanding == 0 {
            state.phase = ShutdownPhase::Stopped;
            drop(state);
            tracing::info!("nothing outstanding, service stopped");
            self.inner.stopped.cancel();
        } else {
            state.phase = ShutdownPhase::Draining;
        }
        ShutdownOutcome::Initiated
    }

    /// Stopped になるまで待つ（既に Stopped なら即座に返る）
    pub async fn wait_stopped(&self) {
        self.inner.stopped.cancelled().await;
    }

    /// begin_shutdown + wait_stopped
    pub async fn request_shutdown(&self) -> ShutdownOutcome {
        let outcome = self.begin_shutdown();
        self.wait_stopped().await;
        outcome
    }

    pub fn phase(&self) -> ShutdownPhase {
        self.inner.lock().phase
    }

    pub fn outstanding(&self) -> u64 {
        self.inner.lock().outstanding
    }

    /// Stopped を待つための token（外部の select! 用）
    pub fn stopped_token(&self) -> CancellationToken {
        self.inner.stopped.clone()
    }
}

/// 受付済みジョブ 1 件分の「処理中」マーカー
///
/// ジョブが終端状態になったとき（またはワーカーが途中で止まったとき）に
/// drop され、outstanding を 1 減らす。
#[derive(Debug)]
#[must_use = "dropping an Admission immediately releases the job's outstanding slot"]
pub struct Admission {
    inner: Option<Arc<Inner>>,
}

impl Admission {
    /// 明示的に解放する（drop と同じ）
    pub fn release(mut self) {
        if let Some(inner) = self.inner.take() {
            inner.release();
        }
    }
}

impl Drop for Admission {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.take() {
            inner.release();
        }
    }
}
