//! JobStore port - ジョブレコードの正本（source of truth）
//!
//! JobStore は `JobId -> JobRecord` の対応を管理します。
//!
//! # 設計原則
//! - 状態遷移（complete / fail）はストア内で原子的に行う
//!   （state, digest, completed_at が同時に見えるようになる）
//! - 読み出しはスナップショット（clone）を返し、内部レコードを外に貸さない
//! - どのメソッドも await しない（ロックを跨いで待たない）

use chrono::{DateTime, Utc};

use crate::domain::{HashgenError, JobId, JobRecord};

pub trait JobStore: Send + Sync {
    /// Pending のレコードを作成。既に存在すれば `DuplicateJob`。
    fn create(&self, id: JobId, submitted_at: DateTime<Utc>) -> Result<JobRecord, HashgenError>;

    /// レコードのスナップショットを取得。なければ `NotFound`。
    fn get(&self, id: JobId) -> Result<JobRecord, HashgenError>;

    /// Pending -> Done。既に終端状態 or 存在しない場合は `InvalidTransition`。
    ///
    /// 遷移後のスナップショットを返す（所要時間の算出に使う）。
    fn complete(
        &self,
        id: JobId,
        digest: Vec<u8>,
        completed_at: DateTime<Utc>,
    ) -> Result<JobRecord, HashgenError>;

    /// Pending -> Failed。エラー条件は `complete` と同じ。
    fn fail(
        &self,
        id: JobId,
        reason: String,
        completed_at: DateTime<Utc>,
    ) -> Result<JobRecord, HashgenError>;

    /// 保持しているレコード数
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
