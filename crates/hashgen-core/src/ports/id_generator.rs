//! IdGenerator port - ID 生成の抽象化
//!
//! テスト容易性のために、trait として抽象化しています。
//!
//! # 実装
//! - **SequentialIdGenerator**: 1 から始まる連番（AtomicU64）

use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::ids::JobId;

/// IdGenerator はプロセス内で一意な JobId を生成
///
/// # Thread Safety
/// - `Send + Sync` を要求（複数スレッドから使える）
/// - 同時に呼ばれても同じ値を二度返してはいけない
pub trait IdGenerator: Send + Sync {
    fn next_job_id(&self) -> JobId;
}

/// SequentialIdGenerator は 1, 2, 3, ... を払い出す
///
/// `fetch_add` 1 回で採番するのでロック不要。
/// 返り値の順序は呼び出し完了順と一致するとは限らないが、一意かつ単調増加。
///
/// u64 を使い切った場合は 0 に戻る（現実的には到達しない）。
#[derive(Debug)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// テスト用: 任意の値から採番を始める
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_job_id(&self) -> JobId {
        JobId::new(self.next.fetch_add(1, Ordering::Relaxed))
    }
}
