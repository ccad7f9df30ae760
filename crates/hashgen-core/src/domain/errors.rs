//! Errors - エラー型と分類
//!
//! # 分類
//! - 呼び出し側に返す想定内の結果: `NotFound`, `ServiceUnavailable`
//! - 内部不変条件の違反（バグ）: `DuplicateJob`, `InvalidTransition`
//! - ハッシュ計算そのものの失敗: `ComputationFailure`

use thiserror::Error;

use super::ids::JobId;
use super::job::JobState;

/// HashgenError はエンジン全体で使うドメインエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashgenError {
    #[error("job {0} not found")]
    NotFound(JobId),

    #[error("service unavailable: shutdown in progress")]
    ServiceUnavailable,

    #[error("job {0} already exists")]
    DuplicateJob(JobId),

    #[error("invalid transition for job {id}: record is {from:?}")]
    InvalidTransition { id: JobId, from: Option<JobState> },

    #[error("hash computation failed: {0}")]
    ComputationFailure(String),
}

impl HashgenError {
    /// 内部不変条件の違反か？（呼び出し側の通常の結果ではない）
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            HashgenError::DuplicateJob(_) | HashgenError::InvalidTransition { .. }
        )
    }
}

/// HashError はハッシュ関数（SecretHasher）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashError {
    #[error("secret is {len} bytes, limit is {limit}")]
    InputTooLarge { len: usize, limit: usize },

    #[error("{0}")]
    Other(String),
}

impl From<HashError> for HashgenError {
    fn from(err: HashError) -> Self {
        HashgenError::ComputationFailure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_errors_are_classified() {
        assert!(HashgenError::DuplicateJob(JobId::new(1)).is_internal());
        assert!(
            HashgenError::InvalidTransition {
                id: JobId::new(1),
                from: None,
            }
            .is_internal()
        );
        assert!(!HashgenError::NotFound(JobId::new(1)).is_internal());
        assert!(!HashgenError::ServiceUnavailable.is_internal());
    }

    #[test]
    fn hash_error_becomes_computation_failure() {
        let err: HashgenError = HashError::InputTooLarge { len: 10, limit: 4 }.into();
        assert_eq!(
            err,
            HashgenError::ComputationFailure("secret is 10 bytes, limit is 4".to_string())
        );
    }
}
