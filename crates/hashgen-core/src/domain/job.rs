//! Job record and status views.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::HashgenError;
use super::ids::JobId;

/// Job state.
///
/// State transitions:
/// - Pending -> Done
/// - Pending -> Failed (hash primitive reported an error)
///
/// Done and Failed are terminal. A record never goes back to Pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    Pending,
    Done,
    Failed,
}

impl JobState {
    /// Is this a terminal state (no further transitions)?
    pub fn is_terminal(self) -> bool {
        matches!(self, JobState::Done | JobState::Failed)
    }
}

/// Job record: one unit of hash work.
///
/// Design:
/// - This is the "single source of truth" for a job's lifecycle.
/// - Fields are private so the digest and completion time stay write-once;
///   all transitions go through `mark_done` / `mark_failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    id: JobId,
    state: JobState,
    digest: Option<Vec<u8>>,
    failure: Option<String>,
    submitted_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl JobRecord {
    pub fn new(id: JobId, submitted_at: DateTime<Utc>) -> Self {
        Self {
            id,
            state: JobState::Pending,
            digest: None,
            failure: None,
            submitted_at,
            completed_at: None,
        }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    pub fn digest(&self) -> Option<&[u8]> {
        self.digest.as_deref()
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Pending -> Done. Digest and completion time are set together.
    pub fn mark_done(
        &mut self,
        digest: Vec<u8>,
        completed_at: DateTime<Utc>,
    ) -> Result<(), HashgenError> {
        self.ensure_pending()?;
        self.state = JobState::Done;
        self.digest = Some(digest);
        self.completed_at = Some(completed_at);
        Ok(())
    }

    /// Pending -> Failed.
    pub fn mark_failed(
        &mut self,
        reason: String,
        completed_at: DateTime<Utc>,
    ) -> Result<(), HashgenError> {
        self.ensure_pending()?;
        self.state = JobState::Failed;
        self.failure = Some(reason);
        self.completed_at = Some(completed_at);
        Ok(())
    }

    /// completed_at - submitted_at (None while Pending).
    ///
    /// A clock that stepped backwards yields zero rather than a negative span.
    pub fn duration(&self) -> Option<Duration> {
        let completed_at = self.completed_at?;
        Some(
            (completed_at - self.submitted_at)
                .to_std()
                .unwrap_or(Duration::ZERO),
        )
    }

    /// Caller-facing view of this record.
    pub fn status(&self) -> JobStatus {
        match self.state {
            JobState::Pending => JobStatus::Pending,
            JobState::Done => JobStatus::Done {
                digest: self.digest.clone().unwrap_or_default(),
            },
            JobState::Failed => JobStatus::Failed {
                reason: self.failure.clone().unwrap_or_default(),
            },
        }
    }

    fn ensure_pending(&self) -> Result<(), HashgenError> {
        if self.state != JobState::Pending {
            return Err(HashgenError::InvalidTransition {
                id: self.id,
                from: Some(self.state),
            });
        }
        Ok(())
    }
}

/// Result of a retrieval.
///
/// This is a serializable snapshot; it never aliases the stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Done { digest: Vec<u8> },
    Failed { reason: String },
}

impl JobStatus {
    pub fn state(&self) -> JobState {
        match self {
            JobStatus::Pending => JobState::Pending,
            JobStatus::Done { .. } => JobState::Done,
            JobStatus::Failed { .. } => JobState::Failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn new_job_starts_as_pending() {
        let job = JobRecord::new(JobId::new(1), at(0));
        assert_eq!(job.state(), JobState::Pending);
        assert!(job.digest().is_none());
        assert!(job.completed_at().is_none());
        assert!(job.duration().is_none());
        assert_eq!(job.status(), JobStatus::Pending);
    }

    #[test]
    fn mark_done_sets_digest_and_completion_together() {
        let mut job = JobRecord::new(JobId::new(1), at(0));
        job.mark_done(vec![1, 2, 3], at(5)).unwrap();

        assert_eq!(job.state(), JobState::Done);
        assert_eq!(job.digest(), Some(&[1u8, 2, 3][..]));
        assert_eq!(job.completed_at(), Some(at(5)));
        assert_eq!(job.duration(), Some(Duration::from_secs(5)));
        assert_eq!(
            job.status(),
            JobStatus::Done {
                digest: vec![1, 2, 3]
            }
        );
    }

    #[test]
    fn mark_failed_records_reason() {
        let mut job = JobRecord::new(JobId::new(2), at(0));
        job.mark_failed("boom".to_string(), at(1)).unwrap();

        assert_eq!(job.state(), JobState::Failed);
        assert_eq!(job.failure(), Some("boom"));
        assert!(job.digest().is_none());
        assert_eq!(
            job.status(),
            JobStatus::Failed {
                reason: "boom".to_string()
            }
        );
    }

    #[rstest]
    #[case::done_then_done(true, true)]
    #[case::done_then_failed(true, false)]
    #[case::failed_then_done(false, true)]
    #[case::failed_then_failed(false, false)]
    fn second_transition_is_rejected(#[case] first_done: bool, #[case] second_done: bool) {
        let mut job = JobRecord::new(JobId::new(3), at(0));
        if first_done {
            job.mark_done(vec![9], at(1)).unwrap();
        } else {
            job.mark_failed("first".to_string(), at(1)).unwrap();
        }
        let before = job.clone();

        let err = if second_done {
            job.mark_done(vec![7], at(2)).unwrap_err()
        } else {
            job.mark_failed("second".to_string(), at(2)).unwrap_err()
        };

        assert!(matches!(err, HashgenError::InvalidTransition { .. }));
        // 書き込みは一度きり
        assert_eq!(job, before);
    }

    #[test]
    fn backwards_clock_yields_zero_duration() {
        let mut job = JobRecord::new(JobId::new(4), at(10));
        job.mark_done(vec![1], at(3)).unwrap();
        assert_eq!(job.duration(), Some(Duration::ZERO));
    }

    #[test]
    fn status_serializes_with_state_tag() {
        let json = serde_json::to_value(JobStatus::Pending).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "pending" }));
    }
}
