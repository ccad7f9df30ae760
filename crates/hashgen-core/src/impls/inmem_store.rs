//! InMemoryJobStore - プロセス内のジョブストア
//!
//! # 学習ポイント
//! - DashMap によるシャード単位のロック（別 ID の操作は互いに邪魔しない）
//! - 同じ ID への操作はシャードのロックで直列化される
//! - 遷移は `get_mut` のガード内で完結するので、読み手には原子的に見える

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::{HashgenError, JobId, JobRecord};
use crate::ports::JobStore;

/// InMemoryJobStore は `DashMap<JobId, JobRecord>` をラップしたストア
///
/// # 使用例
/// ```ignore
/// let store = InMemoryJobStore::new();
/// store.create(id, clock.now())?;
/// store.complete(id, digest, clock.now())?;
/// let record = store.get(id)?;
/// ```
#[derive(Debug, Default)]
pub struct InMemoryJobStore {
    records: DashMap<JobId, JobRecord>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    fn transition(
        &self,
        id: JobId,
        apply: impl FnOnce(&mut JobRecord) -> Result<(), HashgenError>,
    ) -> Result<JobRecord, HashgenError> {
        let mut record = self
            .records
            .get_mut(&id)
            .ok_or(HashgenError::InvalidTransition { id, from: None })?;
        apply(record.value_mut())?;
        Ok(record.value().clone())
    }
}

impl JobStore for InMemoryJobStore {
    fn create(&self, id: JobId, submitted_at: DateTime<Utc>) -> Result<JobRecord, HashgenError> {
        match self.records.entry(id) {
            Entry::Occupied(_) => Err(HashgenError::DuplicateJob(id)),
            Entry::Vacant(slot) => {
                let record = JobRecord::new(id, submitted_at);
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }

    fn get(&self, id: JobId) -> Result<JobRecord, HashgenError> {
        self.records
            .get(&id)
            .map(|record| record.value().clone())
            .ok_or(HashgenError::NotFound(id))
    }

    fn complete(
        &self,
        id: JobId,
        digest: Vec<u8>,
        completed_at: DateTime<Utc>,
    ) -> Result<JobRecord, HashgenError> {
        self.transition(id, |record| record.mark_done(digest, completed_at))
    }

    fn fail(
        &self,
        id: JobId,
        reason: String,
        completed_at: DateTime<Utc>,
    ) -> Result<JobRecord, HashgenError> {
        self.transition(id, |record| record.mark_failed(reason, completed_at))
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
