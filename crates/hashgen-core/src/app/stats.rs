//! StatsAggregator - 完了ジョブの集計
//!
//! 件数と累積時間は 1 つの Mutex で守る。
//! 別々の atomic にすると、スナップショットで分子と分母の時点がずれるため。

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Default)]
struct Totals {
    count: u64,
    total: Duration,
}

/// StatsAggregator は Done になったジョブの件数と累積所要時間を保持
///
/// # 使用例
/// ```ignore
/// stats.record(record.duration().unwrap_or_default());
/// let snapshot = stats.snapshot();
/// println!("{} jobs, avg {:?}", snapshot.total, snapshot.average);
/// ```
#[derive(Debug, Default)]
pub struct StatsAggregator {
    totals: Mutex<Totals>,
}

/// ある一時点の集計結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStats {
    /// Done になったジョブ数
    pub total: u64,
    /// 平均所要時間（total == 0 のときはゼロ）
    pub average: Duration,
}

impl ServiceStats {
    pub fn average_millis(&self) -> u128 {
        self.average.as_millis()
    }
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 1 件分の所要時間を加算
    pub fn record(&self, duration: Duration) {
        let mut totals = self.totals.lock().unwrap_or_else(PoisonError::into_inner);
        totals.count += 1;
        totals.total = totals.total.saturating_add(duration);
    }

    /// 件数と平均を同じロック内で読む
    pub fn snapshot(&self) -> ServiceStats {
        let totals = self.totals.lock().unwrap_or_else(PoisonError::into_inner);
        let average = match u32::try_from(totals.count) {
            Ok(0) => Duration::ZERO,
            Ok(count) => totals.total / count,
            Err(_) => Duration::from_secs_f64(totals.total.as_secs_f64() / totals.count as f64),
        };
        ServiceStats {
            total: totals.count,
            average,
        }
    }
}
