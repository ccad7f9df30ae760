//! App - アプリケーション層
//!
//! このモジュールは、ports を組み合わせてハッシュサービスを実装します。
//!
//! # 主要コンポーネント
//! - **ServiceBuilder**: サービスの構築とワイヤリング
//! - **HashService**: submit / retrieve / stats / request_shutdown の入口
//! - **HashWorker**: ジョブ 1 件分の非同期ハッシュ計算
//! - **StatsAggregator**: 完了件数と平均所要時間
//! - **ShutdownCoordinator**: 受付停止と drain

pub mod builder;
pub mod config;
pub mod service;
pub mod shutdown;
pub mod stats;
pub mod worker;

// 主要な型を再エクスポート
pub use self::builder::{BuildError, ServiceBuilder};
pub use self::config::ServiceConfig;
pub use self::service::HashService;
pub use self::shutdown::{Admission, ShutdownCoordinator, ShutdownOutcome, ShutdownPhase};
pub use self::stats::{ServiceStats, StatsAggregator};
pub use self::worker::{Completion, CompletionSink, HashWorker};
