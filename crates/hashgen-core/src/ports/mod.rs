//! Ports - 抽象化レイヤー
//!
//! 各 trait はエンジンが外部に依存する部分（時刻・採番・ハッシュ関数・保存先）の
//! インターフェースを提供し、実装の詳細を隠蔽します。
//! HashService はこれらを `Arc<dyn ...>` で受け取るので、テストでは差し替え可能です。

pub mod clock;
pub mod hasher;
pub mod id_generator;
pub mod job_store;

// 主要な trait を再エクスポート
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::hasher::SecretHasher;
pub use self::id_generator::{IdGenerator, SequentialIdGenerator};
pub use self::job_store::JobStore;
