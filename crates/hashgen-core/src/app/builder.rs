//! ServiceBuilder - HashService の構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）
//! - ports の差し替え（テストでは FixedClock や独自 Hasher を注入）

use std::sync::Arc;
use std::time::Duration;

use super::config::{MAX_HASH_DELAY, ServiceConfig};
use super::service::HashService;
use crate::impls::{InMemoryJobStore, Sha512Hasher};
use crate::ports::{Clock, IdGenerator, JobStore, SecretHasher, SequentialIdGenerator, SystemClock};

/// ServiceBuilder は HashService を構築
///
/// # 使用例
/// ```ignore
/// let service = ServiceBuilder::new()
///     .config(ServiceConfig::default().with_hash_delay(Duration::from_secs(5)))
///     .build()?;
/// ```
///
/// # デフォルト
/// - Clock: SystemClock
/// - IdGenerator: SequentialIdGenerator（1 から）
/// - SecretHasher: Sha512Hasher
/// - JobStore: InMemoryJobStore
pub struct ServiceBuilder {
    config: ServiceConfig,
    clock: Option<Arc<dyn Clock>>,
    id_generator: Option<Arc<dyn IdGenerator>>,
    hasher: Option<Arc<dyn SecretHasher>>,
    store: Option<Arc<dyn JobStore>>,
}

/// BuildError はサービス構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("hash delay {0:?} exceeds the maximum of {max:?}", max = MAX_HASH_DELAY)]
    HashDelayTooLong(Duration),
}

impl ServiceBuilder {
    pub fn new() -> Self {
        Self {
            config: ServiceConfig::default(),
            clock: None,
            id_generator: None,
            hasher: None,
            store: None,
        }
    }

    pub fn config(mut self, config: ServiceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn hash_delay(mut self, hash_delay: Duration) -> Self {
        self.config.hash_delay = hash_delay;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn id_generator(mut self, id_generator: Arc<dyn IdGenerator>) -> Self {
        self.id_generator = Some(id_generator);
        self
    }

    pub fn hasher(mut self, hasher: Arc<dyn SecretHasher>) -> Self {
        self.hasher = Some(hasher);
        self
    }

    pub fn store(mut self, store: Arc<dyn JobStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// 検証してから HashService を生成
    ///
    /// # 検証
    /// - hash_delay が MAX_HASH_DELAY 以下であること
    pub fn build(self) -> Result<HashService, BuildError> {
        if self.config.hash_delay > MAX_HASH_DELAY {
            return Err(BuildError::HashDelayTooLong(self.config.hash_delay));
        }
        Ok(HashService::from_parts(
            self.config,
            self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            self.id_generator
                .unwrap_or_else(|| Arc::new(SequentialIdGenerator::new())),
            self.hasher.unwrap_or_else(|| Arc::new(Sha512Hasher::new())),
            self.store.unwrap_or_else(|| Arc::new(InMemoryJobStore::new())),
        ))
    }
}

impl Default for ServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
