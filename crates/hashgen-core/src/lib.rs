//! hashgen-core
//!
//! 非同期ハッシュジョブのエンジン。
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（JobId, JobRecord, JobState, JobStatus, errors）
//! - **ports**: 抽象化レイヤー（Clock, IdGenerator, SecretHasher, JobStore）
//! - **impls**: 実装（InMemoryJobStore, Sha512Hasher）
//! - **app**: アプリケーションロジック（builder, service, worker, stats, shutdown）

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;

pub use app::{HashService, ServiceBuilder, ServiceConfig, ServiceStats, ShutdownOutcome};
pub use domain::{HashgenError, JobId, JobState, JobStatus};
