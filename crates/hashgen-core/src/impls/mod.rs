//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **InMemoryJobStore**: DashMap ベースのジョブストア
//! - **Sha512Hasher**: SHA-512 によるデフォルトのハッシュ関数

pub mod inmem_store;
pub mod sha512;

// 主要な型を再エクスポート
pub use self::inmem_store::InMemoryJobStore;
pub use self::sha512::Sha512Hasher;
