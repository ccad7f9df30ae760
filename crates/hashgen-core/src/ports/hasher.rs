//! SecretHasher port - ハッシュ関数の抽象化
//!
//! ハッシュ関数はバイト列を受け取ってダイジェストを返す純粋関数として扱う。
//! 同じ入力には必ず同じ出力を返すこと。

use crate::domain::errors::HashError;

/// SecretHasher はシークレットのダイジェストを計算
///
/// ワーカーから `spawn_blocking` 経由で呼ばれるため、同期 API で良い。
pub trait SecretHasher: Send + Sync {
    fn digest(&self, secret: &[u8]) -> Result<Vec<u8>, HashError>;
}
