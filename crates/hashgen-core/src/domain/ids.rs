//! Domain identifiers (strongly-typed IDs).
//!
//! # JobId
//! ジョブ ID は 1 から始まる連番（u64）です。
//! 外部（HTTP など）にはそのまま数値として見せるので、Display はプレフィックスなし。
//!
//! ## なぜ newtype にするのか？
//! - 生の u64 と混同できない（件数や時間と取り違えない）
//! - `FromStr` でパース経路を 1 か所に閉じ込められる

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a hash job.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(u64);

impl JobId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl From<u64> for JobId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for JobId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn display_is_plain_number() {
        assert_eq!(JobId::new(42).to_string(), "42");
    }

    #[rstest]
    #[case::plain("7", 7)]
    #[case::padded(" 12 ", 12)]
    #[case::large("18446744073709551615", u64::MAX)]
    fn parses_from_str(#[case] input: &str, #[case] expected: u64) {
        let id: JobId = input.parse().unwrap();
        assert_eq!(id.as_u64(), expected);
    }

    #[rstest]
    #[case::empty("")]
    #[case::negative("-1")]
    #[case::text("abc")]
    fn rejects_non_numeric(#[case] input: &str) {
        assert!(input.parse::<JobId>().is_err());
    }

    #[test]
    fn serializes_transparently() {
        let serialized = serde_json::to_string(&JobId::new(3)).unwrap();
        assert_eq!(serialized, "3");
        let back: JobId = serde_json::from_str(&serialized).unwrap();
        assert_eq!(back, JobId::new(3));
    }
}
