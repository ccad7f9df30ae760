use std::time::Duration;

/// Default processing delay applied to every hash job.
pub const DEFAULT_HASH_DELAY: Duration = Duration::from_secs(5);

/// Upper bound accepted by `ServiceBuilder::build`.
pub const MAX_HASH_DELAY: Duration = Duration::from_secs(60 * 60);

/// Tunables for the hash service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Simulated cost of one hash computation. Zero disables the delay.
    pub hash_delay: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            hash_delay: DEFAULT_HASH_DELAY,
        }
    }
}

impl ServiceConfig {
    pub fn with_hash_delay(mut self, hash_delay: Duration) -> Self {
        self.hash_delay = hash_delay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_config_default() {
        let cfg = ServiceConfig::default();
        assert_eq!(cfg.hash_delay, Duration::from_secs(5));
    }

    #[test]
    fn service_config_with_hash_delay() {
        let cfg = ServiceConfig::default().with_hash_delay(Duration::from_millis(10));
        assert_eq!(cfg.hash_delay, Duration::from_millis(10));
    }
}
