use std::time::Duration;

/// Worker scheduling configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerConfig {
    /// Seconds between two ingestion runs.
    pub interval_secs: u64,
    /// Days of vendor actions requested on each run, ending today.
    pub lookback_days: i64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            interval_secs: 3600,
            lookback_days: 30,
        }
    }
}

impl WorkerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env var              | Default |
    /// |----------------------|---------|
    /// | `SYNC_INTERVAL_SECS` | `3600`  |
    /// | `SYNC_LOOKBACK_DAYS` | `30`    |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            interval_secs: lookup("SYNC_INTERVAL_SECS")
                .and_then(|v| v.parse().ok())
                .filter(|&secs| secs > 0)
                .unwrap_or(defaults.interval_secs),
            lookback_days: lookup("SYNC_LOOKBACK_DAYS")
                .and_then(|v| v.parse().ok())
                .filter(|&days| days >= 0)
                .unwrap_or(defaults.lookback_days),
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(WorkerConfig::from_lookup(lookup(&[])), WorkerConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let config = WorkerConfig::from_lookup(lookup(&[
            ("SYNC_INTERVAL_SECS", "900"),
            ("SYNC_LOOKBACK_DAYS", "7"),
        ]));
        assert_eq!(config.interval(), Duration::from_secs(900));
        assert_eq!(config.lookback_days, 7);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = WorkerConfig::from_lookup(lookup(&[
            ("SYNC_INTERVAL_SECS", "0"),
            ("SYNC_LOOKBACK_DAYS", "soon"),
        ]));
        assert_eq!(config, WorkerConfig::default());
    }
}
