//! Runtime configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::CourierError;
use crate::queue::MAX_CAPACITY;
use crate::worker::MAX_WORKERS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourierConfig {
    /// Number of worker loops. Fixed for the lifetime of the pool.
    pub worker_count: usize,

    /// Queue slots before `submit` starts waiting.
    pub queue_capacity: usize,

    /// Duration of the simulated work step.
    pub work_duration: Duration,

    /// How often the status monitor logs counts. `None` disables it.
    pub monitor_interval: Option<Duration>,
}

impl Default for CourierConfig {
    fn default() -> Self {
        Self {
            worker_count: 3,
            queue_capacity: 10,
            work_duration: Duration::from_secs(3),
            monitor_interval: Some(Duration::from_secs(5)),
        }
    }
}

impl CourierConfig {
    /// Defaults overridden by `COURIER_WORKERS`, `COURIER_QUEUE_CAPACITY`,
    /// `COURIER_WORK_MS` and `COURIER_MONITOR_SECS` (0 disables the monitor).
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parse = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());
        let defaults = Self::default();

        Self {
            worker_count: parse("COURIER_WORKERS")
                .map(|n| n as usize)
                .unwrap_or(defaults.worker_count),
            queue_capacity: parse("COURIER_QUEUE_CAPACITY")
                .map(|n| n as usize)
                .unwrap_or(defaults.queue_capacity),
            work_duration: parse("COURIER_WORK_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.work_duration),
            monitor_interval: match parse("COURIER_MONITOR_SECS") {
                Some(0) => None,
                Some(secs) => Some(Duration::from_secs(secs)),
                None => defaults.monitor_interval,
            },
        }
    }

    pub fn validate(&self) -> Result<(), CourierError> {
        if !(1..=MAX_WORKERS).contains(&self.worker_count) {
            return Err(CourierError::InvalidConfig(format!(
                "worker_count must be between 1 and {MAX_WORKERS}"
            )));
        }
        if !(1..=MAX_CAPACITY).contains(&self.queue_capacity) {
            return Err(CourierError::InvalidConfig(format!(
                "queue_capacity must be between 1 and {MAX_CAPACITY}"
            )));
        }
        if self.monitor_interval == Some(Duration::ZERO) {
            return Err(CourierError::InvalidConfig(
                "monitor_interval must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use rstest::rstest;

    fn from_pairs(pairs: &[(&str, &str)]) -> CourierConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CourierConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn empty_env_gives_defaults() {
        assert_eq!(from_pairs(&[]), CourierConfig::default());
    }

    #[test]
    fn env_overrides() {
        let config = from_pairs(&[
            ("COURIER_WORKERS", "8"),
            ("COURIER_QUEUE_CAPACITY", "64"),
            ("COURIER_WORK_MS", "250"),
            ("COURIER_MONITOR_SECS", "0"),
        ]);
        assert_eq!(
            config,
            CourierConfig {
                worker_count: 8,
                queue_capacity: 64,
                work_duration: Duration::from_millis(250),
                monitor_interval: None,
            }
        );
    }

    #[test]
    fn garbage_falls_back_to_default() {
        let config = from_pairs(&[("COURIER_WORKERS", "lots")]);
        assert_eq!(config.worker_count, CourierConfig::default().worker_count);
    }

    #[rstest]
    #[case(0, 10, Some(Duration::from_secs(1)))]
    #[case(3, 0, Some(Duration::from_secs(1)))]
    #[case(3, 10, Some(Duration::ZERO))]
    #[case(MAX_WORKERS + 1, 10, None)]
    #[case(usize::MAX, 10, None)]
    #[case(3, MAX_CAPACITY + 1, None)]
    #[case(3, usize::MAX, None)]
    fn validate_rejects(
        #[case] worker_count: usize,
        #[case] queue_capacity: usize,
        #[case] monitor_interval: Option<Duration>,
    ) {
        let config = CourierConfig {
            worker_count,
            queue_capacity,
            monitor_interval,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CourierError::InvalidConfig(_))
        ));
    }

    #[test]
    fn defaults_are_valid() {
        assert!(CourierConfig::default().validate().is_ok());
    }

    #[test]
    fn limits_themselves_are_valid() {
        let config = CourierConfig {
            worker_count: MAX_WORKERS,
            queue_capacity: MAX_CAPACITY,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn oversized_env_values_fail_validation() {
        let config = from_pairs(&[("COURIER_QUEUE_CAPACITY", "18446744073709551615")]);
        assert_eq!(config.queue_capacity, usize::MAX);
        assert!(matches!(
            config.validate(),
            Err(CourierError::InvalidConfig(_))
        ));
    }
}
