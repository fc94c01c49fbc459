//! Planning thresholds.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const SAVINGS_THRESHOLD_ENV: &str = "RESTOCK_SAVINGS_THRESHOLD";
pub const FRAGMENTATION_THRESHOLD_ENV: &str = "RESTOCK_FRAGMENTATION_THRESHOLD";

/// Thresholds used when deriving suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningConfig {
    /// Minimum total saving (currency units, exclusive) for a switch-vendor suggestion.
    pub savings_threshold: Decimal,
    /// Maximum number of distinct vendors before consolidation is suggested.
    pub fragmentation_threshold: usize,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            savings_threshold: Decimal::from(5),
            fragmentation_threshold: 3,
        }
    }
}

impl PlanningConfig {
    /// Read thresholds from the environment.
    ///
    /// Unset variables keep their default; unparsable ones are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            savings_threshold: parse_or(
                SAVINGS_THRESHOLD_ENV,
                lookup(SAVINGS_THRESHOLD_ENV),
                defaults.savings_threshold,
            ),
            fragmentation_threshold: parse_or(
                FRAGMENTATION_THRESHOLD_ENV,
                lookup(FRAGMENTATION_THRESHOLD_ENV),
                defaults.fragmentation_threshold,
            ),
        }
    }

    pub fn with_savings_threshold(mut self, threshold: Decimal) -> Self {
        self.savings_threshold = threshold;
        self
    }

    pub fn with_fragmentation_threshold(mut self, threshold: usize) -> Self {
        self.fragmentation_threshold = threshold;
        self
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + core::fmt::Display,
{
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(v) => v,
        Err(_) => {
            tracing::warn!("{key}={raw:?} is not a valid value; using default {default}");
            default
        }
    }
}
