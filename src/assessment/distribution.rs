use super::question::Difficulty;
use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Percentage mix of difficulty tiers. Values are not required to sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DifficultyDistribution {
    pub beginner: u32,
    pub intermediate: u32,
    pub advanced: u32,
}

impl Default for DifficultyDistribution {
    fn default() -> Self {
        Self {
            beginner: 40,
            intermediate: 40,
            advanced: 20,
        }
    }
}

impl DifficultyDistribution {
    pub fn new(beginner: u32, intermediate: u32, advanced: u32) -> Self {
        Self {
            beginner,
            intermediate,
            advanced,
        }
    }

    /// Parse a raw distribution record, substituting the default when it is not
    /// an object carrying three non-negative numeric tiers.
    pub fn from_value(value: &Value) -> Self {
        match Self::try_from_value(value) {
            Some(dist) => dist,
            None => {
                warn!("malformed difficulty distribution {value}, using default");
                Self::default()
            }
        }
    }

    fn try_from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let tier = |name: &str| -> Option<u32> {
            let pct = obj.get(name)?.as_f64()?;
            if !pct.is_finite() || pct < 0.0 || pct > u32::MAX as f64 {
                return None;
            }
            Some(pct.round() as u32)
        };
        Some(Self {
            beginner: tier("beginner")?,
            intermediate: tier("intermediate")?,
            advanced: tier("advanced")?,
        })
    }

    pub fn get(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Beginner => self.beginner,
            Difficulty::Intermediate => self.intermediate,
            Difficulty::Advanced => self.advanced,
        }
    }

    /// Split `count` across tiers. Beginner and intermediate are rounded shares,
    /// advanced takes the remainder. When the rounded shares overshoot `count`
    /// intermediate is capped first, then beginner, so no tier goes negative.
    pub fn allocate(&self, count: usize) -> TierCounts {
        let beginner = rounded_share(count, self.beginner);
        let intermediate = rounded_share(count, self.intermediate);

        let intermediate = intermediate.min(count.saturating_sub(beginner));
        let beginner = beginner.min(count);
        let advanced = count - beginner - intermediate;

        TierCounts {
            beginner,
            intermediate,
            advanced,
        }
    }
}

/// round(count * pct / 100), half away from zero
fn rounded_share(count: usize, pct: u32) -> usize {
    let scaled = count as u128 * pct as u128;
    ((scaled + 50) / 100).min(usize::MAX as u128) as usize
}

impl<'de> Deserialize<'de> for DifficultyDistribution {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// Per-tier sub-counts for one question type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TierCounts {
    pub beginner: usize,
    pub intermediate: usize,
    pub advanced: usize,
}

impl TierCounts {
    pub fn get(&self, difficulty: Difficulty) -> usize {
        match difficulty {
            Difficulty::Beginner => self.beginner,
            Difficulty::Intermediate => self.intermediate,
            Difficulty::Advanced => self.advanced,
        }
    }

    pub fn total(&self) -> usize {
        self.beginner + self.intermediate + self.advanced
    }
}
