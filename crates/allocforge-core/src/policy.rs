//! Prioritization policy: the weights applied to each score term.

use std::fmt;
use std::str::FromStr;

/// Non-negative weights for the priority, fairness and fulfillment terms.
///
/// When every weight is zero all candidates score zero and the allocator
/// falls back to the lexicographic worker tie-break.
///
/// # Examples
///
/// ```
/// use allocforge_core::{PolicyPreset, PrioritizationPolicy};
///
/// let policy = PrioritizationPolicy::default();
/// assert_eq!(policy, PrioritizationPolicy::new(5, 5, 5));
///
/// let fair = PolicyPreset::FairDistribution.policy();
/// assert_eq!(fair.fairness_weight, 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PrioritizationPolicy {
    pub priority_weight: u32,
    pub fairness_weight: u32,
    pub fulfillment_weight: u32,
}

impl PrioritizationPolicy {
    pub const fn new(priority_weight: u32, fairness_weight: u32, fulfillment_weight: u32) -> Self {
        Self {
            priority_weight,
            fairness_weight,
            fulfillment_weight,
        }
    }

    /// Returns true if every weight is zero.
    pub fn is_zero(&self) -> bool {
        self.priority_weight == 0 && self.fairness_weight == 0 && self.fulfillment_weight == 0
    }
}

impl Default for PrioritizationPolicy {
    fn default() -> Self {
        PolicyPreset::Balanced.policy()
    }
}

/// Named weight profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyPreset {
    /// Equal weights (5, 5, 5).
    Balanced,
    /// Favors serving every task (3, 2, 10).
    MaximizeFulfillment,
    /// Favors spreading load across workers (4, 10, 5).
    FairDistribution,
    /// Favors high-priority and long tasks (10, 1, 3).
    FastestDelivery,
}

impl PolicyPreset {
    pub const ALL: [PolicyPreset; 4] = [
        PolicyPreset::Balanced,
        PolicyPreset::MaximizeFulfillment,
        PolicyPreset::FairDistribution,
        PolicyPreset::FastestDelivery,
    ];

    /// Weights as (priority, fairness, fulfillment).
    pub const fn policy(&self) -> PrioritizationPolicy {
        match self {
            PolicyPreset::Balanced => PrioritizationPolicy::new(5, 5, 5),
            PolicyPreset::MaximizeFulfillment => PrioritizationPolicy::new(3, 2, 10),
            PolicyPreset::FairDistribution => PrioritizationPolicy::new(4, 10, 5),
            PolicyPreset::FastestDelivery => PrioritizationPolicy::new(10, 1, 3),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PolicyPreset::Balanced => "balanced",
            PolicyPreset::MaximizeFulfillment => "maximize_fulfillment",
            PolicyPreset::FairDistribution => "fair_distribution",
            PolicyPreset::FastestDelivery => "fastest_delivery",
        }
    }
}

impl fmt::Display for PolicyPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unrecognized preset name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown policy preset: {0}")]
pub struct UnknownPresetError(pub String);

impl FromStr for PolicyPreset {
    type Err = UnknownPresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        PolicyPreset::ALL
            .into_iter()
            .find(|p| p.name() == normalized)
            .ok_or_else(|| UnknownPresetError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(
            PolicyPreset::MaximizeFulfillment.policy(),
            PrioritizationPolicy::new(3, 2, 10)
        );
        assert_eq!(
            PolicyPreset::FastestDelivery.policy(),
            PrioritizationPolicy::new(10, 1, 3)
        );
    }

    #[test]
    fn test_parse_preset() {
        assert_eq!(
            "Fair Distribution".parse::<PolicyPreset>().unwrap(),
            PolicyPreset::FairDistribution
        );
        assert_eq!(
            "fastest-delivery".parse::<PolicyPreset>().unwrap(),
            PolicyPreset::FastestDelivery
        );
        assert!("greedy".parse::<PolicyPreset>().is_err());
    }

    #[test]
    fn test_is_zero() {
        assert!(PrioritizationPolicy::new(0, 0, 0).is_zero());
        assert!(!PrioritizationPolicy::new(0, 1, 0).is_zero());
    }
}
