//! Per-term score breakdown used to explain an assignment.

use std::fmt;

use super::AllocationScore;

/// The three weighted terms that make up an allocation score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreTerm {
    /// Baseline reward for a fully serviceable task.
    Fulfillment,
    /// Reward for worker headroom at decision time.
    Fairness,
    /// Task priority (or duration when no explicit priority is set).
    Priority,
}

impl ScoreTerm {
    /// All terms, in reporting order.
    pub const ALL: [ScoreTerm; 3] = [
        ScoreTerm::Fulfillment,
        ScoreTerm::Fairness,
        ScoreTerm::Priority,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ScoreTerm::Fulfillment => "fulfillment",
            ScoreTerm::Fairness => "fairness",
            ScoreTerm::Priority => "priority",
        }
    }
}

/// Weighted contribution of each term to a candidate's score.
///
/// # Examples
///
/// ```
/// use allocforge_core::{AllocationScore, ScoreBreakdown};
///
/// let breakdown = ScoreBreakdown::new(
///     AllocationScore::of(50),
///     AllocationScore::of(25),
///     AllocationScore::of(5),
/// );
/// assert_eq!(breakdown.total(), AllocationScore::of(80));
/// assert_eq!(
///     breakdown.to_string(),
///     "fulfillment 50 + fairness 25 + priority 5 = 80"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreBreakdown {
    pub fulfillment: AllocationScore,
    pub fairness: AllocationScore,
    pub priority: AllocationScore,
}

impl ScoreBreakdown {
    pub const ZERO: ScoreBreakdown = ScoreBreakdown {
        fulfillment: AllocationScore::ZERO,
        fairness: AllocationScore::ZERO,
        priority: AllocationScore::ZERO,
    };

    pub fn new(
        fulfillment: AllocationScore,
        fairness: AllocationScore,
        priority: AllocationScore,
    ) -> Self {
        Self {
            fulfillment,
            fairness,
            priority,
        }
    }

    /// Sum of all terms.
    pub fn total(&self) -> AllocationScore {
        self.fulfillment + self.fairness + self.priority
    }

    /// Returns the contribution of a single term.
    pub fn term(&self, term: ScoreTerm) -> AllocationScore {
        match term {
            ScoreTerm::Fulfillment => self.fulfillment,
            ScoreTerm::Fairness => self.fairness,
            ScoreTerm::Priority => self.priority,
        }
    }
}

impl fmt::Display for ScoreBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "fulfillment {} + fairness {} + priority {} = {}",
            self.fulfillment,
            self.fairness,
            self.priority,
            self.total()
        )
    }
}
