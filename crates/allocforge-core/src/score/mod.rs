//! Score types for ranking candidate workers
//!
//! Scores are fixed-point values with three decimal places held in an `i64`,
//! so candidate comparison is exact and reproducible across runs. Arithmetic
//! saturates at the `i64` bounds.

mod breakdown;


use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

pub use breakdown::{ScoreBreakdown, ScoreTerm};

/// Scale factor for 3 decimal places of precision.
pub const SCALE: i64 = 1_000;

/// A desirability score for a (unit, worker) pair. Higher is better.
///
/// Internal values are stored pre-scaled. Use [`of`](Self::of) for whole
/// points or [`of_scaled`](Self::of_scaled) for milli-points.
///
/// # Examples
///
/// ```
/// use allocforge_core::AllocationScore;
///
/// let a = AllocationScore::of(105);
/// let b = AllocationScore::of_scaled(80_500);
/// assert!(a > b);
/// assert_eq!(b.to_string(), "80.5");
/// assert_eq!("80.5".parse::<AllocationScore>().unwrap(), b);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AllocationScore {
    scaled: i64,
}

impl AllocationScore {
    /// The zero score.
    pub const ZERO: AllocationScore = AllocationScore { scaled: 0 };

    /// Creates a score from whole points.
    #[inline]
    pub const fn of(points: i64) -> Self {
        AllocationScore {
            scaled: points.saturating_mul(SCALE),
        }
    }

    /// Creates a score from milli-points.
    #[inline]
    pub const fn of_scaled(scaled: i64) -> Self {
        AllocationScore { scaled }
    }

    /// Returns the raw milli-point value.
    #[inline]
    pub const fn scaled(&self) -> i64 {
        self.scaled
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.scaled == 0
    }

    /// Returns the score as a float, for display and JSON output.
    pub fn to_f64(&self) -> f64 {
        self.scaled as f64 / SCALE as f64
    }
}

impl Add for AllocationScore {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        AllocationScore::of_scaled(self.scaled.saturating_add(other.scaled))
    }
}

impl Sub for AllocationScore {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        AllocationScore::of_scaled(self.scaled.saturating_sub(other.scaled))
    }
}

impl Neg for AllocationScore {
    type Output = Self;

    fn neg(self) -> Self {
        AllocationScore::of_scaled(self.scaled.saturating_neg())
    }
}

impl Sum for AllocationScore {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(AllocationScore::ZERO, Add::add)
    }
}

impl fmt::Debug for AllocationScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AllocationScore({})", self)
    }
}

impl fmt::Display for AllocationScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.scaled < 0 { "-" } else { "" };
        let abs = self.scaled.unsigned_abs();
        let whole = abs / SCALE as u64;
        let frac = abs % SCALE as u64;
        if frac == 0 {
            write!(f, "{}{}", sign, whole)
        } else {
            let digits = format!("{:03}", frac);
            write!(f, "{}{}.{}", sign, whole, digits.trim_end_matches('0'))
        }
    }
}

/// Error when parsing a score from string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Score parse error: {message}")]
pub struct ScoreParseError {
    pub message: String,
}

impl FromStr for AllocationScore {
    type Err = ScoreParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || ScoreParseError {
            message: format!("Invalid score '{}': expected a decimal number", s),
        };

        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (whole, frac) = match body.split_once('.') {
            Some((w, f)) => (w, f),
            None => (body, ""),
        };
        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if whole.is_empty() || frac.len() > 3 || !all_digits(whole) || !all_digits(frac) {
            return Err(err());
        }
        let whole: i64 = whole.parse().map_err(|_| err())?;
        let frac_scaled: i64 = if frac.is_empty() {
            0
        } else {
            let padded = format!("{:0<3}", frac);
            padded.parse().map_err(|_| err())?
        };
        let scaled = whole
            .checked_mul(SCALE)
            .and_then(|w| w.checked_add(frac_scaled))
            .ok_or_else(err)?;
        Ok(AllocationScore::of_scaled(if negative { -scaled } else { scaled }))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for AllocationScore {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for AllocationScore {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = <f64 as serde::Deserialize>::deserialize(deserializer)?;
        Ok(AllocationScore::of_scaled((value * SCALE as f64).round() as i64))
    }
}
