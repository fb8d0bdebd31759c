//! Distance metrics and pseudo-distance conversions.

use crate::error::SpaceError;
use std::fmt;
use std::str::FromStr;

/// Distance metric of a surface.
///
/// Queries order candidates by *pseudo-distance*: a monotone proxy for
/// the true distance that is cheaper to compute. For Euclidean the
/// pseudo-distance is the squared distance (no square root per
/// candidate); for Manhattan and Chebyshev pseudo and true coincide.
/// Monotonicity is what lets the incremental radius search compare
/// candidates without ever converting, so every variant here must keep
/// pseudo-ordering identical to true-ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Metric {
    /// Straight-line (L2) distance; pseudo-distance is its square.
    #[default]
    Euclidean,
    /// Taxicab (L1) distance: `|dx| + |dy|`.
    Manhattan,
    /// Chessboard (L-inf) distance: `max(|dx|, |dy|)`.
    Chebyshev,
}

impl Metric {
    /// Pseudo-distance for non-negative axis deltas.
    pub fn pseudo(&self, dx: f64, dy: f64) -> f64 {
        match self {
            Self::Euclidean => dx * dx + dy * dy,
            Self::Manhattan => dx + dy,
            Self::Chebyshev => dx.max(dy),
        }
    }

    /// Convert a pseudo-distance back to a true distance.
    pub fn true_from_pseudo(&self, pseudo: f64) -> f64 {
        match self {
            Self::Euclidean => pseudo.sqrt(),
            Self::Manhattan | Self::Chebyshev => pseudo,
        }
    }

    /// Convert a true distance (e.g. a search radius) to the
    /// pseudo-distance scale.
    pub fn pseudo_from_true(&self, distance: f64) -> f64 {
        match self {
            Self::Euclidean => distance * distance,
            Self::Manhattan | Self::Chebyshev => distance,
        }
    }

    /// One-letter external code ('e', 'm' or 'c').
    pub fn code(&self) -> char {
        match self {
            Self::Euclidean => 'e',
            Self::Manhattan => 'm',
            Self::Chebyshev => 'c',
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Euclidean => write!(f, "euclidean"),
            Self::Manhattan => write!(f, "manhattan"),
            Self::Chebyshev => write!(f, "chebyshev"),
        }
    }
}

impl FromStr for Metric {
    type Err = SpaceError;

    /// Parse the external metric specifier: the one-letter codes `e` /
    /// `m` / `c` (case-insensitive), their full names, or the legacy
    /// numeric codes `0` / `1` / `2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "e" | "0" | "euclidean" => Ok(Self::Euclidean),
            "m" | "1" | "manhattan" => Ok(Self::Manhattan),
            "c" | "2" | "chebyshev" => Ok(Self::Chebyshev),
            _ => Err(SpaceError::InvalidMetric {
                code: s.to_string(),
            }),
        }
    }
}
