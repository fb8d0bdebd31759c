//! Error types for topology construction and geometric operations.

use std::fmt;

/// Errors arising from topology construction or geometric queries.
#[derive(Debug, Clone, PartialEq)]
pub enum SpaceError {
    /// Attempted to construct a surface with zero cells.
    EmptySurface,
    /// A dimension exceeds the representable maximum.
    DimensionTooLarge {
        /// Which dimension ("width" or "height").
        name: &'static str,
        /// The offending value.
        value: u32,
        /// The maximum allowed value.
        max: u32,
    },
    /// A position lies outside the surface and no wrap applies.
    OutOfRange {
        /// X coordinate of the offending position.
        x: f64,
        /// Y coordinate of the offending position.
        y: f64,
        /// Human-readable description of the valid range.
        bounds: String,
    },
    /// Interpolation was requested on an axis whose two wrap sides
    /// differ; the shorter path is direction-dependent and undefined.
    AsymmetricWrap {
        /// Which axis ("x" or "y").
        axis: &'static str,
    },
    /// A relative interpolation position lies outside `[0, 1]`.
    InvalidRelativePosition {
        /// The offending value.
        value: f64,
    },
    /// A metric code could not be parsed.
    InvalidMetric {
        /// The unrecognized code.
        code: String,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySurface => write!(f, "surface must have at least one cell"),
            Self::DimensionTooLarge { name, value, max } => {
                write!(f, "{name} = {value} exceeds maximum dimension {max}")
            }
            Self::OutOfRange { x, y, bounds } => {
                write!(f, "position ({x}, {y}) out of range: {bounds}")
            }
            Self::AsymmetricWrap { axis } => {
                write!(f, "interpolation undefined on {axis} axis with mixed wrap sides")
            }
            Self::InvalidRelativePosition { value } => {
                write!(f, "relative position {value} outside [0, 1]")
            }
            Self::InvalidMetric { code } => {
                write!(f, "unrecognized distance metric '{code}'")
            }
        }
    }
}

impl std::error::Error for SpaceError {}
