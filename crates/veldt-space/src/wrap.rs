//! Per-side edge wrapping configuration.

/// Which sides of a surface wrap around to the opposite edge.
///
/// The four sides are independent: a cylinder wraps `left` and `right`
/// only, a torus wraps all four. Asymmetric configurations (say, `left`
/// without `right`) are legal for movement — an entity stepping off the
/// left edge reappears at the right — but operations that interpolate
/// between two points require both sides of an axis to agree, because
/// otherwise the shorter path depends on travel direction.
///
/// # Examples
///
/// ```
/// use veldt_space::WrapConfig;
///
/// assert!(WrapConfig::TORUS.full_x() && WrapConfig::TORUS.full_y());
/// assert!(!WrapConfig::NONE.any());
/// assert_eq!(WrapConfig::from_bits(0b1111), WrapConfig::TORUS);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WrapConfig {
    /// Crossing the left edge (x < 0) wraps to the right side.
    pub left: bool,
    /// Crossing the right edge (x >= width) wraps to the left side.
    pub right: bool,
    /// Crossing the top edge (y >= height) wraps to the bottom.
    pub top: bool,
    /// Crossing the bottom edge (y < 0) wraps to the top.
    pub bottom: bool,
}

impl WrapConfig {
    /// No side wraps; all four edges are hard borders.
    pub const NONE: Self = Self {
        left: false,
        right: false,
        top: false,
        bottom: false,
    };

    /// All four sides wrap: toroidal topology.
    pub const TORUS: Self = Self {
        left: true,
        right: true,
        top: true,
        bottom: true,
    };

    /// Left and right wrap, top and bottom are borders (horizontal
    /// cylinder).
    pub const HORIZONTAL: Self = Self {
        left: true,
        right: true,
        top: false,
        bottom: false,
    };

    /// Top and bottom wrap, left and right are borders (vertical
    /// cylinder).
    pub const VERTICAL: Self = Self {
        left: false,
        right: false,
        top: true,
        bottom: true,
    };

    /// Decode the external combined wrap specifier.
    ///
    /// Bit 0 = left, bit 1 = right, bit 2 = top, bit 3 = bottom; higher
    /// bits are ignored. `0` is [`WrapConfig::NONE`], `0b1111` is
    /// [`WrapConfig::TORUS`].
    pub fn from_bits(bits: u8) -> Self {
        Self {
            left: bits & 0b0001 != 0,
            right: bits & 0b0010 != 0,
            top: bits & 0b0100 != 0,
            bottom: bits & 0b1000 != 0,
        }
    }

    /// Whether any side wraps.
    pub fn any(&self) -> bool {
        self.left || self.right || self.top || self.bottom
    }

    /// Whether both sides of the x axis wrap.
    pub fn full_x(&self) -> bool {
        self.left && self.right
    }

    /// Whether both sides of the y axis wrap.
    pub fn full_y(&self) -> bool {
        self.top && self.bottom
    }

    /// Whether the two sides of the x axis agree (both wrap or neither).
    pub fn symmetric_x(&self) -> bool {
        self.left == self.right
    }

    /// Whether the two sides of the y axis agree (both wrap or neither).
    pub fn symmetric_y(&self) -> bool {
        self.top == self.bottom
    }
}

impl Default for WrapConfig {
    fn default() -> Self {
        Self::NONE
    }
}
