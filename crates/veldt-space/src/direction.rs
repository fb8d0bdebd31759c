//! Compass directions for single-step grid movement.

use std::fmt;

/// The eight compass directions plus "stay put".
///
/// North is `+y`, east is `+x`. A step moves exactly one unit on each
/// involved axis, so diagonal steps cover `(±1, ±1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// No movement.
    Stay,
    /// `(0, +1)`.
    North,
    /// `(+1, +1)`.
    NorthEast,
    /// `(+1, 0)`.
    East,
    /// `(+1, -1)`.
    SouthEast,
    /// `(0, -1)`.
    South,
    /// `(-1, -1)`.
    SouthWest,
    /// `(-1, 0)`.
    West,
    /// `(-1, +1)`.
    NorthWest,
}

impl Direction {
    /// All nine directions, `Stay` first, then clockwise from north.
    pub const ALL: [Direction; 9] = [
        Direction::Stay,
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// The eight moving directions, clockwise from north.
    pub const COMPASS: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Unit offset `(dx, dy)` of one step in this direction.
    pub fn offset(&self) -> (f64, f64) {
        match self {
            Self::Stay => (0.0, 0.0),
            Self::North => (0.0, 1.0),
            Self::NorthEast => (1.0, 1.0),
            Self::East => (1.0, 0.0),
            Self::SouthEast => (1.0, -1.0),
            Self::South => (0.0, -1.0),
            Self::SouthWest => (-1.0, -1.0),
            Self::West => (-1.0, 0.0),
            Self::NorthWest => (-1.0, 1.0),
        }
    }

    /// Compose a direction from per-axis movement signs.
    ///
    /// `dx > 0` means east, `dy > 0` means north; both zero is `Stay`.
    /// Used by the greedy move-toward heuristic, which decides each
    /// axis independently and prefers the diagonal when both want to
    /// move.
    pub fn from_signs(dx: i8, dy: i8) -> Self {
        match (dx.signum(), dy.signum()) {
            (0, 0) => Self::Stay,
            (0, 1) => Self::North,
            (1, 1) => Self::NorthEast,
            (1, 0) => Self::East,
            (1, -1) => Self::SouthEast,
            (0, -1) => Self::South,
            (-1, -1) => Self::SouthWest,
            (-1, 0) => Self::West,
            (-1, 1) => Self::NorthWest,
            _ => unreachable!("signum is always in -1..=1"),
        }
    }

    /// Parse a compass mnemonic: `"n"`, `"ne"`, `"en"`, `"s"`, `"sw"`,
    /// … in either letter order, case-insensitive. `""` and `"!"` mean
    /// `Stay`.
    pub fn from_compass(s: &str) -> Option<Self> {
        let lower = s.to_ascii_lowercase();
        let mut north = false;
        let mut south = false;
        let mut east = false;
        let mut west = false;
        for c in lower.chars() {
            match c {
                'n' => north = true,
                's' => south = true,
                'e' => east = true,
                'w' => west = true,
                '!' => {}
                _ => return None,
            }
        }
        if (north && south) || (east && west) {
            return None;
        }
        let dy = i8::from(north) - i8::from(south);
        let dx = i8::from(east) - i8::from(west);
        Some(Self::from_signs(dx, dy))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Stay => "stay",
            Self::North => "n",
            Self::NorthEast => "ne",
            Self::East => "e",
            Self::SouthEast => "se",
            Self::South => "s",
            Self::SouthWest => "sw",
            Self::West => "w",
            Self::NorthWest => "nw",
        };
        write!(f, "{s}")
    }
}
