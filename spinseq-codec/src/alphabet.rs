//! Alphabet tables for the motion token micro-grammar
//!
//! Fixed bidirectional mappings between domain enums and short ASCII
//! codes. The four alphabets are disjoint where the grammar requires it:
//!
//! - Grid locations use two-letter codes (`no ea so we ne se sw nw`)
//! - Orientations use one letter each (`i o k u`)
//! - Rotation directions use one letter each (`c w n`)
//! - Motion types use one letter each (`p a f d s`)
//!
//! The motion-type alphabet doubles as the stop set for the
//! variable-length turns field: the motion decoder scans forward until it
//! hits one of these letters, so no orientation code may collide with a
//! motion-type code. Rotation codes are likewise disjoint from both
//! one-letter alphabets. Location codes are parsed by fixed position and
//! only need to be pairwise distinct.
//!
//! Encoding is infallible by construction: the enums are closed, and
//! every variant has exactly one code.

use serde::{Deserialize, Serialize};

/// One of the 8 compass-point grid locations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridLocation {
    North,
    East,
    South,
    West,
    NorthEast,
    SouthEast,
    SouthWest,
    NorthWest,
}

impl GridLocation {
    /// Two-letter wire code for this location
    pub fn code(&self) -> &'static str {
        match self {
            GridLocation::North => "no",
            GridLocation::East => "ea",
            GridLocation::South => "so",
            GridLocation::West => "we",
            GridLocation::NorthEast => "ne",
            GridLocation::SouthEast => "se",
            GridLocation::SouthWest => "sw",
            GridLocation::NorthWest => "nw",
        }
    }

    /// Reverse-map a two-letter wire code
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "no" => Some(GridLocation::North),
            "ea" => Some(GridLocation::East),
            "so" => Some(GridLocation::South),
            "we" => Some(GridLocation::West),
            "ne" => Some(GridLocation::NorthEast),
            "se" => Some(GridLocation::SouthEast),
            "sw" => Some(GridLocation::SouthWest),
            "nw" => Some(GridLocation::NorthWest),
            _ => None,
        }
    }

    /// All location variants, for table-driven tests and generators
    pub fn all_variants() -> &'static [GridLocation] {
        &[
            GridLocation::North,
            GridLocation::East,
            GridLocation::South,
            GridLocation::West,
            GridLocation::NorthEast,
            GridLocation::SouthEast,
            GridLocation::SouthWest,
            GridLocation::NorthWest,
        ]
    }
}

impl std::fmt::Display for GridLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Hand orientation at a beat boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Facing in, toward the grid center
    In,
    /// Facing out, away from the grid center
    Out,
    /// Continuous clockwise spin
    ClockSpin,
    /// Continuous counter-clockwise spin
    CounterSpin,
}

impl Orientation {
    /// One-letter wire code for this orientation
    pub fn code(&self) -> char {
        match self {
            Orientation::In => 'i',
            Orientation::Out => 'o',
            Orientation::ClockSpin => 'k',
            Orientation::CounterSpin => 'u',
        }
    }

    /// Reverse-map a one-letter wire code
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'i' => Some(Orientation::In),
            'o' => Some(Orientation::Out),
            'k' => Some(Orientation::ClockSpin),
            'u' => Some(Orientation::CounterSpin),
            _ => None,
        }
    }

    /// All orientation variants
    pub fn all_variants() -> &'static [Orientation] {
        &[
            Orientation::In,
            Orientation::Out,
            Orientation::ClockSpin,
            Orientation::CounterSpin,
        ]
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Prop rotation direction over a beat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
    /// No rotation (static or dash motions)
    None,
}

impl RotationDirection {
    /// One-letter wire code for this rotation direction
    pub fn code(&self) -> char {
        match self {
            RotationDirection::Clockwise => 'c',
            RotationDirection::CounterClockwise => 'w',
            RotationDirection::None => 'n',
        }
    }

    /// Reverse-map a one-letter wire code
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'c' => Some(RotationDirection::Clockwise),
            'w' => Some(RotationDirection::CounterClockwise),
            'n' => Some(RotationDirection::None),
            _ => None,
        }
    }

    /// All rotation-direction variants
    pub fn all_variants() -> &'static [RotationDirection] {
        &[
            RotationDirection::Clockwise,
            RotationDirection::CounterClockwise,
            RotationDirection::None,
        ]
    }
}

impl std::fmt::Display for RotationDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Movement type for one hand over a beat
///
/// This alphabet is the stop set the motion decoder scans for when
/// consuming the variable-length turns field, so it must stay disjoint
/// from the orientation and rotation alphabets and from the decimal
/// digits. The float-turns sentinel shares the letter `f` with
/// `MotionType::Float`; the decoder disambiguates positionally (the
/// first character of the turns run is never a stop character).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionType {
    /// Prograde: prop rotates the same direction the hand travels
    Pro,
    /// Antigrade: prop rotates against the hand's travel
    Anti,
    /// Float: hand travels with no prop rotation
    Float,
    /// Dash: straight-line transit between locations
    Dash,
    /// Static: hand stays put
    Static,
}

impl MotionType {
    /// One-letter wire code for this motion type
    pub fn code(&self) -> char {
        match self {
            MotionType::Pro => 'p',
            MotionType::Anti => 'a',
            MotionType::Float => 'f',
            MotionType::Dash => 'd',
            MotionType::Static => 's',
        }
    }

    /// Reverse-map a one-letter wire code
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'p' => Some(MotionType::Pro),
            'a' => Some(MotionType::Anti),
            'f' => Some(MotionType::Float),
            'd' => Some(MotionType::Dash),
            's' => Some(MotionType::Static),
            _ => None,
        }
    }

    /// True if `c` belongs to the motion-type alphabet (turns stop set)
    pub fn is_code(c: char) -> bool {
        Self::from_code(c).is_some()
    }

    /// All motion-type variants
    pub fn all_variants() -> &'static [MotionType] {
        &[
            MotionType::Pro,
            MotionType::Anti,
            MotionType::Float,
            MotionType::Dash,
            MotionType::Static,
        ]
    }
}

impl std::fmt::Display for MotionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
