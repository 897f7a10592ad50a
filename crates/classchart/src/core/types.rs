//! Shared types for diagram generation
//!
//! Type descriptors, box sides, arrow directions, and integer points used
//! across the extraction, layout, and routing stages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized form of a type annotation
///
/// `Container` only arises from a subscripted annotation whose single
/// argument is a simple name; anything the resolver cannot reduce becomes
/// `Raw`, carrying the original expression text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeDescriptor {
    /// A bare type name, e.g. `Entity`
    Scalar(String),
    /// A single-argument generic, e.g. `List[Entity]`
    Container { outer: String, inner: String },
    /// Unreduced annotation text, kept verbatim
    Raw(String),
}

impl TypeDescriptor {
    /// The simple name this descriptor resolves to, if any
    pub fn scalar_name(&self) -> Option<&str> {
        match self {
            TypeDescriptor::Scalar(name) => Some(name),
            _ => None,
        }
    }

    /// Element names of a container, outer first
    ///
    /// Non-container descriptors flatten to nothing.
    pub fn flattened_names(&self) -> Vec<&str> {
        match self {
            TypeDescriptor::Container { outer, inner } => vec![outer, inner],
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Scalar(name) => write!(f, "{}", name),
            TypeDescriptor::Container { outer, inner } => write!(f, "{}[{}]", outer, inner),
            TypeDescriptor::Raw(text) => write!(f, "{}", text),
        }
    }
}

/// One of the four sides of a layout box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    North,
    South,
    East,
    West,
}

impl Side {
    /// All sides in the fixed enumeration order used for side selection
    ///
    /// Order is load-bearing: closest-side ties resolve to the first pair
    /// encountered in this order.
    pub const ALL: [Side; 4] = [Side::North, Side::South, Side::East, Side::West];

    /// Index into per-side counter arrays
    pub fn index(self) -> usize {
        match self {
            Side::North => 0,
            Side::South => 1,
            Side::East => 2,
            Side::West => 3,
        }
    }

    /// Arrow travel direction for a connection leaving this side
    pub fn direction(self) -> ArrowDirection {
        match self {
            Side::North => ArrowDirection::Up,
            Side::South => ArrowDirection::Down,
            Side::East => ArrowDirection::Right,
            Side::West => ArrowDirection::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Side::North => "north",
            Side::South => "south",
            Side::East => "east",
            Side::West => "west",
        };
        write!(f, "{}", name)
    }
}

/// Visual direction of a routed arrow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowDirection {
    Up,
    Down,
    Left,
    Right,
}

impl fmt::Display for ArrowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArrowDirection::Up => "up",
            ArrowDirection::Down => "down",
            ArrowDirection::Left => "left",
            ArrowDirection::Right => "right",
        };
        write!(f, "{}", name)
    }
}

/// Integer point in diagram coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
