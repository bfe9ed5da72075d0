//! Core types for the traffic simulation.

use std::fmt;

/// An intersection coordinate on the town grid.
///
/// Coordinates are plain integers so they can double as stable node keys.
/// `Ord` is derived so coordinate collections can be iterated in a
/// deterministic order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another coordinate.
    pub fn manhattan(&self, other: &Coord) -> f64 {
        ((self.x - other.x).abs() + (self.y - other.y).abs()) as f64
    }

    /// Euclidean distance to another coordinate.
    pub fn euclidean(&self, other: &Coord) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// The displayed color of an intersection's traffic signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalColor {
    Green,
    Yellow,
    Red,
}

impl SignalColor {
    /// Single-character label used by the ASCII map.
    pub fn glyph(&self) -> char {
        match self {
            SignalColor::Green => 'G',
            SignalColor::Yellow => 'Y',
            SignalColor::Red => 'R',
        }
    }
}

/// A wrapper type for vehicle handles issued by the simulation driver.
///
/// Wraps the vehicle's registration index, which is also its update order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VehicleId(pub usize);
