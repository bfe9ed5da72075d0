//! Vehicle state and the per-tick movement rule.

use super::grid::TownGrid;
use super::types::{Coord, SignalColor};

/// A vehicle moving through the town along a precomputed path.
///
/// The path is assigned once, when the vehicle is registered with the
/// driver, and is never recomputed. A vehicle whose goal turned out to be
/// unreachable keeps an empty path and counts as arrived immediately, so
/// completion checks cannot hang on it; callers distinguish that case with
/// [`Vehicle::is_unreachable`].
#[derive(Debug, Clone)]
pub struct Vehicle {
    start: Coord,
    goal: Coord,
    path: Vec<Coord>,
    position_index: usize,
}

impl Vehicle {
    pub(crate) fn new(start: Coord, goal: Coord, path: Vec<Coord>) -> Self {
        Self {
            start,
            goal,
            path,
            position_index: 0,
        }
    }

    pub fn start(&self) -> Coord {
        self.start
    }

    pub fn goal(&self) -> Coord {
        self.goal
    }

    /// The full computed path, start and goal inclusive. Empty when the
    /// goal was unreachable at registration time.
    pub fn path(&self) -> &[Coord] {
        &self.path
    }

    /// Index of the vehicle's current intersection within its path.
    pub fn position_index(&self) -> usize {
        self.position_index
    }

    /// The intersection the vehicle currently occupies, if it was routed.
    pub fn position(&self) -> Option<Coord> {
        self.path.get(self.position_index).copied()
    }

    /// True once the vehicle sits on the last path element. Also true for
    /// an empty (unreachable) path.
    pub fn has_arrived(&self) -> bool {
        self.position_index + 1 >= self.path.len()
    }

    /// True when routing failed at registration time.
    pub fn is_unreachable(&self) -> bool {
        self.path.is_empty()
    }

    /// Advance one intersection along the path if the next intersection
    /// shows green; yellow and red both hold the vehicle in place. At most
    /// one move per tick; arrived vehicles never move again.
    pub(crate) fn attempt_move(&mut self, grid: &TownGrid) {
        if self.has_arrived() {
            return;
        }
        let next = self.path[self.position_index + 1];
        if grid.signal_at(next) == Some(SignalColor::Green) {
            self.position_index += 1;
        }
    }
}
