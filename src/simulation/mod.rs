//! Core traffic simulation logic.
//!
//! Everything here runs headless and synchronously: the grid, the signal
//! timing, the A* path search and the per-tick vehicle updates. Rendering
//! lives outside this module and only reads the state exposed here.

mod grid;
mod pathfinding;
mod signals;
mod types;
mod vehicle;
mod world;

pub use grid::{Node, TownGrid};
pub use pathfinding::find_path;
pub use signals::SignalTiming;
pub use types::{Coord, SignalColor, VehicleId};
pub use vehicle::Vehicle;
pub use world::SimWorld;
