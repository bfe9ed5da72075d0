//! Grid-Town Traffic Simulation
//!
//! A small traffic simulation library: vehicles are routed through a
//! grid-shaped town with A* and advance one intersection per tick, waiting
//! at red and yellow signals. The `display` module renders simulation state
//! to the terminal and never mutates it.

pub mod display;
pub mod simulation;
