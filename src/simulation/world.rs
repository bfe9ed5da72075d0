//! Main simulation world that ties everything together.
//!
//! `SimWorld` owns the town grid and every vehicle, and is the only
//! mutator: callers register vehicles, adjust road weights before routing,
//! and then drive the simulation one tick at a time. One tick updates every
//! signal exactly once and then lets every vehicle attempt one move, in
//! registration order. Vehicles never contend for space, so update order
//! does not affect outcomes.

use anyhow::Result;
use log::{debug, warn};
use rand::Rng;

use super::grid::TownGrid;
use super::pathfinding::find_path;
use super::signals::SignalTiming;
use super::types::{Coord, VehicleId};
use super::vehicle::Vehicle;

/// The simulation driver.
pub struct SimWorld {
    grid: TownGrid,
    timing: SignalTiming,
    /// Global signal clock; every node's color derives from this plus the
    /// node's own offset.
    signal_step: u64,
    /// Number of `step()` calls issued so far.
    tick: u64,
    /// Vehicles in registration order, which is also update order.
    vehicles: Vec<Vehicle>,
}

impl SimWorld {
    /// Take ownership of a grid and prepare it for simulation. Initial
    /// signal colors are derived from the pre-increment step, consistent
    /// with where the first tick will move them.
    pub fn new(grid: TownGrid, timing: SignalTiming) -> Self {
        let mut world = Self {
            grid,
            timing,
            signal_step: timing.initial_step(),
            tick: 0,
            vehicles: Vec::new(),
        };
        world.refresh_signals();
        world
    }

    /// Assign every intersection a random phase offset in
    /// `[0, cycle_length)` to desynchronize the signals, then refresh the
    /// displayed colors. Meant to be called before the first tick; after
    /// construction the signals are fully deterministic again.
    pub fn randomize_signal_offsets(&mut self, rng: &mut impl Rng) {
        let cycle = self.timing.cycle_length();
        // Coordinate order so a seeded RNG reproduces the same offsets.
        for coord in self.grid.coords() {
            let offset = rng.random_range(0..cycle);
            if let Some(node) = self.grid.node_mut(coord) {
                node.offset = offset;
            }
        }
        self.refresh_signals();
    }

    /// Register a vehicle, routing it immediately. An unreachable goal
    /// leaves the vehicle with an empty path (immediately complete) rather
    /// than failing.
    pub fn add_vehicle(&mut self, start: Coord, goal: Coord) -> VehicleId {
        let path = match find_path(&self.grid, start, goal) {
            Some(path) => {
                debug!("routed vehicle {start} -> {goal} in {} hops", path.len() - 1);
                path
            }
            None => {
                warn!("no route from {start} to {goal}; vehicle marked unreachable");
                Vec::new()
            }
        };
        let id = VehicleId(self.vehicles.len());
        self.vehicles.push(Vehicle::new(start, goal, path));
        id
    }

    /// Advance the simulation one tick: signals first, then every vehicle
    /// attempts one move in registration order.
    pub fn step(&mut self) {
        self.tick += 1;
        self.signal_step += 1;
        self.refresh_signals();
        for vehicle in &mut self.vehicles {
            vehicle.attempt_move(&self.grid);
        }
    }

    /// True once every registered vehicle has arrived, vehicles with
    /// unreachable goals included. Repeated calls without `step()` always
    /// agree.
    pub fn is_complete(&self) -> bool {
        self.vehicles.iter().all(Vehicle::has_arrived)
    }

    /// Pre-simulation configuration hook: adjust the weight of an existing
    /// road. Paths computed before the edit are deliberately left alone;
    /// there is no replanning.
    pub fn set_road_weight(&mut self, a: Coord, b: Coord, weight: f64) -> Result<()> {
        self.grid.set_road_weight(a, b, weight)
    }

    pub fn grid(&self) -> &TownGrid {
        &self.grid
    }

    pub fn timing(&self) -> SignalTiming {
        self.timing
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.get(id.0)
    }

    /// Number of vehicles that have reached the end of their path,
    /// unreachable ones excluded.
    pub fn arrived_count(&self) -> usize {
        self.vehicles
            .iter()
            .filter(|v| v.has_arrived() && !v.is_unreachable())
            .count()
    }

    pub fn unreachable_count(&self) -> usize {
        self.vehicles.iter().filter(|v| v.is_unreachable()).count()
    }

    /// Recompute every node's cached color from the current signal step.
    fn refresh_signals(&mut self) {
        let timing = self.timing;
        let step = self.signal_step;
        for node in self.grid.nodes_mut() {
            node.signal = timing.color_at(step, node.offset);
        }
    }
}
