//! Town grid: intersections and weighted roads.
//!
//! The grid is an arena-style node table indexed by coordinate. Topology is
//! fixed at construction time; only road weights may change afterwards, and
//! only between nodes that are already neighbors.

use anyhow::{bail, Result};
use log::debug;
use rand::seq::IndexedRandom;
use rand::Rng;
use std::collections::{BTreeMap, HashMap};

use super::types::{Coord, SignalColor};

/// An intersection in the town.
///
/// `neighbors` maps each adjacent intersection to the weight (travel cost)
/// of the connecting road. A `BTreeMap` keeps neighbor iteration in
/// coordinate order, which keeps path search deterministic.
#[derive(Debug, Clone)]
pub struct Node {
    pub coord: Coord,
    pub neighbors: BTreeMap<Coord, f64>,
    /// Cached signal color, recomputed by the driver every tick.
    pub signal: SignalColor,
    /// Phase offset added to the global signal step for this node.
    pub offset: u64,
}

impl Node {
    fn new(coord: Coord) -> Self {
        Self {
            coord,
            neighbors: BTreeMap::new(),
            signal: SignalColor::Red,
            offset: 0,
        }
    }
}

/// Grid-based town with roads connecting intersections.
///
/// Roads are undirected: every edge is stored in both endpoints' neighbor
/// tables with the same weight.
#[derive(Debug, Clone)]
pub struct TownGrid {
    pub width: i32,
    pub height: i32,
    nodes: HashMap<Coord, Node>,
}

impl TownGrid {
    /// Create a `width` x `height` grid where every intersection connects to
    /// its 4-directional neighbors with unit-cost roads.
    pub fn uniform(width: i32, height: i32) -> Self {
        let mut grid = Self::empty(width, height);

        for x in 0..width {
            for y in 0..height {
                let coord = Coord::new(x, y);
                for (dx, dy) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
                    let other = Coord::new(x + dx, y + dy);
                    if other.x >= 0 && other.x < width && other.y >= 0 && other.y < height {
                        if let Some(node) = grid.nodes.get_mut(&coord) {
                            node.neighbors.insert(other, 1.0);
                        }
                    }
                }
            }
        }

        grid
    }

    /// Create a grid with the same node set as [`TownGrid::uniform`] but
    /// randomized roads: each intersection picks 2-4 distinct other
    /// intersections (anywhere on the grid) and connects to them with a road
    /// weighted by Euclidean distance. Edges are added symmetrically, so
    /// node degrees can exceed 4 once other nodes' picks land on them.
    pub fn random_roads(width: i32, height: i32, rng: &mut impl Rng) -> Self {
        let mut grid = Self::empty(width, height);

        let mut coords: Vec<Coord> = Vec::with_capacity((width * height) as usize);
        for x in 0..width {
            for y in 0..height {
                coords.push(Coord::new(x, y));
            }
        }

        for &coord in &coords {
            let others: Vec<Coord> = coords.iter().copied().filter(|c| *c != coord).collect();
            let picks = rng.random_range(2..=4).min(others.len());
            let chosen: Vec<Coord> = others.choose_multiple(rng, picks).copied().collect();

            for other in chosen {
                let weight = coord.euclidean(&other);
                if let Some(node) = grid.nodes.get_mut(&coord) {
                    node.neighbors.insert(other, weight);
                }
                if let Some(node) = grid.nodes.get_mut(&other) {
                    node.neighbors.insert(coord, weight);
                }
            }
        }

        grid
    }

    fn empty(width: i32, height: i32) -> Self {
        let mut nodes = HashMap::with_capacity((width * height).max(0) as usize);
        for x in 0..width {
            for y in 0..height {
                let coord = Coord::new(x, y);
                nodes.insert(coord, Node::new(coord));
            }
        }
        Self {
            width,
            height,
            nodes,
        }
    }

    /// Set the weight of the existing road between `a` and `b`, in both
    /// directions. Fails without touching the grid when the road does not
    /// exist or the weight is not positive; a weight edit never creates a
    /// new road.
    pub fn set_road_weight(&mut self, a: Coord, b: Coord, weight: f64) -> Result<()> {
        if weight.is_nan() || weight <= 0.0 {
            bail!("road weight must be positive, got {weight}");
        }
        match self.nodes.get_mut(&a) {
            Some(node) if node.neighbors.contains_key(&b) => {
                node.neighbors.insert(b, weight);
            }
            _ => bail!("no road between {a} and {b}"),
        }
        // Symmetry invariant: b lists a whenever a lists b.
        if let Some(node) = self.nodes.get_mut(&b) {
            node.neighbors.insert(a, weight);
        }
        debug!("road {a} <-> {b} reweighted to {weight}");
        Ok(())
    }

    /// Manhattan-distance heuristic used by the path search.
    ///
    /// Known approximation: with random roads, edge weights are Euclidean
    /// and long diagonal roads can be cheaper than the Manhattan estimate,
    /// so the heuristic is not admissible there and returned paths are
    /// best-effort rather than guaranteed minimal. On the uniform grid it is
    /// exact. Kept as-is so results stay reproducible.
    pub fn heuristic(&self, a: &Coord, b: &Coord) -> f64 {
        a.manhattan(b)
    }

    /// Look up a node; `None` for coordinates with no intersection.
    pub fn node(&self, coord: Coord) -> Option<&Node> {
        self.nodes.get(&coord)
    }

    /// The neighbor-to-weight table of an intersection.
    pub fn neighbors(&self, coord: Coord) -> Option<&BTreeMap<Coord, f64>> {
        self.nodes.get(&coord).map(|node| &node.neighbors)
    }

    /// Weight of the road from `a` to `b`, if one exists.
    pub fn edge_weight(&self, a: Coord, b: Coord) -> Option<f64> {
        self.nodes.get(&a)?.neighbors.get(&b).copied()
    }

    /// Current signal color at an intersection.
    pub fn signal_at(&self, coord: Coord) -> Option<SignalColor> {
        self.nodes.get(&coord).map(|node| node.signal)
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.nodes.contains_key(&coord)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected roads.
    pub fn road_count(&self) -> usize {
        let directed: usize = self.nodes.values().map(|node| node.neighbors.len()).sum();
        directed / 2
    }

    /// All intersection coordinates in row-major order.
    pub fn coords(&self) -> Vec<Coord> {
        let mut coords: Vec<Coord> = self.nodes.keys().copied().collect();
        coords.sort();
        coords
    }

    pub(crate) fn node_mut(&mut self, coord: Coord) -> Option<&mut Node> {
        self.nodes.get_mut(&coord)
    }

    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.values_mut()
    }
}
