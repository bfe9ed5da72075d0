//! A* shortest-path search over the town grid.
//!
//! Classic A* with a binary heap keyed by `f = g + heuristic`. Ties on `f`
//! are broken FIFO via a monotonically increasing push counter, and the
//! neighbor tables iterate in coordinate order, so the search is fully
//! deterministic for identical inputs. The heap may hold stale duplicate
//! entries for a node whose score has since improved; those are skipped
//! lazily on pop instead of being deleted eagerly.

use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use super::grid::TownGrid;
use super::types::Coord;

/// Heap entry: (f-score, push sequence, node). Smallest f pops first;
/// among equal f-scores the earliest push wins.
type OpenEntry = Reverse<(OrderedFloat<f64>, u64, Coord)>;

/// Find a minimum-cost path from `start` to `goal`.
///
/// Returns the full node sequence including both endpoints, `Some([start])`
/// when the endpoints coincide, and `None` when either coordinate is not an
/// intersection or no connecting road sequence exists. An unreachable goal
/// is a legitimate outcome, not an error.
pub fn find_path(grid: &TownGrid, start: Coord, goal: Coord) -> Option<Vec<Coord>> {
    if !grid.contains(start) || !grid.contains(goal) {
        return None;
    }
    if start == goal {
        return Some(vec![start]);
    }

    let mut open: BinaryHeap<OpenEntry> = BinaryHeap::new();
    let mut g_score: HashMap<Coord, f64> = HashMap::new();
    let mut came_from: HashMap<Coord, Coord> = HashMap::new();
    let mut seq: u64 = 0;

    g_score.insert(start, 0.0);
    open.push(Reverse((
        OrderedFloat(grid.heuristic(&start, &goal)),
        seq,
        start,
    )));

    while let Some(Reverse((f, _, current))) = open.pop() {
        let g = match g_score.get(&current) {
            Some(g) => *g,
            None => continue,
        };
        // A stale entry carries the f-score of an older, worse g.
        if f.into_inner() > g + grid.heuristic(&current, &goal) {
            continue;
        }

        if current == goal {
            return Some(reconstruct(&came_from, current));
        }

        let Some(neighbors) = grid.neighbors(current) else {
            continue;
        };
        for (&neighbor, &weight) in neighbors {
            let tentative = g + weight;
            let improves = g_score
                .get(&neighbor)
                .is_none_or(|best| tentative < *best);
            if improves {
                came_from.insert(neighbor, current);
                g_score.insert(neighbor, tentative);
                seq += 1;
                open.push(Reverse((
                    OrderedFloat(tentative + grid.heuristic(&neighbor, &goal)),
                    seq,
                    neighbor,
                )));
            }
        }
    }

    None
}

fn reconstruct(came_from: &HashMap<Coord, Coord>, mut current: Coord) -> Vec<Coord> {
    let mut path = vec![current];
    while let Some(&previous) = came_from.get(&current) {
        current = previous;
        path.push(current);
    }
    path.reverse();
    path
}
