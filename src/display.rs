//! ASCII rendering of simulation state.
//!
//! The display layer is a plain reader: it holds no state of its own and
//! polls the [`SimWorld`](crate::simulation::SimWorld) queries after each
//! tick. Nothing in this module mutates the simulation.

use crate::simulation::{Coord, SimWorld};

/// Horizontal spacing between intersection glyphs in the map.
const CELL_WIDTH: usize = 4;
/// Vertical spacing between intersection rows.
const CELL_HEIGHT: usize = 2;

/// Render the town as a character map.
///
/// Intersections show their signal color (`G`/`Y`/`R`); roads between
/// grid-adjacent intersections are drawn as `-` and `|`. A vehicle
/// overlays its intersection as its registration index modulo 10, or `*`
/// when several vehicles share one intersection. Long-distance roads from
/// the randomized topology have no glyph of their own; the intersections
/// and vehicles still render.
pub fn render_map(world: &SimWorld) -> String {
    let grid = world.grid();
    if grid.width <= 0 || grid.height <= 0 {
        return String::new();
    }

    let cols = (grid.width as usize - 1) * CELL_WIDTH + 1;
    let rows = (grid.height as usize - 1) * CELL_HEIGHT + 1;
    let mut canvas = vec![vec![' '; cols]; rows];

    // Roads between grid-adjacent intersections.
    for x in 0..grid.width {
        for y in 0..grid.height {
            let here = Coord::new(x, y);
            let col = x as usize * CELL_WIDTH;
            let row = y as usize * CELL_HEIGHT;

            if grid.edge_weight(here, Coord::new(x + 1, y)).is_some() {
                for offset in 1..CELL_WIDTH {
                    canvas[row][col + offset] = '-';
                }
            }
            if grid.edge_weight(here, Coord::new(x, y + 1)).is_some() {
                canvas[row + 1][col] = '|';
            }
        }
    }

    // Intersections, colored by signal.
    for x in 0..grid.width {
        for y in 0..grid.height {
            if let Some(signal) = grid.signal_at(Coord::new(x, y)) {
                canvas[y as usize * CELL_HEIGHT][x as usize * CELL_WIDTH] = signal.glyph();
            }
        }
    }

    // Vehicles overlay their current intersection.
    for (index, vehicle) in world.vehicles().iter().enumerate() {
        let Some(position) = vehicle.position() else {
            continue;
        };
        if position.x < 0 || position.x >= grid.width || position.y < 0 || position.y >= grid.height
        {
            continue;
        }
        let row = position.y as usize * CELL_HEIGHT;
        let col = position.x as usize * CELL_WIDTH;
        let glyph = char::from_digit((index % 10) as u32, 10).unwrap_or('?');
        canvas[row][col] = match canvas[row][col] {
            'G' | 'Y' | 'R' => glyph,
            _ => '*',
        };
    }

    let mut out = String::with_capacity(rows * (cols + 1));
    for row in canvas {
        out.extend(row);
        out.push('\n');
    }
    out
}

/// Render a one-screen textual summary of the simulation state.
pub fn render_summary(world: &SimWorld) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "tick {} | intersections: {} | roads: {}\n",
        world.tick(),
        world.grid().node_count(),
        world.grid().road_count()
    ));
    out.push_str(&format!(
        "vehicles: {} total, {} arrived, {} unreachable\n",
        world.vehicles().len(),
        world.arrived_count(),
        world.unreachable_count()
    ));

    for (index, vehicle) in world.vehicles().iter().enumerate() {
        if vehicle.is_unreachable() {
            out.push_str(&format!(
                "  vehicle {index}: {} -> {} unreachable\n",
                vehicle.start(),
                vehicle.goal()
            ));
            continue;
        }
        let status = if vehicle.has_arrived() { "arrived" } else { "en route" };
        if let Some(position) = vehicle.position() {
            out.push_str(&format!(
                "  vehicle {index}: {} -> {} at {} [{}/{}] {status}\n",
                vehicle.start(),
                vehicle.goal(),
                position,
                vehicle.position_index(),
                vehicle.path().len() - 1,
            ));
        }
    }
    out
}
