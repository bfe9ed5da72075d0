use clap::Parser;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use gridtown::display;
use gridtown::simulation::{Coord, SignalTiming, SimWorld, TownGrid};

/// Number of roads the demo reweights to fake heavier traffic.
const TRAFFIC_SKEWS: usize = 15;

#[derive(Parser)]
#[command(name = "gridtown")]
#[command(about = "Grid-town traffic simulation with A* routing and timed signals")]
struct Cli {
    /// Town width in intersections
    #[arg(long, default_value = "10")]
    width: i32,

    /// Town height in intersections
    #[arg(long, default_value = "10")]
    height: i32,

    /// Number of vehicles with random start/goal pairs
    #[arg(long, default_value = "20")]
    vehicles: usize,

    /// Replace the uniform grid with 2-4 random roads per intersection
    #[arg(long)]
    random_roads: bool,

    /// Give every intersection a random signal phase offset
    #[arg(long)]
    random_signals: bool,

    /// Green phase duration in ticks
    #[arg(long, default_value = "2")]
    green: u64,

    /// Yellow phase duration in ticks
    #[arg(long, default_value = "1")]
    yellow: u64,

    /// Red phase duration in ticks (defaults to the green duration)
    #[arg(long)]
    red: Option<u64>,

    /// RNG seed for a reproducible run (omit for OS entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Safety cap on the number of ticks to run
    #[arg(long, default_value = "500")]
    max_ticks: u64,

    /// Wall-clock delay between ticks in milliseconds
    #[arg(long, default_value = "300")]
    tick_ms: u64,

    /// Skip the ASCII map and only print summaries
    #[arg(long)]
    no_map: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if cli.width < 1 || cli.height < 1 {
        eprintln!("Error: town dimensions must be at least 1x1");
        std::process::exit(1);
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let grid = if cli.random_roads {
        TownGrid::random_roads(cli.width, cli.height, &mut rng)
    } else {
        TownGrid::uniform(cli.width, cli.height)
    };

    let timing = match cli.red {
        Some(red) => SignalTiming::new(cli.green, cli.yellow, red),
        None => SignalTiming::with_default_red(cli.green, cli.yellow),
    };

    let mut world = SimWorld::new(grid, timing);
    if cli.random_signals {
        world.randomize_signal_offsets(&mut rng);
    }

    skew_traffic(&mut world, &mut rng);
    spawn_vehicles(&mut world, cli.vehicles, &mut rng);

    println!("=== Grid-Town Traffic Simulation ===");
    while !world.is_complete() && world.tick() < cli.max_ticks {
        if !cli.no_map {
            println!("{}", display::render_map(&world));
        }
        println!("{}", display::render_summary(&world));
        world.step();
        std::thread::sleep(std::time::Duration::from_millis(cli.tick_ms));
    }

    if !cli.no_map {
        println!("{}", display::render_map(&world));
    }
    println!("{}", display::render_summary(&world));

    info!("=== SIMULATION COMPLETE ===");
    info!("Ticks run: {}", world.tick());
    info!("Total vehicles: {}", world.vehicles().len());
    info!("Vehicles arrived: {}", world.arrived_count());
    info!("Vehicles unreachable: {}", world.unreachable_count());
    if !world.is_complete() {
        warn!("tick cap of {} reached before completion", cli.max_ticks);
    }
}

/// Reweight a handful of random roads to simulate heavy traffic: uniform
/// weights in 2.0-6.0, existing roads only.
fn skew_traffic(world: &mut SimWorld, rng: &mut StdRng) {
    for _ in 0..TRAFFIC_SKEWS {
        let a = Coord::new(
            rng.random_range(0..world.grid().width),
            rng.random_range(0..world.grid().height),
        );
        let Some(neighbors) = world.grid().neighbors(a) else {
            continue;
        };
        let candidates: Vec<Coord> = neighbors.keys().copied().collect();
        let Some(&b) = candidates.choose(rng) else {
            continue;
        };
        let weight = rng.random_range(2.0..6.0);
        if let Err(err) = world.set_road_weight(a, b, weight) {
            warn!("skipping traffic skew: {err}");
        }
    }
}

fn spawn_vehicles(world: &mut SimWorld, count: usize, rng: &mut StdRng) {
    let (width, height) = (world.grid().width, world.grid().height);
    if (width as i64) * (height as i64) < 2 {
        warn!("town too small for distinct start/goal pairs; spawning no vehicles");
        return;
    }
    for _ in 0..count {
        let start = Coord::new(rng.random_range(0..width), rng.random_range(0..height));
        let mut goal = start;
        while goal == start {
            goal = Coord::new(rng.random_range(0..width), rng.random_range(0..height));
        }
        world.add_vehicle(start, goal);
    }
}
