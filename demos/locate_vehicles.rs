//! Locate the nearest vehicle to each of ten reference points.
//!
//! Reads a vehicle position file when a path is given, otherwise generates a
//! synthetic fleet of two million vehicles around the reference area:
//!
//! ```bash
//! cargo run --release --example locate_vehicles -- VehiclePositions.dat
//! RUST_LOG=debug cargo run --release --example locate_vehicles
//! ```

use rand::{Rng, SeedableRng};
use std::time::Instant;
use vehicle_kdtree::prelude::*;
use vehicle_kdtree::record;

const REFERENCE_POINTS: [(f64, f64); 10] = [
    (34.544909, -102.100843),
    (32.345544, -99.123124),
    (33.234235, -100.214124),
    (35.195739, -95.348899),
    (31.895839, -97.789573),
    (32.895839, -101.789573),
    (34.115839, -100.225732),
    (32.335839, -99.992232),
    (33.535339, -94.792232),
    (32.234235, -100.222222),
];

const SYNTHETIC_FLEET: i32 = 2_000_000;

fn synthetic_fleet() -> vehicle_kdtree::Result<Vec<Vehicle>> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(1_519_330_080);
    (1..=SYNTHETIC_FLEET)
        .map(|i| {
            let lat = f64::from(rng.random_range(30.0_f32..36.0));
            let lon = f64::from(rng.random_range(-103.0_f32..-94.0));
            let stamp = 1_519_330_080 + rng.random_range(0..86_400);
            Vehicle::with_timestamp(i, format!("{:02} SYN {:05}", i % 100, i % 100_000), lat, lon, stamp)
        })
        .collect()
}

fn main() -> vehicle_kdtree::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let total = Instant::now();

    let load_start = Instant::now();
    let vehicles = match std::env::args().nth(1) {
        Some(path) => record::load(&path)?,
        None => synthetic_fleet()?,
    };
    let load_time = load_start.elapsed();
    println!("Loaded {} vehicle positions in {:.2}ms", vehicles.len(), load_time.as_secs_f64() * 1000.0);

    let build_start = Instant::now();
    let tree = KdTree::build(vehicles);
    let build_time = build_start.elapsed();
    println!("Built k-d tree (depth {}) in {:.2}ms\n", tree.depth(), build_time.as_secs_f64() * 1000.0);

    let query_start = Instant::now();
    for (n, &(lat, lon)) in REFERENCE_POINTS.iter().enumerate() {
        let target = Position::new(lat, lon)?;
        match tree.find_nearest_with_distance(target) {
            Some((vehicle, distance)) => println!(
                "{:>2}: ({:.6}, {:.6}) -> id {} [{}] at ({:.6}, {:.6}), distance {:.6}",
                n + 1,
                lat,
                lon,
                vehicle.id(),
                vehicle.registration(),
                vehicle.position().latitude(),
                vehicle.position().longitude(),
                distance
            ),
            None => println!("{:>2}: ({:.6}, {:.6}) -> no vehicles", n + 1, lat, lon),
        }
    }
    let query_time = query_start.elapsed();

    println!("\nProfile Summary:");
    println!("  Loading:   {:.2}ms", load_time.as_secs_f64() * 1000.0);
    println!("  Building:  {:.2}ms", build_time.as_secs_f64() * 1000.0);
    println!("  Querying:  {:.2}µs", query_time.as_secs_f64() * 1_000_000.0);
    println!("  Total:     {:.2}ms", total.elapsed().as_secs_f64() * 1000.0);
    Ok(())
}
