//! Find the nearest vehicle to a point.
use vehicle_kdtree::prelude::*;

fn main() -> vehicle_kdtree::Result<()> {
    let tree = KdTree::build(vec![
        Vehicle::new(1, "AAA111", 34.5, -102.1)?,
        Vehicle::new(2, "BBB222", 32.3, -99.1)?,
        Vehicle::new(3, "CCC333", 33.2, -100.2)?,
    ]);

    let target = Position::new(33.0, -100.0)?;
    if let Some(vehicle) = tree.find_nearest(target) {
        println!(
            "Nearest vehicle: {} ({}) at {:.4}",
            vehicle.id(),
            vehicle.registration(),
            vehicle.distance_to(&target)
        );
    }
    Ok(())
}
