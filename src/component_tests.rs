//! Component tests for KdTree - testing each method individually
//! This file provides granular test coverage of construction and search

#[cfg(test)]
mod tests {
    use crate::{Axis, BuildOptions, KdTree, NodeRef, PivotStrategy, Position, Vehicle};
    use rand::{Rng, SeedableRng};

    fn vehicle(id: i32, lat: f64, lon: f64) -> Vehicle {
        Vehicle::new(id, format!("REG{id:03}"), lat, lon).unwrap()
    }

    fn pos(lat: f64, lon: f64) -> Position {
        Position::new(lat, lon).unwrap()
    }

    /// Every vehicle in `node`'s subtree, collected depth first
    fn subtree<'a>(node: NodeRef<'a>, out: &mut Vec<&'a Vehicle>) {
        out.push(node.vehicle());
        if let Some(left) = node.left() {
            subtree(left, out);
        }
        if let Some(right) = node.right() {
            subtree(right, out);
        }
    }

    /// Asserts the splitting invariant on every node below (and including) `node`
    fn assert_invariant(node: NodeRef<'_>) {
        let axis = node.axis();
        let split = node.vehicle().position().coord(axis);

        if let Some(left) = node.left() {
            let mut below = Vec::new();
            subtree(left, &mut below);
            for v in below {
                assert!(v.position().coord(axis) <= split, "left descendant {} above split", v.id());
            }
            assert_invariant(left);
        }
        if let Some(right) = node.right() {
            let mut below = Vec::new();
            subtree(right, &mut below);
            for v in below {
                assert!(v.position().coord(axis) >= split, "right descendant {} below split", v.id());
            }
            assert_invariant(right);
        }
    }

    // ============================================================================
    // BUILD TESTS
    // ============================================================================

    #[test]
    fn test_build_empty_tree() {
        let tree = KdTree::build(Vec::new());
        assert_eq!(tree.len(), 0);
        assert!(tree.is_empty());
        assert_eq!(tree.depth(), 0);
        assert!(tree.root().is_none(), "Empty tree must have no root");
    }

    #[test]
    fn test_default_is_empty() {
        let tree = KdTree::default();
        assert!(tree.is_empty());
    }

    #[test]
    fn test_build_single_item() {
        let tree = KdTree::build(vec![vehicle(1, 10.0, 20.0)]);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.depth(), 1);
        let root = tree.root().unwrap();
        assert!(root.is_leaf(), "Single node must be a leaf");
        assert_eq!(root.vehicle().id(), 1);
        assert_eq!(root.depth(), 0);
        assert_eq!(root.axis(), Axis::Latitude);
    }

    #[test]
    fn test_build_two_items() {
        let tree = KdTree::build(vec![vehicle(1, 5.0, 0.0), vehicle(2, 1.0, 0.0)]);
        let root = tree.root().unwrap();
        // mid = (0 + 1) / 2 = 0, so the smaller latitude is the root
        assert_eq!(root.vehicle().id(), 2);
        assert!(root.left().is_none());
        assert_eq!(root.right().unwrap().vehicle().id(), 1);
        assert_invariant(root);
    }

    #[test]
    fn test_root_is_latitude_median() {
        let vehicles = (0..7).map(|i| vehicle(i, f64::from(i * 10), f64::from(-i))).rev().collect();
        let tree = KdTree::build(vehicles);
        let root = tree.root().unwrap();
        assert_eq!(root.vehicle().position().latitude(), 30.0);

        let left = root.left().unwrap();
        let right = root.right().unwrap();
        assert_eq!(left.axis(), Axis::Longitude);
        assert_eq!(right.axis(), Axis::Longitude);
        // Left holds latitudes 0, 10, 20 with longitudes 0, -1, -2; median longitude -1
        assert_eq!(left.vehicle().position().longitude(), -1.0);
        assert_eq!(right.vehicle().position().longitude(), -5.0);
    }

    #[test]
    fn test_build_is_balanced() {
        for n in [1, 2, 3, 4, 7, 8, 15, 16, 100, 1000] {
            let vehicles = (0..n).map(|i| vehicle(i, f64::from(i % 13), f64::from(i % 7))).collect();
            let tree = KdTree::build(vehicles);
            let expected = (usize::BITS - usize::try_from(n).unwrap().leading_zeros()) as usize;
            assert_eq!(tree.depth(), expected, "Tree of {n} items should have depth {expected}");
        }
    }

    #[test]
    fn test_build_keeps_every_vehicle() {
        for n in [0, 1, 2, 3, 10, 11, 64] {
            let vehicles: Vec<Vehicle> = (0..n).map(|i| vehicle(i, f64::from(i * 7 % 5), f64::from(i * 3 % 11))).collect();
            let tree = KdTree::build(vehicles);

            let mut seen = Vec::new();
            if let Some(root) = tree.root() {
                subtree(root, &mut seen);
            }
            let mut ids: Vec<i32> = seen.iter().map(|v| v.id()).collect();
            ids.sort_unstable();
            assert_eq!(ids, (0..n).collect::<Vec<_>>(), "Reachable set differs for n = {n}");

            let mut arena: Vec<i32> = tree.iter().map(Vehicle::id).collect();
            arena.sort_unstable();
            assert_eq!(arena, ids);
        }
    }

    #[test]
    fn test_random_inputs_keep_invariant_and_every_vehicle() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(314);
        for pivot in [PivotStrategy::Last, PivotStrategy::MedianOfThree] {
            for n in 0..=120 {
                // Coordinates from a small integer range so duplicates are common
                let vehicles: Vec<Vehicle> = (0..n)
                    .map(|i| vehicle(i, f64::from(rng.random_range(-4..=4)), f64::from(rng.random_range(-4..=4))))
                    .collect();
                let options = BuildOptions::default().with_pivot(pivot);
                let tree = KdTree::build_with(vehicles, options);
                assert_eq!(tree.len(), usize::try_from(n).unwrap(), "{pivot:?} tree of {n} has wrong length");

                let Some(root) = tree.root() else {
                    assert_eq!(n, 0, "{pivot:?} tree of {n} has no root");
                    continue;
                };
                assert_invariant(root);

                let mut seen = Vec::new();
                subtree(root, &mut seen);
                let mut ids: Vec<i32> = seen.iter().map(|v| v.id()).collect();
                ids.sort_unstable();
                assert_eq!(ids, (0..n).collect::<Vec<_>>(), "{pivot:?} tree of {n} lost or duplicated vehicles");
            }
        }
    }

    #[test]
    fn test_invariant_with_duplicates() {
        let vehicles = (0..50).map(|i| vehicle(i, f64::from(i % 3), f64::from(i % 2))).collect();
        let tree = KdTree::build(vehicles);
        assert_invariant(tree.root().unwrap());
    }

    #[test]
    fn test_invariant_all_identical() {
        let vehicles = (0..33).map(|i| vehicle(i, 1.0, 1.0)).collect();
        let tree = KdTree::build_with(vehicles, BuildOptions::default().with_pivot(PivotStrategy::Last));
        assert_eq!(tree.len(), 33);
        assert_invariant(tree.root().unwrap());
    }

    #[test]
    fn test_invariant_sorted_input_both_pivots() {
        for pivot in [PivotStrategy::Last, PivotStrategy::MedianOfThree] {
            let ascending = (0..257).map(|i| vehicle(i, f64::from(i), f64::from(i))).collect();
            let tree = KdTree::build_with(ascending, BuildOptions::default().with_pivot(pivot));
            assert_invariant(tree.root().unwrap());

            let descending = (0..257).map(|i| vehicle(i, f64::from(-i), f64::from(-i))).collect();
            let tree = KdTree::build_with(descending, BuildOptions::default().with_pivot(pivot));
            assert_invariant(tree.root().unwrap());
            assert_eq!(tree.depth(), 9);
        }
    }

    #[test]
    fn test_from_iterator() {
        let tree: KdTree = (0..5).map(|i| vehicle(i, f64::from(i), 0.0)).collect();
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn test_default_options_use_median_of_three() {
        assert_eq!(BuildOptions::default().pivot, PivotStrategy::MedianOfThree);
        assert_eq!(BuildOptions::default().with_pivot(PivotStrategy::Last).pivot, PivotStrategy::Last);
    }

    // ============================================================================
    // NEAREST QUERY TESTS
    // ============================================================================

    #[test]
    fn test_nearest_empty_tree() {
        let tree = KdTree::build(Vec::new());
        assert!(tree.find_nearest(pos(0.0, 0.0)).is_none());
        assert!(tree.find_nearest_with_distance(pos(10.0, -10.0)).is_none());
        assert!(tree.query_nearest(1.0, 1.0).unwrap().is_none());
    }

    #[test]
    fn test_nearest_singleton() {
        let tree = KdTree::build(vec![vehicle(42, 1.0, 2.0)]);
        for target in [pos(1.0, 2.0), pos(-90.0, 180.0), pos(1e6, -1e6), pos(0.0, 0.0)] {
            assert_eq!(tree.find_nearest(target).unwrap().id(), 42);
        }
    }

    #[test]
    fn test_nearest_three_vehicles() {
        let tree = KdTree::build(vec![
            Vehicle::new(1, "AAA111", 34.5, -102.1).unwrap(),
            Vehicle::new(2, "BBB222", 32.3, -99.1).unwrap(),
            Vehicle::new(3, "CCC333", 33.2, -100.2).unwrap(),
        ]);
        let (nearest, distance) = tree.find_nearest_with_distance(pos(33.0, -100.0)).unwrap();
        assert_eq!(nearest.id(), 3);
        assert_eq!(nearest.registration(), "CCC333");
        assert!((distance - 0.08_f64.sqrt()).abs() < 1e-9, "distance was {distance}");
    }

    #[test]
    fn test_nearest_exact_match() {
        let vehicles = (0..20).map(|i| vehicle(i, f64::from(i), f64::from(2 * i))).collect();
        let tree = KdTree::build(vehicles);
        let (nearest, distance) = tree.find_nearest_with_distance(pos(7.0, 14.0)).unwrap();
        assert_eq!(nearest.id(), 7);
        assert_eq!(distance, 0.0);
    }

    #[test]
    fn test_nearest_requires_far_side() {
        // The target falls left of the root split but the closest vehicle is on the right
        let tree = KdTree::build(vec![
            vehicle(1, 0.0, 100.0),
            vehicle(2, 10.0, 0.0),
            vehicle(3, 10.1, 0.0),
            vehicle(4, 20.0, 50.0),
            vehicle(5, -20.0, 50.0),
        ]);
        assert_eq!(tree.find_nearest(pos(9.9, 0.0)).unwrap().id(), 2);
        assert_eq!(tree.find_nearest(pos(10.06, 0.0)).unwrap().id(), 3);
    }

    #[test]
    fn test_nearest_is_idempotent() {
        let vehicles = (0..100).map(|i| vehicle(i, f64::from(i % 10), f64::from(i / 10))).collect();
        let tree = KdTree::build(vehicles);
        let target = pos(4.5, 4.5);
        let first = tree.find_nearest(target).unwrap().id();
        for _ in 0..10 {
            assert_eq!(tree.find_nearest(target).unwrap().id(), first);
        }
    }

    #[test]
    fn test_nearest_with_ties() {
        let tree = KdTree::build(vec![vehicle(1, 1.0, 0.0), vehicle(2, -1.0, 0.0), vehicle(3, 0.0, 1.0)]);
        let (nearest, distance) = tree.find_nearest_with_distance(pos(0.0, 0.0)).unwrap();
        assert!([1, 2, 3].contains(&nearest.id()));
        assert_eq!(distance, 1.0);
    }

    #[test]
    fn test_query_nearest_rejects_non_finite() {
        let tree = KdTree::build(vec![vehicle(1, 0.0, 0.0)]);
        assert!(tree.query_nearest(f64::NAN, 0.0).is_err(), "NaN query must be rejected");
        assert!(tree.query_nearest(0.0, f64::INFINITY).is_err(), "infinite query must be rejected");
        assert_eq!(tree.query_nearest(0.5, 0.5).unwrap().unwrap().id(), 1);
    }

    #[test]
    fn test_tree_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<KdTree>();
    }
}
