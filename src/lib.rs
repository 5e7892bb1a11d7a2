//! # Vehicle k-d tree - nearest position queries in 2D
//!
//! A Rust library answering "which vehicle is closest to this point?" over a static
//! collection of vehicle positions, using a balanced 2D k-d tree.
//!
//! ## Features
//!
//! - **Median Construction**: Balanced tree built by in-place quickselect, splitting
//!   alternately on latitude and longitude
//! - **Branch-and-Bound Search**: Nearest neighbor search that skips subtrees which
//!   cannot hold a closer vehicle
//! - **Build Once, Query Many**: The tree is immutable after construction and can be
//!   shared across threads for concurrent queries
//! - **Record Loader**: Reads and writes the binary vehicle position format
//!
//! ## Quick Start
//!
//! ```rust
//! use vehicle_kdtree::prelude::*;
//!
//! let vehicles = vec![
//!     Vehicle::new(1, "AAA111", 34.5, -102.1).unwrap(),
//!     Vehicle::new(2, "BBB222", 32.3, -99.1).unwrap(),
//!     Vehicle::new(3, "CCC333", 33.2, -100.2).unwrap(),
//! ];
//!
//! // Build the index (consumes the vehicles)
//! let tree = KdTree::build(vehicles);
//!
//! // Query the nearest vehicle to a point
//! let target = Position::new(33.0, -100.0).unwrap();
//! let nearest = tree.find_nearest(target).unwrap();
//! assert_eq!(nearest.registration(), "CCC333");
//!
//! // An empty tree answers every query with `None`
//! let empty = KdTree::build(Vec::new());
//! assert!(empty.find_nearest(target).is_none());
//! ```
//!
//! ## How It Works
//!
//! Each node holds the median vehicle of its range along the axis for its depth
//! (latitude at even depths, longitude at odd ones). Everything in the left subtree
//! is `<=` the node on that axis and everything in the right subtree is `>=`.
//!
//! A search descends towards the target first, then backtracks. The far side of a
//! node is only visited when the distance from the target to the splitting line is
//! smaller than the distance to the best vehicle found so far.
//!
//! Distances are planar Euclidean distances in degrees.

pub mod error;
pub mod kdtree;
pub mod position;
pub mod prelude;
pub mod record;
pub mod select;

pub use error::{Error, Result};
pub use kdtree::{BuildOptions, KdTree, NodeRef};
pub use position::{Axis, Position, Vehicle};
pub use select::PivotStrategy;

#[cfg(test)]
mod component_tests;
