//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the crate.
//! Users can import everything they need with:
//!
//! ```
//! use vehicle_kdtree::prelude::*;
//! ```

pub use crate::{BuildOptions, KdTree, PivotStrategy, Position, Vehicle};
