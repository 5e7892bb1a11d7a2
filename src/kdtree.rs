//! Static 2D k-d tree over vehicle positions.
//!
//! The tree is built once from a collection of vehicles and is read-only afterwards.
//! Construction recursively places the median of each range (found by quickselect)
//! at the middle index, alternating the split axis between latitude and longitude.
//!
//! Nodes live in a single arena. The arena slot of a node is exactly the index its
//! vehicle ended up at in the working array, so no vehicle is ever copied: the
//! reordered array is zipped with the child links once partitioning is done.
//! Children are `Option<usize>` arena indices; `None` means no subtree.

use tracing::debug;

use crate::error::Result;
use crate::position::{Axis, Position, Vehicle};
use crate::select::{PivotStrategy, select_nth};

/// Options controlling how a [`KdTree`] is built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Pivot rule used by the median selection
    pub pivot: PivotStrategy,
}

impl BuildOptions {
    /// Replaces the pivot strategy
    #[must_use]
    pub const fn with_pivot(mut self, pivot: PivotStrategy) -> Self {
        self.pivot = pivot;
        self
    }
}

#[derive(Clone, Debug)]
struct Node {
    vehicle: Vehicle,
    left: Option<usize>,
    right: Option<usize>,
}

#[derive(Clone, Copy, Debug, Default)]
struct Links {
    left: Option<usize>,
    right: Option<usize>,
}

/// Balanced 2D k-d tree answering nearest-vehicle queries.
///
/// # Example
/// ```
/// use vehicle_kdtree::{KdTree, Position, Vehicle};
///
/// let tree = KdTree::build(vec![
///     Vehicle::new(1, "AAA111", 34.5, -102.1).unwrap(),
///     Vehicle::new(2, "BBB222", 32.3, -99.1).unwrap(),
///     Vehicle::new(3, "CCC333", 33.2, -100.2).unwrap(),
/// ]);
///
/// let nearest = tree.find_nearest(Position::new(33.0, -100.0).unwrap()).unwrap();
/// assert_eq!(nearest.id(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct KdTree {
    /// Arena of nodes, one per vehicle
    nodes: Vec<Node>,
    /// Arena index of the root, `None` for an empty tree
    root: Option<usize>,
    /// Number of levels (0 when empty)
    depth: usize,
}

impl KdTree {
    /// Builds a tree with the default [`BuildOptions`].
    ///
    /// Empty input yields an empty tree.
    #[must_use]
    pub fn build(vehicles: Vec<Vehicle>) -> Self {
        Self::build_with(vehicles, BuildOptions::default())
    }

    /// Builds a tree with explicit options.
    #[must_use]
    pub fn build_with(mut vehicles: Vec<Vehicle>, options: BuildOptions) -> Self {
        let count = vehicles.len();
        let mut links = vec![Links::default(); count];
        let mut depth = 0;
        let root = build_range(&mut vehicles, &mut links, 0, count, 0, options.pivot, &mut depth);

        let nodes = vehicles
            .into_iter()
            .zip(links)
            .map(|(vehicle, link)| Node { vehicle, left: link.left, right: link.right })
            .collect();

        debug!(count, depth, pivot = ?options.pivot, "built k-d tree");
        Self { nodes, root, depth }
    }

    /// Number of stored vehicles
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no vehicles
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of levels from the root to the deepest leaf (0 when empty)
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Iterates over all stored vehicles in arena order
    pub fn iter(&self) -> impl Iterator<Item = &Vehicle> + '_ {
        self.nodes.iter().map(|node| &node.vehicle)
    }

    /// Root node, `None` for an empty tree
    #[must_use]
    pub fn root(&self) -> Option<NodeRef<'_>> {
        self.root.map(|index| NodeRef { tree: self, index, depth: 0 })
    }

    /// Finds the vehicle closest to `target` by Euclidean distance.
    ///
    /// Returns `None` only when the tree is empty. Among equally close vehicles the
    /// one reached first by the traversal wins, which is stable for a given tree.
    #[must_use]
    pub fn find_nearest(&self, target: Position) -> Option<&Vehicle> {
        self.find_nearest_with_distance(target).map(|(vehicle, _)| vehicle)
    }

    /// Like [`find_nearest`](Self::find_nearest), also returning the distance.
    #[must_use]
    pub fn find_nearest_with_distance(&self, target: Position) -> Option<(&Vehicle, f64)> {
        let root = self.root?;
        let mut best = None;
        self.nearest_in(root, Axis::Latitude, &target, &mut best);
        best.map(|(index, dist_sq)| (&self.nodes[index].vehicle, dist_sq.sqrt()))
    }

    /// Validates raw query coordinates, then runs [`find_nearest`](Self::find_nearest).
    ///
    /// # Errors
    /// Returns [`Error::NonFiniteCoordinate`](crate::Error::NonFiniteCoordinate) if
    /// either coordinate is NaN or infinite.
    pub fn query_nearest(&self, latitude: f64, longitude: f64) -> Result<Option<&Vehicle>> {
        Ok(self.find_nearest(Position::new(latitude, longitude)?))
    }

    /// Descends into the near side first, then visits the far side only when the
    /// splitting line is strictly closer than the best candidate so far.
    /// `best` holds (arena index, squared distance).
    fn nearest_in(&self, index: usize, axis: Axis, target: &Position, best: &mut Option<(usize, f64)>) {
        let node = &self.nodes[index];
        let split = node.vehicle.coord(axis);
        let offset = target.coord(axis) - split;

        let (near, far) = if offset < 0.0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        if let Some(child) = near {
            self.nearest_in(child, axis.next(), target, best);
        }

        let dist_sq = node.vehicle.position().distance_squared(target);
        if (*best).is_none_or(|(_, best_sq)| dist_sq < best_sq) {
            *best = Some((index, dist_sq));
        }

        if let Some(child) = far {
            let plane_sq = offset * offset;
            if (*best).is_none_or(|(_, best_sq)| plane_sq < best_sq) {
                self.nearest_in(child, axis.next(), target, best);
            }
        }
    }
}

impl Default for KdTree {
    fn default() -> Self {
        Self::build(Vec::new())
    }
}

impl FromIterator<Vehicle> for KdTree {
    fn from_iter<I: IntoIterator<Item = Vehicle>>(iter: I) -> Self {
        Self::build(iter.into_iter().collect())
    }
}

/// Places the median of `vehicles[low..end]` at the middle index and links its
/// subtrees. Returns the arena index of the subtree root.
fn build_range(
    vehicles: &mut [Vehicle],
    links: &mut [Links],
    low: usize,
    end: usize,
    depth: usize,
    pivot: PivotStrategy,
    max_depth: &mut usize,
) -> Option<usize> {
    if low >= end {
        return None;
    }

    let axis = Axis::for_depth(depth);
    let mid = low + (end - 1 - low) / 2;
    select_nth(&mut vehicles[low..end], mid - low, axis, pivot);

    *max_depth = (*max_depth).max(depth + 1);
    let left = build_range(vehicles, links, low, mid, depth + 1, pivot, max_depth);
    let right = build_range(vehicles, links, mid + 1, end, depth + 1, pivot, max_depth);
    links[mid] = Links { left, right };
    Some(mid)
}

/// Read-only view of a node, used to walk the tree structure.
#[derive(Clone, Copy, Debug)]
pub struct NodeRef<'a> {
    tree: &'a KdTree,
    index: usize,
    depth: usize,
}

impl<'a> NodeRef<'a> {
    /// Vehicle owned by this node
    #[must_use]
    pub fn vehicle(&self) -> &'a Vehicle {
        &self.tree.nodes[self.index].vehicle
    }

    /// Left subtree (coordinates `<=` this node's on [`axis`](Self::axis))
    #[must_use]
    pub fn left(&self) -> Option<Self> {
        self.child(self.tree.nodes[self.index].left)
    }

    /// Right subtree (coordinates `>=` this node's on [`axis`](Self::axis))
    #[must_use]
    pub fn right(&self) -> Option<Self> {
        self.child(self.tree.nodes[self.index].right)
    }

    /// Depth of this node, root = 0
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Axis this node splits on
    #[must_use]
    pub const fn axis(&self) -> Axis {
        Axis::for_depth(self.depth)
    }

    /// Whether the node has no children
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.left().is_none() && self.right().is_none()
    }

    fn child(&self, index: Option<usize>) -> Option<Self> {
        index.map(|index| Self { tree: self.tree, index, depth: self.depth + 1 })
    }
}
