//! Quickselect over vehicles by one coordinate axis.
//!
//! Used by the tree builder to find the median of a range without sorting it.
//! Partitioning is Lomuto style: elements strictly less than the pivot move left,
//! everything else stays right, and the pivot is swapped into its final slot.

use crate::position::{Axis, Vehicle};

/// How the pivot of each partition step is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PivotStrategy {
    /// Always the last element of the range.
    ///
    /// Quadratic on input already ordered along the split axis.
    Last,
    /// Median of the first, middle and last elements.
    #[default]
    MedianOfThree,
}

/// Reorders `items` so that the element of rank `k` along `axis` sits at index `k`.
///
/// Afterwards every element before `k` has a coordinate `<=` that of `items[k]` and
/// every element after it has a coordinate `>=`. Relative order of equal elements
/// is not preserved.
///
/// # Panics
/// Panics if `k >= items.len()`.
pub fn select_nth(items: &mut [Vehicle], k: usize, axis: Axis, pivot: PivotStrategy) {
    assert!(k < items.len(), "select rank {k} out of range for {} items", items.len());

    let mut low = 0;
    let mut high = items.len() - 1;
    while low < high {
        let p = partition(items, low, high, axis, pivot);
        if k == p {
            return;
        } else if k < p {
            high = p - 1;
        } else {
            low = p + 1;
        }
    }
}

/// Partitions `items[low..=high]` around a pivot and returns its final index.
fn partition(items: &mut [Vehicle], low: usize, high: usize, axis: Axis, pivot: PivotStrategy) -> usize {
    if pivot == PivotStrategy::MedianOfThree {
        let m = median_of_three(items, low, high, axis);
        items.swap(m, high);
    }

    let pivot_value = items[high].coord(axis);
    let mut store = low;
    for i in low..high {
        if items[i].coord(axis) < pivot_value {
            items.swap(i, store);
            store += 1;
        }
    }
    items.swap(store, high);
    store
}

/// Index of the median of the first, middle and last elements of the range
fn median_of_three(items: &[Vehicle], low: usize, high: usize, axis: Axis) -> usize {
    let mid = low + (high - low) / 2;
    let a = items[low].coord(axis);
    let b = items[mid].coord(axis);
    let c = items[high].coord(axis);

    if (a <= b) == (b <= c) {
        mid
    } else if (b <= a) == (a <= c) {
        low
    } else {
        high
    }
}
