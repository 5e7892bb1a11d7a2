//! Positions, splitting axes and the vehicles stored in the tree.
//!
//! Coordinates are validated once at construction, so everything downstream can
//! treat latitude and longitude as totally ordered finite numbers.

use crate::error::{Error, Result};

/// Coordinate axis used to split the tree at a given depth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Latitude, used at even depths
    Latitude,
    /// Longitude, used at odd depths
    Longitude,
}

impl Axis {
    /// Axis for a node at `depth` (root = 0)
    #[inline]
    #[must_use]
    pub const fn for_depth(depth: usize) -> Self {
        if depth % 2 == 0 { Self::Latitude } else { Self::Longitude }
    }

    /// Axis used one level further down
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Latitude => Self::Longitude,
            Self::Longitude => Self::Latitude,
        }
    }
}

/// A finite 2D coordinate pair (latitude, longitude).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    latitude: f64,
    longitude: f64,
}

impl Position {
    /// Creates a position, rejecting NaN and infinities.
    ///
    /// # Errors
    /// Returns [`Error::NonFiniteCoordinate`] if either value is not finite.
    ///
    /// # Example
    /// ```
    /// use vehicle_kdtree::Position;
    /// let p = Position::new(33.0, -100.0).unwrap();
    /// assert_eq!(p.latitude(), 33.0);
    /// assert!(Position::new(f64::NAN, 0.0).is_err());
    /// ```
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(Error::NonFiniteCoordinate { latitude, longitude });
        }
        Ok(Self { latitude, longitude })
    }

    /// Latitude component
    #[inline]
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude component
    #[inline]
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Component on the given axis
    #[inline]
    #[must_use]
    pub const fn coord(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Latitude => self.latitude,
            Axis::Longitude => self.longitude,
        }
    }

    /// Squared Euclidean distance, in squared degrees.
    #[inline]
    #[must_use]
    pub fn distance_squared(&self, other: &Self) -> f64 {
        let dx = self.latitude - other.latitude;
        let dy = self.longitude - other.longitude;
        dx * dx + dy * dy
    }

    /// Euclidean distance in degrees. Planar, no geodesic correction.
    #[inline]
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

/// A located vehicle: the unit stored in a [`KdTree`](crate::KdTree).
#[derive(Clone, Debug, PartialEq)]
pub struct Vehicle {
    id: i32,
    registration: String,
    position: Position,
    recorded_at: u64,
}

impl Vehicle {
    /// Creates a vehicle with a zero timestamp.
    ///
    /// # Errors
    /// Returns [`Error::NonFiniteCoordinate`] if either coordinate is not finite.
    pub fn new(id: i32, registration: impl Into<String>, latitude: f64, longitude: f64) -> Result<Self> {
        Self::with_timestamp(id, registration, latitude, longitude, 0)
    }

    /// Creates a vehicle carrying the timestamp of its position record.
    ///
    /// # Errors
    /// Returns [`Error::NonFiniteCoordinate`] if either coordinate is not finite.
    pub fn with_timestamp(
        id: i32,
        registration: impl Into<String>,
        latitude: f64,
        longitude: f64,
        recorded_at: u64,
    ) -> Result<Self> {
        Ok(Self::at(id, registration, Position::new(latitude, longitude)?, recorded_at))
    }

    /// Creates a vehicle from an already validated position.
    #[must_use]
    pub fn at(id: i32, registration: impl Into<String>, position: Position, recorded_at: u64) -> Self {
        Self { id, registration: registration.into(), position, recorded_at }
    }

    /// Position identifier
    #[inline]
    #[must_use]
    pub const fn id(&self) -> i32 {
        self.id
    }

    /// Display label (vehicle registration)
    #[inline]
    #[must_use]
    pub fn registration(&self) -> &str {
        &self.registration
    }

    /// Location of the vehicle
    #[inline]
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Timestamp of the record this vehicle was read from (0 if unknown)
    #[inline]
    #[must_use]
    pub const fn recorded_at(&self) -> u64 {
        self.recorded_at
    }

    #[inline]
    pub(crate) const fn coord(&self, axis: Axis) -> f64 {
        self.position.coord(axis)
    }

    /// Euclidean distance from this vehicle to `target`
    #[inline]
    #[must_use]
    pub fn distance_to(&self, target: &Position) -> f64 {
        self.position.distance(target)
    }
}
