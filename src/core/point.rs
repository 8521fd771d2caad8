//! Point types for the configuration space.

use std::fmt;
use std::ops::{Add, Index, Mul, Sub};

/// A position in a `D`-dimensional configuration space.
///
/// The dimension is fixed at compile time, so 2D and 3D planning never mix
/// within one run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point<const D: usize> {
    coords: [f64; D],
}

/// Planar configuration space point.
pub type Point2 = Point<2>;

/// Spatial configuration space point.
pub type Point3 = Point<3>;

impl<const D: usize> Point<D> {
    /// Create a point from raw coordinates
    #[inline]
    pub const fn from_array(coords: [f64; D]) -> Self {
        Self { coords }
    }

    /// Origin of the space
    #[inline]
    pub const fn origin() -> Self {
        Self { coords: [0.0; D] }
    }

    /// Try to build a point from a slice. Returns `None` on length mismatch.
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        let coords: [f64; D] = values.try_into().ok()?;
        Some(Self { coords })
    }

    /// Raw coordinates
    #[inline]
    pub fn coords(&self) -> &[f64; D] {
        &self.coords
    }

    /// Raw coordinates by value
    #[inline]
    pub fn to_array(self) -> [f64; D] {
        self.coords
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance (faster, avoids sqrt)
    #[inline]
    pub fn distance_squared(&self, other: &Self) -> f64 {
        let mut sum = 0.0;
        for i in 0..D {
            let d = self.coords[i] - other.coords[i];
            sum += d * d;
        }
        sum
    }

    /// Length of this point as a vector from the origin
    #[inline]
    pub fn length(&self) -> f64 {
        self.distance(&Self::origin())
    }

    /// Linear interpolation: `t = 0` gives `self`, `t = 1` gives `other`
    #[inline]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        let mut coords = self.coords;
        for (i, c) in coords.iter_mut().enumerate() {
            *c += (other.coords[i] - self.coords[i]) * t;
        }
        Self { coords }
    }

    /// True if every coordinate is finite
    pub fn is_finite(&self) -> bool {
        self.coords.iter().all(|c| c.is_finite())
    }

    /// Per-axis absolute difference
    pub fn abs_delta(&self, other: &Self) -> [f64; D] {
        let mut out = [0.0; D];
        for (i, o) in out.iter_mut().enumerate() {
            *o = (self.coords[i] - other.coords[i]).abs();
        }
        out
    }
}

impl Point<2> {
    /// Create a planar point
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { coords: [x, y] }
    }

    /// X coordinate
    #[inline]
    pub fn x(&self) -> f64 {
        self.coords[0]
    }

    /// Y coordinate
    #[inline]
    pub fn y(&self) -> f64 {
        self.coords[1]
    }
}

impl Point<3> {
    /// Create a spatial point
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { coords: [x, y, z] }
    }

    /// X coordinate
    #[inline]
    pub fn x(&self) -> f64 {
        self.coords[0]
    }

    /// Y coordinate
    #[inline]
    pub fn y(&self) -> f64 {
        self.coords[1]
    }

    /// Z coordinate
    #[inline]
    pub fn z(&self) -> f64 {
        self.coords[2]
    }
}

impl<const D: usize> Default for Point<D> {
    fn default() -> Self {
        Self::origin()
    }
}

impl<const D: usize> From<[f64; D]> for Point<D> {
    fn from(coords: [f64; D]) -> Self {
        Self { coords }
    }
}

impl<const D: usize> Index<usize> for Point<D> {
    type Output = f64;

    #[inline]
    fn index(&self, axis: usize) -> &f64 {
        &self.coords[axis]
    }
}

impl<const D: usize> Add for Point<D> {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        let mut coords = self.coords;
        for (i, c) in coords.iter_mut().enumerate() {
            *c += other.coords[i];
        }
        Self { coords }
    }
}

impl<const D: usize> Sub for Point<D> {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        let mut coords = self.coords;
        for (i, c) in coords.iter_mut().enumerate() {
            *c -= other.coords[i];
        }
        Self { coords }
    }
}

impl<const D: usize> Mul<f64> for Point<D> {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f64) -> Self {
        let mut coords = self.coords;
        for c in coords.iter_mut() {
            *c *= scalar;
        }
        Self { coords }
    }
}

impl<const D: usize> fmt::Display for Point<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.coords.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:.3}", c)?;
        }
        write!(f, ")")
    }
}
