//! Integer coordinate points for scanner observations.

use std::ops::{Add, Neg, Sub};

/// An observed beacon position in `N` dimensions (N = 2 or 3).
///
/// Coordinates are exact integers; equality and ordering are structural,
/// so points can key ordered sets and maps directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point<const N: usize> {
    /// Per-axis coordinates.
    pub coords: [i64; N],
}

impl<const N: usize> Point<N> {
    /// Create a point from its coordinates.
    #[inline]
    pub fn new(coords: [i64; N]) -> Self {
        Self { coords }
    }

    /// The origin.
    #[inline]
    pub fn zero() -> Self {
        Self { coords: [0; N] }
    }

    /// Squared Euclidean distance to another point.
    ///
    /// Kept squared: only equality and ordering of this quantity are
    /// ever needed, and integer arithmetic avoids float precision.
    #[inline]
    pub fn squared_distance(&self, other: &Point<N>) -> i64 {
        let mut sum = 0;
        for i in 0..N {
            let d = self.coords[i] - other.coords[i];
            sum += d * d;
        }
        sum
    }

    /// Manhattan distance to another point.
    #[inline]
    pub fn manhattan_distance(&self, other: &Point<N>) -> i64 {
        let mut sum = 0;
        for i in 0..N {
            sum += (self.coords[i] - other.coords[i]).abs();
        }
        sum
    }

    /// Absolute value of each coordinate.
    #[inline]
    pub fn abs(&self) -> [i64; N] {
        self.coords.map(i64::abs)
    }
}

impl<const N: usize> Default for Point<N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const N: usize> Add for Point<N> {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(std::array::from_fn(|i| self.coords[i] + other.coords[i]))
    }
}

impl<const N: usize> Sub for Point<N> {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(std::array::from_fn(|i| self.coords[i] - other.coords[i]))
    }
}

impl<const N: usize> Neg for Point<N> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(self.coords.map(|c| -c))
    }
}
