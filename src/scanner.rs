//! Scanner observations and their resolved global poses.

use crate::core::{Point, Transform};
use crate::profile::{build_profile, DistanceProfile, DistancePairIndex};

/// Identifier for a scanner, unique within one registration run.
pub type ScannerId = u32;

/// A sensor report: beacons observed in the scanner's own local frame.
///
/// The distance profile and pair index are computed once at construction
/// and stored as immutable fields; resolving a scanner into the reference
/// frame produces a fresh value instead of mutating in place, so pre- and
/// post-transform views are never aliased.
#[derive(Clone, Debug)]
pub struct Scanner<const N: usize> {
    id: ScannerId,
    points: Vec<Point<N>>,
    profile: DistanceProfile,
    pair_index: DistancePairIndex<N>,
}

impl<const N: usize> Scanner<N> {
    /// Create a scanner from its observed beacons.
    ///
    /// Beacons are sorted so iteration order is independent of report
    /// order; duplicate observations within one report collapse.
    pub fn new(id: ScannerId, mut points: Vec<Point<N>>) -> Self {
        points.sort();
        points.dedup();
        let (profile, pair_index) = build_profile(&points);
        Self {
            id,
            points,
            profile,
            pair_index,
        }
    }

    /// The scanner identifier.
    #[inline]
    pub fn id(&self) -> ScannerId {
        self.id
    }

    /// The observed beacons, sorted.
    #[inline]
    pub fn points(&self) -> &[Point<N>] {
        &self.points
    }

    /// Number of distinct beacons observed.
    #[inline]
    pub fn beacon_count(&self) -> usize {
        self.points.len()
    }

    /// The pairwise squared-distance multiset.
    #[inline]
    pub fn profile(&self) -> &DistanceProfile {
        &self.profile
    }

    /// The squared-distance to beacon-pair index.
    #[inline]
    pub fn pair_index(&self) -> &DistancePairIndex<N> {
        &self.pair_index
    }
}

/// A scanner whose pose has been resolved into the reference frame.
///
/// Holds a new [`Scanner`] rebuilt from the transformed global beacons
/// plus the scanner's offset (its position in the reference frame).
/// Immutable once created.
#[derive(Clone, Debug)]
pub struct FixedScanner<const N: usize> {
    scanner: Scanner<N>,
    offset: Point<N>,
}

impl<const N: usize> FixedScanner<N> {
    /// Fix the reference scanner itself: identity orientation, zero offset.
    pub fn reference(scanner: Scanner<N>) -> Self {
        Self {
            scanner,
            offset: Point::zero(),
        }
    }

    /// Resolve a floating scanner with its recovered transform.
    ///
    /// The transform maps the scanner's local frame into the reference
    /// frame; its translation component is the scanner's global offset.
    pub fn resolve(scanner: &Scanner<N>, transform: &Transform<N>) -> Self {
        let global = scanner.points().iter().map(|p| transform.apply(p)).collect();
        Self {
            scanner: Scanner::new(scanner.id(), global),
            offset: transform.translation,
        }
    }

    /// The scanner identifier.
    #[inline]
    pub fn id(&self) -> ScannerId {
        self.scanner.id()
    }

    /// The resolved scanner, with beacons in the reference frame.
    #[inline]
    pub fn scanner(&self) -> &Scanner<N> {
        &self.scanner
    }

    /// The scanner's position in the reference frame.
    #[inline]
    pub fn offset(&self) -> Point<N> {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scanner_sorts_and_dedups() {
        let scanner = Scanner::new(
            3,
            vec![
                Point::new([5, 5]),
                Point::new([1, 2]),
                Point::new([5, 5]),
                Point::new([-4, 0]),
            ],
        );
        assert_eq!(scanner.id(), 3);
        assert_eq!(
            scanner.points(),
            &[Point::new([-4, 0]), Point::new([1, 2]), Point::new([5, 5])]
        );
        assert_eq!(scanner.beacon_count(), 3);
        assert_eq!(scanner.profile().total_pairs(), 3);
    }

    #[test]
    fn test_resolve_transforms_points_and_records_offset() {
        let scanner = Scanner::new(1, vec![Point::new([1, 2]), Point::new([4, 8])]);
        // Half turn plus a shift.
        let transform = Transform::new([0, 1], [-1, -1], Point::new([10, 10]));
        let fixed = FixedScanner::resolve(&scanner, &transform);

        assert_eq!(fixed.id(), 1);
        assert_eq!(fixed.offset(), Point::new([10, 10]));
        assert_eq!(
            fixed.scanner().points(),
            &[Point::new([6, 2]), Point::new([9, 8])]
        );
        // Profile is pose-invariant, so the rebuilt one matches.
        assert_eq!(fixed.scanner().profile(), scanner.profile());
    }

    #[test]
    fn test_reference_has_zero_offset() {
        let scanner = Scanner::new(0, vec![Point::new([1, 1, 1])]);
        let fixed = FixedScanner::reference(scanner);
        assert_eq!(fixed.offset(), Point::zero());
        assert_eq!(fixed.scanner().points(), &[Point::new([1, 1, 1])]);
    }
}
