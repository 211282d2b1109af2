//! Transform-invariant distance fingerprints.
//!
//! The squared distance between two beacons does not change under any
//! axis permutation, mirror, or translation, so the multiset of a
//! scanner's pairwise squared distances fingerprints its geometry
//! independently of its pose. The profile drives cheap overlap screening
//! between scanner pairs; the pair index feeds candidate correspondences
//! to the pose solver.

use std::collections::BTreeMap;

use crate::core::Point;

/// Multiset of pairwise squared distances within one scanner.
///
/// Distinct beacon pairs at the same distance are expected and counted
/// separately. Backed by an ordered map for deterministic iteration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DistanceProfile {
    counts: BTreeMap<i64, u32>,
}

impl DistanceProfile {
    /// Occurrence count of a squared distance (0 if absent).
    #[inline]
    pub fn count(&self, distance: i64) -> u32 {
        self.counts.get(&distance).copied().unwrap_or(0)
    }

    /// Number of distinct distance values.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True if the profile holds no distances.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of beacon pairs, C(n, 2) for n beacons.
    pub fn total_pairs(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Iterate over (squared distance, occurrence count) in distance order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, u32)> + '_ {
        self.counts.iter().map(|(d, c)| (*d, *c))
    }
}

/// Index from squared distance to the beacon pairs at that distance
/// within one scanner.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DistancePairIndex<const N: usize> {
    pairs: BTreeMap<i64, Vec<(Point<N>, Point<N>)>>,
}

impl<const N: usize> DistancePairIndex<N> {
    /// All beacon pairs at the given squared distance.
    #[inline]
    pub fn pairs_at(&self, distance: i64) -> &[(Point<N>, Point<N>)] {
        self.pairs.get(&distance).map_or(&[], Vec::as_slice)
    }

    /// Iterate over (squared distance, pairs) in distance order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &[(Point<N>, Point<N>)])> {
        self.pairs.iter().map(|(d, v)| (*d, v.as_slice()))
    }
}

/// Build the profile and pair index for a beacon collection in one
/// O(n²) pass over all C(n, 2) pairs.
pub fn build_profile<const N: usize>(
    points: &[Point<N>],
) -> (DistanceProfile, DistancePairIndex<N>) {
    let mut counts: BTreeMap<i64, u32> = BTreeMap::new();
    let mut pairs: BTreeMap<i64, Vec<(Point<N>, Point<N>)>> = BTreeMap::new();
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            let distance = points[i].squared_distance(&points[j]);
            *counts.entry(distance).or_insert(0) += 1;
            pairs.entry(distance).or_default().push((points[i], points[j]));
        }
    }
    (DistanceProfile { counts }, DistancePairIndex { pairs })
}

/// Multiset intersection size of two profiles: for every distance present
/// in both, the minimum of the two occurrence counts.
///
/// This is an upper bound on the number of beacon pairs the two scanners
/// truly share, and gates the expensive pose solver.
pub fn coarse_overlap(a: &DistanceProfile, b: &DistanceProfile) -> u32 {
    a.iter().map(|(d, count)| count.min(b.count(d))).sum()
}
