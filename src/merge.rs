//! Global frame merging.
//!
//! Drives a fixed/floating worklist: the reference scanner is fixed at
//! the origin, and repeated passes resolve floating scanners against the
//! growing fixed set until every scanner is placed. A full pass that
//! fixes nothing while scanners remain floating is a fatal stall; the
//! merge either fully succeeds or fails outright, with no partial
//! results.

use std::collections::BTreeSet;

use log::{debug, warn};

use crate::config::RegistrationConfig;
use crate::core::Point;
use crate::error::{RegistrationError, Result};
use crate::matching::solve_pose;
use crate::profile::coarse_overlap;
use crate::scanner::{FixedScanner, Scanner, ScannerId};

/// Worklist state machine resolving every scanner into one reference
/// frame.
///
/// The fixed and floating sets form a strict partition of all scanners
/// at all times; the first input scanner starts fixed as the reference.
#[derive(Debug)]
pub struct FrameMerger<const N: usize> {
    fixed: Vec<FixedScanner<N>>,
    floating: Vec<Scanner<N>>,
    config: RegistrationConfig,
}

impl<const N: usize> FrameMerger<N> {
    /// Create a merger; the first scanner defines the reference frame.
    pub fn new(mut scanners: Vec<Scanner<N>>, config: RegistrationConfig) -> Self {
        let mut fixed = Vec::with_capacity(scanners.len());
        if !scanners.is_empty() {
            let reference = scanners.remove(0);
            fixed.push(FixedScanner::reference(reference));
        }
        Self {
            fixed,
            floating: scanners,
            config,
        }
    }

    /// Number of scanners resolved so far.
    pub fn fixed_count(&self) -> usize {
        self.fixed.len()
    }

    /// Number of scanners still awaiting a pose.
    pub fn floating_count(&self) -> usize {
        self.floating.len()
    }

    /// True once every scanner is fixed.
    pub fn is_complete(&self) -> bool {
        self.floating.is_empty()
    }

    /// Run one pass over the floating scanners, attempting each against
    /// every fixed partner. Returns the number of scanners fixed.
    pub fn pass(&mut self) -> usize {
        let mut moved = 0;
        let mut i = 0;
        while i < self.floating.len() {
            match self.try_resolve(&self.floating[i]) {
                Some(resolved) => {
                    debug!(
                        "scanner {} fixed at offset {:?}, {} floating left",
                        resolved.id(),
                        resolved.offset(),
                        self.floating.len() - 1
                    );
                    self.floating.remove(i);
                    self.fixed.push(resolved);
                    moved += 1;
                }
                None => i += 1,
            }
        }
        moved
    }

    /// Attempt to resolve one floating scanner against any fixed partner.
    ///
    /// Pairs whose profile intersection cannot meet the shared-beacon
    /// requirement are skipped without running the solver.
    fn try_resolve(&self, candidate: &Scanner<N>) -> Option<FixedScanner<N>> {
        let threshold = self.config.pair_overlap_threshold();
        for fixed in &self.fixed {
            if coarse_overlap(fixed.scanner().profile(), candidate.profile()) < threshold {
                continue;
            }
            if let Some(transform) = solve_pose(fixed, candidate, &self.config) {
                return Some(FixedScanner::resolve(candidate, &transform));
            }
        }
        None
    }

    /// Resolve every floating scanner or fail.
    ///
    /// Idempotent: running on an already complete merger performs no
    /// further transitions and leaves all offsets unchanged.
    pub fn run(&mut self) -> Result<()> {
        while !self.floating.is_empty() {
            if self.pass() == 0 {
                warn!(
                    "registration stalled with {} scanner(s) floating",
                    self.floating.len()
                );
                return Err(RegistrationError::InsufficientOverlap {
                    remaining: self.floating.len(),
                });
            }
        }
        Ok(())
    }

    /// Deduplicated union of all fixed scanners' global beacons.
    pub fn beacons(&self) -> BTreeSet<Point<N>> {
        self.fixed
            .iter()
            .flat_map(|f| f.scanner().points().iter().copied())
            .collect()
    }

    /// Resolved offsets, in the order scanners were fixed.
    pub fn offsets(&self) -> Vec<(ScannerId, Point<N>)> {
        self.fixed.iter().map(|f| (f.id(), f.offset())).collect()
    }

    /// Consume the merger and produce the registration outputs.
    pub fn finish(self) -> Result<Registration<N>> {
        if !self.floating.is_empty() {
            return Err(RegistrationError::InsufficientOverlap {
                remaining: self.floating.len(),
            });
        }
        Ok(Registration {
            beacons: self.beacons(),
            offsets: self.offsets(),
        })
    }
}

/// Final registration outputs: the global beacon set and every
/// scanner's resolved offset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration<const N: usize> {
    beacons: BTreeSet<Point<N>>,
    offsets: Vec<(ScannerId, Point<N>)>,
}

impl<const N: usize> Registration<N> {
    /// The deduplicated global beacon set.
    pub fn beacons(&self) -> &BTreeSet<Point<N>> {
        &self.beacons
    }

    /// Number of distinct beacons across all scanners.
    pub fn beacon_count(&self) -> usize {
        self.beacons.len()
    }

    /// Every scanner's resolved offset.
    pub fn offsets(&self) -> &[(ScannerId, Point<N>)] {
        &self.offsets
    }

    /// The resolved offset of one scanner.
    pub fn offset_of(&self, id: ScannerId) -> Option<Point<N>> {
        self.offsets
            .iter()
            .find(|(scanner_id, _)| *scanner_id == id)
            .map(|(_, offset)| *offset)
    }

    /// Maximum pairwise Manhattan distance among scanner offsets.
    pub fn max_scanner_distance(&self) -> i64 {
        let mut max = 0;
        for i in 0..self.offsets.len() {
            for j in (i + 1)..self.offsets.len() {
                max = max.max(self.offsets[i].1.manhattan_distance(&self.offsets[j].1));
            }
        }
        max
    }
}

/// Register a set of scanners against the first one and produce the
/// merged outputs.
pub fn register<const N: usize>(
    scanners: Vec<Scanner<N>>,
    config: RegistrationConfig,
) -> Result<Registration<N>> {
    let mut merger = FrameMerger::new(scanners, config);
    merger.run()?;
    merger.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Transform;

    // Triangle whose pair shifts all have distinct nonzero magnitudes.
    const TRIANGLE: [[i64; 2]; 3] = [[10, 2], [14, 9], [31, 17]];

    fn triangle_points() -> Vec<Point<2>> {
        TRIANGLE.map(Point::new).to_vec()
    }

    #[test]
    fn test_single_scanner_is_trivially_registered() {
        let scanner = Scanner::new(0, triangle_points());
        let registration = register(vec![scanner], RegistrationConfig::reduced_2d()).unwrap();

        assert_eq!(registration.beacon_count(), 3);
        assert_eq!(registration.offsets(), &[(0, Point::zero())]);
        assert_eq!(registration.max_scanner_distance(), 0);
    }

    #[test]
    fn test_shared_beacons_deduplicate() {
        // Both scanners see the same three beacons plus one of their own.
        let mut first = triangle_points();
        first.push(Point::new([1000, 0]));
        let mut second = triangle_points();
        second.push(Point::new([500, 500]));

        let registration = register(
            vec![Scanner::new(0, first), Scanner::new(1, second)],
            RegistrationConfig::reduced_2d(),
        )
        .unwrap();

        assert_eq!(registration.beacon_count(), 5);
        assert_eq!(registration.offset_of(1), Some(Point::zero()));
        for point in triangle_points() {
            assert!(registration.beacons().contains(&point));
        }
    }

    #[test]
    fn test_disjoint_scanners_stall() {
        let a = Scanner::new(0, [[0, 0], [3, 7], [50, 21]].map(Point::new).to_vec());
        let b = Scanner::new(
            1,
            [[1000, 1000], [1013, 1029], [897, 1105]].map(Point::new).to_vec(),
        );

        let err = register(vec![a, b], RegistrationConfig::reduced_2d()).unwrap_err();
        assert!(matches!(
            err,
            RegistrationError::InsufficientOverlap { remaining: 1 }
        ));
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let transform = Transform::new([1, 0], [-1, 1], Point::new([-40, 260]));
        let mut shared = triangle_points();
        shared.push(Point::new([-62, 47]));
        let second_local: Vec<_> = shared.iter().map(|p| transform.inverse().apply(p)).collect();

        let mut merger = FrameMerger::new(
            vec![Scanner::new(0, shared), Scanner::new(1, second_local)],
            RegistrationConfig::reduced_2d(),
        );
        merger.run().unwrap();
        assert!(merger.is_complete());
        let offsets = merger.offsets();
        let beacons = merger.beacons();

        merger.run().unwrap();
        assert_eq!(merger.pass(), 0);
        assert_eq!(merger.offsets(), offsets);
        assert_eq!(merger.beacons(), beacons);
        assert_eq!(offsets[1], (1, Point::new([-40, 260])));
    }

    #[test]
    fn test_finish_before_completion_fails() {
        let a = Scanner::new(0, triangle_points());
        let b = Scanner::new(1, [[900, 900], [904, 907], [921, 917]].map(Point::new).to_vec());
        let merger = FrameMerger::new(vec![a, b], RegistrationConfig::reduced_2d());

        assert!(matches!(
            merger.finish(),
            Err(RegistrationError::InsufficientOverlap { remaining: 1 })
        ));
    }

    #[test]
    fn test_empty_input() {
        let registration = register::<2>(Vec::new(), RegistrationConfig::reduced_2d()).unwrap();
        assert_eq!(registration.beacon_count(), 0);
        assert_eq!(registration.max_scanner_distance(), 0);
        assert!(registration.offsets().is_empty());
    }
}
