//! Discrete pose recovery between two scanners.
//!
//! For every squared distance both scanners exhibit, every combination of
//! a fixed beacon pair and a candidate beacon pair is a potential
//! correspondence. Each unambiguous combination pins down an axis
//! permutation and sign vector, and the four spanning points then imply
//! translations. Most combinations are noise, but the true pose is
//! implied by every genuinely shared pair, so it accumulates the most
//! votes.

use std::collections::HashMap;

use log::trace;

use crate::config::RegistrationConfig;
use crate::core::{Point, Transform};
use crate::scanner::{FixedScanner, Scanner};

/// Recover the transform mapping `candidate`'s frame into the reference
/// frame of `fixed`, if the two share enough geometry.
///
/// Returns `None` when no hypothesis collects the configured number of
/// corroborating votes: a negative result for this pairing, not an error.
/// Equally voted hypotheses are broken by lexicographic order on the
/// (permutation, signs, translation) triple for reproducibility.
pub fn solve_pose<const N: usize>(
    fixed: &FixedScanner<N>,
    candidate: &Scanner<N>,
    config: &RegistrationConfig,
) -> Option<Transform<N>> {
    let mut votes: HashMap<Transform<N>, u32> = HashMap::new();

    for (distance, fixed_pairs) in fixed.scanner().pair_index().iter() {
        let candidate_pairs = candidate.pair_index().pairs_at(distance);
        if candidate_pairs.is_empty() {
            continue;
        }
        for &(fixed_a, fixed_b) in fixed_pairs {
            for &(candidate_a, candidate_b) in candidate_pairs {
                let fixed_shift = fixed_a - fixed_b;
                let candidate_shift = candidate_a - candidate_b;
                let Some((perm, signs)) = derive_orientation(&fixed_shift, &candidate_shift)
                else {
                    continue;
                };
                // A pair's shift depends on point order, so the derived
                // signs may be off by a global -1. Try both.
                for signs in [signs, signs.map(|s| -s)] {
                    let rotation = Transform::new(perm, signs, Point::zero());
                    for candidate_point in [candidate_a, candidate_b] {
                        for fixed_point in [fixed_a, fixed_b] {
                            let translation = fixed_point - rotation.rotate(&candidate_point);
                            *votes
                                .entry(Transform::new(perm, signs, translation))
                                .or_insert(0) += 1;
                        }
                    }
                }
            }
        }
    }

    let (winner, count) = best_hypothesis(&votes)?;
    trace!(
        "pose vote for scanner {} against scanner {}: winner {:?} with {} vote(s)",
        candidate.id(),
        fixed.id(),
        winner,
        count
    );
    if count < config.min_corroborating_votes {
        return None;
    }
    Some(winner)
}

/// Derive the axis permutation and sign vector relating two pair shifts.
///
/// Rejects ambiguous combinations: mismatched absolute components, a
/// zero component, or two axes with equal magnitude (either would admit
/// more than one permutation). Skipping these loses nothing; a genuine
/// overlap supplies plenty of unambiguous pairs.
fn derive_orientation<const N: usize>(
    fixed_shift: &Point<N>,
    candidate_shift: &Point<N>,
) -> Option<([usize; N], [i8; N])> {
    let abs_fixed = fixed_shift.abs();
    let abs_candidate = candidate_shift.abs();

    if abs_candidate.contains(&0) {
        return None;
    }
    for i in 0..N {
        for j in (i + 1)..N {
            if abs_candidate[i] == abs_candidate[j] {
                return None;
            }
        }
    }
    let mut sorted_fixed = abs_fixed;
    let mut sorted_candidate = abs_candidate;
    sorted_fixed.sort_unstable();
    sorted_candidate.sort_unstable();
    if sorted_fixed != sorted_candidate {
        return None;
    }

    let mut perm = [0usize; N];
    let mut signs = [1i8; N];
    for i in 0..N {
        perm[i] = abs_candidate.iter().position(|&c| c == abs_fixed[i])?;
        signs[i] = if candidate_shift.coords[perm[i]] == fixed_shift.coords[i] {
            1
        } else {
            -1
        };
    }
    Some((perm, signs))
}

/// The hypothesis with the most votes; ties go to the lexicographically
/// smallest transform.
fn best_hypothesis<const N: usize>(
    votes: &HashMap<Transform<N>, u32>,
) -> Option<(Transform<N>, u32)> {
    votes
        .iter()
        .map(|(t, &c)| (*t, c))
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
}
