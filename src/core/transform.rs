//! Discrete axis-aligned rigid transforms.
//!
//! Scanner inputs are guaranteed to align to integer axes, so a pose is
//! fully described by an axis permutation, a per-axis sign vector, and an
//! integer translation. Only the proper members of the cubic rotation
//! group arise: 24 orientations in 3D, 4 in 2D.

use crate::core::Point;

/// An axis-aligned rigid transform mapping one scanner frame into another.
///
/// Applying the transform rotates first, then translates:
/// `out[i] = signs[i] * p[perm[i]] + translation[i]`.
///
/// Ordering is lexicographic over (permutation, signs, translation); the
/// pose solver uses it to break ties between equally corroborated
/// hypotheses deterministically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Transform<const N: usize> {
    /// Source axis feeding each output axis.
    pub perm: [usize; N],
    /// Per-axis mirror signs (+1 or -1).
    pub signs: [i8; N],
    /// Translation applied after rotation.
    pub translation: Point<N>,
}

impl<const N: usize> Transform<N> {
    /// Create a transform from its parts.
    #[inline]
    pub fn new(perm: [usize; N], signs: [i8; N], translation: Point<N>) -> Self {
        Self {
            perm,
            signs,
            translation,
        }
    }

    /// The identity transform.
    pub fn identity() -> Self {
        Self {
            perm: std::array::from_fn(|i| i),
            signs: [1; N],
            translation: Point::zero(),
        }
    }

    /// Apply the rotation part only (permutation and signs).
    #[inline]
    pub fn rotate(&self, p: &Point<N>) -> Point<N> {
        Point::new(std::array::from_fn(|i| {
            self.signs[i] as i64 * p.coords[self.perm[i]]
        }))
    }

    /// Apply the full transform.
    #[inline]
    pub fn apply(&self, p: &Point<N>) -> Point<N> {
        self.rotate(p) + self.translation
    }

    /// Compose with another transform: the result applies `self` first,
    /// then `other`.
    pub fn then(&self, other: &Transform<N>) -> Transform<N> {
        let perm = std::array::from_fn(|i| self.perm[other.perm[i]]);
        let signs = std::array::from_fn(|i| other.signs[i] * self.signs[other.perm[i]]);
        Transform::new(perm, signs, other.apply(&self.translation))
    }

    /// The inverse transform.
    pub fn inverse(&self) -> Transform<N> {
        let mut perm = [0usize; N];
        let mut signs = [1i8; N];
        for i in 0..N {
            perm[self.perm[i]] = i;
            signs[self.perm[i]] = self.signs[i];
        }
        let rotation = Transform::new(perm, signs, Point::zero());
        let translation = -rotation.rotate(&self.translation);
        Transform::new(perm, signs, translation)
    }

    /// Enumerate every proper orientation (determinant +1) with zero
    /// translation: 24 in 3D, 4 in 2D.
    pub fn orientations() -> Vec<Transform<N>> {
        let mut out = Vec::new();
        for perm in permutations::<N>() {
            let parity = permutation_parity(&perm);
            for mask in 0..(1u32 << N) {
                let signs: [i8; N] =
                    std::array::from_fn(|i| if mask & (1 << i) != 0 { -1 } else { 1 });
                let sign_product: i32 = signs.iter().map(|&s| s as i32).product();
                if parity * sign_product == 1 {
                    out.push(Transform::new(perm, signs, Point::zero()));
                }
            }
        }
        out
    }
}

/// All permutations of the axis indices `0..N`.
fn permutations<const N: usize>() -> Vec<[usize; N]> {
    let mut items: [usize; N] = std::array::from_fn(|i| i);
    let mut out = Vec::new();
    heap_permute(&mut items, N, &mut out);
    out
}

// Heap's algorithm.
fn heap_permute<const N: usize>(items: &mut [usize; N], k: usize, out: &mut Vec<[usize; N]>) {
    if k <= 1 {
        out.push(*items);
        return;
    }
    for i in 0..k {
        heap_permute(items, k - 1, out);
        if k % 2 == 0 {
            items.swap(i, k - 1);
        } else {
            items.swap(0, k - 1);
        }
    }
}

/// +1 for even permutations, -1 for odd ones.
fn permutation_parity(perm: &[usize]) -> i32 {
    let mut inversions = 0;
    for i in 0..perm.len() {
        for j in (i + 1)..perm.len() {
            if perm[i] > perm[j] {
                inversions += 1;
            }
        }
    }
    if inversions % 2 == 0 {
        1
    } else {
        -1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::collections::HashSet;

    fn random_point<const N: usize>(rng: &mut impl Rng) -> Point<N> {
        Point::new(std::array::from_fn(|_| rng.random_range(-1000..1000)))
    }

    #[test]
    fn test_identity() {
        let p = Point::new([7, -3, 12]);
        assert_eq!(Transform::identity().apply(&p), p);
    }

    #[test]
    fn test_rotate_and_translate() {
        // Quarter turn in 2D: (x, y) -> (y, -x), then shift by (10, 20).
        let t = Transform::new([1, 0], [1, -1], Point::new([10, 20]));
        assert_eq!(t.apply(&Point::new([3, 5])), Point::new([15, 17]));
    }

    #[test]
    fn test_orientation_counts() {
        let in_3d = Transform::<3>::orientations();
        assert_eq!(in_3d.len(), 24);
        assert_eq!(in_3d.iter().collect::<HashSet<_>>().len(), 24);

        let in_2d = Transform::<2>::orientations();
        assert_eq!(in_2d.len(), 4);
        assert_eq!(in_2d.iter().collect::<HashSet<_>>().len(), 4);
    }

    #[test]
    fn test_squared_distance_invariant_under_all_orientations() {
        let mut rng = rand::rng();
        for _ in 0..50 {
            let p = random_point::<3>(&mut rng);
            let q = random_point::<3>(&mut rng);
            let shift = random_point::<3>(&mut rng);
            for orientation in Transform::<3>::orientations() {
                let t = Transform::new(orientation.perm, orientation.signs, shift);
                assert_eq!(
                    t.apply(&p).squared_distance(&t.apply(&q)),
                    p.squared_distance(&q)
                );
            }
        }
    }

    #[test]
    fn test_squared_distance_invariant_in_2d() {
        let mut rng = rand::rng();
        for _ in 0..50 {
            let p = random_point::<2>(&mut rng);
            let q = random_point::<2>(&mut rng);
            let shift = random_point::<2>(&mut rng);
            for orientation in Transform::<2>::orientations() {
                let t = Transform::new(orientation.perm, orientation.signs, shift);
                assert_eq!(
                    t.apply(&p).squared_distance(&t.apply(&q)),
                    p.squared_distance(&q)
                );
            }
        }
    }

    #[test]
    fn test_composition() {
        let mut rng = rand::rng();
        let t1 = Transform::new([2, 0, 1], [1, -1, -1], Point::new([5, -9, 2]));
        let t2 = Transform::new([1, 2, 0], [-1, 1, -1], Point::new([-4, 0, 11]));
        let composed = t1.then(&t2);
        for _ in 0..20 {
            let p = random_point::<3>(&mut rng);
            assert_eq!(composed.apply(&p), t2.apply(&t1.apply(&p)));
        }
    }

    #[test]
    fn test_inverse_round_trip() {
        let mut rng = rand::rng();
        for orientation in Transform::<3>::orientations() {
            let t = Transform::new(orientation.perm, orientation.signs, Point::new([17, -40, 3]));
            assert_eq!(t.then(&t.inverse()), Transform::identity());
            for _ in 0..10 {
                let p = random_point::<3>(&mut rng);
                assert_eq!(t.inverse().apply(&t.apply(&p)), p);
            }
        }
    }
}
