//! Seeded convex quads.
//!
//! Solver and calibration tests need perspective-distorted corner sets that
//! are still valid calibrations, i.e. strictly convex and far from
//! degenerate. [`QuadSampler`] perturbs a base quad and redraws until
//! the candidate qualifies.

use crate::{distance_squared, turn_orientation, Pt2, Real, Vec2};

/// Redraws per quad before falling back to the unperturbed base.
const MAX_ATTEMPTS: usize = 64;

/// Smallest accepted turn, relative to the squared extent of the quad.
const MIN_RELATIVE_TURN: Real = 1e-3;

/// Deterministic generator of convex perturbations of a base quad.
///
/// Uses xorshift64* so sequences do not depend on any RNG crate version.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadSampler {
    state: u64,
    /// Maximum absolute per-axis corner offset.
    pub spread: Real,
}

impl QuadSampler {
    pub fn new(seed: u64, spread: Real) -> Self {
        // xorshift has a fixed point at zero.
        let state = match seed ^ 0x6A09_E667_F3BC_C908 {
            0 => 1,
            s => s,
        };
        Self {
            state,
            spread: spread.abs(),
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    /// Uniform sample in `[-1, 1)`.
    fn next_signed(&mut self) -> Real {
        let unit = (self.next_u64() >> 11) as Real / (1u64 << 53) as Real;
        2.0 * unit - 1.0
    }

    fn offset(&mut self) -> Vec2 {
        Vec2::new(self.next_signed(), self.next_signed()) * self.spread
    }

    /// Perturb every corner of `base` by at most `spread` per axis.
    ///
    /// Returns `base` unchanged if no convex candidate turns up within
    /// `MAX_ATTEMPTS` draws; `base` itself is expected to be convex.
    pub fn next_quad(&mut self, base: &[Pt2; 4]) -> [Pt2; 4] {
        let winding = quad_winding(base);
        for _ in 0..MAX_ATTEMPTS {
            let candidate: [Pt2; 4] = std::array::from_fn(|i| base[i] + self.offset());
            if winding != 0.0 && quad_winding(&candidate) == winding {
                return candidate;
            }
        }
        *base
    }
}

/// Winding sign of a strictly convex quad; `0.0` for anything else,
/// including quads with a near-straight corner.
pub fn quad_winding(quad: &[Pt2; 4]) -> Real {
    let mut extent_sq: Real = 0.0;
    for i in 0..4 {
        for j in (i + 1)..4 {
            extent_sq = extent_sq.max(distance_squared(&quad[i], &quad[j]));
        }
    }
    let min_turn = MIN_RELATIVE_TURN * extent_sq;
    if min_turn == 0.0 || !min_turn.is_finite() {
        return 0.0;
    }

    let turns: [Real; 4] =
        std::array::from_fn(|i| turn_orientation(&quad[i], &quad[(i + 1) % 4], &quad[(i + 2) % 4]));
    if turns.iter().all(|t| *t > min_turn) {
        1.0
    } else if turns.iter().all(|t| *t < -min_turn) {
        -1.0
    } else {
        0.0
    }
}
