//! Clamped uniform knot vectors.

use std::ops::Deref;

#[cfg(feature = "serde")]
use serde_::{Deserialize, Serialize};

/// A non-decreasing sequence of knots in `[0, 1]`.
///
/// The vectors built here are *clamped*: the first `order` knots are 0 and
/// the last `order` knots are 1, so the curve starts at the first control
/// point and ends at the last one. The interior knots are evenly spaced.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_")
)]
pub struct KnotVector {
    knots: Vec<f64>,
}

impl KnotVector {
    /// Compute the knot vector for a curve of the given `order` whose last
    /// control point has index `last`.
    ///
    /// The result has `last + order + 1` entries: `order` zeros, a ramp of
    /// `last - order + 1` interior values spaced `1 / (last - order + 2)`
    /// apart, and `order` ones. When there are fewer control points than the
    /// order the ramp is simply empty; the vector is still well formed but no
    /// curve can be evaluated against it.
    pub fn clamped_uniform(last: usize, order: usize) -> KnotVector {
        let spans = last as isize - order as isize + 2;
        let interior = (spans - 1).max(0) as usize;
        let mut knots = Vec::with_capacity(2 * order + interior);
        knots.extend(std::iter::repeat(0.0).take(order));
        if spans > 0 {
            let step = 1.0 / spans as f64;
            let mut knot = 0.0;
            for _ in 0..interior {
                knot += step;
                knots.push(knot);
            }
        }
        knots.extend(std::iter::repeat(1.0).take(order));
        KnotVector { knots }
    }

    /// Find the span `d` with `U[d] <= u < U[d + 1]`.
    ///
    /// Only the first `last + order` spans are searched, lowest index first.
    /// Spans of zero width never match, and neither does `u == 1.0`: the
    /// spans are half open, so the right end of the domain is not part of
    /// any of them.
    pub fn find_span(&self, u: f64, order: usize, last: usize) -> Option<usize> {
        let end = (last + order).min(self.knots.len().saturating_sub(1));
        (0..end).find(|&i| self.knots[i] <= u && u < self.knots[i + 1])
    }

    /// The parameter range covered by the vector, `(U[0], U[last])`.
    pub fn domain(&self) -> (f64, f64) {
        match (self.knots.first(), self.knots.last()) {
            (Some(&lo), Some(&hi)) => (lo, hi),
            _ => (0.0, 0.0),
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.knots
    }
}

impl Deref for KnotVector {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.knots
    }
}
