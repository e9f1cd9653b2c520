//! Cone coverage predicates.
//!
//! A node is covered when every cone of width α with apex at the node contains
//! at least one selected neighbor. Equivalently, no gap between circularly
//! sorted neighbor bearings exceeds α.

use crate::domain::node::normalize_angle;
use std::f64::consts::{PI, TAU};

/// Tolerance for angular comparisons
pub const ANGLE_EPSILON: f64 = 1e-9;

/// Outcome of a coverage evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    /// Every gap is at most α
    Covered,
    /// Not covered, but no unselected candidates remain (or none ever existed)
    Exempt,
    /// Not covered and more candidates are available
    Uncovered,
}

impl Coverage {
    pub fn is_satisfied(&self) -> bool {
        !matches!(self, Coverage::Uncovered)
    }
}

/// Largest angular gap between consecutive bearings, including the wrap-around gap.
///
/// An empty set leaves the whole circle open and reports 2π.
pub fn max_gap(angles: &[f64]) -> f64 {
    if angles.is_empty() {
        return TAU;
    }

    let mut sorted: Vec<f64> = angles.iter().map(|&a| normalize_angle(a)).collect();
    sorted.sort_by(f64::total_cmp);

    let wrap = sorted[0] + TAU - sorted[sorted.len() - 1];
    sorted
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold(wrap, f64::max)
}

/// Signed offset from `from` to `to`, in (-π, π]
fn signed_offset(from: f64, to: f64) -> f64 {
    let d = normalize_angle(to - from);
    if d > PI { d - TAU } else { d }
}

/// Pure coverage evaluator for a fixed cone width α
#[derive(Debug, Clone, Copy)]
pub struct ConeCoverageEvaluator {
    alpha: f64,
}

impl ConeCoverageEvaluator {
    pub fn new(alpha: f64) -> Self {
        Self { alpha }
    }

    /// True iff the bearings leave no gap wider than α. Zero bearings are never covered.
    pub fn is_covered(&self, angles: &[f64]) -> bool {
        !angles.is_empty() && max_gap(angles) <= self.alpha + ANGLE_EPSILON
    }

    /// Coverage with the exhaustion exemption applied.
    ///
    /// `remaining` is the number of candidates not yet selected. With nothing left to
    /// try there is no obligation to satisfy, which also covers the empty-candidate case.
    pub fn evaluate(&self, angles: &[f64], remaining: usize) -> Coverage {
        if self.is_covered(angles) {
            Coverage::Covered
        } else if remaining == 0 {
            Coverage::Exempt
        } else {
            Coverage::Uncovered
        }
    }

    /// True iff the α-wide cone centred on `angle` lies inside the union of the
    /// cones centred on `others`.
    ///
    /// Removing such a neighbor leaves the node's covered direction set unchanged.
    pub fn cone_is_redundant(&self, angle: f64, others: &[f64]) -> bool {
        let half = self.alpha / 2.0;

        // Clip every other cone to the target cone, in coordinates relative to `angle`
        let mut spans: Vec<(f64, f64)> = Vec::with_capacity(others.len() * 3);
        for &other in others {
            let d = signed_offset(angle, other);
            for shift in [-TAU, 0.0, TAU] {
                let lo = (d + shift - half).max(-half);
                let hi = (d + shift + half).min(half);
                if lo < hi {
                    spans.push((lo, hi));
                }
            }
        }
        spans.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut reach = -half;
        for (lo, hi) in spans {
            if lo > reach + ANGLE_EPSILON {
                return false;
            }
            reach = reach.max(hi);
        }
        reach >= half - ANGLE_EPSILON
    }
}
