//! Dynamic Time Warping
//!
//! Accumulated cost over a (query frame × template frame) matrix with L2
//! local cost. The path is anchored at both corners and only moves forward.
//! A Sakoe-Chiba band limits work to O(n·w); the band is widened to at
//! least |n - m| so the end cell stays reachable.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::logic::features::FeatureVector;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DtwConfig {
    /// Band half-width in frames. `None` = unbounded
    pub window: Option<usize>,
    /// Divide the accumulated cost by the warping path length
    pub normalize: bool,
}

impl Default for DtwConfig {
    fn default() -> Self {
        Self {
            window: None,
            normalize: true,
        }
    }
}

/// Cost and length of the optimal warping path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DtwAlignment {
    pub cost: f32,
    pub path_len: usize,
}

impl DtwAlignment {
    pub fn distance(&self, normalize: bool) -> f32 {
        if normalize && self.path_len > 0 {
            self.cost / self.path_len as f32
        } else {
            self.cost
        }
    }
}

/// Align two sequences. `None` if either is empty.
///
/// Among equal-cost predecessors the shorter path wins, so the result is
/// symmetric in its arguments.
pub fn align(a: &[FeatureVector], b: &[FeatureVector], window: Option<usize>) -> Option<DtwAlignment> {
    let (n, m) = (a.len(), b.len());
    if n == 0 || m == 0 {
        return None;
    }

    // Wider than the longer sequence is the same as unbounded
    let band = window.map(|w| w.max(n.abs_diff(m)).min(n.max(m)));
    let mut acc = Array2::<f32>::from_elem((n, m), f32::INFINITY);
    let mut steps = Array2::<u32>::zeros((n, m));

    for i in 0..n {
        let (lo, hi) = match band {
            Some(w) => (i.saturating_sub(w), i.saturating_add(w).saturating_add(1).min(m)),
            None => (0, m),
        };

        for j in lo..hi {
            let local = a[i].distance(&b[j]);

            if i == 0 && j == 0 {
                acc[[0, 0]] = local;
                steps[[0, 0]] = 1;
                continue;
            }

            let mut best = (f32::INFINITY, u32::MAX);
            let candidates = [
                (i > 0 && j > 0).then(|| (i - 1, j - 1)),
                (i > 0).then(|| (i - 1, j)),
                (j > 0).then(|| (i, j - 1)),
            ];
            for (pi, pj) in candidates.into_iter().flatten() {
                let cand = (acc[[pi, pj]], steps[[pi, pj]]);
                if cand.0 < best.0 || (cand.0 == best.0 && cand.1 < best.1) {
                    best = cand;
                }
            }

            if best.0.is_finite() {
                acc[[i, j]] = local + best.0;
                steps[[i, j]] = best.1 + 1;
            }
        }
    }

    let cost = acc[[n - 1, m - 1]];
    if !cost.is_finite() {
        return None;
    }

    Some(DtwAlignment {
        cost,
        path_len: steps[[n - 1, m - 1]] as usize,
    })
}

/// Distance under `config`. `None` if either sequence is empty.
pub fn dtw_distance(a: &[FeatureVector], b: &[FeatureVector], config: &DtwConfig) -> Option<f32> {
    align(a, b, config.window).map(|al| al.distance(config.normalize))
}
