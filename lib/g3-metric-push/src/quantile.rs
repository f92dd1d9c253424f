/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::cmp::Ordering;
use std::sync::Arc;

/// A configured summary percentile, expressed as a fraction.
#[derive(Clone, Debug, PartialEq)]
pub struct Quantile {
    value: f64,
    label: Arc<str>,
}

impl Quantile {
    pub fn new(value: f64) -> Self {
        let label = format!("{}", value * 100.0);
        Quantile {
            value,
            label: Arc::from(label),
        }
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The value of the `percentile` label, `0.9` is rendered as `90`.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.label
    }

    pub fn default_set() -> Vec<Quantile> {
        vec![Quantile::new(0.5), Quantile::new(0.9), Quantile::new(0.99)]
    }
}

pub(crate) fn sort_samples(samples: &mut [f64]) {
    samples.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
}

/// Estimate the percentile `p` of the sorted sample set.
///
/// Linear interpolation between the closest ranks, with rank `n * p - 0.5`.
/// Returns NaN if there is no sample or `p` is not positive, and `p` above 1
/// is treated as 1. A rank below the first sample yields the smallest sample.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() || p.is_nan() || p <= 0.0 {
        return f64::NAN;
    }

    let p = p.min(1.0);
    let last = sorted.len() - 1;
    let rank = sorted.len() as f64 * p - 0.5;
    // below the first rank: clamp to the smallest sample, never extrapolate
    if rank <= 0.0 {
        return sorted[0];
    }

    let lower = rank.floor();
    let fract = rank - lower;
    let lower = (lower as usize).min(last);
    if fract == 0.0 {
        return sorted[lower];
    }
    let upper = (lower + 1).min(last);
    (1.0 - fract) * sorted[lower] + fract * sorted[upper]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_rank() {
        let v = [10.0, 20.0, 30.0];
        assert_eq!(percentile(&v, 0.5), 20.0);
    }

    #[test]
    fn clamp_upper() {
        let v = [10.0, 20.0, 30.0];
        assert_eq!(percentile(&v, 0.9), 30.0);
        assert_eq!(percentile(&v, 0.99), 30.0);
        assert_eq!(percentile(&v, 1.0), 30.0);
        assert_eq!(percentile(&v, 7.0), 30.0);
    }

    #[test]
    fn interpolated() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&v, 0.5), 2.5);
        assert_eq!(percentile(&v, 0.25), 1.5);
        let p = percentile(&v, 0.8);
        assert!((p - 3.7).abs() < 1e-9);
    }

    #[test]
    fn lower_bound() {
        let v = [10.0, 20.0];
        assert_eq!(percentile(&v, 0.1), 10.0);
        assert_eq!(percentile(&[5.0], 0.01), 5.0);
    }

    #[test]
    fn not_a_number() {
        assert!(percentile(&[], 0.5).is_nan());
        assert!(percentile(&[1.0], 0.0).is_nan());
        assert!(percentile(&[1.0], -0.5).is_nan());
        assert!(percentile(&[1.0], f64::NAN).is_nan());
    }

    #[test]
    fn sort() {
        let mut v = [3.0, 1.0, 2.0];
        sort_samples(&mut v);
        assert_eq!(v, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn label() {
        assert_eq!(Quantile::new(0.5).as_str(), "50");
        assert_eq!(Quantile::new(0.9).as_str(), "90");
        assert_eq!(Quantile::new(0.99).as_str(), "99");
        assert_eq!(Quantile::new(1.0).as_str(), "100");
    }
}
