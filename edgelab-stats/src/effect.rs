//! Effect sizes: Cohen's d, the Common Language Effect Size, and the
//! conventional magnitude labels.

use serde::{Deserialize, Serialize};

use crate::metrics::{mean_f64, std_dev};

/// Conventional magnitude label for a standardized effect size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectMagnitude {
    /// |d| < 0.2
    Negligible,
    /// 0.2 <= |d| < 0.5
    Small,
    /// 0.5 <= |d| < 0.8
    Medium,
    /// |d| >= 0.8
    Large,
}

impl EffectMagnitude {
    pub fn from_d(d: f64) -> Self {
        let a = d.abs();
        if a < 0.2 {
            EffectMagnitude::Negligible
        } else if a < 0.5 {
            EffectMagnitude::Small
        } else if a < 0.8 {
            EffectMagnitude::Medium
        } else {
            EffectMagnitude::Large
        }
    }
}

/// A standardized effect size with its magnitude label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectSize {
    pub cohens_d: f64,
    /// P(a random draw from the first sample exceeds one from the second),
    /// ties counted half. Only meaningful for two-sample comparisons.
    pub cles: Option<f64>,
    pub magnitude: EffectMagnitude,
}

impl EffectSize {
    pub fn one_sample(d: f64) -> Self {
        Self {
            cohens_d: d,
            cles: None,
            magnitude: EffectMagnitude::from_d(d),
        }
    }

    pub fn two_sample(d: f64, cles: f64) -> Self {
        Self {
            cohens_d: d,
            cles: Some(cles),
            magnitude: EffectMagnitude::from_d(d),
        }
    }
}

/// One-sample Cohen's d against zero: mean / std. 0.0 on zero variance.
pub fn cohens_d_one_sample(values: &[f64]) -> f64 {
    let std = std_dev(values);
    if std < 1e-15 {
        return 0.0;
    }
    mean_f64(values) / std
}

/// Two-sample Cohen's d with pooled standard deviation. 0.0 on zero pooled
/// variance or samples smaller than 2.
pub fn cohens_d_two_sample(a: &[f64], b: &[f64]) -> f64 {
    let (na, nb) = (a.len(), b.len());
    if na < 2 || nb < 2 {
        return 0.0;
    }
    let (sa, sb) = (std_dev(a), std_dev(b));
    let pooled_var = ((na - 1) as f64 * sa * sa + (nb - 1) as f64 * sb * sb)
        / (na + nb - 2) as f64;
    let pooled = pooled_var.sqrt();
    if pooled < 1e-15 {
        return 0.0;
    }
    (mean_f64(a) - mean_f64(b)) / pooled
}

/// Common Language Effect Size: P(draw from `a` > draw from `b`), computed
/// over all pairs, with ties counted half. 0.5 for empty inputs.
pub fn cles(a: &[f64], b: &[f64]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.5;
    }
    let mut wins = 0.0_f64;
    for &x in a {
        for &y in b {
            if x > y {
                wins += 1.0;
            } else if x == y {
                wins += 0.5;
            }
        }
    }
    wins / (a.len() * b.len()) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magnitude_thresholds() {
        assert_eq!(EffectMagnitude::from_d(0.1), EffectMagnitude::Negligible);
        assert_eq!(EffectMagnitude::from_d(0.2), EffectMagnitude::Small);
        assert_eq!(EffectMagnitude::from_d(-0.3), EffectMagnitude::Small);
        assert_eq!(EffectMagnitude::from_d(0.5), EffectMagnitude::Medium);
        assert_eq!(EffectMagnitude::from_d(0.8), EffectMagnitude::Large);
        assert_eq!(EffectMagnitude::from_d(-2.0), EffectMagnitude::Large);
    }

    #[test]
    fn one_sample_d_known() {
        // mean 2, std 1 → d = 2
        let values = vec![1.0, 2.0, 3.0];
        assert!((cohens_d_one_sample(&values) - 2.0).abs() < 1e-10);
    }

    #[test]
    fn one_sample_d_zero_variance() {
        assert_eq!(cohens_d_one_sample(&[5.0, 5.0, 5.0]), 0.0);
    }

    #[test]
    fn two_sample_d_sign_follows_difference() {
        let a = vec![3.0, 4.0, 5.0, 6.0];
        let b = vec![1.0, 2.0, 3.0, 4.0];
        let d = cohens_d_two_sample(&a, &b);
        assert!(d > 0.0);
        assert!((cohens_d_two_sample(&b, &a) + d).abs() < 1e-10);
    }

    #[test]
    fn two_sample_d_identical_samples_is_zero() {
        let a = vec![1.0, 2.0, 3.0];
        assert_eq!(cohens_d_two_sample(&a, &a), 0.0);
    }

    #[test]
    fn cles_total_dominance() {
        let a = vec![10.0, 11.0, 12.0];
        let b = vec![1.0, 2.0, 3.0];
        assert_eq!(cles(&a, &b), 1.0);
        assert_eq!(cles(&b, &a), 0.0);
    }

    #[test]
    fn cles_identical_samples_is_half() {
        let a = vec![1.0, 2.0, 3.0];
        assert!((cles(&a, &a) - 0.5).abs() < 1e-10);
    }

    #[test]
    fn cles_ties_counted_half() {
        let a = vec![1.0];
        let b = vec![1.0];
        assert_eq!(cles(&a, &b), 0.5);
    }
}
