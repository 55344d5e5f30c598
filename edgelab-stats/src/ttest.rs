//! Hypothesis tests: one-sample t, Welch's t, Mann–Whitney U, and the
//! two-sample method chooser.
//!
//! Degenerate-but-valid inputs (zero variance, all-identical ranks) produce
//! an explicit `TestOutcome::Indeterminate`, never a NaN p-value. Samples
//! too small to test at all are an error.

use serde::{Deserialize, Serialize};

use crate::dist::{normal_cdf, t_quantile, t_two_sided_p};
use crate::effect::{cles, cohens_d_one_sample, cohens_d_two_sample, EffectSize};
use crate::error::StatsError;
use crate::metrics::{mean_f64, std_dev};

/// Which test produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestMethod {
    OneSampleT,
    WelchT,
    MannWhitneyU,
}

/// A conclusive test result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticalResult {
    pub method: TestMethod,
    pub statistic: f64,
    /// Two-sided p-value.
    pub p_value: f64,
    /// Degrees of freedom, where the method has them.
    pub df: Option<f64>,
    /// 95% confidence interval for the estimated mean (difference), where
    /// the method provides one (t-based tests only).
    pub ci: Option<(f64, f64)>,
    pub effect: EffectSize,
    /// Total observations across both samples.
    pub sample_size: usize,
}

/// Outcome of a test on valid input: either a result or an explicit
/// statement that the data cannot support one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TestOutcome {
    Conclusive(StatisticalResult),
    Indeterminate { reason: String },
}

impl TestOutcome {
    pub fn as_conclusive(&self) -> Option<&StatisticalResult> {
        match self {
            TestOutcome::Conclusive(r) => Some(r),
            TestOutcome::Indeterminate { .. } => None,
        }
    }
}

/// One-sample t-test against zero mean, two-sided.
pub fn one_sample_t_test(values: &[f64]) -> Result<TestOutcome, StatsError> {
    let n = values.len();
    if n < 2 {
        return Err(StatsError::SampleTooSmall { n, required: 2 });
    }

    let n_f = n as f64;
    let mean = mean_f64(values);
    let std = std_dev(values);
    if std < 1e-15 {
        return Ok(TestOutcome::Indeterminate {
            reason: "zero variance".into(),
        });
    }

    let se = std / n_f.sqrt();
    let t = mean / se;
    let df = n_f - 1.0;
    let half_width = t_quantile(0.975, df) * se;

    Ok(TestOutcome::Conclusive(StatisticalResult {
        method: TestMethod::OneSampleT,
        statistic: t,
        p_value: t_two_sided_p(t, df),
        df: Some(df),
        ci: Some((mean - half_width, mean + half_width)),
        effect: EffectSize::one_sample(cohens_d_one_sample(values)),
        sample_size: n,
    }))
}

/// Welch's unequal-variance t-test, two-sided, with Welch–Satterthwaite df.
pub fn welch_t_test(a: &[f64], b: &[f64]) -> Result<TestOutcome, StatsError> {
    let (na, nb) = (a.len(), b.len());
    if na < 2 {
        return Err(StatsError::SampleTooSmall { n: na, required: 2 });
    }
    if nb < 2 {
        return Err(StatsError::SampleTooSmall { n: nb, required: 2 });
    }

    let (na_f, nb_f) = (na as f64, nb as f64);
    let (sa, sb) = (std_dev(a), std_dev(b));
    let (va, vb) = (sa * sa / na_f, sb * sb / nb_f);
    let se = (va + vb).sqrt();
    if se < 1e-15 {
        return Ok(TestOutcome::Indeterminate {
            reason: "zero variance in both samples".into(),
        });
    }

    let diff = mean_f64(a) - mean_f64(b);
    let t = diff / se;
    let df = (va + vb).powi(2)
        / (va * va / (na_f - 1.0) + vb * vb / (nb_f - 1.0));
    let half_width = t_quantile(0.975, df) * se;

    Ok(TestOutcome::Conclusive(StatisticalResult {
        method: TestMethod::WelchT,
        statistic: t,
        p_value: t_two_sided_p(t, df),
        df: Some(df),
        ci: Some((diff - half_width, diff + half_width)),
        effect: EffectSize::two_sample(cohens_d_two_sample(a, b), cles(a, b)),
        sample_size: na + nb,
    }))
}

/// Mann–Whitney U with tie-corrected normal approximation, two-sided.
pub fn mann_whitney_u(a: &[f64], b: &[f64]) -> Result<TestOutcome, StatsError> {
    let (na, nb) = (a.len(), b.len());
    if na < 2 {
        return Err(StatsError::SampleTooSmall { n: na, required: 2 });
    }
    if nb < 2 {
        return Err(StatsError::SampleTooSmall { n: nb, required: 2 });
    }

    let (na_f, nb_f) = (na as f64, nb as f64);
    let n_f = na_f + nb_f;

    // Average ranks over the combined sample, ties sharing their mean rank.
    let mut combined: Vec<(f64, bool)> = a
        .iter()
        .map(|&v| (v, true))
        .chain(b.iter().map(|&v| (v, false)))
        .collect();
    combined.sort_by(|x, y| x.0.partial_cmp(&y.0).unwrap_or(std::cmp::Ordering::Equal));

    let mut rank_sum_a = 0.0_f64;
    let mut tie_term = 0.0_f64;
    let mut i = 0;
    while i < combined.len() {
        let mut j = i;
        while j + 1 < combined.len() && combined[j + 1].0 == combined[i].0 {
            j += 1;
        }
        // Ranks are 1-based; the tied group [i, j] shares the average rank.
        let avg_rank = (i + 1 + j + 1) as f64 / 2.0;
        let group = combined[i..=j].iter();
        rank_sum_a += avg_rank * group.filter(|(_, from_a)| *from_a).count() as f64;

        let t = (j - i + 1) as f64;
        if t > 1.0 {
            tie_term += t * t * t - t;
        }
        i = j + 1;
    }

    let u = rank_sum_a - na_f * (na_f + 1.0) / 2.0;
    let mean_u = na_f * nb_f / 2.0;
    let var_u = na_f * nb_f / 12.0 * ((n_f + 1.0) - tie_term / (n_f * (n_f - 1.0)));
    if var_u < 1e-15 {
        return Ok(TestOutcome::Indeterminate {
            reason: "all observations identical".into(),
        });
    }

    let z = (u - mean_u) / var_u.sqrt();
    let p = (2.0 * (1.0 - normal_cdf(z.abs()))).clamp(0.0, 1.0);

    Ok(TestOutcome::Conclusive(StatisticalResult {
        method: TestMethod::MannWhitneyU,
        statistic: u,
        p_value: p,
        df: None,
        ci: None,
        effect: EffectSize::two_sample(cohens_d_two_sample(a, b), cles(a, b)),
        sample_size: na + nb,
    }))
}

/// Two-sample comparison with automatic method choice.
///
/// Welch's t when both samples have at least 30 observations and pass a
/// moment-based normality screen (|skewness| <= 1, |excess kurtosis| <= 2);
/// Mann–Whitney U otherwise. The chosen method is reported in the result.
pub fn compare_samples(a: &[f64], b: &[f64]) -> Result<TestOutcome, StatsError> {
    if a.len() >= 30 && b.len() >= 30 && roughly_normal(a) && roughly_normal(b) {
        welch_t_test(a, b)
    } else {
        mann_whitney_u(a, b)
    }
}

fn roughly_normal(values: &[f64]) -> bool {
    skewness(values).abs() <= 1.0 && excess_kurtosis(values).abs() <= 2.0
}

/// Moment-based skewness: m3 / m2^1.5. 0.0 on zero variance.
pub(crate) fn skewness(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 3 {
        return 0.0;
    }
    let mean = mean_f64(values);
    let m2 = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
    if m2 < 1e-30 {
        return 0.0;
    }
    let m3 = values.iter().map(|v| (v - mean).powi(3)).sum::<f64>() / n as f64;
    m3 / m2.powf(1.5)
}

/// Moment-based excess kurtosis: m4 / m2^2 − 3. 0.0 on zero variance.
pub(crate) fn excess_kurtosis(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 4 {
        return 0.0;
    }
    let mean = mean_f64(values);
    let m2 = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
    if m2 < 1e-30 {
        return 0.0;
    }
    let m4 = values.iter().map(|v| (v - mean).powi(4)).sum::<f64>() / n as f64;
    m4 / (m2 * m2) - 3.0
}
