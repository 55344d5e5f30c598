//! Multiple-comparison corrections: Bonferroni and Benjamini-Hochberg.
//!
//! Both report, per hypothesis, the raw and adjusted p-value, whether the
//! adjusted value clears alpha, and whether the correction flipped the
//! verdict relative to the uncorrected test.

use serde::{Deserialize, Serialize};

/// Per-hypothesis outcome of a correction procedure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionResult {
    /// Identifier for the hypothesis (strategy name, pair label, ...).
    pub id: String,
    pub raw_p: f64,
    pub adjusted_p: f64,
    /// Significant at alpha after correction.
    pub significant: bool,
    /// True when correction changed the verdict from the raw p-value.
    pub flipped: bool,
}

/// Bonferroni correction: `p × m`, clamped to 1.
///
/// Results keep the input order.
pub fn bonferroni(p_values: &[(String, f64)], alpha: f64) -> Vec<CorrectionResult> {
    let m = p_values.len() as f64;
    p_values
        .iter()
        .map(|(id, raw_p)| {
            let adjusted = (raw_p * m).min(1.0);
            let significant = adjusted <= alpha;
            CorrectionResult {
                id: id.clone(),
                raw_p: *raw_p,
                adjusted_p: adjusted,
                significant,
                flipped: (*raw_p <= alpha) != significant,
            }
        })
        .collect()
}

/// Benjamini-Hochberg step-up FDR correction.
///
/// Given `m` hypothesis tests, the BH procedure sorts p-values ascending and
/// adjusts via `adjusted_(k) = min(p_(k) × m/k, adjusted_(k+1))`, working
/// backwards from the largest. Results are sorted by raw p-value ascending.
pub fn benjamini_hochberg(p_values: &[(String, f64)], alpha: f64) -> Vec<CorrectionResult> {
    if p_values.is_empty() {
        return Vec::new();
    }

    let m = p_values.len();

    let mut indexed: Vec<(&str, f64)> = p_values
        .iter()
        .map(|(id, p)| (id.as_str(), *p))
        .collect();
    indexed.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut adjusted: Vec<f64> = vec![0.0; m];
    adjusted[m - 1] = indexed[m - 1].1.min(1.0);

    for k in (0..m - 1).rev() {
        let rank = k + 1;
        let corrected = indexed[k].1 * m as f64 / rank as f64;
        adjusted[k] = corrected.min(adjusted[k + 1]).min(1.0);
    }

    indexed
        .iter()
        .zip(adjusted.iter())
        .map(|(&(id, raw_p), &adj_p)| {
            let significant = adj_p <= alpha;
            CorrectionResult {
                id: id.to_string(),
                raw_p,
                adjusted_p: adj_p,
                significant,
                flipped: (raw_p <= alpha) != significant,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(pairs: &[(&str, f64)]) -> Vec<(String, f64)> {
        pairs.iter().map(|(id, p)| (id.to_string(), *p)).collect()
    }

    // ── Bonferroni ──

    #[test]
    fn bonferroni_single_test_unchanged() {
        let result = bonferroni(&named(&[("a", 0.03)]), 0.05);
        assert!((result[0].adjusted_p - 0.03).abs() < 1e-12);
        assert!(result[0].significant);
        assert!(!result[0].flipped);
    }

    #[test]
    fn bonferroni_scales_by_family_size() {
        let result = bonferroni(&named(&[("a", 0.01), ("b", 0.02), ("c", 0.40)]), 0.05);
        assert!((result[0].adjusted_p - 0.03).abs() < 1e-12);
        assert!((result[1].adjusted_p - 0.06).abs() < 1e-12);
        assert!((result[2].adjusted_p - 1.0).abs() < 1e-12);
    }

    #[test]
    fn bonferroni_flags_flips() {
        // 0.03 is raw-significant but not after ×3
        let result = bonferroni(&named(&[("a", 0.03), ("b", 0.5), ("c", 0.6)]), 0.05);
        assert!(!result[0].significant);
        assert!(result[0].flipped);
        assert!(!result[1].flipped);
    }

    #[test]
    fn bonferroni_clamps_to_one() {
        let result = bonferroni(&named(&[("a", 0.6), ("b", 0.7)]), 0.05);
        assert!(result.iter().all(|r| r.adjusted_p <= 1.0));
    }

    #[test]
    fn bonferroni_empty() {
        assert!(bonferroni(&[], 0.05).is_empty());
    }

    // ── Benjamini-Hochberg ──

    #[test]
    fn bh_empty() {
        assert!(benjamini_hochberg(&[], 0.05).is_empty());
    }

    #[test]
    fn bh_single_significant() {
        let result = benjamini_hochberg(&named(&[("a", 0.01)]), 0.05);
        assert_eq!(result.len(), 1);
        assert!(result[0].significant);
        assert!((result[0].adjusted_p - 0.01).abs() < 1e-10);
    }

    #[test]
    fn bh_mixed_significance() {
        let pvals = named(&[
            ("strong", 0.001),
            ("medium", 0.020),
            ("weak", 0.040),
            ("noise1", 0.300),
            ("noise2", 0.700),
        ]);
        let result = benjamini_hochberg(&pvals, 0.05);
        // BH thresholds at ranks 1..5: 0.01, 0.02, 0.03, 0.04, 0.05 —
        // "strong" and "medium" clear, "weak" does not.
        let sig: Vec<&str> = result
            .iter()
            .filter(|r| r.significant)
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(sig, vec!["strong", "medium"]);
    }

    #[test]
    fn bh_adjusted_p_monotonic() {
        let pvals = named(&[
            ("a", 0.01),
            ("b", 0.03),
            ("c", 0.05),
            ("d", 0.10),
            ("e", 0.50),
        ]);
        let result = benjamini_hochberg(&pvals, 0.05);
        for i in 1..result.len() {
            assert!(result[i].adjusted_p >= result[i - 1].adjusted_p - 1e-10);
        }
    }

    #[test]
    fn bh_less_conservative_than_bonferroni() {
        let pvals = named(&[("a", 0.01), ("b", 0.02), ("c", 0.03), ("d", 0.04)]);
        let bh = benjamini_hochberg(&pvals, 0.05);
        let bf = bonferroni(&pvals, 0.05);
        let bh_sig = bh.iter().filter(|r| r.significant).count();
        let bf_sig = bf.iter().filter(|r| r.significant).count();
        assert!(bh_sig >= bf_sig);
    }
}
