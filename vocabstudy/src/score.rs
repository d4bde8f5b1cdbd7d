//! Scoring a completed assessment: the proportion of sampled words the
//! learner knows, a Wilson score interval around it, and the same numbers
//! scaled up to whole word lists.

use crate::{assessment::AssessmentRecord, errors::InvalidZScoreError, meta::AssessmentMeta};

/// The z-score for a two-sided 95% confidence interval.
pub const DEFAULT_Z: f64 = 1.96;

/// Wilson score interval for `k` successes out of `n` trials, clamped to
/// `[0, 1]`. With no trials we return `(0.0, 0.0)`.
pub fn wilson_interval(k: usize, n: usize, z: f64) -> (f64, f64) {
    if n == 0 {
        return (0.0, 0.0);
    }
    let n_f = n as f64;
    let p = k as f64 / n_f;
    let z2 = z * z;
    let denom = 1.0 + z2 / n_f;
    let center = (p + z2 / (2.0 * n_f)) / denom;
    let radius = z * (p * (1.0 - p) / n_f + z2 / (4.0 * n_f * n_f)).sqrt() / denom;
    let low = (center - radius).max(0.0);
    let high = (center + radius).min(1.0);
    // The interval always contains `p` mathematically; don't let floating
    // point error at `k == 0` or `k == n` say otherwise.
    (low.min(p), high.max(p))
}

/// Round a non-negative estimate to the nearest whole word, with ties going
/// up (`2.5` becomes `3`).
pub fn round_count(x: f64) -> u64 {
    // `f64::round` rounds half away from zero, which is half up for
    // non-negative numbers.
    x.max(0.0).round() as u64
}

/// A proportion and its interval scaled up to a list of `population` words.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Extrapolation {
    /// The size of the word list we're scaling to.
    pub population: u64,
    /// Estimated number of known words.
    pub estimate: u64,
    /// Lower end of the interval.
    pub low: u64,
    /// Upper end of the interval.
    pub high: u64,
}

impl Extrapolation {
    fn new(population: u64, p: f64, ci_low: f64, ci_high: f64) -> Extrapolation {
        let scale = |x: f64| round_count(x * population as f64);
        Extrapolation {
            population,
            estimate: scale(p),
            low: scale(ci_low),
            high: scale(ci_high),
        }
    }
}

/// The outcome of scoring an assessment.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoringResult {
    /// Number of scored rows.
    pub n: usize,
    /// Number of rows marked as passively known.
    pub k: usize,
    /// `k / n`, or `0.0` for an empty assessment.
    pub p: f64,
    /// Lower bound of the confidence interval on `p`.
    pub ci_low: f64,
    /// Upper bound of the confidence interval on `p`.
    pub ci_high: f64,
    /// The z-score the interval was computed with.
    pub z: f64,
    /// Extrapolation to the token set the sample was drawn from.
    pub in_text: Option<Extrapolation>,
    /// Extrapolation to an externally supplied word list.
    pub external: Option<Extrapolation>,
}

/// Scores assessments at a fixed confidence level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scorer {
    z: f64,
}

impl Scorer {
    /// Create a scorer using the z-score `z`, which must be positive and
    /// finite.
    pub fn new(z: f64) -> Result<Scorer, InvalidZScoreError> {
        if z.is_finite() && z > 0.0 {
            Ok(Scorer { z })
        } else {
            Err(InvalidZScoreError { z })
        }
    }

    /// The z-score this scorer uses.
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Score `records`. When `meta` is present the result is scaled to its
    /// `total_unique_types`; when `external_size` is present, to that too.
    pub fn score(
        &self,
        records: &[AssessmentRecord],
        meta: Option<&AssessmentMeta>,
        external_size: Option<u64>,
    ) -> ScoringResult {
        let n = records.len();
        let k = records.iter().filter(|r| r.is_passive_known()).count();
        let p = if n > 0 { k as f64 / n as f64 } else { 0.0 };
        let (ci_low, ci_high) = wilson_interval(k, n, self.z);

        let in_text = meta.map(|m| {
            Extrapolation::new(m.total_unique_types as u64, p, ci_low, ci_high)
        });
        let external = external_size.map(|l| Extrapolation::new(l, p, ci_low, ci_high));

        ScoringResult {
            n,
            k,
            p,
            ci_low,
            ci_high,
            z: self.z,
            in_text,
            external,
        }
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Scorer { z: DEFAULT_Z }
    }
}

/// Score `records` with a 95% Wilson interval.
pub fn score(
    records: &[AssessmentRecord],
    meta: Option<&AssessmentMeta>,
    external_size: Option<u64>,
) -> ScoringResult {
    Scorer::default().score(records, meta, external_size)
}

#[cfg(test)]
mod test {
    use super::*;

    const TOLERANCE: f64 = 1e-3;

    fn records(known: usize, unknown: usize) -> Vec<AssessmentRecord> {
        let mut out = vec![];
        for i in 0..known {
            out.push(AssessmentRecord {
                word: format!("அறி{}", i),
                passive_known: "Y".to_owned(),
                ..AssessmentRecord::default()
            });
        }
        for i in 0..unknown {
            out.push(AssessmentRecord {
                word: format!("புதி{}", i),
                passive_known: (if i % 2 == 0 { "N" } else { "" }).to_owned(),
                ..AssessmentRecord::default()
            });
        }
        out
    }

    fn meta(total: usize) -> AssessmentMeta {
        AssessmentMeta {
            total_unique_types: total,
            sample_size: Some(100),
            seed: Some(42),
        }
    }

    #[test]
    fn empty_assessment_scores_zero() {
        let result = score(&[], Some(&meta(3000)), Some(10_000));
        assert_eq!(result.n, 0);
        assert_eq!(result.k, 0);
        assert_eq!(result.p, 0.0);
        assert_eq!(result.ci_low, 0.0);
        assert_eq!(result.ci_high, 0.0);
        assert_eq!(
            result.in_text,
            Some(Extrapolation {
                population: 3000,
                estimate: 0,
                low: 0,
                high: 0,
            })
        );
    }

    #[test]
    fn sixty_of_a_hundred() {
        let result = score(&records(60, 40), None, None);
        assert_eq!(result.n, 100);
        assert_eq!(result.k, 60);
        assert!((result.p - 0.600).abs() < TOLERANCE);
        assert!((result.ci_low - 0.502).abs() < TOLERANCE);
        assert!((result.ci_high - 0.690).abs() < TOLERANCE);
        assert_eq!(result.in_text, None);
        assert_eq!(result.external, None);
    }

    #[test]
    fn extrapolates_to_text_and_external_list() {
        let result = score(&records(60, 40), Some(&meta(3000)), Some(10_000));
        assert_eq!(
            result.in_text,
            Some(Extrapolation {
                population: 3000,
                estimate: 1800,
                low: 1506,
                high: 2072,
            })
        );
        assert_eq!(
            result.external,
            Some(Extrapolation {
                population: 10_000,
                estimate: 6000,
                low: 5020,
                high: 6906,
            })
        );
    }

    #[test]
    fn interval_brackets_proportion_for_all_k() {
        for n in 1..=120 {
            for k in 0..=n {
                let p = k as f64 / n as f64;
                let (low, high) = wilson_interval(k, n, DEFAULT_Z);
                assert!(0.0 <= low, "n={} k={}", n, k);
                assert!(low <= p, "n={} k={}", n, k);
                assert!(p <= high, "n={} k={}", n, k);
                assert!(high <= 1.0, "n={} k={}", n, k);
            }
        }
    }

    #[test]
    fn extremes_are_clamped() {
        let (low, high) = wilson_interval(0, 10, DEFAULT_Z);
        assert_eq!(low, 0.0);
        assert!((high - 0.2775).abs() < TOLERANCE);
        let (low, high) = wilson_interval(10, 10, DEFAULT_Z);
        assert!((low - 0.7225).abs() < TOLERANCE);
        assert_eq!(high, 1.0);
    }

    #[test]
    fn wider_z_gives_wider_interval() {
        let (low95, high95) = wilson_interval(30, 50, DEFAULT_Z);
        let (low99, high99) = wilson_interval(30, 50, 2.576);
        assert!(low99 < low95);
        assert!(high99 > high95);
    }

    #[test]
    fn rounding_ties_go_up() {
        assert_eq!(round_count(0.5), 1);
        assert_eq!(round_count(1.5), 2);
        assert_eq!(round_count(2.5), 3);
        assert_eq!(round_count(2.49), 2);
        assert_eq!(round_count(0.0), 0);

        // p = 0.5 against odd populations lands exactly on a half.
        let result = score(&records(1, 1), Some(&meta(3)), Some(5));
        assert_eq!(result.in_text.unwrap().estimate, 2);
        assert_eq!(result.external.unwrap().estimate, 3);
    }

    #[test]
    fn only_passive_column_counts() {
        let rows = vec![
            AssessmentRecord {
                word: "வீடு".to_owned(),
                passive_known: " yes".to_owned(),
                active_known: "N".to_owned(),
                ..AssessmentRecord::default()
            },
            AssessmentRecord {
                word: "மரம்".to_owned(),
                passive_known: "?".to_owned(),
                active_known: "Y".to_owned(),
                ..AssessmentRecord::default()
            },
        ];
        let result = score(&rows, None, None);
        assert_eq!(result.k, 1);
        assert_eq!(result.p, 0.5);
    }

    #[test]
    fn scorer_rejects_bad_z() {
        assert!(Scorer::new(0.0).is_err());
        assert!(Scorer::new(-1.96).is_err());
        assert!(Scorer::new(f64::NAN).is_err());
        assert!(Scorer::new(f64::INFINITY).is_err());
        assert_eq!(Scorer::new(2.576).unwrap().z(), 2.576);
    }
}
