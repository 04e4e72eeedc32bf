use std::cmp::Ordering;

use num_traits::{Float, FromPrimitive};
use rand::Rng;
use statrs::distribution::{ContinuousCDF, Normal};

use crate::{Degeneracy, Re, Repartition, Sample, Statistic};

/// Two-sample permutation test for a location shift.
///
/// Given two samples and a statistic, the test pools all observations,
/// repeatedly relabels them into two groups of the original sizes, and ranks
/// the observed statistic against the resulting reference distribution.
///
/// # Example
/// ```rust
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use permutest::{PermutationTest, Sample, WelchT};
///
/// let a = Sample::new(vec![4.1, 5.2, 3.9, 4.8, 5.5]);
/// let b = Sample::new(vec![5.0, 6.1, 5.8, 6.4, 5.2]);
/// let test = PermutationTest::standard(WelchT);
/// let result = test.p_value(&a, &b, StdRng::seed_from_u64(1)).unwrap();
/// assert!(result.p_value > 0.0 && result.p_value <= 1.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PermutationTest<S> {
    /// Statistic ranked against its permutation distribution.
    pub statistic: S,
    /// Number of random relabelings per test invocation.
    pub n_permutations: usize,
}

/// Result of one permutation-test invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestResult<F> {
    /// Statistic of the samples as observed (signed).
    pub observed_statistic: F,
    /// Two-sided p-value, `(#{|Tᵢ| ≥ |T_obs|} + 1) / (R + 1)`.
    ///
    /// The `+1` counts the observed arrangement itself, so the p-value is
    /// never exactly zero and always at least `1 / (R + 1)`.
    pub p_value: F,
}

impl<S> PermutationTest<S> {
    /// Creates a test with an explicitly specified number of permutations.
    ///
    /// # Panics
    /// Panics if `n_permutations == 0`.
    pub fn new(statistic: S, n_permutations: usize) -> Self {
        assert!(n_permutations > 0, "n_permutations must be positive");
        Self {
            statistic,
            n_permutations,
        }
    }

    /// The conventional R = 999 permutations.
    pub fn standard(statistic: S) -> Self {
        Self::new(statistic, 999)
    }

    /// Creates a test with a desired absolute accuracy for the p-value
    /// estimate.
    ///
    /// Uses the conservative binomial sample-size formula
    /// `R = ceil( z²_{1−α/2} · 0.25 / accuracy² )`, clamped to
    /// `[100, 10_000_000]`. The bound is worst-case (true p ≈ 0.5); for
    /// small p-values the realized accuracy is much better.
    ///
    /// # Panics
    /// Panics if `accuracy ∉ (0, 0.5)` or `confidence_level ∉ (0.5, 1.0)`.
    pub fn from_absolute_accuracy(statistic: S, accuracy: f64, confidence_level: f64) -> Self {
        assert!(
            accuracy > 0.0 && accuracy < 0.5,
            "accuracy must be in (0, 0.5), got {accuracy}"
        );
        assert!(
            confidence_level > 0.5 && confidence_level < 1.0,
            "confidence_level must be in (0.5, 1.0), got {confidence_level}"
        );

        let alpha = 1.0 - confidence_level;
        let z = Normal::new(0.0, 1.0)
            .expect("valid N(0,1) distribution")
            .inverse_cdf(1.0 - alpha / 2.0);

        let n_min = (z * z * 0.25) / (accuracy * accuracy);
        let n_permutations = (n_min.ceil() as usize).clamp(100, 10_000_000);

        Self {
            statistic,
            n_permutations,
        }
    }

    /// Two-sided p-value for the observed pair of samples.
    ///
    /// Aborts with the first [`Degeneracy`] hit by either the observed or
    /// any permuted statistic; no partial result is produced.
    pub fn p_value<F, R>(
        &self,
        a: &Sample<F>,
        b: &Sample<F>,
        rng: R,
    ) -> Result<TestResult<F>, Degeneracy>
    where
        F: Float + FromPrimitive,
        R: Rng + Clone,
        S: Statistic<F>,
    {
        let observed = self.statistic.compute(a.as_ref(), b.as_ref())?;
        let observed_abs = observed.abs();

        let reference = self.distribution(a, b, rng)?;
        let extreme = reference
            .iter()
            .filter(|&&t| t.abs() >= observed_abs)
            .count();

        let p_value = F::from_usize(extreme + 1).expect("count fits in float")
            / F::from_usize(self.n_permutations + 1).expect("count fits in float");

        Ok(TestResult {
            observed_statistic: observed,
            p_value,
        })
    }

    /// The raw permutation reference distribution: exactly `n_permutations`
    /// statistic values, one per random relabeling.
    pub fn distribution<F, R>(
        &self,
        a: &Sample<F>,
        b: &Sample<F>,
        rng: R,
    ) -> Result<Vec<F>, Degeneracy>
    where
        F: Float + FromPrimitive,
        R: Rng + Clone,
        S: Statistic<F>,
    {
        let pooled = pool(a, b);
        // The smaller group goes first so that the reference distribution is
        // a function of the pooled multiset and the unordered size pair only;
        // |t| does not care which group leads.
        let first_len = a.len().min(b.len());

        Repartition::new(rng, first_len)
            .re(&pooled)
            .take(self.n_permutations)
            .map(|part| {
                self.statistic
                    .compute(part.first.as_ref(), part.second.as_ref())
            })
            .collect()
    }
}

/// Pool both samples, discarding group identity.
///
/// Sorting makes the pool (and with it every seeded permutation stream)
/// independent of the order the two groups were supplied in.
fn pool<F: Float>(a: &Sample<F>, b: &Sample<F>) -> Sample<F> {
    let mut values: Vec<F> = a.as_ref().iter().chain(b.as_ref()).copied().collect();
    values.sort_unstable_by(|x, y| x.partial_cmp(y).unwrap_or(Ordering::Equal));
    Sample::new(values)
}
