mod moment;
mod pooled;
mod welch;

pub use moment::{mean, sample_variance, skewness};
pub use pooled::PooledT;
pub use welch::WelchT;

use num_traits::{Float, FromPrimitive};

use crate::Degeneracy;

/// A two-sample test statistic.
///
/// Implementations are pure functions of the two groups. A statistic that
/// cannot be evaluated to a finite value reports [`Degeneracy`] instead of
/// leaking NaN/infinity into downstream rank comparisons.
pub trait Statistic<F> {
    /// Evaluate the statistic on groups `a` and `b`.
    fn compute(&self, a: &[F], b: &[F]) -> Result<F, Degeneracy>;
}

/// Which variance assumption the t statistic makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarianceAssumption {
    /// Equal population variances: pooled-variance t ([`PooledT`]).
    Equal,
    /// No equality assumption: Welch t ([`WelchT`]).
    Unequal,
}

impl<F> Statistic<F> for VarianceAssumption
where
    F: Float + FromPrimitive,
{
    fn compute(&self, a: &[F], b: &[F]) -> Result<F, Degeneracy> {
        match self {
            VarianceAssumption::Equal => PooledT.compute(a, b),
            VarianceAssumption::Unequal => WelchT.compute(a, b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn assumption_delegates_to_the_matching_statistic() {
        let a = [1.0_f64, 2.0, 3.0];
        let b = [2.0_f64, 4.0, 6.0, 8.0];

        let equal = VarianceAssumption::Equal.compute(&a, &b).unwrap();
        let unequal = VarianceAssumption::Unequal.compute(&a, &b).unwrap();
        assert_abs_diff_eq!(equal, PooledT.compute(&a, &b).unwrap(), epsilon = 1e-15);
        assert_abs_diff_eq!(unequal, WelchT.compute(&a, &b).unwrap(), epsilon = 1e-15);
        assert!(equal != unequal, "n1 != n2 must separate the two variants");
    }

    #[test]
    fn variants_coincide_for_balanced_groups() {
        // With n1 == n2 the pooled and Welch denominators are algebraically equal.
        let a = [0.4_f64, 1.9, -0.7, 2.2, 0.0];
        let b = [1.1_f64, -0.3, 0.8, 2.5, -1.4];
        assert_abs_diff_eq!(
            PooledT.compute(&a, &b).unwrap(),
            WelchT.compute(&a, &b).unwrap(),
            epsilon = 1e-12
        );
    }
}
