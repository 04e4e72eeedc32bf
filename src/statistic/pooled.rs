use num_traits::{Float, FromPrimitive};

use super::moment::{mean, sample_variance};
use super::Statistic;
use crate::Degeneracy;

/// Two-sample t statistic under the equal-variance assumption.
///
/// The variance estimate is pooled across both groups, weighted by their
/// degrees of freedom:
///
/// ```text
/// t = (x̄₁ - x̄₂) / √( s²ₚ (1/n₁ + 1/n₂) ),
/// s²ₚ = ((n₁-1)s₁² + (n₂-1)s₂²) / (n₁+n₂-2)
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PooledT;

impl<F> Statistic<F> for PooledT
where
    F: Float + FromPrimitive,
{
    fn compute(&self, a: &[F], b: &[F]) -> Result<F, Degeneracy> {
        let (n1, n2) = (a.len(), b.len());
        if n1 < 2 {
            return Err(Degeneracy::TooFewObservations { len: n1 });
        }
        if n2 < 2 {
            return Err(Degeneracy::TooFewObservations { len: n2 });
        }

        let n1_f = F::from_usize(n1).expect("group size fits in float");
        let n2_f = F::from_usize(n2).expect("group size fits in float");
        let df = F::from_usize(n1 + n2 - 2).expect("dof fits in float");

        let v1 = sample_variance(a);
        let v2 = sample_variance(b);
        let pooled = ((n1_f - F::one()) * v1 + (n2_f - F::one()) * v2) / df;
        let denom = (pooled * (n1_f.recip() + n2_f.recip())).sqrt();
        if !(denom > F::zero()) || !denom.is_finite() {
            return Err(Degeneracy::ZeroVariance);
        }

        let t = (mean(a) - mean(b)) / denom;
        if t.is_finite() {
            Ok(t)
        } else {
            Err(Degeneracy::ZeroVariance)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn matches_hand_computed_value() {
        // means 2.5 and 5, variances 5/3 and 20/3, s²ₚ = 25/6
        let a = [1.0_f64, 2.0, 3.0, 4.0];
        let b = [2.0_f64, 4.0, 6.0, 8.0];
        let t = PooledT.compute(&a, &b).unwrap();
        assert_abs_diff_eq!(t, -2.5 / (25.0_f64 / 12.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn unbalanced_groups() {
        // means 2 and 5, variances 1 and 20/3, s²ₚ = 22/5
        let a = [1.0_f64, 2.0, 3.0];
        let b = [2.0_f64, 4.0, 6.0, 8.0];
        let t = PooledT.compute(&a, &b).unwrap();
        assert_abs_diff_eq!(t, -3.0 / (4.4_f64 * (1.0 / 3.0 + 0.25)).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn sign_flips_under_group_swap() {
        let a = [0.2_f64, 1.4, -0.9, 2.0];
        let b = [1.0_f64, 3.1, 0.4];
        let t_ab = PooledT.compute(&a, &b).unwrap();
        let t_ba = PooledT.compute(&b, &a).unwrap();
        assert_abs_diff_eq!(t_ab, -t_ba, epsilon = 1e-12);
    }

    #[test]
    fn rejects_degenerate_input() {
        assert_eq!(
            PooledT.compute(&[1.0_f64], &[1.0, 2.0]),
            Err(Degeneracy::TooFewObservations { len: 1 })
        );
        assert_eq!(
            PooledT.compute(&[5.0_f64, 5.0, 5.0], &[5.0, 5.0]),
            Err(Degeneracy::ZeroVariance)
        );
    }
}
