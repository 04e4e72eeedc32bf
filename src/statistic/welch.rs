use num_traits::{Float, FromPrimitive};

use super::moment::{mean, sample_variance};
use super::Statistic;
use crate::Degeneracy;

/// Two-sample t statistic without the equal-variance assumption (Welch).
///
/// Each group contributes its own unpooled sample variance:
///
/// ```text
/// t = (x̄₁ - x̄₂) / √( s₁²/n₁ + s₂²/n₂ )
/// ```
///
/// Inside a permutation test no reference t distribution (and hence no
/// Welch–Satterthwaite degrees of freedom) is needed; the statistic value
/// alone is ranked against its permutation distribution.
#[derive(Debug, Clone, Copy, Default)]
pub struct WelchT;

impl<F> Statistic<F> for WelchT
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

        let denom = (sample_variance(a) / n1_f + sample_variance(b) / n2_f).sqrt();
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
