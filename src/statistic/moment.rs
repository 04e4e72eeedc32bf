use num_traits::{Float, FromPrimitive};

/// Arithmetic mean with Kahan-compensated summation.
///
/// Compensation matters here because every permutation draw recomputes group
/// means; drift in the means would feed straight into the t denominators.
pub fn mean<F>(xs: &[F]) -> F
where
    F: Float + FromPrimitive,
{
    let mut sum = F::zero();
    let mut c = F::zero();

    for &x in xs {
        let y = x - c;
        let t = sum + y;
        c = (t - sum) - y;
        sum = t;
    }

    sum / from_usize::<F>(xs.len())
}

/// Unbiased sample variance (ddof = 1), Kahan-compensated.
///
/// Returns NaN for fewer than two observations; callers that need an error
/// instead check the length first.
pub fn sample_variance<F>(xs: &[F]) -> F
where
    F: Float + FromPrimitive,
{
    let n = xs.len();
    if n < 2 {
        return F::nan();
    }

    let m = mean(xs);
    let mut sq_sum = F::zero();
    let mut c = F::zero();
    for &x in xs {
        let dev = x - m;
        let y = dev * dev - c;
        let t = sq_sum + y;
        c = (t - sq_sum) - y;
        sq_sum = t;
    }

    sq_sum / from_usize::<F>(n - 1)
}

/// Bias-corrected sample skewness, `κ̂₃ / κ̂₂^{3/2}`.
///
/// Requires n ≥ 3; returns NaN otherwise or when the data are constant.
pub fn skewness<F>(xs: &[F]) -> F
where
    F: Float + FromPrimitive,
{
    let n = xs.len();
    if n < 3 {
        return F::nan();
    }

    let n_f = from_usize::<F>(n);
    let m = mean(xs);

    // Single pass over m2 and m3, each with its own compensation term.
    let mut sum2 = F::zero();
    let mut sum3 = F::zero();
    let mut c2 = F::zero();
    let mut c3 = F::zero();
    for &x in xs {
        let dev = x - m;
        let dev2 = dev * dev;
        let dev3 = dev2 * dev;

        let y2 = dev2 - c2;
        let t2 = sum2 + y2;
        c2 = (t2 - sum2) - y2;
        sum2 = t2;

        let y3 = dev3 - c3;
        let t3 = sum3 + y3;
        c3 = (t3 - sum3) - y3;
        sum3 = t3;
    }

    let m2 = sum2 / n_f;
    let m3 = sum3 / n_f;

    let n1 = n_f - F::one();
    let n2 = n_f - from_usize::<F>(2);
    let k2 = (n_f / n1) * m2;
    let k3 = (n_f * n_f) / (n1 * n2) * m3;

    let denom = k2.sqrt().powi(3);
    if denom == F::zero() { F::nan() } else { k3 / denom }
}

fn from_usize<F: FromPrimitive>(u: usize) -> F {
    F::from_usize(u).expect("usize fits in float")
}
