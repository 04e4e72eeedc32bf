use std::f64::consts::PI;

use rand::distributions::Distribution;
use rand::Rng;
use statrs::distribution::Normal;

use crate::{Sample, SimError};

/// Population family a scenario draws from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Family {
    /// Gaussian population.
    Normal,
    /// Right-skewed (Azzalini) skew-normal population.
    ///
    /// `shape = 0` reduces to the normal; larger shapes skew harder to the
    /// right. Negative shapes are rejected, the study only uses right skew.
    SkewNormal {
        /// Skewness parameter α ≥ 0.
        shape: f64,
    },
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Family::Normal => write!(f, "normal"),
            Family::SkewNormal { shape } => write!(f, "skew-normal(α={shape})"),
        }
    }
}

/// Anything that can produce i.i.d. draws from a population.
pub trait SampleSource {
    /// Draw `n` independent observations.
    fn draw<R: Rng>(&self, n: usize, rng: &mut R) -> Result<Sample<f64>, SimError>;
}

/// A parameterized population: location, scale, and family.
///
/// For both families the produced observations have exactly the requested
/// mean and standard deviation; the skew-normal draw is standardized so the
/// shape parameter changes the third moment without touching the first two.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Population {
    /// Population mean.
    pub mean: f64,
    /// Population standard deviation, strictly positive.
    pub scale: f64,
    /// Distribution family.
    pub family: Family,
}

impl Population {
    /// A population with the given location, scale, and family.
    pub fn new(mean: f64, scale: f64, family: Family) -> Self {
        Self { mean, scale, family }
    }
}

impl SampleSource for Population {
    fn draw<R: Rng>(&self, n: usize, rng: &mut R) -> Result<Sample<f64>, SimError> {
        if n == 0 {
            return Err(SimError::Sampling("requested an empty sample".into()));
        }
        if !self.mean.is_finite() {
            return Err(SimError::Sampling(format!("non-finite mean {}", self.mean)));
        }

        match self.family {
            Family::Normal => {
                let dist = Normal::new(self.mean, self.scale)
                    .map_err(|e| SimError::Sampling(e.to_string()))?;
                Ok((0..n).map(|_| dist.sample(rng)).collect())
            }
            Family::SkewNormal { shape } => {
                if !(self.scale > 0.0) || !self.scale.is_finite() {
                    return Err(SimError::Sampling(format!(
                        "scale must be positive and finite, got {}",
                        self.scale
                    )));
                }
                if !shape.is_finite() || shape < 0.0 {
                    return Err(SimError::Sampling(format!(
                        "skew-normal shape must be finite and non-negative, got {shape}"
                    )));
                }

                let unit = Normal::new(0.0, 1.0).map_err(|e| SimError::Sampling(e.to_string()))?;

                // Azzalini construction: z = δ|u₀| + √(1−δ²)·u₁ with
                // δ = α/√(1+α²), then standardized to mean 0, sd 1.
                let delta = shape / (1.0 + shape * shape).sqrt();
                let skew_mean = delta * (2.0 / PI).sqrt();
                let skew_sd = (1.0 - 2.0 * delta * delta / PI).sqrt();
                let tail = (1.0 - delta * delta).sqrt();

                Ok((0..n)
                    .map(|_| {
                        let u0: f64 = unit.sample(rng);
                        let u1: f64 = unit.sample(rng);
                        let z = delta * u0.abs() + tail * u1;
                        self.mean + self.scale * (z - skew_mean) / skew_sd
                    })
                    .collect())
            }
        }
    }
}
