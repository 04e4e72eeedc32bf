use std::error::Error as StdError;
use std::fmt;

/// A statistic computation could not produce a finite, well-ordered value.
///
/// Rank comparisons inside the permutation loop are meaningless once a NaN
/// or infinity enters the reference distribution, so degeneracy is an error,
/// never a silent sentinel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degeneracy {
    /// A group had fewer than the two observations a variance needs.
    TooFewObservations {
        /// Offending group size.
        len: usize,
    },
    /// The denominator of the statistic collapsed to zero (or overflowed),
    /// typically because one or both groups are constant.
    ZeroVariance,
}

impl fmt::Display for Degeneracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Degeneracy::TooFewObservations { len } => {
                write!(f, "group of {len} observation(s) is too small for a t statistic")
            }
            Degeneracy::ZeroVariance => {
                write!(f, "statistic denominator is zero or non-finite")
            }
        }
    }
}

impl StdError for Degeneracy {}

/// Errors surfaced by the simulation layers.
#[derive(Debug)]
pub enum SimError {
    /// A test statistic was undefined; see [`Degeneracy`].
    Degenerate(Degeneracy),
    /// A scenario with a non-positive (or otherwise unusable) sample size,
    /// scale, or shape. Raised before any sampling happens.
    InvalidScenario(String),
    /// The sample source could not produce the requested draws
    /// (e.g. invalid distribution parameters).
    Sampling(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Degenerate(d) => write!(f, "degenerate statistic: {d}"),
            SimError::InvalidScenario(msg) => write!(f, "invalid scenario: {msg}"),
            SimError::Sampling(msg) => write!(f, "sampling failure: {msg}"),
        }
    }
}

impl StdError for SimError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            SimError::Degenerate(d) => Some(d),
            SimError::InvalidScenario(_) | SimError::Sampling(_) => None,
        }
    }
}

impl From<Degeneracy> for SimError {
    fn from(d: Degeneracy) -> Self {
        SimError::Degenerate(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_are_specific() {
        let small = Degeneracy::TooFewObservations { len: 1 };
        assert!(small.to_string().contains('1'));
        assert!(Degeneracy::ZeroVariance.to_string().contains("zero"));

        let err: SimError = Degeneracy::ZeroVariance.into();
        assert!(matches!(err, SimError::Degenerate(Degeneracy::ZeroVariance)));
        assert!(err.to_string().starts_with("degenerate"));
    }
}
