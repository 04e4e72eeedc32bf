mod repartition;

pub use repartition::{Partition, Repartition};

/// A resampling scheme: turns one input into an endless stream of resamples.
///
/// Callers bound the stream with `take`; the scheme itself never terminates.
pub trait Re<T> {
    /// One resample.
    type Item;

    /// Stream of independent resamples of `t`.
    fn re(&self, t: &T) -> impl Iterator<Item = Self::Item>;
}
