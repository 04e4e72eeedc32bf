use rand::Rng;

use super::Re;
use crate::Sample;

/// One random relabeling of pooled observations into two groups.
///
/// Every pooled value lands in exactly one group, and the group lengths
/// always equal the lengths requested from the [`Repartition`] that
/// produced the partition.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition<T> {
    /// Group of `first_len` observations.
    pub first: Sample<T>,
    /// The remaining observations.
    pub second: Sample<T>,
}

/// Resamples a pooled sample by repartitioning it into two fixed-size groups.
///
/// Each draw is a full Fisher–Yates shuffle of the pooled values followed by
/// a split at `first_len`, which makes every `(first_len, n - first_len)`
/// partition equally likely — sampling without replacement from the pooled
/// index set. Draws are independent.
#[derive(Clone)]
pub struct Repartition<R: Rng> {
    /// Random source owned by this scheme; cloned into each stream.
    pub rng: R,
    /// Size of the first group of every partition.
    pub first_len: usize,
}

impl<R: Rng> Repartition<R> {
    /// Scheme yielding partitions with `first_len` observations up front.
    pub fn new(rng: R, first_len: usize) -> Self {
        Self { rng, first_len }
    }
}

impl<T: Copy, R: Rng + Clone> Re<Sample<T>> for Repartition<R> {
    type Item = Partition<T>;

    fn re(&self, pooled: &Sample<T>) -> impl Iterator<Item = Self::Item> {
        assert!(
            self.first_len <= pooled.len(),
            "first group ({}) larger than the pool ({})",
            self.first_len,
            pooled.len()
        );
        RepartitionIter::new(&pooled.data, self.rng.clone(), self.first_len)
    }
}

/// Stream of independent partitions of one pooled sample.
pub struct RepartitionIter<'a, T, R: Rng> {
    data: &'a [T],
    rng: R,
    buffer: Vec<T>,
    first_len: usize,
}

impl<'a, T: Copy, R: Rng> RepartitionIter<'a, T, R> {
    fn new(data: &'a [T], rng: R, first_len: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(data.len()),
            data,
            rng,
            first_len,
        }
    }
}

impl<T: Copy, R: Rng> Iterator for RepartitionIter<'_, T, R> {
    type Item = Partition<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.data.len();
        self.buffer.clear();
        self.buffer.extend_from_slice(self.data);

        // Fisher–Yates; the inclusive upper bound keeps the shuffle uniform.
        for i in (1..n).rev() {
            let j = self.rng.gen_range(0..=i);
            self.buffer.swap(i, j);
        }

        let (first, second) = self.buffer.split_at(self.first_len);
        Some(Partition {
            first: Sample::new(first.to_vec()),
            second: Sample::new(second.to_vec()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn pooled() -> Sample<f64> {
        (0..12).map(f64::from).collect()
    }

    #[test]
    fn partitions_preserve_sizes_and_values() {
        let scheme = Repartition::new(Xoshiro256PlusPlus::seed_from_u64(7), 5);
        for part in scheme.re(&pooled()).take(50) {
            assert_eq!(part.first.len(), 5);
            assert_eq!(part.second.len(), 7);

            // The multiset of values is exactly the pool.
            let mut all: Vec<f64> = part
                .first
                .as_ref()
                .iter()
                .chain(part.second.as_ref())
                .copied()
                .collect();
            all.sort_by(f64::total_cmp);
            assert_eq!(all, pooled().data);
        }
    }

    #[test]
    fn draws_differ_and_seeds_reproduce() {
        let scheme = Repartition::new(Xoshiro256PlusPlus::seed_from_u64(11), 6);
        let first: Vec<Partition<f64>> = scheme.re(&pooled()).take(10).collect();
        let again: Vec<Partition<f64>> = scheme.re(&pooled()).take(10).collect();
        assert_eq!(first, again, "same seed must reproduce the stream");
        assert!(
            first.windows(2).any(|w| w[0] != w[1]),
            "consecutive draws should not all coincide"
        );
    }
}
