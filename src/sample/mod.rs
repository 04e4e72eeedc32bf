use std::iter::Iterator;

/// An ordered sequence of observations, drawn once and consumed by one test.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sample<T> {
    /// The observations, in draw order.
    pub data: Vec<T>,
}

impl<T> Sample<T> {
    /// Create a new sample from raw data
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Get the number of observations in the sample
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the sample contains no observations
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T> FromIterator<T> for Sample<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Sample::new(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for Sample<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<T> AsRef<[T]> for Sample<T> {
    fn as_ref(&self) -> &[T] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_and_exposes_observations() {
        let sample: Sample<f64> = (0..5).map(f64::from).collect();
        assert_eq!(sample.len(), 5);
        assert!(!sample.is_empty());
        assert_eq!(sample.as_ref()[4], 4.0);

        let empty = Sample::<f64>::new(Vec::new());
        assert!(empty.is_empty());
    }
}
