use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

use kth_heap_replay::base::HeapValue;

/// Random test input and its `k`; the answer is computed by [TestSequence::expected]
pub struct TestSequence {
    pub values: Vec<HeapValue>,
    pub k: usize,
}

impl TestSequence {
    /// Draws `length` values in `[1, max_value]` and a `k` in `[1, length]`
    ///
    /// A small `max_value` gives many duplicates.
    pub fn new(length: usize, max_value: HeapValue, seed: Option<u64>) -> Self {
        let mut rng = if let Some(seed) = seed {
            StdRng::seed_from_u64(seed)
        } else {
            StdRng::from_entropy()
        };

        let values = create_sequence(length, max_value, &mut rng);
        let k = rng.gen_range(1..=length.max(1));
        Self { values, k }
    }

    pub fn expected(&self) -> HeapValue {
        kth_largest_by_sorting(&self.values, self.k)
    }
}

pub fn create_sequence(length: usize, max_value: HeapValue, rng: &mut dyn RngCore) -> Vec<HeapValue> {
    (0..length).map(|_| rng.gen_range(1..=max_value)).collect()
}

/// The k-th largest value, computed by sorting in descending order
pub fn kth_largest_by_sorting(values: &[HeapValue], k: usize) -> HeapValue {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| b.cmp(a));
    sorted[k - 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_follows_values() {
        let mut sequence = TestSequence::new(12, 50, Some(3));
        assert!((1..=12).contains(&sequence.k));
        assert_eq!(
            sequence.expected(),
            kth_largest_by_sorting(&sequence.values, sequence.k)
        );

        sequence.values = vec![4, 10, 7];
        sequence.k = 2;
        assert_eq!(sequence.expected(), 7);
    }
}
