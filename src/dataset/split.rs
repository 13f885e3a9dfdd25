use itertools::Itertools;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::dataset::Dataset;
use crate::Element;

pub struct Split<F> {
    pub train: Dataset<F>,
    pub test: Dataset<F>,
}

/// Deterministically partition a dataset into train and test subsets.
///
/// A permutation of row indices is drawn from a generator seeded with `seed`;
/// the first `round(test_fraction * n)` permuted indices become the test set,
/// the rest the train set, both kept in permuted order. The same arguments
/// always produce the identical partition.
pub fn split<F: Element>(dataset: &Dataset<F>, test_fraction: f64, seed: u64) -> Split<F> {
    let n = dataset.len();
    let mut indices = (0..n).collect_vec();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test_len = (test_fraction * n as f64).round() as usize;
    let (test_idx, train_idx) = indices.split_at(test_len);

    Split {
        train: dataset.select(train_idx),
        test: dataset.select(test_idx),
    }
}
