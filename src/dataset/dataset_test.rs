#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::path::PathBuf;

    use ndarray::{Array1, Array2};

    use crate::dataset::split::split;
    use crate::dataset::{Dataset, ParseError};

    fn write_csv(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "evalnet_{}_{}.csv",
            std::process::id(),
            name
        ));
        std::fs::write(&path, content).unwrap();
        path
    }

    /* n rows, 3 features, labels are the distinct row indices */
    fn indexed_dataset(n: usize) -> Dataset<f64> {
        let ys = Array1::from_shape_fn(n, |i| i as f64);
        let xs = Array2::from_shape_fn((n, 3), |(i, j)| (i * 3 + j) as f64 * 0.05);
        Dataset::new(xs, ys)
    }

    #[test]
    fn load_preserves_shape_and_order() {
        let path = write_csv("load", "1.0,2.0,3.0,4.0\n-0.5,0.25,0,1e-3\n");
        let dataset = Dataset::<f64>::from_csv(&path).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.feature_width(), 3);
        assert_eq!(dataset.labels().to_vec(), vec![1.0, -0.5]);
        assert_eq!(dataset.features().row(0).to_vec(), vec![2.0, 3.0, 4.0]);
        assert_eq!(dataset.features().row(1).to_vec(), vec![0.25, 0.0, 1e-3]);
    }

    #[test]
    fn load_as_f32() {
        let path = write_csv("load_f32", "0.5,1.5\n-0.25,2.5\n");
        let dataset = Dataset::<f32>::from_csv(&path).unwrap();
        assert_eq!(dataset.labels().to_vec(), vec![0.5f32, -0.25]);
    }

    #[test]
    fn label_only_file_has_zero_feature_width() {
        let path = write_csv("label_only", "0.5\n-0.5\n");
        let dataset = Dataset::<f64>::from_csv(&path).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.feature_width(), 0);
    }

    #[test]
    fn ragged_row_is_rejected() {
        let path = write_csv("ragged", "1,2,3\n4,5\n");
        match Dataset::<f64>::from_csv(&path) {
            Err(ParseError::RaggedRow {
                row,
                expected,
                found,
            }) => {
                assert_eq!((row, expected, found), (2, 3, 2));
            }
            other => panic!("expected RaggedRow, got {:?}", other),
        }
    }

    #[test]
    fn non_numeric_cell_is_rejected() {
        let path = write_csv("bad_cell", "1,2\n3,oops\n");
        match Dataset::<f64>::from_csv(&path) {
            Err(ParseError::InvalidNumber { row, column, value }) => {
                assert_eq!((row, column), (2, 2));
                assert_eq!(value, "oops");
            }
            other => panic!("expected InvalidNumber, got {:?}", other),
        }
    }

    #[test]
    fn empty_file_is_rejected() {
        let path = write_csv("empty", "");
        assert!(matches!(
            Dataset::<f64>::from_csv(&path),
            Err(ParseError::Empty { .. })
        ));
    }

    #[test]
    fn split_is_deterministic() {
        let dataset = indexed_dataset(20);
        let first = split(&dataset, 0.3, 7);
        let second = split(&dataset, 0.3, 7);

        assert_eq!(
            first.train.labels().to_vec(),
            second.train.labels().to_vec()
        );
        assert_eq!(first.test.labels().to_vec(), second.test.labels().to_vec());
    }

    #[test]
    fn split_is_a_partition() {
        let dataset = indexed_dataset(17);
        let result = split(&dataset, 0.25, 3);

        assert_eq!(result.train.len() + result.test.len(), dataset.len());

        let train: HashSet<u64> = result.train.labels().iter().map(|&l| l as u64).collect();
        let test: HashSet<u64> = result.test.labels().iter().map(|&l| l as u64).collect();
        assert!(train.is_disjoint(&test));
        assert_eq!(train.len() + test.len(), dataset.len());
    }

    #[test]
    fn ten_rows_at_default_fraction() {
        let dataset = indexed_dataset(10);
        let result = split(&dataset, 0.2, 42);
        assert_eq!(result.train.len(), 8);
        assert_eq!(result.test.len(), 2);
    }

    #[test]
    fn split_tail_holds_out_trailing_rows() {
        let dataset = indexed_dataset(10);
        let (head, tail) = dataset.split_tail(0.2);
        assert_eq!(head.len(), 8);
        assert_eq!(tail.len(), 2);
        assert_eq!(tail.labels().to_vec(), vec![8.0, 9.0]);
    }
}
