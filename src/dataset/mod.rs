use std::path::{Path, PathBuf};

use ndarray::{Array1, Array2, Axis};

use crate::Element;

pub mod split;

mod dataset_test;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: csv::Error,
    },
    #[error("{} contains no rows", path.display())]
    Empty { path: PathBuf },
    #[error("row {row}: expected {expected} columns, found {found}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("row {row}, column {column}: {value:?} is not a number")]
    InvalidNumber {
        row: usize,
        column: usize,
        value: String,
    },
}

/// A fixed-width labeled sample matrix, immutable after load.
///
/// Column 0 of the source file is the label, the remaining columns are the
/// feature vector.
#[derive(Debug, Clone)]
pub struct Dataset<F> {
    xs: Array2<F>,
    ys: Array1<F>,
}

impl<F: Element> Dataset<F> {
    pub fn new(xs: Array2<F>, ys: Array1<F>) -> Self {
        assert!(xs.nrows() == ys.len());
        Self { xs, ys }
    }

    /// Parse a headerless delimiter-separated file. The first row fixes the
    /// column count; every value must parse as a number. Row/column numbers
    /// in errors are 1-based.
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        let path = path.as_ref();
        let read_err = |source| ParseError::Read {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(read_err)?;

        let mut width = 0;
        let mut labels = Vec::new();
        let mut features = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record.map_err(read_err)?;
            let row = i + 1;
            if row == 1 {
                width = record.len();
            } else if record.len() != width {
                return Err(ParseError::RaggedRow {
                    row,
                    expected: width,
                    found: record.len(),
                });
            }

            for (j, cell) in record.iter().enumerate() {
                let value = cell.parse::<F>().map_err(|_| ParseError::InvalidNumber {
                    row,
                    column: j + 1,
                    value: cell.to_string(),
                })?;
                if j == 0 {
                    labels.push(value);
                } else {
                    features.push(value);
                }
            }
        }

        if labels.is_empty() {
            return Err(ParseError::Empty {
                path: path.to_path_buf(),
            });
        }

        let xs = Array2::from_shape_vec((labels.len(), width - 1), features).unwrap();
        Ok(Self::new(xs, Array1::from_vec(labels)))
    }

    pub fn len(&self) -> usize {
        self.ys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Width of the feature vector, read once at model construction.
    pub fn feature_width(&self) -> usize {
        self.xs.ncols()
    }

    pub fn features(&self) -> &Array2<F> {
        &self.xs
    }

    pub fn labels(&self) -> &Array1<F> {
        &self.ys
    }

    pub(crate) fn select(&self, indices: &[usize]) -> Self {
        Self {
            xs: self.xs.select(Axis(0), indices),
            ys: self.ys.select(Axis(0), indices),
        }
    }

    /// Split off the trailing `fraction` of rows, in order. Used for the
    /// hold-out validation source.
    pub(crate) fn split_tail(&self, fraction: f64) -> (Self, Self) {
        let tail = (fraction * self.len() as f64).round() as usize;
        let at = self.len() - tail;
        let (head_xs, tail_xs) = self.xs.view().split_at(Axis(0), at);
        let (head_ys, tail_ys) = self.ys.view().split_at(Axis(0), at);
        (
            Self::new(head_xs.to_owned(), head_ys.to_owned()),
            Self::new(tail_xs.to_owned(), tail_ys.to_owned()),
        )
    }
}
