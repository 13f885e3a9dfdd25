use std::num::ParseFloatError;
use std::str::FromStr;

use ndarray::NdFloat;

pub mod config;
pub mod dataset;
pub mod net;
pub mod pipeline;
pub mod report;
pub mod train;
pub mod util;

/// Numeric element type of the whole pipeline, selected by the
/// `precision` config field.
pub trait Element: NdFloat + FromStr<Err = ParseFloatError> {}
impl Element for f32 {}
impl Element for f64 {}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] dataset::ParseError),
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Training(#[from] train::TrainingFailure),
    #[error("failed to write report: {0}")]
    Report(#[from] std::io::Error),
}
