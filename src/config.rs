use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("dataset has no feature columns (label column only)")]
    NoFeatures,
    #[error("test fraction {0} is outside (0, 1)")]
    FractionOutOfRange(f64),
    #[error("epochs must be positive")]
    ZeroEpochs,
    #[error("batch size must be positive")]
    ZeroBatchSize,
    #[error("learning rate {0} must be positive and finite")]
    InvalidLearningRate(f64),
    #[error("unknown topology {0:?}, expected \"A\" or \"B\"")]
    UnknownTopology(String),
    #[error("unknown precision {0:?}, expected \"f32\" or \"f64\"")]
    UnknownPrecision(String),
}

/// Network topology variant. Layer sizes, report length and validation
/// strategy all derive from this choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    A,
    B,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidationStrategy {
    /* Hold out a trailing fraction of the train split, never trained on */
    HoldOut(f64),
    /* Validate on the full test split (biased, but kept per variant) */
    TestSet,
}

impl Topology {
    pub fn hidden_dims(self) -> &'static [usize] {
        match self {
            Topology::A => &[512, 256, 256],
            Topology::B => &[256, 64],
        }
    }

    pub fn validation(self) -> ValidationStrategy {
        match self {
            Topology::A => ValidationStrategy::HoldOut(0.2),
            Topology::B => ValidationStrategy::TestSet,
        }
    }

    pub fn default_report_rows(self) -> usize {
        match self {
            Topology::A => 1000,
            Topology::B => 100,
        }
    }
}

impl FromStr for Topology {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Topology::A),
            "B" => Ok(Topology::B),
            _ => Err(ConfigError::UnknownTopology(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    F32,
    F64,
}

impl FromStr for Precision {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "f32" => Ok(Precision::F32),
            "f64" => Ok(Precision::F64),
            _ => Err(ConfigError::UnknownPrecision(s.to_string())),
        }
    }
}

/// Full configuration surface of a single run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input_path: PathBuf,
    pub test_fraction: f64,
    pub seed: u64,
    pub epochs: usize,
    pub batch_size: usize,
    pub topology: Topology,
    pub precision: Precision,
    pub learning_rate: f64,
    /* None = entropy-seeded weight init */
    pub init_seed: Option<u64>,
    /* None = the topology's default report length */
    pub max_report_rows: Option<usize>,
}

impl RunConfig {
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            test_fraction: 0.2,
            seed: 42,
            epochs: 10,
            batch_size: 128,
            topology: Topology::A,
            precision: Precision::F64,
            learning_rate: 1e-3,
            init_seed: None,
            max_report_rows: None,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(ConfigError::FractionOutOfRange(self.test_fraction));
        }
        if self.epochs == 0 {
            return Err(ConfigError::ZeroEpochs);
        }
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(ConfigError::InvalidLearningRate(self.learning_rate));
        }
        Ok(())
    }

    pub fn report_rows(&self) -> usize {
        self.max_report_rows
            .unwrap_or_else(|| self.topology.default_report_rows())
    }
}
