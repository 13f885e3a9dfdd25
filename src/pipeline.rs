use std::io::Write;

use crate::config::{Precision, RunConfig, ValidationStrategy};
use crate::dataset::split::{split, Split};
use crate::dataset::Dataset;
use crate::net::Mlp;
use crate::report::{evaluate, write_report};
use crate::train::Trainer;
use crate::{Element, Error};

mod pipeline_test;

/// Run the whole pipeline once: load, split, fit, evaluate, report.
/// Returns the test MSE. Any failure aborts the run; there is no partial
/// success.
pub fn run(config: &RunConfig, out: &mut impl Write) -> Result<f64, Error> {
    config.validate()?;
    match config.precision {
        Precision::F32 => run_with::<f32>(config, out),
        Precision::F64 => run_with::<f64>(config, out),
    }
}

fn run_with<F: Element>(config: &RunConfig, out: &mut impl Write) -> Result<f64, Error> {
    let dataset = Dataset::<F>::from_csv(&config.input_path)?;
    log::info!(
        "Loaded {} samples with {} features from {}",
        dataset.len(),
        dataset.feature_width(),
        config.input_path.display()
    );

    let Split { train, test } = split(&dataset, config.test_fraction, config.seed);
    log::info!("Split into {} train / {} test samples", train.len(), test.len());

    let mut model = Mlp::<F>::new(dataset.feature_width(), config.topology, config.init_seed)?;

    let (fit_set, val_set) = match config.topology.validation() {
        ValidationStrategy::HoldOut(fraction) => train.split_tail(fraction),
        ValidationStrategy::TestSet => (train.clone(), test.clone()),
    };

    let trainer = Trainer::new(
        config.epochs,
        config.batch_size,
        config.learning_rate,
        config.init_seed,
    );
    trainer.fit(&mut model, &fit_set, &val_set)?;

    let mse = evaluate(&model, &test);
    write_report(out, mse, &model, &test, config.report_rows())?;
    Ok(mse)
}
