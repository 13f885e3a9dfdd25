use std::io::Write;

use itertools::Itertools;

use crate::dataset::Dataset;
use crate::net::Mlp;
use crate::Element;

/// Mean squared error of the model over a dataset. A pure forward pass:
/// repeated calls on an unmodified model return the same value.
pub fn evaluate<F: Element>(model: &Mlp<F>, dataset: &Dataset<F>) -> f64 {
    let predictions = model.predict(dataset.features());
    let diff = &predictions - dataset.labels();
    let sum = diff.mapv(|d| d * d).sum();
    sum.to_f64().unwrap() / dataset.len().max(1) as f64
}

/// Emit the test MSE followed by up to `max_rows` per-sample
/// (true, predicted) lines. These line formats are load-bearing for callers
/// scripting the run.
pub fn write_report<F: Element>(
    out: &mut impl Write,
    mse: f64,
    model: &Mlp<F>,
    test: &Dataset<F>,
    max_rows: usize,
) -> std::io::Result<()> {
    writeln!(out, "Test MSE: {}", mse)?;

    let predictions = model.predict(test.features());
    let rows = test
        .labels()
        .iter()
        .zip(predictions.iter())
        .take(max_rows)
        .collect_vec();
    for (i, (label, prediction)) in rows.into_iter().enumerate() {
        writeln!(
            out,
            "Sample {}: True Label = {}, Prediction = {}",
            i + 1,
            label,
            prediction
        )?;
    }
    Ok(())
}
