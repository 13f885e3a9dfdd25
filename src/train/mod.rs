use itertools::Itertools;
use ndarray::{Array, Array1, Array2, Dimension, Zip};
use rand::seq::SliceRandom;

use crate::dataset::Dataset;
use crate::net::{seeded_rng, Gradients, Mlp};
use crate::report::evaluate;
use crate::util::RunningAverage;
use crate::Element;


#[derive(Debug, Clone, thiserror::Error)]
pub enum TrainingFailure {
    #[error("training loss diverged to {loss} after epoch {epoch}")]
    NonFiniteLoss { epoch: usize, loss: f64 },
    #[error("validation loss diverged to {loss} after epoch {epoch}")]
    NonFiniteValidationLoss { epoch: usize, loss: f64 },
}

#[derive(Debug, Clone, Copy)]
pub struct EpochStats {
    pub epoch: usize,
    pub train_loss: f64,
    /* None when the validation source is empty */
    pub val_loss: Option<f64>,
}

/// Epoch-by-epoch loss history of one fit call. Not retained beyond the run.
#[derive(Debug, Clone, Default)]
pub struct TrainingRun {
    pub epochs: Vec<EpochStats>,
}

/* Adaptive first-order gradient descent with bias-corrected running
 * first/second moment estimates, one moment pair per weight/bias tensor. */
struct Adam<F> {
    learning_rate: F,
    beta1: F,
    beta2: F,
    epsilon: F,
    step_count: i32,
    m_weights: Vec<Array2<F>>,
    v_weights: Vec<Array2<F>>,
    m_biases: Vec<Array1<F>>,
    v_biases: Vec<Array1<F>>,
}

impl<F: Element> Adam<F> {
    fn new(learning_rate: f64, model: &Mlp<F>) -> Self {
        let zeros2 = |a: &Array2<F>| Array2::zeros(a.raw_dim());
        let zeros1 = |a: &Array1<F>| Array1::zeros(a.raw_dim());
        Self {
            learning_rate: F::from(learning_rate).unwrap(),
            beta1: F::from(0.9).unwrap(),
            beta2: F::from(0.999).unwrap(),
            epsilon: F::from(1e-8).unwrap(),
            step_count: 0,
            m_weights: model.layers().iter().map(|l| zeros2(&l.weights)).collect(),
            v_weights: model.layers().iter().map(|l| zeros2(&l.weights)).collect(),
            m_biases: model.layers().iter().map(|l| zeros1(&l.bias)).collect(),
            v_biases: model.layers().iter().map(|l| zeros1(&l.bias)).collect(),
        }
    }

    fn step(&mut self, model: &mut Mlp<F>, grads: &Gradients<F>) {
        self.step_count += 1;
        let c1 = F::one() - self.beta1.powi(self.step_count);
        let c2 = F::one() - self.beta2.powi(self.step_count);

        for (i, layer) in model.layers_mut().iter_mut().enumerate() {
            adam_update(
                &mut layer.weights,
                &mut self.m_weights[i],
                &mut self.v_weights[i],
                &grads.weights[i],
                self.learning_rate,
                self.beta1,
                self.beta2,
                self.epsilon,
                c1,
                c2,
            );
            adam_update(
                &mut layer.bias,
                &mut self.m_biases[i],
                &mut self.v_biases[i],
                &grads.biases[i],
                self.learning_rate,
                self.beta1,
                self.beta2,
                self.epsilon,
                c1,
                c2,
            );
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn adam_update<F: Element, D: Dimension>(
    param: &mut Array<F, D>,
    m: &mut Array<F, D>,
    v: &mut Array<F, D>,
    grad: &Array<F, D>,
    learning_rate: F,
    beta1: F,
    beta2: F,
    epsilon: F,
    c1: F,
    c2: F,
) {
    Zip::from(param)
        .and(m)
        .and(v)
        .and(grad)
        .for_each(|p, m, v, g| {
            *m = beta1 * *m + (F::one() - beta1) * *g;
            *v = beta2 * *v + (F::one() - beta2) * *g * *g;
            *p = *p - learning_rate * (*m / c1) / ((*v / c2).sqrt() + epsilon);
        });
}

pub struct Trainer {
    epochs: usize,
    batch_size: usize,
    learning_rate: f64,
    shuffle_seed: Option<u64>,
}

impl Trainer {
    pub fn new(
        epochs: usize,
        batch_size: usize,
        learning_rate: f64,
        shuffle_seed: Option<u64>,
    ) -> Self {
        assert!(epochs > 0);
        assert!(batch_size > 0);
        Self {
            epochs,
            batch_size,
            learning_rate,
            shuffle_seed,
        }
    }

    /// Run the full training loop: shuffled mini-batches per epoch, Adam
    /// updates, epoch losses logged and checked for finiteness. A train set
    /// smaller than the batch size still trains as one partial batch.
    pub fn fit<F: Element>(
        &self,
        model: &mut Mlp<F>,
        train: &Dataset<F>,
        validation: &Dataset<F>,
    ) -> Result<TrainingRun, TrainingFailure> {
        let mut optimizer = Adam::new(self.learning_rate, model);
        let mut rng = seeded_rng(self.shuffle_seed, 0xe4655449311aee87);
        let mut indices = (0..train.len()).collect_vec();
        let mut run = TrainingRun::default();

        for epoch in 1..=self.epochs {
            indices.shuffle(&mut rng);

            let mut batch_avg = RunningAverage::new(0.1);
            let mut loss_sum = 0.0;
            for batch in indices.chunks(self.batch_size) {
                let subset = train.select(batch);
                let (loss, grads) = model.mse_gradients(subset.features(), subset.labels());
                optimizer.step(model, &grads);

                let loss = loss.to_f64().unwrap();
                batch_avg.set(loss);
                log::debug!("epoch {}: batch loss {:.6}", epoch, batch_avg.get());
                loss_sum += loss * batch.len() as f64;
            }

            let train_loss = loss_sum / train.len().max(1) as f64;
            if !train_loss.is_finite() {
                return Err(TrainingFailure::NonFiniteLoss {
                    epoch,
                    loss: train_loss,
                });
            }

            let val_loss = if validation.is_empty() {
                None
            } else {
                let val_loss = evaluate(model, validation);
                if !val_loss.is_finite() {
                    return Err(TrainingFailure::NonFiniteValidationLoss {
                        epoch,
                        loss: val_loss,
                    });
                }
                Some(val_loss)
            };

            match val_loss {
                Some(val_loss) => log::info!(
                    "Epoch {}/{}: loss={:.6}, val_loss={:.6}",
                    epoch,
                    self.epochs,
                    train_loss,
                    val_loss
                ),
                None => log::info!("Epoch {}/{}: loss={:.6}", epoch, self.epochs, train_loss),
            }

            run.epochs.push(EpochStats {
                epoch,
                train_loss,
                val_loss,
            });
        }

        Ok(run)
    }
}
