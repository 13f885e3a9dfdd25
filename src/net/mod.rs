use ndarray::{Array1, Array2, Axis};
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::Normal;

use crate::config::{ConfigError, Topology};
use crate::Element;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Relu,
    Tanh,
}

impl Activation {
    fn apply<F: Element>(self, x: F) -> F {
        match self {
            Activation::Relu => x.max(F::zero()),
            Activation::Tanh => x.tanh(),
        }
    }

    fn derivative<F: Element>(self, x: F) -> F {
        match self {
            Activation::Relu => {
                if x > F::zero() {
                    F::one()
                } else {
                    F::zero()
                }
            }
            Activation::Tanh => {
                let t = x.tanh();
                F::one() - t * t
            }
        }
    }
}

pub(crate) struct Dense<F> {
    pub(crate) weights: Array2<F>,
    pub(crate) bias: Array1<F>,
    pub(crate) activation: Activation,
}

impl<F: Element> Dense<F> {
    /* He init for relu layers, Xavier/Glorot for the tanh head */
    fn new(input_dim: usize, output_dim: usize, activation: Activation, rng: &mut StdRng) -> Self {
        let weights = match activation {
            Activation::Relu => {
                let std_dev = (2.0 / input_dim as f64).sqrt();
                let normal = Normal::new(0.0, std_dev).unwrap();
                Array2::from_shape_fn((input_dim, output_dim), |_| {
                    F::from(normal.sample(rng)).unwrap()
                })
            }
            Activation::Tanh => {
                let limit = (6.0 / (input_dim + output_dim) as f64).sqrt();
                let uniform = Uniform::new(-limit, limit);
                Array2::from_shape_fn((input_dim, output_dim), |_| {
                    F::from(uniform.sample(rng)).unwrap()
                })
            }
        };

        Self {
            weights,
            bias: Array1::zeros(output_dim),
            activation,
        }
    }

    fn forward(&self, input: &Array2<F>) -> (Array2<F>, Array2<F>) {
        let z = input.dot(&self.weights) + &self.bias;
        let a = z.mapv(|v| self.activation.apply(v));
        (z, a)
    }
}

pub(crate) struct Gradients<F> {
    pub(crate) weights: Vec<Array2<F>>,
    pub(crate) biases: Vec<Array1<F>>,
}

/// Fully-connected feed-forward regressor mapping a feature vector to a
/// single tanh-bounded scalar. Mutated in place by the training loop only.
pub struct Mlp<F> {
    layers: Vec<Dense<F>>,
}

impl<F: Element> Mlp<F> {
    pub fn new(
        feature_width: usize,
        topology: Topology,
        init_seed: Option<u64>,
    ) -> Result<Self, ConfigError> {
        if feature_width == 0 {
            return Err(ConfigError::NoFeatures);
        }

        let mut rng = match init_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut layers = Vec::new();
        let mut input_dim = feature_width;
        for &dim in topology.hidden_dims() {
            layers.push(Dense::new(input_dim, dim, Activation::Relu, &mut rng));
            input_dim = dim;
        }
        layers.push(Dense::new(input_dim, 1, Activation::Tanh, &mut rng));

        Ok(Self { layers })
    }

    pub fn feature_width(&self) -> usize {
        self.layers[0].weights.nrows()
    }

    /// One prediction per input row, order-preserving. Mutates nothing.
    pub fn predict(&self, xs: &Array2<F>) -> Array1<F> {
        let mut a = xs.clone();
        for layer in &self.layers {
            a = layer.forward(&a).1;
        }
        a.column(0).to_owned()
    }

    /// Forward and backward pass over one mini-batch: returns the batch MSE
    /// and the loss gradients for every layer.
    pub(crate) fn mse_gradients(&self, xs: &Array2<F>, ys: &Array1<F>) -> (F, Gradients<F>) {
        let mut zs = Vec::with_capacity(self.layers.len());
        let mut activations = vec![xs.clone()];
        for layer in &self.layers {
            let (z, a) = layer.forward(activations.last().unwrap());
            zs.push(z);
            activations.push(a);
        }

        let targets = ys.view().insert_axis(Axis(1));
        let diff = activations.last().unwrap() - &targets;
        let n = F::from(xs.nrows()).unwrap();
        let loss = diff.mapv(|d| d * d).sum() / n;

        /* d(mean((p - y)^2))/dp = 2 (p - y) / n */
        let mut delta = diff * (F::from(2.0).unwrap() / n);
        let mut grad_weights = Vec::with_capacity(self.layers.len());
        let mut grad_biases = Vec::with_capacity(self.layers.len());
        for (i, layer) in self.layers.iter().enumerate().rev() {
            let dz = &delta * &zs[i].mapv(|z| layer.activation.derivative(z));
            grad_weights.push(activations[i].t().dot(&dz));
            grad_biases.push(dz.sum_axis(Axis(0)));
            if i > 0 {
                delta = dz.dot(&layer.weights.t());
            }
        }
        grad_weights.reverse();
        grad_biases.reverse();

        (
            loss,
            Gradients {
                weights: grad_weights,
                biases: grad_biases,
            },
        )
    }

    pub(crate) fn layers(&self) -> &[Dense<F>] {
        &self.layers
    }

    pub(crate) fn layers_mut(&mut self) -> &mut [Dense<F>] {
        &mut self.layers
    }
}

/// RNG for components that should follow the weight-init seeding choice:
/// explicitly seeded when a seed is given, entropy-seeded otherwise.
pub(crate) fn seeded_rng(seed: Option<u64>, stream: u64) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed ^ stream),
        None => StdRng::from_entropy(),
    }
}
