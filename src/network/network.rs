use log::debug;
use rand::Rng;

use crate::activation::activation::ActivationFunction;
use crate::error::{NetError, Result};
use crate::math::matrix::Matrix;

pub const DEFAULT_LEARNING_RATE: f64 = 0.1;

/// Fully connected feed-forward network trained by online backpropagation.
///
/// `weights[i]` has shape `(topology[i + 1], topology[i])` and `biases[i]`
/// has shape `(topology[i + 1], 1)`. Topology is fixed at construction.
#[derive(Debug, Clone)]
pub struct Network {
    topology: Vec<usize>,
    weights: Vec<Matrix>,
    biases: Vec<Matrix>,
    learning_rate: f64,
    activation: ActivationFunction,
}

impl Network {
    /// Builds a network with parameters drawn uniformly from [-1, 1).
    pub fn new(topology: &[usize]) -> Result<Network> {
        Network::with_rng(topology, &mut rand::thread_rng())
    }

    /// Like [`Network::new`], drawing initial parameters from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(topology: &[usize], rng: &mut R) -> Result<Network> {
        validate_topology(topology)?;

        let mut weights = Vec::with_capacity(topology.len() - 1);
        let mut biases = Vec::with_capacity(topology.len() - 1);
        for pair in topology.windows(2) {
            let mut w = Matrix::zeros(pair[1], pair[0]);
            w.randomize_with(rng);
            let mut b = Matrix::zeros(pair[1], 1);
            b.randomize_with(rng);
            weights.push(w);
            biases.push(b);
        }

        debug!("created network with topology {:?}", topology);

        Ok(Network {
            topology: topology.to_vec(),
            weights,
            biases,
            learning_rate: DEFAULT_LEARNING_RATE,
            activation: ActivationFunction::default(),
        })
    }

    /// Assembles a network from existing parameters, checking every shape.
    pub(crate) fn from_parts(
        topology: Vec<usize>,
        weights: Vec<Matrix>,
        biases: Vec<Matrix>,
        learning_rate: f64,
        activation: ActivationFunction,
    ) -> Result<Network> {
        validate_topology(&topology)?;
        let transitions = topology.len() - 1;
        if weights.len() != transitions || biases.len() != transitions {
            return Err(NetError::InvalidTopology(format!(
                "{} layer transitions but {} weight and {} bias matrices",
                transitions,
                weights.len(),
                biases.len()
            )));
        }
        for (i, pair) in topology.windows(2).enumerate() {
            if weights[i].shape() != (pair[1], pair[0]) {
                return Err(NetError::mismatch("weights", (pair[1], pair[0]), weights[i].shape()));
            }
            if biases[i].shape() != (pair[1], 1) {
                return Err(NetError::mismatch("biases", (pair[1], 1), biases[i].shape()));
            }
        }

        Ok(Network {
            topology,
            weights,
            biases,
            learning_rate,
            activation,
        })
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Network {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_activation(mut self, activation: ActivationFunction) -> Network {
        self.activation = activation;
        self
    }

    pub fn set_learning_rate(&mut self, learning_rate: f64) {
        self.learning_rate = learning_rate;
    }

    pub fn set_activation(&mut self, activation: ActivationFunction) {
        self.activation = activation;
    }

    pub fn topology(&self) -> &[usize] {
        &self.topology
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn activation(&self) -> ActivationFunction {
        self.activation
    }

    pub fn weights(&self) -> &[Matrix] {
        &self.weights
    }

    pub fn biases(&self) -> &[Matrix] {
        &self.biases
    }

    pub fn input_size(&self) -> usize {
        self.topology[0]
    }

    pub fn output_size(&self) -> usize {
        self.topology[self.topology.len() - 1]
    }

    /// Forward pass. Nothing is cached between calls.
    pub fn feed_forward(&self, input: &[f64]) -> Result<Vec<f64>> {
        self.check_len("feed_forward input", input, self.input_size())?;

        let mut current = Matrix::from_array(input)?;
        for i in 0..self.weights.len() {
            current = self.layer_forward(i, &current)?;
        }
        Ok(current.to_array())
    }

    /// One online backpropagation step on a single `(input, target)` pair.
    ///
    /// Every layer's update is computed before any parameter is written, so
    /// the error for layer `i - 1` is propagated through the weights that
    /// produced layer `i`, and a failing call leaves the network untouched.
    pub fn train(&mut self, input: &[f64], target: &[f64]) -> Result<()> {
        self.check_len("train input", input, self.input_size())?;
        self.check_len("train target", target, self.output_size())?;

        // layers[0] is the input column, layers[i + 1] the output of transition i.
        let mut layers = Vec::with_capacity(self.topology.len());
        layers.push(Matrix::from_array(input)?);
        for i in 0..self.weights.len() {
            let next = self.layer_forward(i, &layers[i])?;
            layers.push(next);
        }

        let output = &layers[layers.len() - 1];
        let mut error = Matrix::subtract(&Matrix::from_array(target)?, output)?;

        let derivative = self.activation.derivative_fn();
        let mut updates = Vec::with_capacity(self.weights.len());
        for i in (0..self.weights.len()).rev() {
            let mut gradient = layers[i + 1].mapped(derivative);
            gradient.hadamard(&error)?;
            gradient.scale(self.learning_rate);

            let delta_weights = Matrix::multiply(&gradient, &layers[i].transpose())?;

            if i > 0 {
                error = Matrix::multiply(&self.weights[i].transpose(), &error)?;
            }

            updates.push((i, delta_weights, gradient));
        }

        for (i, delta_weights, gradient) in updates {
            self.weights[i].add(&delta_weights)?;
            self.biases[i].add(&gradient)?;
        }

        Ok(())
    }

    fn layer_forward(&self, i: usize, input: &Matrix) -> Result<Matrix> {
        let mut z = Matrix::multiply(&self.weights[i], input)?;
        z.add(&self.biases[i])?;
        z.map(self.activation.forward_fn());
        Ok(z)
    }

    fn check_len(&self, op: &'static str, values: &[f64], expected: usize) -> Result<()> {
        if values.len() != expected {
            return Err(NetError::mismatch(op, (expected, 1), (values.len(), 1)));
        }
        Ok(())
    }
}

pub(crate) fn validate_topology(topology: &[usize]) -> Result<()> {
    if topology.len() < 2 {
        return Err(NetError::InvalidTopology(format!(
            "need at least an input and an output layer, got {} layer(s)",
            topology.len()
        )));
    }
    if let Some(i) = topology.iter().position(|&w| w == 0) {
        return Err(NetError::InvalidTopology(format!("layer {i} has zero width")));
    }
    Ok(())
}
