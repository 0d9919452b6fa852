use serde::{Serialize, Deserialize};
use std::f64::consts::E;
use std::fmt;
use std::str::FromStr;

/// Activation applied element-wise after each layer's affine transform.
///
/// Every variant pairs a forward function with a derivative written in
/// terms of the forward function's *output*, so backpropagation can work
/// directly on stored activations without keeping pre-activation values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationFunction {
    #[default]
    Sigmoid,
    Tanh,
    #[serde(rename = "relu")]
    ReLU,
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + E.powf(-x))
}

fn sigmoid_derivative(y: f64) -> f64 {
    y * (1.0 - y)
}

fn tanh(x: f64) -> f64 {
    x.tanh()
}

fn tanh_derivative(y: f64) -> f64 {
    1.0 - y * y
}

fn relu(x: f64) -> f64 {
    if x > 0.0 { x } else { 0.0 }
}

// Equal to the pre-activation sign test only because relu output is
// non-negative and zero exactly where the input was non-positive.
fn relu_derivative(y: f64) -> f64 {
    if y > 0.0 { 1.0 } else { 0.0 }
}

impl ActivationFunction {
    /// Forward function as a plain function pointer, suitable for `Matrix::map`.
    pub fn forward_fn(self) -> fn(f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => sigmoid,
            ActivationFunction::Tanh => tanh,
            ActivationFunction::ReLU => relu,
        }
    }

    /// Derivative as a function of the activated output `y = f(x)`.
    pub fn derivative_fn(self) -> fn(f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => sigmoid_derivative,
            ActivationFunction::Tanh => tanh_derivative,
            ActivationFunction::ReLU => relu_derivative,
        }
    }

    pub fn function(self, x: f64) -> f64 {
        (self.forward_fn())(x)
    }

    /// Element-wise derivative, evaluated on the activated value `y`.
    pub fn derivative(self, y: f64) -> f64 {
        (self.derivative_fn())(y)
    }

    pub fn name(self) -> &'static str {
        match self {
            ActivationFunction::Sigmoid => "sigmoid",
            ActivationFunction::Tanh => "tanh",
            ActivationFunction::ReLU => "relu",
        }
    }
}

impl fmt::Display for ActivationFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ActivationFunction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sigmoid" => Ok(ActivationFunction::Sigmoid),
            "tanh" => Ok(ActivationFunction::Tanh),
            "relu" => Ok(ActivationFunction::ReLU),
            other => Err(format!("unknown activation '{other}' (expected sigmoid, tanh or relu)")),
        }
    }
}
