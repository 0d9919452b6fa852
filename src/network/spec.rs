use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::error::Result;
use crate::network::network::{Network, DEFAULT_LEARNING_RATE};

fn default_learning_rate() -> f64 {
    DEFAULT_LEARNING_RATE
}

/// A serializable description of a network architecture and its
/// hyperparameters, independent of any trained weights.
///
/// `activation` and `learning_rate` may be omitted from JSON and fall back to
/// sigmoid and 0.1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Human-readable name, used by the CLI in log output.
    #[serde(default)]
    pub name: String,
    /// Layer widths from input to output.
    pub topology: Vec<usize>,
    #[serde(default)]
    pub activation: ActivationFunction,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
}

impl NetworkSpec {
    pub fn new(name: impl Into<String>, topology: Vec<usize>) -> Self {
        NetworkSpec {
            name: name.into(),
            topology,
            activation: ActivationFunction::default(),
            learning_rate: DEFAULT_LEARNING_RATE,
        }
    }

    /// Creates a freshly initialized network matching this description.
    pub fn build(&self) -> Result<Network> {
        Ok(Network::new(&self.topology)?
            .with_activation(self.activation)
            .with_learning_rate(self.learning_rate))
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<NetworkSpec> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}
