use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{NetError, Result};
use crate::math::matrix::Matrix;
use crate::network::network::{validate_topology, Network};

/// Current on-disk format version.
pub const FORMAT_VERSION: u32 = 1;

/// Flat, versioned record of a network's full parameter state.
///
/// Weight and bias matrices are stored row-major; their shapes are implied by
/// `topology`, so the record holds no per-matrix dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub format_version: u32,
    pub topology: Vec<usize>,
    pub activation: ActivationFunction,
    pub learning_rate: f64,
    pub weights: Vec<Vec<f64>>,
    pub biases: Vec<Vec<f64>>,
}

impl NetworkSnapshot {
    fn check_finite(&self) -> Result<()> {
        if !self.learning_rate.is_finite() {
            return Err(NetError::NonFinite {
                what: "learning rate".to_string(),
                value: self.learning_rate,
            });
        }
        let params = [("weights", &self.weights), ("biases", &self.biases)];
        for (kind, layers) in params {
            for (layer, values) in layers.iter().enumerate() {
                if let Some(&value) = values.iter().find(|v| !v.is_finite()) {
                    return Err(NetError::NonFinite {
                        what: format!("{kind} of layer transition {layer}"),
                        value,
                    });
                }
            }
        }
        Ok(())
    }
}

impl Network {
    pub fn to_snapshot(&self) -> NetworkSnapshot {
        NetworkSnapshot {
            format_version: FORMAT_VERSION,
            topology: self.topology().to_vec(),
            activation: self.activation(),
            learning_rate: self.learning_rate(),
            weights: self.weights().iter().map(Matrix::to_array).collect(),
            biases: self.biases().iter().map(Matrix::to_array).collect(),
        }
    }

    /// Snapshot for writing to disk. JSON has no encoding for NaN or
    /// infinity, so non-finite parameters are rejected here rather than
    /// surfacing as a parse error on load.
    fn checked_snapshot(&self) -> Result<NetworkSnapshot> {
        let snapshot = self.to_snapshot();
        snapshot.check_finite()?;
        Ok(snapshot)
    }

    /// Rebuilds a network, validating the version and every array length.
    pub fn from_snapshot(snapshot: NetworkSnapshot) -> Result<Network> {
        if snapshot.format_version != FORMAT_VERSION {
            return Err(NetError::UnsupportedVersion(snapshot.format_version));
        }
        validate_topology(&snapshot.topology)?;
        snapshot.check_finite()?;
        let transitions = snapshot.topology.len() - 1;
        if snapshot.weights.len() != transitions || snapshot.biases.len() != transitions {
            return Err(NetError::InvalidTopology(format!(
                "{} layer transitions but {} weight and {} bias arrays",
                transitions,
                snapshot.weights.len(),
                snapshot.biases.len()
            )));
        }

        let mut weights = Vec::with_capacity(transitions);
        let mut biases = Vec::with_capacity(transitions);
        for (i, pair) in snapshot.topology.windows(2).enumerate() {
            weights.push(Matrix::from_row_major(pair[1], pair[0], &snapshot.weights[i])?);
            biases.push(Matrix::from_row_major(pair[1], 1, &snapshot.biases[i])?);
        }

        Network::from_parts(
            snapshot.topology,
            weights,
            biases,
            snapshot.learning_rate,
            snapshot.activation,
        )
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.checked_snapshot()?)?)
    }

    pub fn from_json(json: &str) -> Result<Network> {
        Network::from_snapshot(serde_json::from_str(json)?)
    }

    /// Serializes the network to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let snapshot = self.checked_snapshot()?;
        let file = File::create(path.as_ref())?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &snapshot)?;
        debug!("saved network to {}", path.as_ref().display());
        Ok(())
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Network> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        let network = Network::from_snapshot(serde_json::from_reader(reader)?)?;
        debug!(
            "loaded network {:?} from {}",
            network.topology(),
            path.as_ref().display()
        );
        Ok(network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample() -> Network {
        Network::with_rng(&[2, 3, 1], &mut StdRng::seed_from_u64(9))
            .unwrap()
            .with_learning_rate(0.25)
            .with_activation(ActivationFunction::Tanh)
    }

    #[test]
    fn snapshot_is_flat_and_versioned() {
        let snap = sample().to_snapshot();
        assert_eq!(snap.format_version, FORMAT_VERSION);
        assert_eq!(snap.topology, vec![2, 3, 1]);
        assert_eq!(snap.weights.iter().map(Vec::len).collect::<Vec<_>>(), vec![6, 3]);
        assert_eq!(snap.biases.iter().map(Vec::len).collect::<Vec<_>>(), vec![3, 1]);
    }

    #[test]
    fn json_round_trip_restores_every_parameter() {
        let net = sample();
        let restored = Network::from_json(&net.to_json().unwrap()).unwrap();
        assert_eq!(restored.topology(), net.topology());
        assert_eq!(restored.weights(), net.weights());
        assert_eq!(restored.biases(), net.biases());
        assert_eq!(restored.learning_rate(), 0.25);
        assert_eq!(restored.activation(), ActivationFunction::Tanh);
    }

    #[test]
    fn rejects_unknown_version() {
        let mut snap = sample().to_snapshot();
        snap.format_version = 2;
        assert!(matches!(Network::from_snapshot(snap), Err(NetError::UnsupportedVersion(2))));
    }

    #[test]
    fn rejects_truncated_parameters() {
        let mut snap = sample().to_snapshot();
        snap.weights[0].pop();
        assert!(Network::from_snapshot(snap).unwrap_err().is_dimension_mismatch());

        let mut snap = sample().to_snapshot();
        snap.biases.pop();
        assert!(matches!(Network::from_snapshot(snap), Err(NetError::InvalidTopology(_))));
    }

    #[test]
    fn rejects_zero_width_layer_as_invalid_topology() {
        let snap = NetworkSnapshot {
            format_version: FORMAT_VERSION,
            topology: vec![2, 0, 1],
            activation: ActivationFunction::Sigmoid,
            learning_rate: 0.1,
            weights: vec![vec![], vec![]],
            biases: vec![vec![], vec![0.0]],
        };
        assert!(matches!(Network::from_snapshot(snap), Err(NetError::InvalidTopology(_))));
    }

    fn with_weight(value: f64) -> Network {
        let w = Matrix::from_data(vec![vec![value]]).unwrap();
        let b = Matrix::from_array(&[0.0]).unwrap();
        Network::from_parts(vec![1, 1], vec![w], vec![b], 0.1, ActivationFunction::ReLU).unwrap()
    }

    #[test]
    fn refuses_to_save_non_finite_parameters() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = with_weight(value).to_json().unwrap_err();
            assert!(matches!(err, NetError::NonFinite { .. }), "{value}: {err}");
        }

        let path = std::env::temp_dir().join(format!("perceptron-nn-nan-{}.json", std::process::id()));
        assert!(matches!(with_weight(f64::NAN).save_json(&path), Err(NetError::NonFinite { .. })));
        assert!(!path.exists());

        let net = sample().with_learning_rate(f64::INFINITY);
        assert!(matches!(net.to_json(), Err(NetError::NonFinite { .. })));
    }

    #[test]
    fn diverged_training_is_caught_before_saving() {
        // gradient = 1 * (-1e300 - 1) * 1e300 overflows to -inf.
        let mut net = with_weight(1.0).with_learning_rate(1e300);
        net.train(&[1.0], &[-1e300]).unwrap();
        assert!(!net.weights()[0].get(0, 0).is_finite());
        assert!(matches!(net.to_json(), Err(NetError::NonFinite { .. })));
    }

    #[test]
    fn from_snapshot_rejects_non_finite_values() {
        let mut snap = sample().to_snapshot();
        snap.biases[1][0] = f64::NAN;
        assert!(matches!(Network::from_snapshot(snap), Err(NetError::NonFinite { .. })));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(Network::from_json("{\"topology\": [2, 1]"), Err(NetError::Json(_))));
    }
}
