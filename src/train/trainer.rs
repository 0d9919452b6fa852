use crate::{
    error::{NetError, Result},
    loss::mse::mean_squared_error,
    network::network::Network,
};

/// One epoch of online training: a single `Network::train` call per example,
/// in the order given.
///
/// Returns the mean squared error of the outputs seen *before* each update.
pub fn train_epoch(
    network: &mut Network,
    inputs: &[Vec<f64>],
    expected_outputs: &[Vec<f64>],
) -> Result<f64> {
    if inputs.len() != expected_outputs.len() {
        return Err(NetError::mismatch(
            "train_epoch",
            (inputs.len(), 1),
            (expected_outputs.len(), 1),
        ));
    }
    if inputs.is_empty() {
        return Err(NetError::EmptyDataset);
    }

    let mut total_loss = 0.0;

    for (input, expected) in inputs.iter().zip(expected_outputs.iter()) {
        let output = network.feed_forward(input)?;
        network.train(input, expected)?;
        total_loss += mean_squared_error(&output, expected);
    }

    Ok(total_loss / inputs.len() as f64)
}
