use std::time::Instant;

use log::info;

use crate::error::Result;
use crate::network::network::Network;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::train_epoch;

/// Trains `network` for `config.epochs` epochs over the examples in fixed
/// order and returns the mean training loss of the **last completed epoch**
/// (`0.0` when `config.epochs` is zero).
///
/// Progress is logged at `info` level according to `config.log_every`.
pub fn train_loop(
    network: &mut Network,
    inputs: &[Vec<f64>],
    expected_outputs: &[Vec<f64>],
    config: &TrainConfig,
) -> Result<f64> {
    let started = Instant::now();
    let mut last_loss = 0.0;

    for epoch in 1..=config.epochs {
        last_loss = train_epoch(network, inputs, expected_outputs)?;

        if config.should_log(epoch) {
            info!(
                "epoch {epoch}/{}: loss = {last_loss:.6} ({} ms elapsed)",
                config.epochs,
                started.elapsed().as_millis()
            );
        }
    }

    Ok(last_loss)
}
