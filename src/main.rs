// Trains a network on XOR and prints its predictions.
//
//   cargo run --release -- [--config spec.json] [--activation NAME]
//                          [--learning-rate X] [--epochs N] [--save model.json]
//
// Without --config the network is the 2-4-1 sigmoid perceptron. --activation
// and --learning-rate override whatever the config file says.
use std::path::PathBuf;
use std::process::ExitCode;

use log::{error, info};
use perceptron_nn::{train_loop, ActivationFunction, Network, NetworkSpec, TrainConfig};

const USAGE: &str = "usage: perceptron-nn [--config <spec.json>] [--activation sigmoid|tanh|relu] \
                     [--learning-rate X] [--epochs N] [--save <model.json>]";

#[derive(Debug)]
struct Args {
    config: Option<PathBuf>,
    activation: Option<ActivationFunction>,
    learning_rate: Option<f64>,
    epochs: usize,
    save: Option<PathBuf>,
}

fn parse_args<I: IntoIterator<Item = String>>(raw: I) -> Result<Args, String> {
    let mut args = Args {
        config: None,
        activation: None,
        learning_rate: None,
        epochs: TrainConfig::default().epochs,
        save: None,
    };

    let mut it = raw.into_iter();
    while let Some(flag) = it.next() {
        let mut value = || it.next().ok_or_else(|| format!("{flag} requires a value"));
        match flag.as_str() {
            "--config" => args.config = Some(PathBuf::from(value()?)),
            "--save" => args.save = Some(PathBuf::from(value()?)),
            "--activation" => args.activation = Some(value()?.parse()?),
            "--learning-rate" => {
                let raw = value()?;
                let lr: f64 = raw
                    .parse()
                    .map_err(|_| format!("--learning-rate expects a number, got '{raw}'"))?;
                if !lr.is_finite() || lr <= 0.0 {
                    return Err(format!("--learning-rate must be positive and finite, got {raw}"));
                }
                args.learning_rate = Some(lr);
            }
            "--epochs" => {
                let raw = value()?;
                args.epochs = raw
                    .parse()
                    .map_err(|_| format!("--epochs expects a non-negative integer, got '{raw}'"))?;
            }
            other => return Err(format!("unknown argument '{other}'")),
        }
    }

    Ok(args)
}

fn xor_dataset() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    let inputs = vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
    ];
    let expected_outputs = vec![
        vec![0.0],
        vec![1.0],
        vec![1.0],
        vec![0.0],
    ];
    (inputs, expected_outputs)
}

fn build_network(args: &Args) -> perceptron_nn::Result<(NetworkSpec, Network)> {
    let spec = match &args.config {
        Some(path) => NetworkSpec::load_json(path)?,
        None => NetworkSpec::new("xor", vec![2, 4, 1]),
    };
    let mut network = spec.build()?;
    if let Some(activation) = args.activation {
        network.set_activation(activation);
    }
    if let Some(learning_rate) = args.learning_rate {
        network.set_learning_rate(learning_rate);
    }
    Ok((spec, network))
}

fn run(args: Args) -> perceptron_nn::Result<()> {
    let (spec, mut network) = build_network(&args)?;
    info!(
        "training '{}' {:?} ({}, lr {}) for {} epochs",
        spec.name,
        network.topology(),
        network.activation(),
        network.learning_rate(),
        args.epochs
    );

    let (inputs, expected_outputs) = xor_dataset();
    let config = TrainConfig {
        epochs: args.epochs,
        ..TrainConfig::default()
    };
    let loss = train_loop(&mut network, &inputs, &expected_outputs, &config)?;
    info!("final loss = {loss:.6}");

    for input in &inputs {
        let output = network.feed_forward(input)?;
        println!("Input: {:?} -> Output: {:.4}", input, output[0]);
    }

    if let Some(path) = &args.save {
        network.save_json(path)?;
        info!("saved trained network to {}", path.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            error!("{e}");
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, String> {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn defaults_without_flags() {
        let args = parse(&[]).unwrap();
        assert!(args.config.is_none());
        assert!(args.activation.is_none());
        assert!(args.learning_rate.is_none());
        assert_eq!(args.epochs, 50_000);
    }

    #[test]
    fn parses_activation_and_learning_rate() {
        let args = parse(&["--activation", "tanh", "--learning-rate", "0.05", "--epochs", "10"]).unwrap();
        assert_eq!(args.activation, Some(ActivationFunction::Tanh));
        assert_eq!(args.learning_rate, Some(0.05));
        assert_eq!(args.epochs, 10);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(parse(&["--activation", "softmax"]).unwrap_err().contains("unknown activation"));
        assert!(parse(&["--learning-rate", "-1"]).is_err());
        assert!(parse(&["--learning-rate", "inf"]).is_err());
        assert!(parse(&["--epochs"]).unwrap_err().contains("requires a value"));
        assert!(parse(&["--bogus"]).is_err());
    }

    #[test]
    fn overrides_reach_the_network() {
        let args = parse(&["--activation", "relu", "--learning-rate", "0.2"]).unwrap();
        let (spec, network) = build_network(&args).unwrap();
        assert_eq!(spec.activation, ActivationFunction::Sigmoid);
        assert_eq!(network.activation(), ActivationFunction::ReLU);
        assert_eq!(network.learning_rate(), 0.2);
        assert_eq!(network.topology(), &[2, 4, 1]);
    }

    #[test]
    fn overrides_apply_on_top_of_a_config_file() {
        let path = std::env::temp_dir().join(format!("perceptron-nn-cli-{}.json", std::process::id()));
        let mut spec = NetworkSpec::new("wide", vec![2, 6, 1]);
        spec.learning_rate = 0.3;
        spec.save_json(&path).unwrap();

        let config = path.to_string_lossy().into_owned();
        let args = parse(&["--config", &config, "--activation", "tanh"]).unwrap();
        let (_, network) = build_network(&args).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(network.topology(), &[2, 6, 1]);
        assert_eq!(network.activation(), ActivationFunction::Tanh);
        assert_eq!(network.learning_rate(), 0.3);
    }

    #[test]
    fn short_run_trains_and_saves() {
        let path = std::env::temp_dir().join(format!("perceptron-nn-cli-model-{}.json", std::process::id()));
        let save = path.to_string_lossy().into_owned();
        let args = parse(&["--epochs", "2", "--save", &save]).unwrap();
        run(args).unwrap();
        let saved = Network::load_json(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(saved.topology(), &[2, 4, 1]);
    }
}
