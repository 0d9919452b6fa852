use perceptron_nn::{train_loop, ActivationFunction, Network, TrainConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn trained() -> Network {
    let mut network = Network::with_rng(&[2, 3, 1], &mut StdRng::seed_from_u64(17))
        .unwrap()
        .with_activation(ActivationFunction::Tanh)
        .with_learning_rate(0.05);
    let inputs = vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
    ];
    let targets = vec![vec![0.0], vec![1.0], vec![1.0], vec![0.0]];
    train_loop(&mut network, &inputs, &targets, &TrainConfig::new(200)).unwrap();
    network
}

fn probes() -> Vec<Vec<f64>> {
    vec![
        vec![0.0, 0.0],
        vec![1.0, 1.0],
        vec![0.123456789, -0.987654321],
        vec![1e-9, 42.0],
    ]
}

#[test]
fn file_round_trip_gives_identical_outputs() {
    let network = trained();
    let path = std::env::temp_dir().join(format!("perceptron-nn-model-{}.json", std::process::id()));

    network.save_json(&path).unwrap();
    let restored = Network::load_json(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(restored.topology(), network.topology());
    for x in probes() {
        let a = network.feed_forward(&x).unwrap();
        let b = restored.feed_forward(&x).unwrap();
        assert_eq!(a, b, "outputs differ for {x:?}");
    }
}

#[test]
fn restored_network_keeps_training_identically() {
    let mut original = trained();
    let mut restored = Network::from_json(&original.to_json().unwrap()).unwrap();

    original.train(&[1.0, 0.0], &[1.0]).unwrap();
    restored.train(&[1.0, 0.0], &[1.0]).unwrap();

    assert_eq!(original.weights(), restored.weights());
    assert_eq!(original.biases(), restored.biases());
}

#[test]
fn loading_a_missing_file_is_an_io_error() {
    let path = std::env::temp_dir().join("perceptron-nn-does-not-exist.json");
    assert!(matches!(Network::load_json(path), Err(perceptron_nn::NetError::Io(_))));
}
