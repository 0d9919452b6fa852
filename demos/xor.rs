use perceptron_nn::{train_epoch, Network};

fn main() -> perceptron_nn::Result<()> {
    let mut network = Network::new(&[2, 4, 1])?;

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

    let epochs = 50_000;

    for epoch in 0..epochs {
        let loss = train_epoch(&mut network, &inputs, &expected_outputs)?;
        if epoch % 5000 == 0 {
            println!("Epoch {epoch}: loss = {loss:.6}");
        }
    }

    for input in &inputs {
        println!("Input: {:?} -> Output: {:.4}", input, network.feed_forward(input)?[0]);
    }

    Ok(())
}
