pub mod error;
pub mod math;
pub mod activation;
pub mod network;
pub mod loss;
pub mod train;

// Convenience re-exports
pub use error::{NetError, Result};
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use network::network::Network;
pub use network::snapshot::NetworkSnapshot;
pub use network::spec::NetworkSpec;
pub use train::{train_epoch, train_loop, TrainConfig};

