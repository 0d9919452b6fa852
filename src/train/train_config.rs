/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`    — total number of full passes over the training data
/// - `log_every` — emit an `info` progress line every this many epochs;
///                 `0` disables periodic logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainConfig {
    pub epochs: usize,
    pub log_every: usize,
}

impl TrainConfig {
    pub fn new(epochs: usize) -> Self {
        TrainConfig {
            epochs,
            log_every: 0,
        }
    }

    pub fn log_every(mut self, log_every: usize) -> Self {
        self.log_every = log_every;
        self
    }

    pub(crate) fn should_log(&self, epoch: usize) -> bool {
        self.log_every > 0 && (epoch % self.log_every == 0 || epoch == self.epochs)
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            epochs: 50_000,
            log_every: 5_000,
        }
    }
}
