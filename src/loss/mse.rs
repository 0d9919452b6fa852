/// Mean of `(predicted - expected)²` over the output vector.
///
/// Only used to report training progress; `Network::train` drives its
/// updates from the raw `target - output` error.
pub fn mean_squared_error(predicted: &[f64], expected: &[f64]) -> f64 {
    debug_assert_eq!(predicted.len(), expected.len());
    let n = predicted.len() as f64;
    predicted.iter().zip(expected.iter())
        .map(|(a, b)| (a - b).powi(2))
        .sum::<f64>() / n
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_squared_differences() {
        assert_eq!(mean_squared_error(&[1.0, 0.0], &[0.0, 0.0]), 0.5);
        assert_eq!(mean_squared_error(&[0.25], &[0.25]), 0.0);
        assert_eq!(mean_squared_error(&[3.0, -1.0], &[1.0, 1.0]), 4.0);
    }
}
