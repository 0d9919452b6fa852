use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, NetError>;

/// A matrix shape, printed as `RxC`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape(pub usize, pub usize);

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.0, self.1)
    }
}

#[derive(Error, Debug)]
pub enum NetError {
    /// Operand shapes violate the algebraic precondition of `op`. For length
    /// checks `left` is the required shape and `right` the one supplied.
    #[error("dimension mismatch in {op}: {left} vs {right}")]
    DimensionMismatch {
        op: &'static str,
        left: Shape,
        right: Shape,
    },

    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    #[error("matrix must have at least one row and one column")]
    EmptyMatrix,

    #[error("row {row} has {actual} elements, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("training set is empty")]
    EmptyDataset,

    /// JSON cannot represent NaN or infinity.
    #[error("non-finite value {value} in {what}")]
    NonFinite { what: String, value: f64 },

    #[error("unsupported snapshot format version {0}")]
    UnsupportedVersion(u32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl NetError {
    pub(crate) fn mismatch(op: &'static str, left: (usize, usize), right: (usize, usize)) -> Self {
        NetError::DimensionMismatch {
            op,
            left: Shape(left.0, left.1),
            right: Shape(right.0, right.1),
        }
    }

    /// True for errors caused by operand shapes.
    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(self, NetError::DimensionMismatch { .. })
    }
}
