use thiserror::Error;

/// Core error type for all array operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ArrayError {
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    #[error("Index out of bounds: index {index} for axis {axis} with size {size}")]
    IndexOutOfBounds {
        index: usize,
        axis: usize,
        size: usize,
    },

    #[error("Invalid axis: {axis} for array with {ndim} dimensions")]
    InvalidAxis { axis: usize, ndim: usize },

    #[error("Cannot broadcast shapes {a:?} and {b:?}")]
    BroadcastError { a: Vec<usize>, b: Vec<usize> },

    #[error("Cannot reshape array of size {numel} into shape {shape:?}")]
    InvalidReshape { numel: usize, shape: Vec<i64> },

    #[error("Inhomogeneous rows: row {row} has length {got}, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Empty array")]
    EmptyArray,

    #[error("Value {0} is not representable as an integer")]
    NonIntegral(f64),
}

pub type ArrayResult<T> = Result<T, ArrayError>;
