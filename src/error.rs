use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum NNError {
    // Shape related errors
    DimensionMismatch { expected: usize, actual: usize },
    StructuralInvariantViolation(String),

    // Activation related errors
    UnknownActivation(String),

    /// Conversion target for ndarray reshapes. Lengths are checked before any
    /// reshape, so valid calls never produce it.
    ShapeError(ndarray::ShapeError),
}

impl fmt::Display for NNError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NNError::DimensionMismatch { expected, actual } => {
                write!(f, "Dimension mismatch: expected {} values, got {}", expected, actual)
            }
            NNError::StructuralInvariantViolation(msg) => write!(f, "Invalid network structure: {}", msg),
            NNError::UnknownActivation(name) => write!(f, "Unknown activation function: {}", name),
            NNError::ShapeError(err) => write!(f, "Shape error: {}", err),
        }
    }
}

impl From<ndarray::ShapeError> for NNError {
    fn from(err: ndarray::ShapeError) -> NNError {
        NNError::ShapeError(err)
    }
}

impl Error for NNError {}

pub type Result<T> = std::result::Result<T, NNError>;
