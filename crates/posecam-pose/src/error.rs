use posecam_base::TensorError;
use std::fmt;

#[derive(Debug)]
pub enum PoseError {
    /// Input or model output has an unexpected shape.
    Shape(String),
    /// The model could not be found or loaded.
    Model(String),
    /// Inference itself failed.
    Runtime(String),
}

impl fmt::Display for PoseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoseError::Shape(msg) => write!(f, "shape error: {msg}"),
            PoseError::Model(msg) => write!(f, "model error: {msg}"),
            PoseError::Runtime(msg) => write!(f, "runtime error: {msg}"),
        }
    }
}

impl std::error::Error for PoseError {}

impl From<TensorError> for PoseError {
    fn from(err: TensorError) -> Self {
        PoseError::Shape(err.to_string())
    }
}
