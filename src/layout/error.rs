#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("label {index} has not been measured")]
    MissingMeasurement { index: usize },
    #[error("{what} has {actual} entries, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("invalid layout state: {message}")]
    InvalidState { message: String },
    #[error("invalid pie geometry: {message}")]
    InvalidGeometry { message: String },
    #[error("label {index} has invalid size {width}x{height}")]
    InvalidSize {
        index: usize,
        width: f64,
        height: f64,
    },
    #[error("invalid dataset: {message}")]
    InvalidDataset { message: String },
}

impl LayoutError {
    pub(crate) fn state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    pub(crate) fn geometry(message: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            message: message.into(),
        }
    }

    pub(crate) fn dataset(message: impl Into<String>) -> Self {
        Self::InvalidDataset {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LayoutError>;
