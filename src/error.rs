//! Error types for the zband detection library

use thiserror::Error;

/// Result type alias for zband operations
pub type Result<T> = std::result::Result<T, ZbandError>;

/// Main error type for the zband library
#[derive(Error, Debug)]
pub enum ZbandError {
    #[error("Invalid parameter: {name} = {value}, {reason}")]
    InvalidParameter {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ZbandError::InvalidParameter {
            name: "window".to_string(),
            value: "0".to_string(),
            reason: "must be a positive integer".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid parameter: window = 0, must be a positive integer"
        );
    }

    #[test]
    fn test_malformed_input_display() {
        let err = ZbandError::MalformedInput("value at index 3 is NaN".to_string());
        assert_eq!(err.to_string(), "Malformed input: value at index 3 is NaN");
    }
}
