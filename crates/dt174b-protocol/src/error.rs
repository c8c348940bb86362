//! Error types for the settings encoder.

use thiserror::Error;

/// Errors that can occur while encoding a settings packet.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// A field does not fit its wire representation after conversion.
    #[error("value out of range for field `{0}`")]
    OutOfRange(&'static str),
}

/// Result type alias for encoding operations.
pub type EncodeResult<T> = Result<T, EncodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EncodeError::OutOfRange("sample_interval");
        assert!(err.to_string().contains("`sample_interval`"));
    }
}
