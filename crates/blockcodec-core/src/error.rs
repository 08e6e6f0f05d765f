//! Error taxonomy shared by every stage of the codec.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::plane::BLOCK_SIZE;

/// Errors surfaced by the compression pipeline.
///
/// Stage-specific failures (decoding, encoding) keep their own enums and are
/// wrapped here so callers receive a single tagged result.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The input could not be read or is not a supported raster format.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A configuration value is unusable (e.g. a zero multiplier).
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Channel dimensions cannot be tiled into blocks.
    #[error(
        "Invalid dimensions {width}x{height}: both must be non-zero multiples of {block}",
        block = BLOCK_SIZE
    )]
    Dimension { width: u32, height: u32 },

    /// A pixel buffer or channel plane does not match its declared shape.
    #[error("Invalid image data: expected {expected} samples, got {actual}")]
    InvalidImage { expected: usize, actual: usize },

    /// The output could not be encoded or written.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// A background compression ended without a result to deliver.
    #[error("Compression worker finished without delivering a result")]
    NoResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_error_display() {
        let err = CodecError::Dimension {
            width: 13,
            height: 8,
        };
        assert_eq!(
            err.to_string(),
            "Invalid dimensions 13x8: both must be non-zero multiples of 8"
        );
    }

    #[test]
    fn test_decode_error_is_transparent() {
        let err: CodecError = DecodeError::InvalidFormat.into();
        assert_eq!(err.to_string(), "Invalid or unsupported image format");
        assert!(matches!(err, CodecError::Decode(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_encode_error_conversion() {
        let err: CodecError = EncodeError::EncodingFailed("disk full".to_string()).into();
        assert!(matches!(err, CodecError::Encode(_)));
        assert_eq!(err.to_string(), "Image encoding failed: disk full");
    }

    #[test]
    fn test_errors_are_send() {
        fn assert_send<T: Send + 'static>() {}
        assert_send::<CodecError>();
    }
}
