use alloc::string::String;
use enough::StopReason;

/// Errors from DDS decoding and encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DdsError {
    #[error("input too small for DDS header: need {needed} bytes, got {actual}")]
    TooSmall { needed: usize, actual: usize },

    #[error("bad DDS magic signature")]
    BadMagic,

    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("truncated payload: need {needed} bytes, got {actual}")]
    Truncated { needed: usize, actual: usize },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for DdsError {
    fn from(r: StopReason) -> Self {
        DdsError::Cancelled(r)
    }
}
