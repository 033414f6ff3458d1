/// Decode error taxonomy
///
/// Every failure mode of the decoding pipeline is a variant here. Clean
/// end-of-data is NOT an error: frame-level reads return `Ok(None)` when the
/// byte source ends exactly at a frame boundary.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    /// A field needed more bytes than the source had left. The cursor
    /// position is no longer trustworthy; decoding must stop.
    #[error("truncated field: need {need} bytes, have {have}")]
    Truncated { need: usize, have: usize },

    #[error("not a QSH file: signature mismatch")]
    InvalidSignature,

    #[error("unsupported QSH version: {0}")]
    UnsupportedVersion(u8),

    #[error("unknown stream type tag: {0}")]
    UnknownStreamType(u8),

    /// Frame referenced a stream outside the registry. The multiplexing
    /// contract is broken, so later frames cannot be located.
    #[error("stream index {index} out of range: file declares {streams} streams")]
    InvalidStreamIndex { index: usize, streams: usize },

    #[error("malformed string: invalid utf-8")]
    MalformedString,

    /// A closed-set field (quote action, deal side, own-order type) carried
    /// a value outside its enumeration.
    #[error("invalid {what} value: {value}")]
    InvalidEnumValue { what: &'static str, value: u8 },

    #[error("varint overflow: continuation chain exceeds 10 bytes")]
    Overflow,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DecodeResult<T> = Result<T, DecodeError>;
