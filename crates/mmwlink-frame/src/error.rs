/// Errors that can occur while decoding a raw frame.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The frame slice is shorter than the fixed header.
    #[error("frame truncated ({len} bytes, header needs {needed})")]
    TruncatedHeader { len: usize, needed: usize },

    /// The frame slice does not begin with the magic word.
    #[error("frame does not start with the magic word")]
    BadMagic,

    /// The header's declared packet length does not fit the frame slice.
    #[error("declared packet length {declared} outside frame of {actual} bytes")]
    LengthMismatch { declared: usize, actual: usize },

    /// The TLV area ends in the middle of a record.
    #[error("TLV area truncated ({remaining} bytes left, record needs {needed})")]
    TruncatedTlv { needed: usize, remaining: usize },

    /// A TLV payload length is not a whole number of records.
    #[error("TLV kind {kind} length {len} is not a multiple of {record} bytes")]
    TlvLength { kind: u32, len: usize, record: usize },
}

pub type Result<T> = std::result::Result<T, FrameError>;
