//! Magic-word frame synchronization and payload decoding for mmWave radar
//! serial streams.
//!
//! This is the core value-add layer of mmwlink. The sensor's data UART emits
//! back-to-back frames, each opening with an 8-byte magic word, a fixed
//! 40-byte header, and a TLV extension area. Bytes arrive unaligned; the
//! [`FrameSynchronizer`] recovers frame boundaries, [`decode_frame`] turns
//! one raw frame into a [`SensorFrame`], and the [`FrameQueue`] holds decoded
//! frames until the host consumes them.
//!
//! No partial reads, no buffer management in user code.

pub mod codec;
pub mod error;
pub mod queue;
pub mod sync;

pub use codec::{
    decode_frame, tlv_name, DetectedPoint, FrameHeader, SensorFrame, SideInfo, Tlv, HEADER_SIZE,
    MAGIC_WORD, TLV_DETECTED_POINTS, TLV_POINT_SIDE_INFO,
};
pub use error::{FrameError, Result};
pub use queue::FrameQueue;
pub use sync::FrameSynchronizer;
