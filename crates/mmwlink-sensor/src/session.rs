use mmwlink_frame::{decode_frame, FrameQueue, FrameSynchronizer, SensorFrame};
use mmwlink_serial::ByteSource;
use tracing::warn;

use crate::error::Result;

/// Per-poll cap on how many bytes are pulled from the source. Granularity
/// control for the read side only; the accumulation buffer is unbounded.
pub const READ_CHUNK_SIZE: usize = 1024;

/// A live connection to one sensor's data stream.
///
/// Owns the byte source, the frame synchronizer, and the decoded-frame
/// queue. [`poll`](Self::poll) moves bytes through the pipeline; the host
/// consumes results with [`drain`](Self::drain) and [`peek`](Self::peek).
/// All methods take `&mut self`, so a multi-threaded host wraps the session
/// in one exclusive lock.
#[derive(Debug)]
pub struct SensorSession<S> {
    source: S,
    synchronizer: FrameSynchronizer,
    queue: FrameQueue,
    decode_failures: u64,
}

impl<S: ByteSource> SensorSession<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            synchronizer: FrameSynchronizer::new(),
            queue: FrameQueue::new(),
            decode_failures: 0,
        }
    }

    /// Pull freshly available bytes through the synchronizer and decode
    /// whatever frames completed.
    ///
    /// Returns the number of raw frames extracted this call, whether or not
    /// each one decoded. A frame that fails to decode is dropped and counted;
    /// the rest of the batch and the stream position are unaffected, since
    /// synchronization depends only on magic-word positions. A transport
    /// failure is surfaced as-is.
    pub fn poll(&mut self) -> Result<usize> {
        let available = self.source.available()?;
        if available == 0 {
            return Ok(0);
        }

        let chunk = self.source.read_up_to(READ_CHUNK_SIZE)?;
        let raw_frames = self.synchronizer.ingest(&chunk);
        let emitted = raw_frames.len();

        for raw in &raw_frames {
            match decode_frame(raw) {
                Ok(frame) => self.queue.push(frame),
                Err(err) => {
                    self.decode_failures += 1;
                    warn!(error = %err, len = raw.len(), "dropping undecodable frame");
                }
            }
        }

        Ok(emitted)
    }

    /// Remove and return up to `n` decoded frames from the front of the
    /// queue, oldest first.
    pub fn drain(&mut self, n: usize) -> Vec<SensorFrame> {
        self.queue.take_front(n, true)
    }

    /// Copy of every decoded frame still queued, oldest first.
    pub fn peek(&self) -> Vec<SensorFrame> {
        self.queue.snapshot()
    }

    /// Decoded frames currently queued.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Bytes received but not yet part of a complete frame.
    pub fn pending_bytes(&self) -> usize {
        self.synchronizer.pending_len()
    }

    /// Frames dropped because they failed to decode.
    pub fn decode_failures(&self) -> u64 {
        self.decode_failures
    }

    /// Borrow the underlying byte source.
    pub fn get_ref(&self) -> &S {
        &self.source
    }

    /// Mutably borrow the underlying byte source.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Consume the session and return the byte source.
    pub fn into_inner(self) -> S {
        self.source
    }
}
