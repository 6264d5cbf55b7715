use std::collections::VecDeque;

use crate::codec::SensorFrame;

/// Ordered queue of decoded frames, oldest first.
///
/// Insertion order equals on-wire arrival order. The poll path appends;
/// consumers remove from the front. Accessors hand back owned copies so a
/// caller's result is unaffected by later queue mutation.
#[derive(Debug, Default)]
pub struct FrameQueue {
    frames: VecDeque<SensorFrame>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one decoded frame at the back.
    pub fn push(&mut self, frame: SensorFrame) {
        self.frames.push_back(frame);
    }

    /// Copy of every queued frame, oldest first. Does not consume.
    pub fn snapshot(&self) -> Vec<SensorFrame> {
        self.frames.iter().cloned().collect()
    }

    /// The first `min(n, len)` frames, oldest first.
    ///
    /// Asking for more than is queued returns what is available. With
    /// `remove` set, the returned frames are taken out of the queue in the
    /// same call.
    pub fn take_front(&mut self, n: usize, remove: bool) -> Vec<SensorFrame> {
        let n = n.min(self.frames.len());
        if remove {
            self.frames.drain(..n).collect()
        } else {
            self.frames.iter().take(n).cloned().collect()
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
