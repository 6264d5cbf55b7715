use crate::error::Result;

/// A non-blocking supplier of raw stream bytes.
///
/// `available` reports how many bytes can be read right now; `read_up_to`
/// returns between zero and `max` of them without blocking. All waiting and
/// timeout policy lives behind this trait — callers above it never block.
pub trait ByteSource {
    /// Number of bytes ready to be read without blocking.
    fn available(&mut self) -> Result<usize>;

    /// Read at most `max` bytes. Returns fewer (possibly zero) if less is
    /// ready.
    fn read_up_to(&mut self, max: usize) -> Result<Vec<u8>>;
}

/// A [`ByteSource`] over an in-memory capture.
///
/// Backs offline replay of recorded sensor output and the session tests.
/// `chunk_size` caps how many bytes each call hands out, emulating the
/// trickle of a live serial line.
#[derive(Debug)]
pub struct ReplaySource {
    data: Vec<u8>,
    pos: usize,
    chunk_size: usize,
}

impl ReplaySource {
    /// Replay `data`, delivering as much as the caller asks for per call.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self::with_chunk_size(data, usize::MAX)
    }

    /// Replay `data` at most `chunk_size` bytes per call.
    pub fn with_chunk_size(data: impl Into<Vec<u8>>, chunk_size: usize) -> Self {
        Self {
            data: data.into(),
            pos: 0,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Bytes not yet handed out.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}

impl ByteSource for ReplaySource {
    fn available(&mut self) -> Result<usize> {
        Ok(self.remaining().min(self.chunk_size))
    }

    fn read_up_to(&mut self, max: usize) -> Result<Vec<u8>> {
        let n = self.remaining().min(self.chunk_size).min(max);
        let chunk = self.data[self.pos..self.pos + n].to_vec();
        self.pos += n;
        Ok(chunk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replay_hands_out_everything_by_default() {
        let mut source = ReplaySource::new(vec![1, 2, 3, 4]);
        assert_eq!(source.available().unwrap(), 4);
        assert_eq!(source.read_up_to(100).unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(source.available().unwrap(), 0);
        assert!(source.read_up_to(100).unwrap().is_empty());
    }

    #[test]
    fn replay_respects_chunk_size_and_caller_cap() {
        let mut source = ReplaySource::with_chunk_size(vec![1, 2, 3, 4, 5], 2);
        assert_eq!(source.available().unwrap(), 2);
        assert_eq!(source.read_up_to(100).unwrap(), vec![1, 2]);
        assert_eq!(source.read_up_to(1).unwrap(), vec![3]);
        assert_eq!(source.read_up_to(100).unwrap(), vec![4, 5]);
        assert_eq!(source.remaining(), 0);
    }
}
