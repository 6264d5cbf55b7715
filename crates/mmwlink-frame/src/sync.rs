use bytes::{Buf, Bytes, BytesMut};
use tracing::trace;

use crate::codec::MAGIC_WORD;

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;

/// Recovers frame boundaries from an unaligned serial byte stream.
///
/// Bytes arrive in arbitrary chunks — mid-frame, mid-magic-word, many frames
/// at once. The synchronizer accumulates them and slices out complete frames
/// between consecutive magic words. A frame is only complete once the *next*
/// magic word has arrived, so the last detected frame always stays pending.
///
/// After every [`ingest`](Self::ingest) the buffer is either empty or starts
/// at a frame boundary whose frame has not yet completed. Leading garbage is
/// held until a second magic word proves the first one real; under a
/// persistently noisy line this grows the buffer without bound (callers can
/// watch [`pending_len`](Self::pending_len)).
#[derive(Debug, Default)]
pub struct FrameSynchronizer {
    buf: BytesMut,
}

impl FrameSynchronizer {
    pub fn new() -> Self {
        Self {
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
        }
    }

    /// Absorb one chunk of freshly read bytes and extract every frame that is
    /// now complete, in on-wire order.
    ///
    /// Each returned frame is an owned copy starting with the magic word; the
    /// internal buffer is trimmed past all of them. An empty chunk is valid
    /// and acts as a pure re-scan.
    pub fn ingest(&mut self, chunk: &[u8]) -> Vec<Bytes> {
        self.buf.extend_from_slice(chunk);

        let starts = find_magic_words(&self.buf);
        if starts.len() < 2 {
            // No complete frame yet. Any garbage before a lone magic word is
            // kept: only a second occurrence confirms the first is a real
            // frame start and not payload noise.
            return Vec::new();
        }

        if starts[0] != 0 {
            trace!(dropped = starts[0], "discarding bytes before first magic word");
            self.buf.advance(starts[0]);
        }
        let base = starts[0];

        let mut frames = Vec::with_capacity(starts.len() - 1);
        for pair in starts.windows(2) {
            frames.push(Bytes::copy_from_slice(
                &self.buf[pair[0] - base..pair[1] - base],
            ));
        }

        // Leave the buffer at the start of the last (still incomplete) frame.
        self.buf.advance(starts[starts.len() - 1] - base);

        trace!(
            emitted = frames.len(),
            pending = self.buf.len(),
            "extracted complete frames"
        );
        frames
    }

    /// Bytes received but not yet sliced into a complete frame.
    pub fn pending(&self) -> &[u8] {
        &self.buf
    }

    pub fn pending_len(&self) -> usize {
        self.buf.len()
    }
}

/// Ascending start offsets of every magic-word occurrence in `haystack`.
///
/// The scan resumes one byte past each match's start. The magic word cannot
/// overlap itself, so this is equivalent to skipping the whole match.
fn find_magic_words(haystack: &[u8]) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut from = 0;
    while from + MAGIC_WORD.len() <= haystack.len() {
        match haystack[from..]
            .windows(MAGIC_WORD.len())
            .position(|window| window == MAGIC_WORD)
        {
            Some(offset) => {
                starts.push(from + offset);
                from += offset + 1;
            }
            None => break,
        }
    }
    starts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(parts: &[&[u8]]) -> Vec<u8> {
        let mut bytes = Vec::new();
        for part in parts {
            bytes.extend_from_slice(part);
        }
        bytes
    }

    #[test]
    fn single_frame_between_two_magic_words() {
        let mut sync = FrameSynchronizer::new();
        let payload = [0xAA; 4];
        let wire = stream(&[&MAGIC_WORD, &payload, &MAGIC_WORD]);

        let frames = sync.ingest(&wire);

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].len(), 12);
        assert_eq!(&frames[0][..8], MAGIC_WORD);
        assert_eq!(&frames[0][8..], payload);
        assert_eq!(sync.pending(), MAGIC_WORD);
    }

    #[test]
    fn no_frame_until_second_magic_word() {
        let mut sync = FrameSynchronizer::new();

        assert!(sync.ingest(&MAGIC_WORD).is_empty());
        assert!(sync.ingest(&[0x11, 0x22, 0x33]).is_empty());
        assert_eq!(sync.pending_len(), 11);

        let frames = sync.ingest(&MAGIC_WORD);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].len(), 11);
    }

    #[test]
    fn garbage_prefix_dropped_once_frame_confirmed() {
        let mut sync = FrameSynchronizer::new();
        let garbage = [0xDE, 0xAD, 0xBE, 0xEF];
        let frame1_payload = [0x01; 6];
        let frame2_prefix = [0x02, 0x03];
        let wire = stream(&[
            &garbage,
            &MAGIC_WORD,
            &frame1_payload,
            &MAGIC_WORD,
            &frame2_prefix,
        ]);

        let frames = sync.ingest(&wire);

        assert_eq!(frames.len(), 1);
        assert_eq!(&frames[0][8..], frame1_payload);
        // Buffer holds the pending second frame, garbage is gone.
        assert_eq!(sync.pending(), stream(&[&MAGIC_WORD, &frame2_prefix]));
    }

    #[test]
    fn garbage_retained_while_only_one_magic_word_seen() {
        let mut sync = FrameSynchronizer::new();
        let wire = stream(&[&[0xFF, 0xFF], &MAGIC_WORD]);

        assert!(sync.ingest(&wire).is_empty());
        assert_eq!(sync.pending(), wire);
    }

    #[test]
    fn magic_word_split_across_chunks() {
        let mut sync = FrameSynchronizer::new();
        let payload = [0x55; 12];

        assert!(sync.ingest(&MAGIC_WORD[..4]).is_empty());
        assert!(sync.ingest(&MAGIC_WORD[4..]).is_empty());
        assert!(sync.ingest(&payload).is_empty());
        let frames = sync.ingest(&MAGIC_WORD);

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].len(), 20);
        assert_eq!(&frames[0][8..], payload);
    }

    #[test]
    fn byte_at_a_time_delivery_loses_nothing() {
        let frame_a = stream(&[&MAGIC_WORD, &[0xA0; 5]]);
        let frame_b = stream(&[&MAGIC_WORD, &[0xB0; 9]]);
        let frame_c = stream(&[&MAGIC_WORD, &[0xC0; 3]]);
        let wire = stream(&[&frame_a, &frame_b, &frame_c]);

        let mut sync = FrameSynchronizer::new();
        let mut emitted = Vec::new();
        for byte in &wire {
            emitted.extend(sync.ingest(std::slice::from_ref(byte)));
        }

        assert_eq!(emitted.len(), 2);
        assert_eq!(emitted[0].as_ref(), frame_a.as_slice());
        assert_eq!(emitted[1].as_ref(), frame_b.as_slice());
        // frame_c stays pending until a fourth magic word would arrive.
        assert_eq!(sync.pending(), frame_c.as_slice());
    }

    #[test]
    fn many_frames_in_one_chunk() {
        let mut wire = Vec::new();
        for i in 0..5u8 {
            wire.extend_from_slice(&MAGIC_WORD);
            wire.extend_from_slice(&[i; 7]);
        }

        let mut sync = FrameSynchronizer::new();
        let frames = sync.ingest(&wire);

        assert_eq!(frames.len(), 4);
        for (i, frame) in frames.iter().enumerate() {
            assert_eq!(&frame[8..], [i as u8; 7]);
        }
    }

    #[test]
    fn back_to_back_magic_words_emit_bare_frame() {
        let mut sync = FrameSynchronizer::new();
        let wire = stream(&[&MAGIC_WORD, &MAGIC_WORD]);

        let frames = sync.ingest(&wire);

        // An 8-byte frame is emitted as-is; rejecting it is the decoder's job.
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].as_ref(), MAGIC_WORD);
    }

    #[test]
    fn empty_ingest_is_a_no_op() {
        let mut sync = FrameSynchronizer::new();
        assert!(sync.ingest(&[]).is_empty());
        assert_eq!(sync.pending_len(), 0);

        sync.ingest(&MAGIC_WORD);
        let before = sync.pending().to_vec();
        assert!(sync.ingest(&[]).is_empty());
        assert_eq!(sync.pending(), before);
    }

    #[test]
    fn chunked_and_whole_delivery_agree() {
        let mut wire = Vec::new();
        for i in 0..4u8 {
            wire.extend_from_slice(&MAGIC_WORD);
            wire.extend_from_slice(&[i; 13]);
        }

        let mut whole = FrameSynchronizer::new();
        let from_whole = whole.ingest(&wire);

        let mut chunked = FrameSynchronizer::new();
        let mut from_chunks = Vec::new();
        for chunk in wire.chunks(5) {
            from_chunks.extend(chunked.ingest(chunk));
        }

        assert_eq!(from_whole, from_chunks);
        assert_eq!(whole.pending(), chunked.pending());
    }
}
