//! Reframes a chunked byte stream into separator-terminated records.

use crate::error::RecordError;

/// Default record separator of the render protocol.
pub const RECORD_SEPARATOR: u8 = b'\n';

/// Splits raw body chunks into complete records.
///
/// Bytes after the last separator are carried over to the next chunk, so the
/// yielded records are the same no matter where chunk boundaries fall.
/// Records are decoded as UTF-8 only once complete, which keeps multi-byte
/// characters split across chunks intact.
///
/// One decoder serves one session; create a fresh one (or call
/// [`ChunkDecoder::reset`]) per render.
#[derive(Debug)]
pub struct ChunkDecoder {
    separator: u8,
    buffer: Vec<u8>,
    /// Start of the pending record in `buffer`
    head: usize,
    /// `buffer[head..scanned]` is known to contain no separator
    scanned: usize,
}

impl Default for ChunkDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkDecoder {
    /// Create a decoder splitting on `\n`.
    pub fn new() -> Self {
        Self::with_separator(RECORD_SEPARATOR)
    }

    /// Create a decoder splitting on a custom single-byte separator.
    pub fn with_separator(separator: u8) -> Self {
        Self {
            separator,
            buffer: Vec::new(),
            head: 0,
            scanned: 0,
        }
    }

    /// Append a chunk and iterate over every record it completes.
    ///
    /// The iterator is lazy; records it does not yield stay buffered and are
    /// returned by the next call.
    pub fn feed(&mut self, chunk: &[u8]) -> Records<'_> {
        self.buffer.extend_from_slice(chunk);
        Records { decoder: self }
    }

    /// Number of buffered bytes not yet part of a complete record.
    pub fn pending_len(&self) -> usize {
        self.buffer.len() - self.head
    }

    /// End of stream: discard the unterminated tail and return its length.
    ///
    /// The producer always terminates its last record, so a non-empty tail
    /// means the stream was cut short. The partial record is dropped rather
    /// than guessed at.
    pub fn finish(&mut self) -> usize {
        let discarded = self.pending_len();
        self.reset();
        discarded
    }

    /// Drop all buffered state.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.head = 0;
        self.scanned = 0;
    }

    fn take_record(&mut self) -> Option<Result<String, RecordError>> {
        let found = self.buffer[self.scanned..]
            .iter()
            .position(|b| *b == self.separator);

        match found {
            Some(offset) => {
                let end = self.scanned + offset;
                let raw = self.buffer[self.head..end].to_vec();
                self.head = end + 1;
                self.scanned = self.head;
                Some(String::from_utf8(raw).map_err(|e| RecordError::NotUtf8(e.to_string())))
            }
            None => {
                self.scanned = self.buffer.len();
                self.compact();
                None
            }
        }
    }

    fn compact(&mut self) {
        if self.head > 0 {
            self.buffer.drain(..self.head);
            self.scanned -= self.head;
            self.head = 0;
        }
    }
}

/// Records completed by one [`ChunkDecoder::feed`] call.
#[derive(Debug)]
pub struct Records<'a> {
    decoder: &'a mut ChunkDecoder,
}

impl Iterator for Records<'_> {
    type Item = Result<String, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.decoder.take_record()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(decoder: &mut ChunkDecoder, chunk: &[u8]) -> Vec<String> {
        decoder.feed(chunk).map(|r| r.unwrap()).collect()
    }

    #[test]
    fn test_single_chunk_multiple_records() {
        let mut decoder = ChunkDecoder::new();
        let records = collect(&mut decoder, b"{\"log\":\"a\"}\n{\"log\":\"b\"}\n");
        assert_eq!(records, vec![r#"{"log":"a"}"#, r#"{"log":"b"}"#]);
        assert_eq!(decoder.pending_len(), 0);
    }

    #[test]
    fn test_record_split_across_chunks() {
        let mut decoder = ChunkDecoder::new();
        assert!(collect(&mut decoder, b"{\"log\":").is_empty());
        assert_eq!(decoder.pending_len(), 7);
        assert!(collect(&mut decoder, b"\"hel").is_empty());
        let records = collect(&mut decoder, b"lo\"}\n{\"lo");
        assert_eq!(records, vec![r#"{"log":"hello"}"#]);
        assert_eq!(decoder.pending_len(), 4);
    }

    #[test]
    fn test_separator_is_whole_chunk() {
        let mut decoder = ChunkDecoder::new();
        assert!(collect(&mut decoder, b"abc").is_empty());
        assert_eq!(collect(&mut decoder, b"\n"), vec!["abc"]);
    }

    #[test]
    fn test_empty_segments_become_empty_records() {
        let mut decoder = ChunkDecoder::new();
        assert_eq!(collect(&mut decoder, b"\n\nx\n"), vec!["", "", "x"]);
    }

    #[test]
    fn test_multibyte_char_split_across_chunks() {
        let text = "{\"log\":\"größe\"}\n".as_bytes();
        // split inside the two-byte 'ö'
        let split = text.iter().position(|b| *b == 0xC3).unwrap() + 1;
        let mut decoder = ChunkDecoder::new();
        assert!(collect(&mut decoder, &text[..split]).is_empty());
        assert_eq!(
            collect(&mut decoder, &text[split..]),
            vec!["{\"log\":\"größe\"}"]
        );
    }

    #[test]
    fn test_invalid_utf8_record_is_error_and_stream_continues() {
        let mut decoder = ChunkDecoder::new();
        let results: Vec<_> = decoder.feed(b"\xff\xfe\nok\n").collect();
        assert!(matches!(results[0], Err(RecordError::NotUtf8(_))));
        assert_eq!(results[1], Ok("ok".to_string()));
    }

    #[test]
    fn test_finish_discards_unterminated_tail() {
        let mut decoder = ChunkDecoder::new();
        assert_eq!(collect(&mut decoder, b"done\npartial"), vec!["done"]);
        assert_eq!(decoder.finish(), 7);
        assert_eq!(decoder.pending_len(), 0);
        assert_eq!(decoder.finish(), 0);
    }

    #[test]
    fn test_unconsumed_records_survive_until_next_feed() {
        let mut decoder = ChunkDecoder::new();
        let first = decoder.feed(b"a\nb\n").next().unwrap().unwrap();
        assert_eq!(first, "a");
        assert_eq!(collect(&mut decoder, b"c\n"), vec!["b", "c"]);
    }

    #[test]
    fn test_custom_separator() {
        let mut decoder = ChunkDecoder::with_separator(b'\x1e');
        assert_eq!(collect(&mut decoder, b"one\x1etwo\x1e"), vec!["one", "two"]);
    }

    #[test]
    fn test_reset_drops_partial_record() {
        let mut decoder = ChunkDecoder::new();
        assert!(collect(&mut decoder, b"stale").is_empty());
        decoder.reset();
        assert_eq!(collect(&mut decoder, b"fresh\n"), vec!["fresh"]);
    }
}
