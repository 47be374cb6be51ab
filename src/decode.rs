//! Byte stream -> text lines, with encoding detection and BOM removal.

use encoding_rs::{CoderResult, Decoder, Encoding};
use std::collections::VecDeque;
use std::io::{self, Read};

pub(crate) const CHUNK_SIZE: usize = 64 * 1024;

/// Incremental decoder that splits decoded text into lines on `\n`, `\r\n` or `\r`.
///
/// BOM sniffing is always on: a UTF-8 or UTF-16 BOM replaces the configured encoding and
/// is removed from the output.
pub(crate) struct LineDecoder {
    decoder: Decoder,
    pending: String,
    lines: VecDeque<String>,
    finished: bool,
}

impl LineDecoder {
    pub(crate) fn new(encoding: &'static Encoding) -> Self {
        Self {
            decoder: encoding.new_decoder(),
            pending: String::with_capacity(256),
            lines: VecDeque::new(),
            finished: false,
        }
    }

    pub(crate) fn feed(&mut self, bytes: &[u8]) {
        self.decode(bytes, false);
    }

    /// Flush the decoder; a last line without terminator is still produced.
    pub(crate) fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.decode(&[], true);
        if !self.pending.is_empty() {
            let last = std::mem::take(&mut self.pending);
            self.lines.push_back(last);
        }
        self.finished = true;
    }

    #[inline]
    pub(crate) fn next_line(&mut self) -> Option<String> {
        self.lines.pop_front()
    }

    #[inline]
    pub(crate) fn is_finished(&self) -> bool {
        self.finished
    }

    fn decode(&mut self, mut src: &[u8], last: bool) {
        loop {
            let needed = self
                .decoder
                .max_utf8_buffer_length(src.len())
                .unwrap_or(src.len().saturating_mul(3));
            self.pending.reserve(needed);
            let (result, read, _) = self.decoder.decode_to_string(src, &mut self.pending, last);
            src = &src[read..];
            match result {
                CoderResult::InputEmpty => break,
                CoderResult::OutputFull => continue,
            }
        }
        self.split_lines(last);
    }

    /// Ends a line at `\r\n`, `\n` or a lone `\r`. A `\r` at the end of the decoded text
    /// is held back until the next chunk (or end of input) shows whether `\n` follows.
    fn split_lines(&mut self, last: bool) {
        let bytes = self.pending.as_bytes();
        let mut consumed = 0;
        while let Some(off) = bytes[consumed..]
            .iter()
            .position(|&b| b == b'\n' || b == b'\r')
        {
            let end = consumed + off;
            let next = if bytes[end] == b'\r' {
                match bytes.get(end + 1) {
                    Some(b'\n') => end + 2,
                    Some(_) => end + 1,
                    None if last => end + 1,
                    None => break,
                }
            } else {
                end + 1
            };
            self.lines.push_back(self.pending[consumed..end].to_owned());
            consumed = next;
        }
        self.pending.drain(..consumed);
    }
}

/// Blocking line source over any byte reader.
pub(crate) struct DecodedLines<R> {
    inner: R,
    decoder: LineDecoder,
    buf: Box<[u8]>,
}

impl<R: Read> DecodedLines<R> {
    pub(crate) fn new(inner: R, encoding: &'static Encoding) -> Self {
        Self {
            inner,
            decoder: LineDecoder::new(encoding),
            buf: vec![0u8; CHUNK_SIZE].into_boxed_slice(),
        }
    }
}

impl<R: Read> Iterator for DecodedLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.decoder.next_line() {
                return Some(Ok(line));
            }
            if self.decoder.is_finished() {
                return None;
            }
            match self.inner.read(&mut self.buf) {
                Ok(0) => self.decoder.finish(),
                Ok(n) => self.decoder.feed(&self.buf[..n]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
