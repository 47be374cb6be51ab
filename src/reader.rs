use crate::decode::DecodedLines;
use crate::error::{FastqError, IoContext};
use crate::parser::{RecordParser, warn_dropped};
use crate::policy::{ErrorPolicy, ReaderOptions};
use crate::record::FastqRecord;
use crate::util::open_file;

use std::collections::VecDeque;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    Reader,
}

/// Sync FASTQ reader (plain/.gz, one or more files, or any byte stream), streaming.
///
/// Dropping the reader releases the underlying file or stream, also when iteration
/// stops early.
pub struct FastqReader {
    src: Source,
    lines: Option<DecodedLines<Box<dyn Read + Send>>>,
    // Files not opened yet, in read order.
    queued: VecDeque<PathBuf>,
    parser: RecordParser,
    opts: ReaderOptions,
    line_num: u64,
}

impl FastqReader {
    /// Open from a file path. Auto-detect `.gz` by extension or magic bytes.
    pub fn from_path<P: AsRef<Path>>(path: P, opts: ReaderOptions) -> Result<Self, FastqError> {
        let path = path.as_ref();
        let src = Source::Path(path.to_path_buf());
        let rdr = open_file(path).map_err(|e| {
            FastqError::io_err(
                e,
                IoContext {
                    line_num: 0,
                    source: src.clone(),
                },
            )
        })?;
        Ok(Self::with_stream(src, rdr, opts))
    }

    /// Read several files back to back. Each file is parsed on its own: a record
    /// left incomplete at the end of one file is dropped, not continued in the next.
    /// Files are opened only when reached.
    pub fn from_paths<I, P>(paths: I, opts: ReaderOptions) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            src: Source::Reader,
            lines: None,
            queued: paths.into_iter().map(|p| p.as_ref().to_path_buf()).collect(),
            parser: RecordParser::new(),
            opts,
            line_num: 0,
        }
    }

    /// Wrap an arbitrary byte stream (stdin, sockets, ...). Bytes are decoded with
    /// `opts.encoding`; a leading BOM is honoured and removed.
    pub fn from_read<R: Read + Send + 'static>(reader: R, opts: ReaderOptions) -> Self {
        Self::with_stream(Source::Reader, Box::new(reader), opts)
    }

    fn with_stream(src: Source, rdr: Box<dyn Read + Send>, opts: ReaderOptions) -> Self {
        let lines = DecodedLines::new(rdr, opts.encoding);
        Self {
            src,
            lines: Some(lines),
            queued: VecDeque::new(),
            parser: RecordParser::new(),
            opts,
            line_num: 0,
        }
    }

    /// Source currently being read.
    pub fn source(&self) -> &Source {
        &self.src
    }

    /// Release the underlying source now instead of at drop.
    pub fn close(self) {
        log::debug!("closing reader for {:?}", self.src);
    }

    /// Next record, skipping or returning mismatches per [`ErrorPolicy`].
    /// After an I/O error the reader yields nothing more.
    pub fn next_record(&mut self) -> Option<Result<FastqRecord, FastqError>> {
        loop {
            let Some(lines) = self.lines.as_mut() else {
                match self.open_next()? {
                    Ok(()) => continue,
                    Err(err) => return Some(Err(err)),
                }
            };
            match lines.next() {
                Some(Ok(line)) => {
                    self.line_num += 1;
                    match self.parser.push(&line) {
                        None => {}
                        Some(Ok(rec)) => return Some(Ok(rec)),
                        Some(Err(mismatch)) => {
                            if self.opts.error_policy == ErrorPolicy::Skip {
                                log::warn!(
                                    "skipping malformed record at line {}: {mismatch}",
                                    self.line_num
                                );
                                continue;
                            }
                            return Some(Err(FastqError::mismatch(mismatch, self.ctx())));
                        }
                    }
                }
                Some(Err(e)) => {
                    let err = FastqError::io_err(e, self.ctx());
                    self.lines = None;
                    self.queued.clear();
                    return Some(Err(err));
                }
                None => {
                    if let Some(partial) = self.parser.finish() {
                        warn_dropped(&partial);
                    }
                    self.lines = None;
                }
            }
        }
    }

    fn open_next(&mut self) -> Option<Result<(), FastqError>> {
        let path = self.queued.pop_front()?;
        self.line_num = 0;
        let opened = open_file(&path);
        self.src = Source::Path(path);
        match opened {
            Ok(rdr) => {
                self.lines = Some(DecodedLines::new(rdr, self.opts.encoding));
                Some(Ok(()))
            }
            Err(e) => {
                self.queued.clear();
                Some(Err(FastqError::io_err(e, self.ctx())))
            }
        }
    }

    #[inline]
    fn ctx(&self) -> IoContext {
        IoContext {
            line_num: self.line_num,
            source: self.src.clone(),
        }
    }
}

impl Iterator for FastqReader {
    type Item = Result<FastqRecord, FastqError>;
    fn next(&mut self) -> Option<Self::Item> {
        self.next_record()
    }
}
