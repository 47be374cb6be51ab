#![cfg(feature = "async")]

use crate::decode::{CHUNK_SIZE, LineDecoder};
use crate::error::{FastqError, IoContext};
use crate::parser::{RecordParser, warn_dropped};
use crate::policy::{ErrorPolicy, ReaderOptions};
use crate::reader::Source;
use crate::record::FastqRecord;

use async_compression::tokio::bufread::GzipDecoder;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{self, AsyncRead, AsyncReadExt, AsyncSeekExt, BufReader, SeekFrom};

/// Async FASTQ reader (plain/.gz), streaming. Drives the same [`RecordParser`] as
/// [`crate::FastqReader`].
pub struct AsyncFastqReader {
    src: Source,
    rdr: Box<dyn AsyncRead + Unpin + Send>,
    decoder: LineDecoder,
    buf: Box<[u8]>,
    parser: RecordParser,
    opts: ReaderOptions,
    line_num: u64,
    failed: bool,
}

impl AsyncFastqReader {
    /// Open async from path; `.gz` auto-detect by extension or magic bytes.
    pub async fn from_path<P: AsRef<Path>>(
        path: P,
        opts: ReaderOptions,
    ) -> Result<Self, FastqError> {
        let path = path.as_ref().to_path_buf();
        let src = Source::Path(path.clone());
        let mut f = File::open(&path).await.map_err(|e| {
            FastqError::io_err(
                e,
                IoContext {
                    line_num: 0,
                    source: src.clone(),
                },
            )
        })?;

        let is_gz = crate::util::has_gz_extension(&path)
            || looks_like_gzip_async(&mut f).await.unwrap_or(false);
        log::debug!("opening {} (gzip: {is_gz})", path.display());

        let rdr: Box<dyn AsyncRead + Unpin + Send> = if is_gz {
            let mut gz = GzipDecoder::new(BufReader::with_capacity(CHUNK_SIZE, f));
            gz.multiple_members(true);
            Box::new(gz)
        } else {
            Box::new(f)
        };

        Ok(Self::with_stream(src, rdr, opts))
    }

    /// Wrap any `AsyncRead`.
    pub fn from_async_read<R>(reader: R, opts: ReaderOptions) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        Self::with_stream(Source::Reader, Box::new(reader), opts)
    }

    fn with_stream(src: Source, rdr: Box<dyn AsyncRead + Unpin + Send>, opts: ReaderOptions) -> Self {
        Self {
            src,
            rdr,
            decoder: LineDecoder::new(opts.encoding),
            buf: vec![0u8; CHUNK_SIZE].into_boxed_slice(),
            parser: RecordParser::new(),
            opts,
            line_num: 0,
            failed: false,
        }
    }

    pub fn source(&self) -> &Source {
        &self.src
    }

    /// Fetch next record (async).
    pub async fn next_record(&mut self) -> Option<Result<FastqRecord, FastqError>> {
        loop {
            let line = match self.next_line().await? {
                Ok(line) => line,
                Err(e) => return Some(Err(FastqError::io_err(e, self.ctx()))),
            };
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
    }

    async fn next_line(&mut self) -> Option<io::Result<String>> {
        loop {
            if let Some(line) = self.decoder.next_line() {
                return Some(Ok(line));
            }
            if self.failed {
                return None;
            }
            if self.decoder.is_finished() {
                if let Some(partial) = self.parser.finish() {
                    warn_dropped(&partial);
                }
                return None;
            }
            match self.rdr.read(&mut self.buf).await {
                Ok(0) => self.decoder.finish(),
                Ok(n) => self.decoder.feed(&self.buf[..n]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
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

async fn looks_like_gzip_async(f: &mut File) -> io::Result<bool> {
    let pos = f.stream_position().await?;
    let mut magic = [0u8; 2];
    let n = f.read(&mut magic).await?;
    f.seek(SeekFrom::Start(pos)).await?;
    Ok(n >= 2 && magic == [0x1F, 0x8B])
}
