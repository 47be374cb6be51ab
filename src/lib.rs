//! Streaming FASTQ record parser with per-base quality ranks.
//!
//! - Every four non-blank lines form one record; blank lines are ignored anywhere.
//! - Each base is paired with its quality character, ranked 0..=93 in the
//!   `!`..`~` alphabet (or in a caller-supplied table).
//! - Records whose sequence and quality lengths differ are rejected as
//!   [`StructuralMismatch`]; readers skip them (default) or return them.
//! - Plain and `.gz` files (auto-detect), several files in a row, or any byte
//!   stream; text decoded with `encoding_rs`, BOM removed.
//! - Optional `mmap` for plain files; `zlib` feature for the system zlib backend.
//! - Optional async API behind `async` feature.

pub mod alphabet;
mod decode;
pub mod error;
pub mod parser;
pub mod policy;
pub mod reader;
pub mod record;
mod util;

#[cfg(feature = "async")]
pub mod async_reader;

pub use crate::alphabet::{MAX_QUALITY_RANK, QualityAlphabet, STANDARD_QUALITIES};
pub use crate::error::{FastqError, IoContext, StructuralMismatch};
pub use crate::parser::{ParserState, RecordParser, Records, records};
pub use crate::policy::{ErrorPolicy, ReaderOptions};
pub use crate::reader::{FastqReader, Source};
pub use crate::record::{CodeQuality, FastqRecord};

#[cfg(feature = "async")]
pub use crate::async_reader::AsyncFastqReader;
