use std::io;
use thiserror::Error;

use crate::reader::Source;

/// Where in the input an error was detected.
#[derive(Debug, Clone)]
pub struct IoContext {
    /// 1-based line number within the current source; 0 before the first line.
    pub line_num: u64,
    pub source: Source,
}

/// Sequence and quality lines of a completed record differ in length.
/// The record is never built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("sequence length ({}) does not match quality length ({}): {code}<>{quality}", .code.chars().count(), .quality.chars().count())]
pub struct StructuralMismatch {
    pub code: String,
    pub quality: String,
}

#[derive(Debug, Error)]
pub enum FastqError {
    #[error("I/O error at {ctx:?}: {source}")]
    Io {
        #[source]
        source: io::Error,
        ctx: IoContext,
    },
    #[error("malformed record at {ctx:?}: {source}")]
    Mismatch {
        #[source]
        source: StructuralMismatch,
        ctx: IoContext,
    },
}

impl FastqError {
    pub(crate) fn io_err(source: io::Error, ctx: IoContext) -> Self {
        Self::Io { source, ctx }
    }
    pub(crate) fn mismatch(source: StructuralMismatch, ctx: IoContext) -> Self {
        Self::Mismatch { source, ctx }
    }

    pub fn context(&self) -> &IoContext {
        match self {
            Self::Io { ctx, .. } | Self::Mismatch { ctx, .. } => ctx,
        }
    }
}
