//! The record state machine: groups every four non-blank lines into one [`FastqRecord`].
//!
//! [`ParserState::step`] is the pure transition function. [`RecordParser`] holds a
//! state for in-place driving, and [`Records`] adapts any iterator of lines.

use crate::error::StructuralMismatch;
use crate::record::FastqRecord;

/// Leading character of the primary identifier line.
pub const RECORD_SEPARATOR: char = '@';

/// Output of one transition: a record, a mismatch, or nothing yet.
pub type Emitted = Option<Result<FastqRecord, StructuralMismatch>>;

/// Empty or whitespace-only. Non-breaking spaces (U+00A0, U+2007, U+202F) count as
/// content, not whitespace.
pub fn is_blank(line: &str) -> bool {
    line.chars()
        .all(|c| c.is_whitespace() && !matches!(c, '\u{a0}' | '\u{2007}' | '\u{202f}'))
}

/// Accumulated slots of the record being read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ParserState {
    #[default]
    AwaitingId,
    AwaitingSequence {
        id: String,
    },
    AwaitingId2 {
        id: String,
        code: String,
    },
    /// `id2` is the `+` line; it is kept only to mark the slot as consumed.
    AwaitingQuality {
        id: String,
        code: String,
        id2: String,
    },
}

impl ParserState {
    /// Feed one line. Blank lines leave the state untouched. Capturing the quality line
    /// completes the record and always returns to [`ParserState::AwaitingId`], whether the
    /// record was built or rejected.
    pub fn step(self, line: &str) -> (ParserState, Emitted) {
        if is_blank(line) {
            return (self, None);
        }
        match self {
            ParserState::AwaitingId => {
                let id = line.strip_prefix(RECORD_SEPARATOR).unwrap_or(line);
                (ParserState::AwaitingSequence { id: id.to_owned() }, None)
            }
            ParserState::AwaitingSequence { id } => (
                ParserState::AwaitingId2 {
                    id,
                    code: line.to_owned(),
                },
                None,
            ),
            ParserState::AwaitingId2 { id, code } => (
                ParserState::AwaitingQuality {
                    id,
                    code,
                    id2: line.to_owned(),
                },
                None,
            ),
            ParserState::AwaitingQuality { id, code, .. } => (
                ParserState::AwaitingId,
                Some(FastqRecord::from_raw(id, code, line.to_owned())),
            ),
        }
    }

    /// True when no slot of the current record has been filled.
    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, ParserState::AwaitingId)
    }

    /// Identifier of the record being accumulated, if captured.
    pub fn pending_id(&self) -> Option<&str> {
        match self {
            ParserState::AwaitingId => None,
            ParserState::AwaitingSequence { id }
            | ParserState::AwaitingId2 { id, .. }
            | ParserState::AwaitingQuality { id, .. } => Some(id),
        }
    }
}

/// Mutable holder for a [`ParserState`]. Not meant to be shared between consumers.
#[derive(Debug, Clone, Default)]
pub struct RecordParser {
    state: ParserState,
}

impl RecordParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one line; returns the completed record (or its mismatch) when this line
    /// was the fourth non-blank line of a record.
    pub fn push(&mut self, line: &str) -> Emitted {
        let (next, out) = std::mem::take(&mut self.state).step(line);
        self.state = next;
        if let Some(Ok(rec)) = &out {
            log::trace!("parsed record '{}' ({} bp)", rec.id(), rec.len());
        }
        out
    }

    #[inline]
    pub fn state(&self) -> &ParserState {
        &self.state
    }

    /// End of input. Returns the partial record that is being dropped, if any.
    pub fn finish(&mut self) -> Option<ParserState> {
        let state = std::mem::take(&mut self.state);
        (!state.is_idle()).then_some(state)
    }
}

/// Logs a partial record dropped at end of input.
pub(crate) fn warn_dropped(partial: &ParserState) {
    log::warn!(
        "dropping incomplete record '{}' at end of input",
        partial.pending_id().unwrap_or_default()
    );
}

/// Lazy records over a sequence of text lines.
#[derive(Debug)]
pub struct Records<I> {
    lines: I,
    parser: RecordParser,
}

/// Parse already-decoded lines.
///
/// ```
/// let lines = ["@r1", "ACGT", "+", "IIII"];
/// let recs: Vec<_> = fastq_quality_reader::records(lines).collect();
/// assert_eq!(recs.len(), 1);
/// ```
pub fn records<I>(lines: I) -> Records<I::IntoIter>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    Records {
        lines: lines.into_iter(),
        parser: RecordParser::new(),
    }
}

impl<I> Records<I> {
    /// Gives back the line source; any partially read record is discarded.
    pub fn into_inner(self) -> I {
        self.lines
    }
}

impl<I> Iterator for Records<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = Result<FastqRecord, StructuralMismatch>;

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            if let Some(out) = self.parser.push(line.as_ref()) {
                return Some(out);
            }
        }
        if let Some(partial) = self.parser.finish() {
            warn_dropped(&partial);
        }
        None
    }
}
