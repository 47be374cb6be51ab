use std::fmt;

use crate::alphabet::QualityAlphabet;
use crate::error::StructuralMismatch;

/// One sequence character paired with its quality character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CodeQuality {
    code: char,
    quality: char,
}

impl CodeQuality {
    #[inline]
    pub const fn new(code: char, quality: char) -> Self {
        Self { code, quality }
    }

    #[inline]
    pub const fn code(&self) -> char {
        self.code
    }

    #[inline]
    pub const fn quality(&self) -> char {
        self.quality
    }

    /// Rank of the quality character in the standard table, 0..=93.
    #[inline]
    pub fn quality_rank(&self) -> Option<usize> {
        QualityAlphabet::standard().rank_of(self.quality)
    }

    #[inline]
    pub fn quality_rank_in(&self, alphabet: &QualityAlphabet) -> Option<usize> {
        alphabet.rank_of(self.quality)
    }
}

impl fmt::Display for CodeQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[code={}, quality={}]", self.code, self.quality)
    }
}

/// A single read: identifier plus code/quality pairs in 5'->3' order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastqRecord {
    id: String,
    sequence: Vec<CodeQuality>,
}

impl FastqRecord {
    /// Zips raw sequence and quality lines; they must have the same number of characters.
    pub(crate) fn from_raw(
        id: String,
        code: String,
        quality: String,
    ) -> Result<Self, StructuralMismatch> {
        if code.chars().count() != quality.chars().count() {
            return Err(StructuralMismatch { code, quality });
        }
        let sequence = code
            .chars()
            .zip(quality.chars())
            .map(|(c, q)| CodeQuality::new(c, q))
            .collect();
        Ok(Self { id, sequence })
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn sequence(&self) -> &[CodeQuality] {
        &self.sequence
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// The raw sequence line, rebuilt from the units.
    pub fn code_string(&self) -> String {
        self.sequence.iter().map(CodeQuality::code).collect()
    }

    /// The raw quality line, rebuilt from the units.
    pub fn quality_string(&self) -> String {
        self.sequence.iter().map(CodeQuality::quality).collect()
    }

    pub fn quality_ranks<'a>(
        &'a self,
        alphabet: &'a QualityAlphabet,
    ) -> impl Iterator<Item = Option<usize>> + 'a {
        self.sequence.iter().map(move |cq| cq.quality_rank_in(alphabet))
    }

    pub fn into_parts(self) -> (String, Vec<CodeQuality>) {
        (self.id, self.sequence)
    }
}

impl fmt::Display for FastqRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bp)", self.id, self.sequence.len())
    }
}
