//! Quality alphabets: ordered character tables where a character's position is its rank.

use std::borrow::Cow;

/// The default quality table: printable ASCII `!` (0x21) through `~` (0x7E).
pub const STANDARD_QUALITIES: &str = "!\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_`abcdefghijklmnopqrstuvwxyz{|}~";

/// Highest rank in the standard table (`~`).
pub const MAX_QUALITY_RANK: usize = STANDARD_QUALITIES.len() - 1;

const FIRST_STANDARD: u32 = 0x21;
const LAST_STANDARD: u32 = 0x7E;

/// An immutable ordered set of quality characters. Higher rank = better quality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityAlphabet {
    symbols: Cow<'static, str>,
    standard: bool,
}

impl QualityAlphabet {
    /// The 94-character standard table.
    pub const fn standard() -> Self {
        Self {
            symbols: Cow::Borrowed(STANDARD_QUALITIES),
            standard: true,
        }
    }

    /// Alternate table; the rank of a character is its position in `symbols`.
    /// A repeated character ranks at its first position.
    pub fn new(symbols: impl Into<Cow<'static, str>>) -> Self {
        let symbols = symbols.into();
        let standard = symbols == STANDARD_QUALITIES;
        Self { symbols, standard }
    }

    /// Rank of `quality`, or `None` if it is not part of this table.
    #[inline]
    pub fn rank_of(&self, quality: char) -> Option<usize> {
        if self.standard {
            let cp = quality as u32;
            return (FIRST_STANDARD..=LAST_STANDARD)
                .contains(&cp)
                .then(|| (cp - FIRST_STANDARD) as usize);
        }
        self.symbols.chars().position(|c| c == quality)
    }

    /// Highest rank this table can produce; `None` for an empty table.
    pub fn max_rank(&self) -> Option<usize> {
        self.symbols.chars().count().checked_sub(1)
    }

    pub fn symbols(&self) -> &str {
        &self.symbols
    }
}

impl Default for QualityAlphabet {
    fn default() -> Self {
        Self::standard()
    }
}
