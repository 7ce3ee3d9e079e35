/// Packed null flags: bit `row % 64` of word `row / 64`, 1 = valid, 0 = null.
/// A missing bitmap means every row is valid.
#[derive(Debug, Clone, Copy)]
pub struct ValidityMask<'a> {
    words: Option<&'a [u64]>,
}

impl<'a> ValidityMask<'a> {
    pub const BITS_PER_WORD: usize = 64;

    pub fn new(words: Option<&'a [u64]>) -> Self {
        Self { words }
    }

    pub fn all_valid() -> Self {
        Self { words: None }
    }

    /// Number of words needed to cover `rows` rows.
    #[inline]
    pub fn words_for(rows: usize) -> usize {
        rows.div_ceil(Self::BITS_PER_WORD)
    }

    #[inline]
    pub fn has_bitmap(&self) -> bool {
        self.words.is_some()
    }

    /// Caller guarantees `row` is covered by the bitmap (checked when the owning
    /// view is built).
    #[inline]
    pub fn is_valid(&self, row: usize) -> bool {
        match self.words {
            None => true,
            Some(words) => {
                (words[row / Self::BITS_PER_WORD] >> (row % Self::BITS_PER_WORD)) & 1 == 1
            }
        }
    }

    #[inline]
    pub fn is_null(&self, row: usize) -> bool {
        !self.is_valid(row)
    }

    pub fn null_count(&self, len: usize) -> usize {
        match self.words {
            None => 0,
            Some(_) => (0..len).filter(|&row| self.is_null(row)).count(),
        }
    }
}
