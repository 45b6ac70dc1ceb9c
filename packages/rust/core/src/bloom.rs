//! Bloom filter over five-letter words, and 25-bit word packing.
//!
//! The hashing and bit layout here must match the C helpers emitted by
//! [`crate::embed`], since the game client checks the same table at runtime.

use fivelist_shared::{FivelistError, Result, WORD_LENGTH, Word};

/// FNV-1a 32-bit offset basis.
pub const FNV_OFFSET: u32 = 2_166_136_261;

/// FNV-1a 32-bit prime.
pub const FNV_PRIME: u32 = 16_777_619;

/// Per-hash seed multiplier (golden ratio constant).
pub const SEED_STEP: u32 = 0x9E37_79B9;

/// Bits per packed letter.
const LETTER_BITS: u32 = 5;

/// FNV-1a over the lowercased bytes of a word, offset by `seed`.
pub fn fnv1a(word: &[u8], seed: u32) -> u32 {
    word.iter().take(WORD_LENGTH).fold(FNV_OFFSET ^ seed, |hash, &b| {
        (hash ^ u32::from(b.to_ascii_lowercase())).wrapping_mul(FNV_PRIME)
    })
}

// ---------------------------------------------------------------------------
// BloomFilter
// ---------------------------------------------------------------------------

/// Fixed-size Bloom filter with `k` seeded FNV-1a hashes per word.
#[derive(Debug, Clone)]
pub struct BloomFilter {
    bits: Vec<u8>,
    size_bits: u32,
    k: u32,
}

impl BloomFilter {
    /// Create an empty filter of `size_bits` bits (positive multiple of 8).
    pub fn new(size_bits: u32, k: u32) -> Result<Self> {
        if size_bits == 0 || size_bits % 8 != 0 {
            return Err(FivelistError::validation(format!(
                "bloom filter size must be a positive multiple of 8 bits, got {size_bits}"
            )));
        }
        if k == 0 {
            return Err(FivelistError::validation(
                "bloom filter needs at least one hash function",
            ));
        }
        Ok(Self {
            bits: vec![0; (size_bits / 8) as usize],
            size_bits,
            k,
        })
    }

    pub fn insert(&mut self, word: &str) {
        for bit in bit_positions(word.as_bytes(), self.size_bits, self.k) {
            self.bits[(bit / 8) as usize] |= 1 << (bit % 8);
        }
    }

    /// May report false positives, never false negatives.
    pub fn contains(&self, word: &str) -> bool {
        bit_positions(word.as_bytes(), self.size_bits, self.k)
            .all(|bit| self.bits[(bit / 8) as usize] & (1 << (bit % 8)) != 0)
    }

    /// Number of bits currently set.
    pub fn bits_set(&self) -> u32 {
        self.bits.iter().map(|b| b.count_ones()).sum()
    }

    pub fn size_bits(&self) -> u32 {
        self.size_bits
    }

    pub fn size_bytes(&self) -> usize {
        self.bits.len()
    }

    pub fn k(&self) -> u32 {
        self.k
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }
}

/// Bit positions set for `word`.
fn bit_positions(word: &[u8], size_bits: u32, k: u32) -> impl Iterator<Item = u32> + '_ {
    (0..k).map(move |i| fnv1a(word, i.wrapping_mul(SEED_STEP)) % size_bits)
}

// ---------------------------------------------------------------------------
// Packing
// ---------------------------------------------------------------------------

/// Pack a five-letter word into 25 bits, first letter most significant.
pub fn encode_word(word: &str) -> Result<u32> {
    let word = Word::new(word)?;
    Ok(word.to_lowercase().bytes().fold(0u32, |acc, b| {
        (acc << LETTER_BITS) | u32::from(b - b'a')
    }))
}

/// Unpack a 25-bit value produced by [`encode_word`].
pub fn decode_word(encoded: u32) -> Result<Word> {
    let mut letters = [0u8; WORD_LENGTH];
    let mut rest = encoded;
    for slot in letters.iter_mut().rev() {
        let index = (rest & 0x1F) as u8;
        if index > 25 {
            return Err(FivelistError::parse(format!(
                "0x{encoded:07X} does not encode a word"
            )));
        }
        *slot = b'a' + index;
        rest >>= LETTER_BITS;
    }
    if rest != 0 {
        return Err(FivelistError::parse(format!(
            "0x{encoded:07X} is wider than 25 bits"
        )));
    }
    // letters are all a-z
    Word::new(std::str::from_utf8(&letters).map_err(|e| FivelistError::parse(e.to_string()))?)
}
