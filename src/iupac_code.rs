const DNA_BITMASK_A: u8 = 1;
const DNA_BITMASK_C: u8 = 2;
const DNA_BITMASK_G: u8 = 4;
const DNA_BITMASK_T: u8 = 8;
const DNA_BITMASK_N: u8 = DNA_BITMASK_A | DNA_BITMASK_C | DNA_BITMASK_G | DNA_BITMASK_T;

/// The ambiguity letters; a target containing any of them needs pattern matching
pub const AMBIGUITY_LETTERS: &[u8] = b"NRYWVBKMDHS";

const CONCRETE_BASES: [(u8, u8); 4] = [
    (b'A', DNA_BITMASK_A),
    (b'C', DNA_BITMASK_C),
    (b'G', DNA_BITMASK_G),
    (b'T', DNA_BITMASK_T),
];

// letter, allowed bases, complementary letter
const IUPAC_TABLE: [(u8, u8, u8); 15] = [
    (b'A', DNA_BITMASK_A, b'T'),
    (b'C', DNA_BITMASK_C, b'G'),
    (b'G', DNA_BITMASK_G, b'C'),
    (b'T', DNA_BITMASK_T, b'A'),
    (b'R', DNA_BITMASK_A | DNA_BITMASK_G, b'Y'),
    (b'Y', DNA_BITMASK_C | DNA_BITMASK_T, b'R'),
    (b'W', DNA_BITMASK_A | DNA_BITMASK_T, b'W'),
    (b'S', DNA_BITMASK_C | DNA_BITMASK_G, b'S'),
    (b'K', DNA_BITMASK_G | DNA_BITMASK_T, b'M'),
    (b'M', DNA_BITMASK_A | DNA_BITMASK_C, b'K'),
    (b'B', DNA_BITMASK_N & !DNA_BITMASK_A, b'V'),
    (b'V', DNA_BITMASK_N & !DNA_BITMASK_T, b'B'),
    (b'D', DNA_BITMASK_N & !DNA_BITMASK_C, b'H'),
    (b'H', DNA_BITMASK_N & !DNA_BITMASK_G, b'D'),
    (b'N', DNA_BITMASK_N, b'N'),
];

/// The set of bases one IUPAC letter stands for, as a bitmask
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct IupacCode(u8);

impl IupacCode {
    #[inline(always)]
    fn lookup(letter: u8) -> Option<&'static (u8, u8, u8)> {
        let letter = letter.to_ascii_uppercase();
        IUPAC_TABLE.iter().find(|(l, _, _)| *l == letter)
    }

    /// Case-insensitive; letters outside the alphabet give the empty code
    #[inline(always)]
    pub fn from_letter(letter: u8) -> Self {
        Self(Self::lookup(letter).map_or(0, |&(_, mask, _)| mask))
    }

    pub fn try_from_letter(letter: u8) -> Option<Self> {
        Self::lookup(letter).map(|&(_, mask, _)| Self(mask))
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// True if `base` is a concrete nucleotide (A, C, G or T) allowed by this code.
    /// Ambiguity letters in the sequence itself never match.
    #[inline(always)]
    pub fn matches_base(self, base: u8) -> bool {
        let base = Self::from_letter(base);
        base.0.count_ones() == 1 && self.0 & base.0 != 0
    }

    #[inline(always)]
    pub fn is_ambiguity_letter(letter: u8) -> bool {
        AMBIGUITY_LETTERS.contains(&letter.to_ascii_uppercase())
    }

    /// The concrete bases of this code, in A, C, G, T order
    pub fn bases(&self) -> Vec<u8> {
        CONCRETE_BASES
            .iter()
            .filter(|(_, mask)| self.0 & mask != 0)
            .map(|&(letter, _)| letter)
            .collect()
    }

    /// Complement of a single letter, uppercased. Letters outside the alphabet
    /// are returned unchanged.
    #[inline(always)]
    pub fn letter_complement(letter: u8) -> u8 {
        Self::lookup(letter).map_or(letter, |&(_, _, complement)| complement)
    }

    /// Base-by-base complement, same reading order
    pub fn complement(sequence: &str) -> String {
        sequence
            .bytes()
            .map(|c| Self::letter_complement(c) as char)
            .collect()
    }

    pub fn reverse_complement(sequence: &str) -> String {
        sequence
            .bytes()
            .rev()
            .map(|c| Self::letter_complement(c) as char)
            .collect()
    }
}
