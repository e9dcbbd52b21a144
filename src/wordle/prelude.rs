// This file allows you to configure some of the constants that define the game of wordle and the
// self-play simulation.
//
// It is unlikely you will ever change the WORD_SIZE but if you want to, it should be supported by
// this implementation.


// how many characters are in a wordle answer?
pub const WORD_SIZE: usize = 5;
// how many letters are in the english alphabet? (don't change this lol)
pub const ALPHABET_SIZE: usize = (('z' as usize) - ('a' as usize)) + 1;
// how many guesses a single simulated game may take before we give up on it. A real game allows
// 6, but the simulation wants to know how many guesses the strategy actually needs.
pub const DEFAULT_MAX_STEPS: usize = 32;
// once this many candidates (or fewer) remain, the selector just guesses the first candidate
pub const DEFAULT_SMALL_SET_THRESHOLD: usize = 2;
// how many recommendations the suggest binary prints
pub const N_RECOMMENDATIONS: usize = 16;
// where the per-game report goes when nothing else is configured
pub const DEFAULT_REPORT_PATH: &str = "WordleWordSequences.csv";
// a progress line is logged every time this many games of a batch have finished
pub const PROGRESS_INTERVAL: usize = 100;

// This type allows you to switch between using f64 for all calculations and f32 if you so desire.
pub type WordleFloat = f64;

pub use crate::util::*;

/// Returns the number of times each letter of the alphabet occurs in the argument. The bytes should
/// represent only lowercase ASCII data. The output is indexed by the position of the letter in the
/// alphabet... like 'a' = 0, 'b' = 1, etc...
pub fn count_letters_bytes(word: &[u8]) -> [usize; ALPHABET_SIZE] {
    debug_assert!(is_wordle_str_bytes(word));
    let mut out = [0; ALPHABET_SIZE];
    for i in 0..WORD_SIZE {
        out[letter_idx(word[i])] += 1;
    }

    out
}

/// Returns the index of the given letter within the alphabet (like 'a' = 0, 'b' = 1, etc...)
pub fn letter_idx(letter: u8) -> usize {
    ((letter as isize) - ('a' as isize)) as usize
}

/// Checks whether or not the passed string meets the constraints of a "wordle_str"
/// must be (5 letters, all lowercase)
pub fn is_wordle_str(v: &str) -> bool {
    is_wordle_str_bytes(v.as_bytes())
}

/// Checks whether or not the passed bytes represent an ASCII sequence which is also a "wordle_str"
pub fn is_wordle_str_bytes(v: &[u8]) -> bool {
    v.len() == WORD_SIZE && v.iter().all(is_normal_wordle_char)
}

/// Given some input &str, try to clean it up such that it might be a wordle_str.
///
/// This function does not trim the length of a word or remove non alpha characters. It simply
/// cleans up words that are already valid wordle words by removing any spacing (and the quotes
/// used by the single line word list format) and converting to all lowercase.
///
/// You should always verify that the output of this function passes is_wordle_str.
pub fn normalize_wordle_word(str: &str) -> String {
    str.trim().trim_matches('"').trim().to_lowercase()
}

/// Verifies that a byte represents a lowercase alphabetic character (a valid wordle_str char)
pub fn is_normal_wordle_char(v: &u8) -> bool {
    v.is_ascii_lowercase()
}
