/*
 * MIT License
 *
 * Copyright (c) 2022 Joseph Sacchini
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

use std::fmt::{Debug, Display, Formatter};
use std::ops::{Index, IndexMut};
use std::str::FromStr;
use thiserror::Error;
use self::Coloring::*;
use super::{prelude::*, word::Word};

///
/// Any set of colorings can be converted to a "code" which uniquely identifies that specific
/// coloring. This type is the number we use to store that code (and we pick u8 because the range is
/// 0 -> 3^5=243 for 3 colorings in a 5 letter puzzle).
///
pub type ColoringCode = u8;

///
/// The three different colors that a wordle square can be...
///   * Excluded = the letter is not in the answer (also indicates no further instances of a letter
///                when another square with the same letter is colored misplaced/correct)
///   * Misplaced = the letter is in the answer, but not in this position
///   * Correct = the letter is in the answer at this position
///
/// The declaration order matters: the derived Ord sorts Excluded < Misplaced < Correct, which is
/// the same order as the digits 0 < 1 < 2 used in the text form.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Coloring {
    Excluded,
    Misplaced,
    Correct,
}

impl Coloring {
    /// All three colorings (make sure this actually matches the definition above)
    pub const ALL: [Coloring; 3] = [Excluded, Misplaced, Correct];
    /// The number of possible colorings
    pub const NUM: usize = Self::ALL.len();

    /// Converts the coloring to a number (0, 1, or 2)
    pub fn ordinal(&self) -> ColoringCode {
        match self {
            Excluded => 0,
            Misplaced => 1,
            Correct => 2,
        }
    }

    /// Converts a number (usually from .ordinal()) back to a Coloring
    pub fn from_ordinal(code: ColoringCode) -> Option<Self> {
        Some(match code {
            0 => Excluded,
            1 => Misplaced,
            2 => Correct,
            _ => return None,
        })
    }

    /// The digit used for this coloring in the canonical text form
    pub fn digit(&self) -> char {
        (b'0' + self.ordinal()) as char
    }

    /// Reads a digit (0/1/2) or the letters b/y/g commonly used when typing in a coloring
    pub fn from_char(c: char) -> Option<Self> {
        Some(match c.to_ascii_lowercase() {
            '0' | 'b' | 'x' => Excluded,
            '1' | 'y' => Misplaced,
            '2' | 'g' => Correct,
            _ => return None,
        })
    }

    /// Gives the best emoji to represent the coloring (used for console printing)
    pub fn emoji(&self) -> &'static str {
        match self {
            Excluded => "⬛",
            Misplaced => "🟨",
            Correct => "🟩"
        }
    }
}

/// An array of Colorings, one for each square in the puzzle.
pub type ColoringsArray = [Coloring; WORD_SIZE];

/// The array of Colorings, but in a struct, so that we can attach some useful functions to a
/// complete set of Colorings. This is the "clue" the game gives back after every guess.
///
/// Ord is the derived (element by element) ordering of the array, so sorting Colorings is the
/// same as sorting their "01202"-style text forms.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Colorings(pub ColoringsArray);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColoringsErr {
    #[error("a coloring must have exactly 5 marks, got '{0}'")]
    WrongLength(String),
    #[error("unknown coloring mark '{1}' in '{0}'")]
    BadMark(String, char),
}

/// Automatic conversion of [Coloring; WORD_SIZE] -> Colorings
impl From<ColoringsArray> for Colorings {
    fn from(arr: ColoringsArray) -> Self {
        Self(arr)
    }
}

/// Delegate indexing of the struct to it's inner value
impl Index<usize> for Colorings {
    type Output = Coloring;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

/// Delegate mutable indexing of the struct to it's inner value
impl IndexMut<usize> for Colorings {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0[index]
    }
}

impl Colorings {
    /// How many different possible colorings are there? In the case of a 5 word puzzle with 3
    /// colorings it's 3^5=243 possible colorings
    pub const NUM_STATES: usize = Coloring::NUM.pow(WORD_SIZE as u32);

    /// The coloring shown when the guess is the answer (all green). Seeing it ends a game.
    pub const SOLVED: Self = Self([Correct; WORD_SIZE]);

    ///
    /// Compute what colors would be shown given some guess & answer. For example if the guess was
    /// "tares" and the answer was "scare" we should compute
    /// [Excluded, Misplaced, Misplaced, Misplaced, Misplaced]
    ///
    /// This is implemented by:
    /// * creating an empty [Coloring; WORD_SIZE] where all colors are defaulted to Excluded
    /// * computing a "budget" for each letter in the alphabet (based on their frequency in the
    ///   answer)
    /// * performing a "GREEN pass" left to right which marks all correctly positioned letters (and
    ///   updates the budget)
    /// * performing a "YELLOW pass" left to right which marks the remaining positions misplaced
    ///   while the budget for their letter lasts
    ///
    /// Repeated letters are therefore attributed to exact matches first, then to the earliest
    /// remaining positions, and never more times than they appear in the answer.
    ///
    pub fn with_guess_answer(guess: Word, answer: Word) -> Self {
        let mut out = Self::default();
        let mut answer_letter_counts = answer.letter_counts();
        let answer_bytes = answer.as_bytes();
        let guess_bytes = guess.as_bytes();

        // GREEN pass
        for i in 0..WORD_SIZE {
            let gc = guess_bytes[i];
            if gc == answer_bytes[i] {
                answer_letter_counts[letter_idx(gc)] -= 1;
                out[i] = Correct;
            }
        }

        // YELLOW pass
        for i in 0..WORD_SIZE {
            if out[i] != Correct {
                let counter = &mut answer_letter_counts[letter_idx(guess_bytes[i])];
                if *counter > 0 {
                    *counter -= 1;
                    out[i] = Misplaced;
                }
            }
        }

        out
    }

    /// Whether or not every square is Correct
    pub fn is_solved(&self) -> bool {
        self == &Self::SOLVED
    }

    /// How many squares are colored Correct
    pub fn num_correct(&self) -> usize {
        self.0.iter().filter(|c| **c == Correct).count()
    }

    ///
    /// Computes a code that uniquely identifies this particular coloring. These codes are numbers
    /// in [0, 243) (in the case of a 5 letter puzzle).
    ///
    /// We essentially treat the colorings as a 5 digit base-3 number. Each Coloring has an
    /// ordinal() which ranges from [0, 3), and the left-most color is digit 0, next digit 1, etc.
    ///
    /// The scorer wants one bucket for each possible coloring, and using to_code() we can convert
    /// a Coloring to an array index instead of hashing it.
    ///
    /// Note that code order is NOT the same as the Ord of Colorings (the left-most color is the
    /// least significant digit here).
    ///
    pub fn to_code(&self) -> ColoringCode {
        let mut out = 0;
        let mut multiplier = 1;
        for i in 0..WORD_SIZE {
            out += self[i].ordinal() * multiplier;
            multiplier *= Coloring::NUM as u8;
        }
        out
    }

    ///
    /// Converts a ColoringCode back to Colorings.
    ///
    pub fn from_code(mut code: ColoringCode) -> Option<Self> {
        if code as usize >= Self::NUM_STATES {
            return None;
        }

        let mut out = Self::default();
        for i in 0..WORD_SIZE {
            out[i] = Coloring::from_ordinal(code % (Coloring::NUM as u8))?;
            code /= Coloring::NUM as u8;
        }

        Some(out)
    }

    /// Renders the coloring as squares, like 🟩🟨⬛⬛🟩
    pub fn emoji_string(&self) -> String {
        self.0.iter().map(|c| c.emoji()).collect()
    }

    /// Iterates every possible coloring, in Ord order
    pub fn iter_all() -> impl Iterator<Item=Colorings> {
        let mut all: Vec<Colorings> = (0..Self::NUM_STATES)
            .filter_map(|code| Self::from_code(code as ColoringCode))
            .collect();
        all.sort();
        all.into_iter()
    }
}

impl Default for Colorings {
    fn default() -> Self {
        Self([Excluded; WORD_SIZE])
    }
}

/// The canonical text form, one digit per square (0=Excluded, 1=Misplaced, 2=Correct)
impl Display for Colorings {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for i in 0..WORD_SIZE {
            write!(f, "{}", self[i].digit())?;
        }

        Ok(())
    }
}

impl Debug for Colorings {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Colorings({})", self)
    }
}

impl FromStr for Colorings {
    type Err = ColoringsErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.chars().count() != WORD_SIZE {
            return Err(ColoringsErr::WrongLength(s.to_string()));
        }

        let mut out = Self::default();
        for (i, c) in s.chars().enumerate() {
            out[i] = Coloring::from_char(c).ok_or_else(|| ColoringsErr::BadMark(s.to_string(), c))?;
        }

        Ok(out)
    }
}
