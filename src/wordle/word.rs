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
use std::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use super::prelude::*;

///
/// A single wordle word, stored as a fixed size array of lowercase ASCII letters.
///
/// Words are loaded once and never change, so this type is Copy and cheap to pass around (it's
/// just 5 bytes). Comparing/hashing a Word is comparing/hashing those bytes.
///
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word([u8; WORD_SIZE]);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WordErr {
    #[error("the word '{0}' is not a valid wordle word")]
    NonWordleWord(String),
}

impl Word {
    /// Normalizes & validates some text, producing a Word if the text is 5 lowercase letters (after
    /// normalization)
    pub fn parse(raw: &str) -> Result<Self, WordErr> {
        let normalized = normalize_wordle_word(raw);
        if !is_wordle_str(&normalized) {
            return Err(WordErr::NonWordleWord(normalized));
        }

        let mut out = [0u8; WORD_SIZE];
        out.copy_from_slice(normalized.as_bytes());
        Ok(Self(out))
    }

    pub fn as_bytes(&self) -> &[u8; WORD_SIZE] {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        // only ever constructed from validated lowercase ASCII
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// See count_letters_bytes in prelude.rs
    pub fn letter_counts(&self) -> [usize; ALPHABET_SIZE] {
        count_letters_bytes(&self.0)
    }
}

impl FromStr for Word {
    type Err = WordErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Word {
    type Error = WordErr;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl Display for Word {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Debug for Word {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Word({})", self.as_str())
    }
}

/// Words are written as plain strings in config files
impl Serialize for Word {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Word {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Word::parse(&raw).map_err(serde::de::Error::custom)
    }
}
