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

use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use thiserror::Error;
use super::word::{Word, WordErr};

///
/// An ordered list of distinct words, loaded once and never modified.
///
/// The order is the order of the source file, and it matters: the selector iterates guesses in this
/// order (which decides ties) and the batch runner plays secrets in this order.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vocabulary {
    words: Vec<Word>,
    fingerprint: u64,
}

#[derive(Error, Debug)]
pub enum LoadDataErr {
    #[error("failed to read word list {0:?}")]
    Io(PathBuf, #[source] std::io::Error),
    #[error("entry {1} of the word list is invalid")]
    BadEntry(#[source] WordErr, usize),
    #[error("the word '{0}' appears more than once")]
    DuplicateWord(Word),
    #[error("the word list is empty")]
    EmptyVocabulary,
}

impl Vocabulary {
    /// Validates that the words are distinct and that there is at least one of them
    pub fn new(words: Vec<Word>) -> Result<Self, LoadDataErr> {
        if words.is_empty() {
            return Err(LoadDataErr::EmptyVocabulary);
        }

        let mut seen = HashSet::with_capacity(words.len());
        for word in &words {
            if !seen.insert(*word) {
                return Err(LoadDataErr::DuplicateWord(*word));
            }
        }

        let fingerprint = fingerprint_of(&words);
        Ok(Self { words, fingerprint })
    }

    ///
    /// Parses the contents of a word list. Two layouts are understood:
    ///
    /// * one word per line
    /// * a single line of quoted, comma separated words: "cigar","rebut","sissy"
    ///
    /// Both are handled by splitting on commas and newlines, and normalize_wordle_word strips the
    /// quotes and whitespace. Empty entries (blank lines, trailing commas) are skipped.
    ///
    pub fn parse(raw: &str) -> Result<Self, LoadDataErr> {
        let words = raw
            .split(|c| c == ',' || c == '\n')
            .filter(|entry| !entry.trim().trim_matches('"').trim().is_empty())
            .enumerate()
            .map(|(idx, entry)| Word::parse(entry).map_err(|err| LoadDataErr::BadEntry(err, idx)))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(words)
    }

    /// Reads & parses a word list file (see parse for the accepted format)
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadDataErr> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|err| LoadDataErr::Io(path.to_path_buf(), err))?;
        let out = Self::parse(&raw)?;
        log::debug!("got {} words from {:?}", out.len(), path);
        Ok(out)
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    ///
    /// A hash of the words (in order). Two vocabularies with the same fingerprint are, for all
    /// practical purposes, the same vocabulary. Caches use this to avoid mixing up results computed
    /// against different word lists.
    ///
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// The words in self which do not appear in other
    pub fn missing_from<'a>(&'a self, other: &'a Vocabulary) -> impl Iterator<Item=Word> + 'a {
        let other_s: HashSet<&Word> = other.words.iter().collect();
        self.words.iter().copied().filter(move |w| !other_s.contains(w))
    }
}

impl Deref for Vocabulary {
    type Target = [Word];

    fn deref(&self) -> &Self::Target {
        &self.words
    }
}

/// Hashes a sequence of words in order
pub fn fingerprint_of(words: &[Word]) -> u64 {
    let mut hasher = DefaultHasher::new();
    words.hash(&mut hasher);
    hasher.finish()
}

///
/// Loads the answer & guess vocabularies.
///
/// A guess vocabulary which does not contain every answer is allowed (the simulator guards against
/// the games this can break), but it's almost always a mistake, so we log it.
///
pub fn load_vocabularies(
    answer_path: impl AsRef<Path>,
    guess_path: impl AsRef<Path>,
) -> Result<(Vocabulary, Vocabulary), LoadDataErr> {
    let answers = Vocabulary::load(answer_path)?;
    let guesses = Vocabulary::load(guess_path)?;

    let missing = answers.missing_from(&guesses).count();
    if missing > 0 {
        log::warn!(
            "{} of {} answers are not in the guess vocabulary, some games may not terminate",
            missing,
            answers.len(),
        );
    }

    Ok((answers, guesses))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("cigar\nrebut\nsissy\n"; "one per line")]
    #[test_case("\"cigar\",\"rebut\",\"sissy\""; "quoted single line")]
    #[test_case("  CIGAR \r\n\nrebut\n\"sissy\",\n"; "messy")]
    fn test_parse_formats(raw: &str) {
        let vocab = Vocabulary::parse(raw).expect("should parse");
        let words: Vec<String> = vocab.iter().map(|w| w.to_string()).collect();
        assert_eq!(words, vec!["cigar", "rebut", "sissy"]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Vocabulary::parse(""), Err(LoadDataErr::EmptyVocabulary)));
        assert!(matches!(Vocabulary::parse("\n,\n"), Err(LoadDataErr::EmptyVocabulary)));
        assert!(matches!(
            Vocabulary::parse("cigar\ncigar"),
            Err(LoadDataErr::DuplicateWord(w)) if w.as_str() == "cigar"
        ));
        assert!(matches!(
            Vocabulary::parse("cigar\ncigars"),
            Err(LoadDataErr::BadEntry(_, 1))
        ));
    }

    #[test]
    fn test_fingerprint_depends_on_words() {
        let a = Vocabulary::parse("cigar\nrebut").unwrap();
        let b = Vocabulary::parse("\"cigar\",\"rebut\"").unwrap();
        let c = Vocabulary::parse("rebut\ncigar").unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join(format!("wordle-strategy-data-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let answers = dir.join("answers.txt");
        let guesses = dir.join("guesses.txt");
        std::fs::write(&answers, "cigar\nrebut\n").unwrap();
        std::fs::write(&guesses, "\"cigar\",\"salet\"").unwrap();

        let (a, g) = load_vocabularies(&answers, &guesses).expect("should load");
        assert_eq!(a.len(), 2);
        assert_eq!(g.len(), 2);
        let missing: Vec<Word> = a.missing_from(&g).collect();
        assert_eq!(missing, vec![Word::parse("rebut").unwrap()]);

        assert!(matches!(
            Vocabulary::load(dir.join("nope.txt")),
            Err(LoadDataErr::Io(_, _))
        ));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
