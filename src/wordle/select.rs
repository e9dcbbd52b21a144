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

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;
use rayon::prelude::*;
use thiserror::Error;
use super::{prelude::*, color::*, data::*, score::*, word::Word};

///
/// Picks the next guess to play.
///
/// The selector is built once per run: it owns the guess vocabulary and the scoring function, and
/// neither changes afterwards. That is what makes its NextGuessCache safe to share between games.
///
pub struct Selector {
    /// every word we're allowed to guess, in vocabulary order (which decides ties)
    guesses: Vocabulary,

    /// ranks guesses, see score.rs
    scorer: Box<dyn Scorer>,

    /// once there are this many candidates (or fewer) left, just guess the first one
    small_set_threshold: usize,

    cache: NextGuessCache,
}

#[derive(Copy, Clone, Debug)]
pub struct ScoredGuess {
    pub word: Word,
    pub score: WordleFloat,
    /// whether the guess could itself be the answer
    pub is_candidate: bool,
}

impl ScoredGuess {
    ///
    /// What we actually rank guesses by: the score, then (to break ties) whether the guess is still
    /// a candidate. Given two equally informative guesses, the one that might win immediately is
    /// the better one to play.
    ///
    fn rank(&self) -> (WordleFloat, bool) {
        (self.score, self.is_candidate)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectErr {
    #[error("no candidates remain to choose a guess for")]
    NoCandidates,
    #[error("the guess vocabulary is empty")]
    NoGuesses,
}

impl Selector {
    pub fn new(
        guesses: Vocabulary,
        scorer: impl Scorer + 'static,
        small_set_threshold: usize,
    ) -> Self {
        Self {
            guesses,
            scorer: Box::new(scorer),
            small_set_threshold,
            cache: NextGuessCache::default(),
        }
    }

    pub fn guesses(&self) -> &Vocabulary {
        &self.guesses
    }

    pub fn cache(&self) -> &NextGuessCache {
        &self.cache
    }

    ///
    /// Returns the best guess to play when `candidates` are the words which could still be the
    /// answer.
    ///
    /// * with no candidates there's nothing sensible to guess (Err)
    /// * with few candidates (see small_set_threshold) the first candidate is returned, no scoring
    ///   can beat a chance at winning on this very guess
    /// * otherwise every word in the guess vocabulary is scored and the best is returned, see
    ///   ScoredGuess::rank for how ties are broken
    ///
    pub fn best_guess(&self, candidates: &[Word]) -> Result<Word, SelectErr> {
        match candidates.first() {
            None => Err(SelectErr::NoCandidates),
            Some(first) if candidates.len() <= self.small_set_threshold => Ok(*first),
            Some(_) => self
                .top_guesses::<1>(candidates)
                .next()
                .map(|scored| scored.word)
                .ok_or(SelectErr::NoGuesses),
        }
    }

    ///
    /// Same as best_guess, but memoized by `key`.
    ///
    /// The caller promises that `candidates` is fully determined by the key. That holds for the
    /// guess right after the opening guess: every game starts from the same `basis` candidates and
    /// plays the same opening guess, so the coloring alone decides what's left. Past that point
    /// the candidates depend on the whole history of the game and this must not be used.
    ///
    pub fn best_guess_cached(
        &self,
        key: NextGuessKey,
        candidates: &[Word],
    ) -> Result<Word, SelectErr> {
        self.cache.get_or_try_insert(key, || self.best_guess(candidates))
    }

    ///
    /// Scores every guess and returns the K best, best first. Unlike best_guess there's no
    /// shortcut for small candidate sets... this is the raw ranking.
    ///
    /// Scoring is the expensive part (guesses * candidates colorings), so it is spread over the
    /// rayon pool. The collected Vec keeps vocabulary order, so the ranking doesn't depend on how
    /// the work was split.
    ///
    pub fn top_guesses<const K: usize>(&self, candidates: &[Word]) -> TopK<ScoredGuess, K>
    where
        [Option<ScoredGuess>; K]: Default,
        [Option<(WordleFloat, bool)>; K]: Default,
    {
        let candidate_set: HashSet<Word> = candidates.iter().copied().collect();
        let scored: Vec<ScoredGuess> = self.guesses
            .words()
            .par_iter()
            .map(|word| ScoredGuess {
                word: *word,
                score: self.scorer.score(candidates, *word, &self.guesses),
                is_candidate: candidate_set.contains(word),
            })
            .collect();

        scored.into_iter().top_k(ScoredGuess::rank)
    }
}

///
/// Identifies the candidates left after (opening guess, coloring) for one particular starting set
/// of candidates. `basis` is the fingerprint of that starting set (see Vocabulary::fingerprint), so
/// entries computed against one answer vocabulary can never be returned for another.
///
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NextGuessKey {
    pub basis: u64,
    pub guess: Word,
    pub coloring: Colorings,
}

///
/// A memo of (basis, guess, coloring) -> next best guess.
///
/// In a full batch thousands of games share the opening guess, and there are only a couple hundred
/// possible colorings for it, so the second guess (which is also the second most expensive one to
/// compute) only has to be computed a couple hundred times.
///
/// Entries are never invalidated; the same key always maps to the same word. Games may run on
/// several threads, so the map sits behind a RwLock. Two threads missing on the same key at once
/// both compute it, which is wasted work but harmless.
///
#[derive(Default, Debug)]
pub struct NextGuessCache {
    entries: RwLock<HashMap<NextGuessKey, Word>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl NextGuessCache {
    pub fn get(&self, key: &NextGuessKey) -> Option<Word> {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .copied()
    }

    pub fn get_or_try_insert<E, F>(&self, key: NextGuessKey, f: F) -> Result<Word, E>
    where
        F: FnOnce() -> Result<Word, E>,
    {
        if let Some(word) = self.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(word);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let word = f()?;
        log::debug!("cached next guess {} after {} {}", word, key.guess, key.coloring);
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key, word);
        Ok(word)
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// (hits, misses) so far
    pub fn stats(&self) -> (usize, usize) {
        (self.hits.load(Ordering::Relaxed), self.misses.load(Ordering::Relaxed))
    }
}
