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

use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use super::{prelude::*, color::*, word::Word};

///
/// Keeps exactly the candidates which would have produced `coloring` if they were the answer and
/// `guess` was played. The relative order of the candidates is preserved (the selector relies on
/// it to break ties the same way every time).
///
/// An empty output means no candidate is consistent with the coloring. That is never "fine"
/// during a game, but it is up to the caller to decide what to do about it.
///
pub fn filter_candidates(candidates: &[Word], guess: Word, coloring: Colorings) -> Vec<Word> {
    candidates
        .iter()
        .copied()
        .filter(|candidate| Colorings::with_guess_answer(guess, *candidate) == coloring)
        .collect()
}

///
/// Counts how many candidates fall into each coloring "bucket" if `guess` were played. The output
/// is indexed by Colorings::to_code().
///
pub fn bucket_counts(candidates: &[Word], guess: Word) -> [usize; Colorings::NUM_STATES] {
    let mut out = [0; Colorings::NUM_STATES];
    for candidate in candidates {
        out[Colorings::with_guess_answer(guess, *candidate).to_code() as usize] += 1;
    }

    out
}

///
/// The sizes of the non-empty buckets, smallest first.
///
/// Every scoring function sums something over the buckets. Summing in a fixed (sorted) order means
/// two guesses which split the candidates the same way get bit-for-bit identical scores, no matter
/// which colorings the buckets happen to belong to. That matters because ties are broken by rules
/// (see select.rs), and floating point noise shouldn't get to break them first.
///
pub fn sorted_bucket_sizes(candidates: &[Word], guess: Word) -> Vec<usize> {
    let mut sizes: Vec<usize> = bucket_counts(candidates, guess)
        .into_iter()
        .filter(|count| *count > 0)
        .collect();
    sizes.sort_unstable();
    sizes
}

///
/// Scores a guess against the remaining candidates. Higher is better.
///
/// `guesses` is the full guess vocabulary. Most scorers don't care about it, but a look-ahead
/// scorer needs to know which second guesses are available.
///
/// Any closure with the right shape is a Scorer, so trying out a new idea doesn't need a new type.
///
pub trait Scorer: Send + Sync {
    fn score(&self, candidates: &[Word], guess: Word, guesses: &[Word]) -> WordleFloat;
}

impl<F> Scorer for F
where
    F: Fn(&[Word], Word, &[Word]) -> WordleFloat + Send + Sync,
{
    fn score(&self, candidates: &[Word], guess: Word, guesses: &[Word]) -> WordleFloat {
        self(candidates, guess, guesses)
    }
}

/// The scoring functions which ship with the solver
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringMethod {
    /// Expected information in bits (Shannon entropy of the bucket sizes)
    #[default]
    Entropy,
    /// Negative mean of the squared bucket sizes
    MeanSquare,
    /// Negative sample standard deviation of the bucket sizes
    StandardDeviation,
    /// Negative expected number of candidates left after this guess and the best follow up guess
    TwoPly,
}

impl Scorer for ScoringMethod {
    fn score(&self, candidates: &[Word], guess: Word, guesses: &[Word]) -> WordleFloat {
        use ScoringMethod::*;
        match self {
            Entropy => entropy_score(candidates, guess),
            MeanSquare => mean_square_score(candidates, guess),
            StandardDeviation => standard_deviation_score(candidates, guess),
            TwoPly => two_ply_score(candidates, guess, guesses),
        }
    }
}

impl Display for ScoringMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use ScoringMethod::*;
        f.write_str(match self {
            Entropy => "entropy",
            MeanSquare => "mean-square",
            StandardDeviation => "standard-deviation",
            TwoPly => "two-ply",
        })
    }
}

///
/// Computes the "expected info" of a given guess, in bits.
///
/// Each bucket of candidates is equally likely per candidate, so a bucket holding `count` of the
/// `n` candidates shows up with probability p = count / n. Seeing it tells us log2(1 / p) bits (the
/// smaller the bucket the more of the search space it eliminates). The "expected info" is the sum
/// of p * log2(1 / p) over all buckets.
///
/// A guess which splits the candidates into two equal halves is worth exactly 1 bit. A guess which
/// puts every candidate into the same bucket is worth 0 bits (positive zero, so it prints as 0).
///
pub fn entropy_score(candidates: &[Word], guess: Word) -> WordleFloat {
    let n = candidates.len() as WordleFloat;
    let bits: WordleFloat = sorted_bucket_sizes(candidates, guess)
        .into_iter()
        .map(|count| {
            let p = count as WordleFloat / n;
            p * (n / count as WordleFloat).log2()
        })
        .sum();

    // an empty sum is -0.0
    bits + 0.0
}

/// -(sum of squared bucket sizes / number of buckets)
pub fn mean_square_score(candidates: &[Word], guess: Word) -> WordleFloat {
    let sizes = sorted_bucket_sizes(candidates, guess);
    if sizes.is_empty() {
        return 0.0;
    }

    let total: WordleFloat = sizes.iter().map(|s| (*s as WordleFloat).powi(2)).sum();
    -(total / sizes.len() as WordleFloat)
}

///
/// -(sample standard deviation of the bucket sizes).
///
/// The standard deviation of a single bucket is undefined, and a guess with a single bucket teaches
/// us nothing, so it gets the worst possible score.
///
pub fn standard_deviation_score(candidates: &[Word], guess: Word) -> WordleFloat {
    let sizes = sorted_bucket_sizes(candidates, guess);
    if sizes.len() < 2 {
        return WordleFloat::NEG_INFINITY;
    }

    let n = sizes.len() as WordleFloat;
    let mean = sizes.iter().sum::<usize>() as WordleFloat / n;
    let sum_sq: WordleFloat = sizes
        .iter()
        .map(|s| (*s as WordleFloat - mean).powi(2))
        .sum();
    -(sum_sq / (n - 1.0)).sqrt()
}

///
/// Looks one guess further ahead than the other scorers.
///
/// For each bucket the guess produces, find the follow-up guess which leaves the fewest candidates
/// on average (sum of squared sub-bucket sizes / bucket size). Weight each bucket by its
/// probability and the result is the expected number of candidates left after two guesses. Fewer
/// is better, so we negate it.
///
/// This scans the guess vocabulary once per bucket, so it is very slow on real word lists.
///
pub fn two_ply_score(candidates: &[Word], guess: Word, guesses: &[Word]) -> WordleFloat {
    if candidates.is_empty() {
        return 0.0;
    }

    let n = candidates.len() as WordleFloat;
    let mut buckets: Vec<Vec<Word>> = vec![Vec::new(); Colorings::NUM_STATES];
    for candidate in candidates {
        let code = Colorings::with_guess_answer(guess, *candidate).to_code();
        buckets[code as usize].push(*candidate);
    }

    let expected: WordleFloat = buckets
        .iter()
        .filter(|bucket| !bucket.is_empty())
        .map(|bucket| {
            let size = bucket.len() as WordleFloat;
            let best_follow_up = if bucket.len() == 1 {
                1.0
            } else {
                guesses
                    .iter()
                    .map(|second| sum_of_squares(bucket, *second) / size)
                    .fold(size, WordleFloat::min)
            };
            (size / n) * best_follow_up
        })
        .sum();

    -expected
}

fn sum_of_squares(candidates: &[Word], guess: Word) -> WordleFloat {
    sorted_bucket_sizes(candidates, guess)
        .into_iter()
        .map(|s| (s as WordleFloat).powi(2))
        .sum()
}
