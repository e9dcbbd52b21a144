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
use thiserror::Error;
use super::{color::*, data::*, score::*, select::*, word::Word};

/// One guess of a played game: what was guessed, the coloring it got, and how many candidates
/// remained afterwards.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GuessRecord {
    pub guess: Word,
    pub coloring: Colorings,
    pub remaining: usize,
}

/// Every guess played in one game, in order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameTrace {
    pub secret: Word,
    pub records: Vec<GuessRecord>,
}

impl GameTrace {
    pub fn new(secret: Word) -> Self {
        Self { secret, records: Vec::new() }
    }

    /// Whether or not the last guess was the secret
    pub fn is_solved(&self) -> bool {
        self.records
            .last()
            .map(|r| r.coloring.is_solved())
            .unwrap_or(false)
    }

    pub fn num_guesses(&self) -> usize {
        self.records.len()
    }

    /// The (guess, coloring) pairs, which is all the decision tree cares about
    pub fn moves(&self) -> impl Iterator<Item=(Word, Colorings)> + '_ {
        self.records.iter().map(|r| (r.guess, r.coloring))
    }

    fn push(&mut self, guess: Word, coloring: Colorings, remaining: usize) {
        self.records.push(GuessRecord { guess, coloring, remaining });
    }
}

/// "secret: guess 01200 (12), guess 22222 (1)"
impl Display for GameTrace {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:", self.secret)?;
        for (idx, record) in self.records.iter().enumerate() {
            let sep = if idx == 0 { " " } else { ", " };
            write!(f, "{}{} {} ({})", sep, record.guess, record.coloring, record.remaining)?;
        }

        Ok(())
    }
}

///
/// Everything that can go wrong in a single game. All of them are fatal for that game (and only
/// that game). Each carries the trace up to the point of failure.
///
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameErr {
    #[error(
        "no candidate is consistent with the colorings seen for '{}' ({})",
        .trace.secret,
        .trace
    )]
    InconsistentColoring { trace: GameTrace },
    #[error("'{}' was not solved within {max_steps} guesses ({})", .trace.secret, .trace)]
    StepLimit { trace: GameTrace, max_steps: usize },
    #[error("could not choose a guess for '{}' ({})", .trace.secret, .trace)]
    Select {
        trace: GameTrace,
        #[source]
        source: SelectErr,
    },
}

impl GameErr {
    pub fn trace(&self) -> &GameTrace {
        match self {
            GameErr::InconsistentColoring { trace } => trace,
            GameErr::StepLimit { trace, .. } => trace,
            GameErr::Select { trace, .. } => trace,
        }
    }
}

///
/// Plays games against itself: for a secret it repeatedly picks the best guess, looks at the
/// coloring, and narrows the candidates until the coloring is all green.
///
/// The simulator only borrows the answers & selector, which are shared by every game in a batch.
///
pub struct Simulator<'a> {
    /// every game starts with all of these as candidates
    answers: &'a Vocabulary,
    selector: &'a Selector,
    /// the first guess of every game
    opening: Word,
    /// a game that hasn't been solved after this many guesses is abandoned
    max_steps: usize,
}

impl<'a> Simulator<'a> {
    pub fn new(
        answers: &'a Vocabulary,
        selector: &'a Selector,
        opening: Word,
        max_steps: usize,
    ) -> Self {
        Self {
            answers,
            selector,
            opening,
            max_steps,
        }
    }

    /// Derives the opening guess (best guess against every answer). This is by far the most
    /// expensive selection in a run, and its result is the same for every game.
    pub fn opening_guess(answers: &Vocabulary, selector: &Selector) -> Result<Word, SelectErr> {
        selector.best_guess(answers)
    }

    pub fn answers(&self) -> &'a Vocabulary {
        self.answers
    }

    pub fn opening(&self) -> Word {
        self.opening
    }

    ///
    /// Plays one full game where the answer is `secret`.
    ///
    /// Every step:
    /// * color the current guess against the secret
    /// * if it's all green, record the guess (with 1 remaining) and we're done
    /// * otherwise narrow the candidates, record the guess, and select the next guess
    ///
    /// The guess right after the opening guess comes from the selector's cache, since it only
    /// depends on the opening coloring (see Selector::best_guess_cached).
    ///
    pub fn play(&self, secret: Word) -> Result<GameTrace, GameErr> {
        let mut trace = GameTrace::new(secret);
        let mut candidates: Vec<Word> = self.answers.to_vec();
        let mut guess = self.opening;

        loop {
            if trace.num_guesses() >= self.max_steps {
                return Err(GameErr::StepLimit { trace, max_steps: self.max_steps });
            }

            let coloring = Colorings::with_guess_answer(guess, secret);
            if coloring.is_solved() {
                trace.push(guess, coloring, 1);
                return Ok(trace);
            }

            candidates = filter_candidates(&candidates, guess, coloring);
            if candidates.is_empty() {
                return Err(GameErr::InconsistentColoring { trace });
            }
            trace.push(guess, coloring, candidates.len());

            let next = if trace.num_guesses() == 1 {
                let key = NextGuessKey {
                    basis: self.answers.fingerprint(),
                    guess,
                    coloring,
                };
                self.selector.best_guess_cached(key, &candidates)
            } else {
                self.selector.best_guess(&candidates)
            };

            guess = match next {
                Ok(next) => next,
                Err(source) => return Err(GameErr::Select { trace, source }),
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(raw: &[&str]) -> Vocabulary {
        Vocabulary::new(raw.iter().map(|w| Word::parse(w).unwrap()).collect()).unwrap()
    }

    fn w(s: &str) -> Word {
        Word::parse(s).unwrap()
    }

    const TOY: [&str; 4] = ["abcde", "abcdf", "zbcde", "zbcdf"];

    #[test]
    fn test_toy_games_terminate_quickly() {
        let answers = vocab(&TOY);
        let selector = Selector::new(answers.clone(), ScoringMethod::Entropy, 2);
        let opening = Simulator::opening_guess(&answers, &selector).unwrap();
        let sim = Simulator::new(&answers, &selector, opening, 10);

        // ceil(log2(4)) + 1
        let bound = 3;
        for secret in answers.iter() {
            let trace = sim.play(*secret).expect("should solve");
            assert!(trace.num_guesses() <= bound, "{}", trace);
            assert!(trace.is_solved());
            let last = trace.records.last().unwrap();
            assert_eq!(last.guess, *secret);
            assert_eq!(last.coloring, Colorings::SOLVED);
            assert_eq!(last.remaining, 1);
        }
    }

    #[test]
    fn test_secret_equal_to_opening() {
        let answers = vocab(&TOY);
        let selector = Selector::new(answers.clone(), ScoringMethod::Entropy, 2);
        let sim = Simulator::new(&answers, &selector, w("abcde"), 10);
        let trace = sim.play(w("abcde")).unwrap();
        assert_eq!(
            trace.records,
            vec![GuessRecord { guess: w("abcde"), coloring: Colorings::SOLVED, remaining: 1 }],
        );
    }

    #[test]
    fn test_records_remaining_counts() {
        let answers = vocab(&TOY);
        let guesses = vocab(&["aqqqq", "abcde", "abcdf", "zbcde", "zbcdf"]);
        let selector = Selector::new(guesses, ScoringMethod::Entropy, 2);
        let sim = Simulator::new(&answers, &selector, w("aqqqq"), 10);
        let trace = sim.play(w("zbcdf")).unwrap();

        // aqqqq leaves {zbcde, zbcdf}, then the first of those is guessed, then the secret
        let expected: Vec<(String, String, usize)> = vec![
            ("aqqqq".into(), "00000".into(), 2),
            ("zbcde".into(), "22220".into(), 1),
            ("zbcdf".into(), "22222".into(), 1),
        ];
        let got: Vec<(String, String, usize)> = trace
            .records
            .iter()
            .map(|r| (r.guess.to_string(), r.coloring.to_string(), r.remaining))
            .collect();
        assert_eq!(got, expected);

        // the second guess was memoized for the opening coloring
        assert_eq!(selector.cache().len(), 1);
        sim.play(w("zbcde")).unwrap();
        assert_eq!(selector.cache().len(), 1);
        assert_eq!(selector.cache().stats().0, 1);
    }

    #[test]
    fn test_candidates_shrink_monotonically() {
        let answers = vocab(&[
            "crane", "slate", "trace", "crate", "raise",
            "arise", "stare", "roast", "toast", "beast",
        ]);
        let selector = Selector::new(answers.clone(), ScoringMethod::Entropy, 2);
        let opening = Simulator::opening_guess(&answers, &selector).unwrap();
        let sim = Simulator::new(&answers, &selector, opening, 10);
        for secret in answers.iter() {
            let trace = sim.play(*secret).unwrap();
            let mut prev = answers.len();
            for record in &trace.records {
                assert!(record.remaining <= prev, "{}", trace);
                prev = record.remaining;
            }
            assert_eq!(trace.records.last().map(|r| r.guess), Some(*secret));
        }
    }

    #[test]
    fn test_secret_outside_answers_is_inconsistent() {
        let answers = vocab(&TOY);
        let selector = Selector::new(answers.clone(), ScoringMethod::Entropy, 2);
        let sim = Simulator::new(&answers, &selector, w("abcde"), 10);
        let err = sim.play(w("qqqqq")).unwrap_err();
        assert!(matches!(err, GameErr::InconsistentColoring { .. }), "{}", err);
        assert_eq!(err.trace().secret, w("qqqqq"));
        assert!(err.trace().records.is_empty());
    }

    #[test]
    fn test_useless_guesses_hit_step_limit() {
        let answers = vocab(&["abcde", "abcdf", "abcdg"]);
        // nothing in the guess vocabulary tells these apart
        let selector = Selector::new(vocab(&["qqqqq"]), ScoringMethod::Entropy, 2);
        let sim = Simulator::new(&answers, &selector, w("qqqqq"), 4);
        let err = sim.play(w("abcdg")).unwrap_err();
        match &err {
            GameErr::StepLimit { trace, max_steps } => {
                assert_eq!(*max_steps, 4);
                assert_eq!(trace.num_guesses(), 4);
                assert!(trace.records.iter().all(|r| r.remaining == 3));
            }
            other => panic!("expected step limit, got {:?}", other),
        }
    }
}
