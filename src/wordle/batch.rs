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

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use rayon::prelude::*;
use thiserror::Error;
use super::{prelude::*, config::*, data::*, game::*, report::*, select::*, word::Word};

///
/// Plays one game per secret and feeds the outcomes to a ReportSink.
///
/// Games are independent of each other (the only shared state is the selector's cache, which is
/// safe to share), so they can be played on the rayon pool. Either way the sink sees the games in
/// the order of the secrets, so the reports are identical whether or not the run was parallel.
///
pub struct BatchRunner<'a> {
    simulator: Simulator<'a>,
    parallel: bool,
}

///
/// What happened in a batch.
///
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// number of games played
    pub games: usize,
    /// number of games which ended with the secret being guessed
    pub solved: usize,
    /// every game which didn't, in the order they were played
    pub failures: Vec<GameErr>,
    /// number of guesses -> number of solved games which took that many
    pub distribution: BTreeMap<usize, usize>,
    pub elapsed: Duration,
}

impl BatchSummary {
    fn record(&mut self, outcome: &Result<GameTrace, GameErr>) {
        self.games += 1;
        match outcome {
            Ok(trace) => {
                self.solved += 1;
                *self.distribution.entry(trace.num_guesses()).or_default() += 1;
            }
            Err(err) => self.failures.push(err.clone()),
        }
    }

    /// Average number of guesses over the solved games
    pub fn mean_guesses(&self) -> Option<WordleFloat> {
        if self.solved == 0 {
            return None;
        }

        let total: usize = self.distribution.iter().map(|(guesses, games)| guesses * games).sum();
        Some(total as WordleFloat / self.solved as WordleFloat)
    }

    pub fn max_guesses(&self) -> Option<usize> {
        self.distribution.keys().next_back().copied()
    }
}

/// "solved 2315/2315 games, mean 3.4212 guesses, max 6 (took 41.2s)"
impl Display for BatchSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "solved {}/{} games", self.solved, self.games)?;
        if let (Some(mean), Some(max)) = (self.mean_guesses(), self.max_guesses()) {
            write!(f, ", mean {:.4} guesses, max {}", mean, max)?;
        }

        write!(f, " (took {:.1}s)", self.elapsed.as_secs_f64())
    }
}

impl<'a> BatchRunner<'a> {
    pub fn new(simulator: Simulator<'a>, parallel: bool) -> Self {
        Self { simulator, parallel }
    }

    ///
    /// Plays every secret.
    ///
    /// A failed game is logged, passed to the sink, and counted in the summary. It doesn't stop the
    /// batch. Failing to write to the sink does.
    ///
    pub fn run<S>(&self, secrets: &[Word], sink: &mut S) -> Result<BatchSummary, ReportErr>
    where
        S: ReportSink + ?Sized,
    {
        let (elapsed, summary) = timed(|| {
            if self.parallel {
                self.run_parallel(secrets, sink)
            } else {
                self.run_sequential(secrets, sink)
            }
        });

        let mut summary = summary?;
        summary.elapsed = elapsed;
        sink.finish()?;
        Ok(summary)
    }

    fn run_sequential<S>(&self, secrets: &[Word], sink: &mut S) -> Result<BatchSummary, ReportErr>
    where
        S: ReportSink + ?Sized,
    {
        let mut summary = BatchSummary::default();
        for (idx, secret) in secrets.iter().enumerate() {
            let outcome = self.simulator.play(*secret);
            log_progress(idx + 1, secrets.len());
            deliver(&outcome, sink, &mut summary)?;
        }

        Ok(summary)
    }

    fn run_parallel<S>(&self, secrets: &[Word], sink: &mut S) -> Result<BatchSummary, ReportErr>
    where
        S: ReportSink + ?Sized,
    {
        let done = AtomicUsize::new(0);
        let outcomes: Vec<Result<GameTrace, GameErr>> = secrets
            .par_iter()
            .map(|secret| {
                let outcome = self.simulator.play(*secret);
                log_progress(done.fetch_add(1, Ordering::Relaxed) + 1, secrets.len());
                outcome
            })
            .collect();

        let mut summary = BatchSummary::default();
        for outcome in &outcomes {
            deliver(outcome, sink, &mut summary)?;
        }

        Ok(summary)
    }
}

fn deliver<S>(
    outcome: &Result<GameTrace, GameErr>,
    sink: &mut S,
    summary: &mut BatchSummary,
) -> Result<(), ReportErr>
where
    S: ReportSink + ?Sized,
{
    summary.record(outcome);
    match outcome {
        Ok(trace) => {
            log::debug!("{}", trace);
            sink.record_game(trace)
        }
        Err(err) => {
            log::error!("{}", err);
            sink.record_failure(err)
        }
    }
}

fn log_progress(done: usize, total: usize) {
    if done % PROGRESS_INTERVAL == 0 || done == total {
        log::info!(
            "played {}/{} games ({:.1}%)",
            done,
            total,
            (done as WordleFloat / total as WordleFloat) * 100.0,
        );
    }
}

#[derive(Error, Debug)]
pub enum RunErr {
    #[error(transparent)]
    Config(#[from] ConfigErr),
    #[error(transparent)]
    Load(#[from] LoadDataErr),
    #[error("could not choose an opening guess")]
    Opening(#[from] SelectErr),
    #[error("failed to create report file {0:?}")]
    CreateReport(PathBuf, #[source] io::Error),
    #[error("failed to write reports")]
    Report(#[from] ReportErr),
}

///
/// Runs a whole batch as described by `config`: loads the vocabularies, works out the opening
/// guess, plays a game for every answer, and writes the reports.
///
pub fn run(config: &RunConfig) -> Result<BatchSummary, RunErr> {
    config.validate()?;
    let (answers, guesses) =
        load_vocabularies(&config.answer_vocab_path, &config.guess_vocab_path)?;
    log::info!(
        "loaded {} answers and {} guesses, scoring with {}",
        answers.len(),
        guesses.len(),
        config.scoring,
    );

    let selector = Selector::new(guesses, config.scoring, config.small_set_threshold);
    let opening = match config.opening_guess {
        Some(opening) => {
            if !selector.guesses().contains(&opening) {
                log::warn!("opening guess {} is not in the guess vocabulary", opening);
            }
            opening
        }
        None => {
            let (dur, opening) = timed(|| Simulator::opening_guess(&answers, &selector));
            let opening = opening?;
            log::info!("computed opening guess {} in {:.1}s", opening, dur.as_secs_f64());
            opening
        }
    };

    let simulator = Simulator::new(&answers, &selector, opening, config.max_steps);
    let runner = BatchRunner::new(simulator, config.parallel);

    let mut report = SequenceReport::create(&config.output_report_path)
        .map_err(|err| RunErr::CreateReport(config.output_report_path.clone(), err))?;
    let summary = match &config.output_tree_path {
        Some(tree_path) => {
            let tree = TreeReport::create(tree_path)
                .map_err(|err| RunErr::CreateReport(tree_path.clone(), err))?;
            runner.run(&answers, &mut (report, tree))?
        }
        None => runner.run(&answers, &mut report)?,
    };

    let (hits, misses) = selector.cache().stats();
    log::info!(
        "next guess cache: {} entries, {} hits, {} misses",
        selector.cache().len(),
        hits,
        misses,
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use crate::wordle::{Colorings, ScoringMethod};

    fn vocab(raw: &[&str]) -> Vocabulary {
        Vocabulary::new(raw.iter().map(|w| Word::parse(w).unwrap()).collect()).unwrap()
    }

    fn w(s: &str) -> Word {
        Word::parse(s).unwrap()
    }

    const TOY: [&str; 4] = ["abcde", "abcdf", "zbcde", "zbcdf"];

    #[test]
    fn test_toy_batch() {
        let answers = vocab(&TOY);
        let selector = Selector::new(answers.clone(), ScoringMethod::Entropy, 2);
        let opening = Simulator::opening_guess(&answers, &selector).unwrap();
        let runner = BatchRunner::new(Simulator::new(&answers, &selector, opening, 10), false);

        let mut traces: Vec<GameTrace> = Vec::new();
        let summary = runner.run(&answers, &mut traces).unwrap();

        assert_eq!(summary.games, 4);
        assert_eq!(summary.solved, 4);
        assert!(summary.failures.is_empty());
        assert_eq!(summary.distribution.values().sum::<usize>(), 4);
        assert!(summary.max_guesses().unwrap() <= 3);

        let secrets: Vec<Word> = traces.iter().map(|t| t.secret).collect();
        assert_eq!(secrets, answers.to_vec());
        for trace in &traces {
            assert_eq!(trace.records.last().map(|r| r.coloring), Some(Colorings::SOLVED));
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let answers = vocab(&[
            "crane", "slate", "trace", "crate", "raise",
            "arise", "stare", "roast", "toast", "beast",
        ]);
        let selector = Selector::new(answers.clone(), ScoringMethod::Entropy, 2);
        let opening = Simulator::opening_guess(&answers, &selector).unwrap();

        let mut sequential: Vec<GameTrace> = Vec::new();
        BatchRunner::new(Simulator::new(&answers, &selector, opening, 10), false)
            .run(&answers, &mut sequential)
            .unwrap();

        let mut parallel: Vec<GameTrace> = Vec::new();
        BatchRunner::new(Simulator::new(&answers, &selector, opening, 10), true)
            .run(&answers, &mut parallel)
            .unwrap();

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_failures_do_not_stop_the_batch() {
        let answers = vocab(&TOY);
        let selector = Selector::new(answers.clone(), ScoringMethod::Entropy, 2);
        let runner = BatchRunner::new(Simulator::new(&answers, &selector, w("abcde"), 10), false);

        let secrets = vec![w("abcde"), w("qqqqq"), w("zbcdf")];
        let mut traces: Vec<GameTrace> = Vec::new();
        let summary = runner.run(&secrets, &mut traces).unwrap();

        assert_eq!(summary.games, 3);
        assert_eq!(summary.solved, 2);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].trace().secret, w("qqqqq"));
        assert_eq!(traces.len(), 2);
    }

    #[test]
    fn test_summary_stats() {
        let mut summary = BatchSummary::default();
        assert_eq!(summary.mean_guesses(), None);
        assert_eq!(summary.max_guesses(), None);

        summary.solved = 4;
        summary.games = 4;
        summary.distribution.insert(2, 1);
        summary.distribution.insert(3, 3);
        assert_eq!(summary.mean_guesses(), Some(2.75));
        assert_eq!(summary.max_guesses(), Some(3));
        assert!(summary.to_string().starts_with("solved 4/4 games, mean 2.7500 guesses, max 3"));
    }

    #[test]
    fn test_run_writes_reports() {
        let dir = std::env::temp_dir()
            .join(format!("wordle-strategy-batch-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let answers_path = dir.join("answers.txt");
        let guesses_path = dir.join("guesses.txt");
        fs::write(&answers_path, TOY.join("\n")).unwrap();
        fs::write(&guesses_path, TOY.join(",")).unwrap();

        let mut config = RunConfig::new(&answers_path, &guesses_path);
        config.output_report_path = dir.join("sequences.csv");
        config.output_tree_path = Some(dir.join("tree.md"));
        config.opening_guess = Some(w("abcde"));

        let summary = run(&config).unwrap();
        assert_eq!(summary.solved, 4);

        let sequences = fs::read_to_string(&config.output_report_path).unwrap();
        let lines: Vec<&str> = sequences.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "abcde,1,abcde 22222");
        for (line, secret) in lines.iter().zip(TOY.iter()) {
            assert!(line.starts_with(&format!("{},", secret)), "{}", line);
            assert!(line.ends_with(&format!("{} 22222", secret)), "{}", line);
        }

        let tree = fs::read_to_string(dir.join("tree.md")).unwrap();
        assert_eq!(tree.lines().next(), Some("abcde"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_run_rejects_bad_config() {
        let mut config = RunConfig::new("a.txt", "g.txt");
        config.max_steps = 0;
        assert!(matches!(run(&config), Err(RunErr::Config(_))));
    }
}
