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
use std::path::PathBuf;
use std::process;
use clap::Parser;
use env_logger::Env;
use wordle_strategy::wordle::*;

/// Plays the strategy against every answer and writes the reports
#[derive(Debug, Parser)]
#[command(author, version, about)]
enum Cli {
    /// Configure the run with command line flags
    Run(RunConfig),
    /// Configure the run with a JSON file
    Config {
        path: PathBuf,
    },
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = match Cli::parse() {
        Cli::Run(config) => config,
        Cli::Config { path } => match RunConfig::load(&path) {
            Ok(config) => config,
            Err(err) => fail(&err),
        },
    };

    match run(&config) {
        Ok(summary) => {
            log::info!("{}", summary);
            for (guesses, games) in &summary.distribution {
                log::info!("{:>3} guesses: {}", guesses, games);
            }
            if !summary.failures.is_empty() {
                log::warn!("{} games were not solved", summary.failures.len());
            }
        }
        Err(err) => fail(&err),
    }
}

/// Logs the error (and everything that caused it) then exits
fn fail(err: &dyn std::error::Error) -> ! {
    log::error!("{}", err);
    let mut source = err.source();
    while let Some(cause) = source {
        log::error!("  caused by: {}", cause);
        source = cause.source();
    }

    process::exit(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_flags_fill_defaults() {
        let cli = Cli::try_parse_from([
            "simulate", "run", "--answer-vocab-path", "a.txt", "--guess-vocab-path", "g.txt",
        ])
        .unwrap();
        match cli {
            Cli::Run(config) => assert_eq!(config, RunConfig::new("a.txt", "g.txt")),
            other => panic!("expected run, got {:?}", other),
        }
    }

    #[test]
    fn test_run_flags() {
        let cli = Cli::try_parse_from([
            "simulate", "run", "--answer-vocab-path", "a.txt", "--guess-vocab-path", "g.txt",
            "--output-tree-path", "tree.md", "--opening-guess", "salet", "--scoring", "two-ply",
            "--small-set-threshold", "1", "--max-steps", "6", "--parallel",
        ])
        .unwrap();
        let config = match cli {
            Cli::Run(config) => config,
            other => panic!("expected run, got {:?}", other),
        };
        assert_eq!(config.output_tree_path, Some(PathBuf::from("tree.md")));
        assert_eq!(config.opening_guess, Some(Word::parse("salet").unwrap()));
        assert_eq!(config.scoring, ScoringMethod::TwoPly);
        assert_eq!(config.small_set_threshold, 1);
        assert_eq!(config.max_steps, 6);
        assert!(config.parallel);
    }

    #[test]
    fn test_config_subcommand() {
        let cli = Cli::try_parse_from(["simulate", "config", "run.json"]).unwrap();
        assert!(matches!(cli, Cli::Config { path } if path == PathBuf::from("run.json")));
    }

    #[test]
    fn test_run_needs_vocabularies() {
        assert!(Cli::try_parse_from(["simulate", "run"]).is_err());
        assert!(Cli::try_parse_from(["simulate", "run", "--opening-guess", "toolong"]).is_err());
    }
}
