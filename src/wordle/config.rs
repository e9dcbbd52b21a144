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

use std::fs;
use std::path::{Path, PathBuf};
use clap::Args;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use super::{prelude::*, score::ScoringMethod, word::Word};

///
/// Everything a batch run needs to know. Comes either from the command line or from a JSON file
/// like:
///
/// ```json
/// {
///   "answer_vocab_path": "data/answers.txt",
///   "guess_vocab_path": "data/guesses.txt",
///   "output_tree_path": "tree.md",
///   "scoring": "mean-square",
///   "parallel": true
/// }
/// ```
///
/// Only the two vocabulary paths are required, everything else has a default.
///
#[derive(Args, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RunConfig {
    /// Word list the secrets are drawn from
    #[arg(long)]
    pub answer_vocab_path: PathBuf,

    /// Word list of every allowed guess
    #[arg(long)]
    pub guess_vocab_path: PathBuf,

    /// Where to write one line per game
    #[arg(long, default_value = DEFAULT_REPORT_PATH)]
    #[serde(default = "default_report_path")]
    pub output_report_path: PathBuf,

    /// Where to write the decision tree (skipped when not set)
    #[arg(long)]
    #[serde(default)]
    pub output_tree_path: Option<PathBuf>,

    /// Opening guess to use instead of computing the best one
    #[arg(long)]
    #[serde(default)]
    pub opening_guess: Option<Word>,

    /// How guesses are ranked
    #[arg(long, value_enum, default_value_t)]
    #[serde(default)]
    pub scoring: ScoringMethod,

    /// Guess the first candidate once this many candidates (or fewer) remain
    #[arg(long, default_value_t = DEFAULT_SMALL_SET_THRESHOLD)]
    #[serde(default = "default_small_set_threshold")]
    pub small_set_threshold: usize,

    /// Give up on a game after this many guesses
    #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,

    /// Play the games on every core
    #[arg(long)]
    #[serde(default)]
    pub parallel: bool,
}

#[derive(Error, Debug)]
pub enum ConfigErr {
    #[error("failed to read config file {0:?}")]
    Io(PathBuf, #[source] std::io::Error),
    #[error("config file {0:?} is not valid")]
    Parse(PathBuf, #[source] serde_json::Error),
    #[error("{field} must be at least 1")]
    NotPositive { field: &'static str },
}

fn default_report_path() -> PathBuf {
    PathBuf::from(DEFAULT_REPORT_PATH)
}

fn default_small_set_threshold() -> usize {
    DEFAULT_SMALL_SET_THRESHOLD
}

fn default_max_steps() -> usize {
    DEFAULT_MAX_STEPS
}

impl RunConfig {
    /// A config with every default filled in
    pub fn new(
        answer_vocab_path: impl Into<PathBuf>,
        guess_vocab_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            answer_vocab_path: answer_vocab_path.into(),
            guess_vocab_path: guess_vocab_path.into(),
            output_report_path: default_report_path(),
            output_tree_path: None,
            opening_guess: None,
            scoring: ScoringMethod::default(),
            small_set_threshold: DEFAULT_SMALL_SET_THRESHOLD,
            max_steps: DEFAULT_MAX_STEPS,
            parallel: false,
        }
    }

    pub fn from_json(path: &Path, raw: &str) -> Result<Self, ConfigErr> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|err| ConfigErr::Parse(path.to_path_buf(), err))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads & validates a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigErr> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|err| ConfigErr::Io(path.to_path_buf(), err))?;
        log::debug!("loaded config from {:?}", path);
        Self::from_json(path, &raw)
    }

    ///
    /// A threshold of 0 would have the selector score guesses for a single candidate (pointless
    /// but harmless), and a max_steps of 0 would fail every game before it starts. Both are
    /// rejected.
    ///
    pub fn validate(&self) -> Result<(), ConfigErr> {
        if self.small_set_threshold == 0 {
            return Err(ConfigErr::NotPositive { field: "small_set_threshold" });
        }

        if self.max_steps == 0 {
            return Err(ConfigErr::NotPositive { field: "max_steps" });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const MINIMAL: &str = r#"{"answer_vocab_path": "a.txt", "guess_vocab_path": "g.txt"}"#;

    fn parse(raw: &str) -> Result<RunConfig, ConfigErr> {
        RunConfig::from_json(Path::new("test.json"), raw)
    }

    /// Merges the fields of `extra` into MINIMAL
    fn with_paths(extra: &str) -> String {
        let mut config: serde_json::Value = serde_json::from_str(MINIMAL).unwrap();
        let extra: serde_json::Value = serde_json::from_str(extra).unwrap();
        if let (Some(config), Some(extra)) = (config.as_object_mut(), extra.as_object()) {
            config.extend(extra.clone());
        }
        config.to_string()
    }

    #[test]
    fn test_minimal_json_gets_defaults() {
        let config = parse(MINIMAL).unwrap();
        assert_eq!(config, RunConfig::new("a.txt", "g.txt"));
        assert_eq!(config.output_report_path, PathBuf::from("WordleWordSequences.csv"));
    }

    #[test]
    fn test_full_json() {
        let config = parse(
            r#"{
                "answer_vocab_path": "a.txt",
                "guess_vocab_path": "g.txt",
                "output_report_path": "out.csv",
                "output_tree_path": "tree.md",
                "opening_guess": "SALET",
                "scoring": "two-ply",
                "small_set_threshold": 1,
                "max_steps": 6,
                "parallel": true
            }"#,
        )
        .unwrap();

        assert_eq!(config.output_tree_path, Some(PathBuf::from("tree.md")));
        assert_eq!(config.opening_guess, Some(Word::parse("salet").unwrap()));
        assert_eq!(config.scoring, ScoringMethod::TwoPly);
        assert_eq!(config.small_set_threshold, 1);
        assert_eq!(config.max_steps, 6);
        assert!(config.parallel);
    }

    #[test_case(r#"{"guess_vocab_path": "g.txt"}"#; "missing answers")]
    #[test_case(r#"{"opening_guess": "toolong"}"#; "bad opening")]
    #[test_case(r#"{"scoring": "vibes"}"#; "bad scoring")]
    fn test_rejects_bad_field(extra: &str) {
        assert!(matches!(parse(&with_paths(extra)), Err(ConfigErr::Parse(..))));
    }

    #[test_case("small_set_threshold")]
    #[test_case("max_steps")]
    fn test_rejects_zero(field: &'static str) {
        match parse(&with_paths(&format!(r#"{{"{}": 0}}"#, field))) {
            Err(ConfigErr::NotPositive { field: got }) => assert_eq!(got, field),
            other => panic!("expected NotPositive, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("wordle-strategy-no-such-config.json");
        assert!(matches!(RunConfig::load(&path), Err(ConfigErr::Io(..))));
    }
}
