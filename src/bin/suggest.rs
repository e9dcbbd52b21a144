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
use thiserror::Error;
use wordle_strategy::wordle::*;

///
/// Suggests the next guess given the moves played so far, e.g.
///
///   suggest --answers answers.txt --guesses guesses.txt salet=01000 crony=20100
///
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Word list the secret is drawn from
    #[arg(long)]
    answers: PathBuf,

    /// Word list of every allowed guess
    #[arg(long)]
    guesses: PathBuf,

    /// How guesses are ranked
    #[arg(long, value_enum, default_value_t)]
    scoring: ScoringMethod,

    /// Moves played so far, as guess=coloring (coloring digits: 0 absent, 1 misplaced, 2 correct)
    moves: Vec<String>,
}

#[derive(Error, Debug)]
enum SuggestErr {
    #[error("expected guess=coloring, got '{0}'")]
    BadMove(String),
    #[error(transparent)]
    Word(#[from] WordErr),
    #[error(transparent)]
    Coloring(#[from] ColoringsErr),
    #[error(transparent)]
    Load(#[from] LoadDataErr),
    #[error("no answer is consistent with these moves")]
    NoCandidates,
}

fn parse_move(raw: &str) -> Result<(Word, Colorings), SuggestErr> {
    let (guess, coloring) = raw
        .split_once('=')
        .ok_or_else(|| SuggestErr::BadMove(raw.to_string()))?;

    Ok((guess.parse()?, coloring.parse()?))
}

fn suggest(args: &Args) -> Result<(), SuggestErr> {
    let moves = args.moves
        .iter()
        .map(|raw| parse_move(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let (answers, guesses) = load_vocabularies(&args.answers, &args.guesses)?;
    let mut candidates: Vec<Word> = answers.to_vec();
    for (guess, coloring) in moves {
        candidates = filter_candidates(&candidates, guess, coloring);
        log::debug!("{} {} leaves {} candidates", guess, coloring, candidates.len());
    }

    if candidates.is_empty() {
        return Err(SuggestErr::NoCandidates);
    }

    println!("{} candidates remain", candidates.len());
    if candidates.len() <= N_RECOMMENDATIONS {
        let listed: Vec<&str> = candidates.iter().map(|w| w.as_str()).collect();
        println!("  {}", listed.join(" "));
    }

    let selector = Selector::new(guesses, args.scoring, DEFAULT_SMALL_SET_THRESHOLD);
    let (dur, top) = timed(|| selector.top_guesses::<N_RECOMMENDATIONS>(&candidates));
    for (idx, scored) in top.enumerate() {
        let marker = if scored.is_candidate { "*" } else { " " };
        println!("{:>2}. {}{} {:.4}", idx + 1, scored.word, marker, scored.score);
    }
    log::info!("scored {} guesses in {:.2}s", selector.guesses().len(), dur.as_secs_f64());

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(err) = suggest(&Args::parse()) {
        log::error!("{}", err);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_parse_move() {
        let (guess, coloring) = parse_move("salet=01000").unwrap();
        assert_eq!(guess, Word::parse("salet").unwrap());
        assert_eq!(coloring.to_string(), "01000");

        let (_, coloring) = parse_move("CRONY=bygbb").unwrap();
        assert_eq!(coloring.to_string(), "01200");
    }

    #[test_case("salet"; "no separator")]
    #[test_case("salet:01000"; "wrong separator")]
    fn test_parse_move_needs_separator(raw: &str) {
        assert!(matches!(parse_move(raw), Err(SuggestErr::BadMove(got)) if got == raw));
    }

    #[test]
    fn test_parse_move_bad_parts() {
        assert!(matches!(parse_move("sal=01000"), Err(SuggestErr::Word(_))));
        assert!(matches!(parse_move("salet=0100"), Err(SuggestErr::Coloring(_))));
    }

    #[test]
    fn test_args() {
        let args = Args::try_parse_from([
            "suggest", "--answers", "a.txt", "--guesses", "g.txt", "--scoring", "mean-square",
            "salet=01000", "crony=20100",
        ])
        .unwrap();
        assert_eq!(args.answers, PathBuf::from("a.txt"));
        assert_eq!(args.scoring, ScoringMethod::MeanSquare);
        assert_eq!(args.moves, vec!["salet=01000", "crony=20100"]);
    }
}
