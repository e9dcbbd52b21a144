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
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;
use super::{game::*, tree::*};

#[derive(Error, Debug)]
pub enum ReportErr {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Tree(#[from] TreeErr),
}

///
/// Receives the outcome of every game in a batch, in answer vocabulary order.
///
/// finish() is called once after the last game.
///
pub trait ReportSink {
    fn record_game(&mut self, trace: &GameTrace) -> Result<(), ReportErr>;

    fn record_failure(&mut self, _err: &GameErr) -> Result<(), ReportErr> {
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ReportErr> {
        Ok(())
    }
}

/// Collecting into a Vec is handy for tests & callers who want the traces in memory
impl ReportSink for Vec<GameTrace> {
    fn record_game(&mut self, trace: &GameTrace) -> Result<(), ReportErr> {
        self.push(trace.clone());
        Ok(())
    }
}

/// Sends everything to both sinks
impl<A, B> ReportSink for (A, B)
where
    A: ReportSink,
    B: ReportSink,
{
    fn record_game(&mut self, trace: &GameTrace) -> Result<(), ReportErr> {
        self.0.record_game(trace)?;
        self.1.record_game(trace)
    }

    fn record_failure(&mut self, err: &GameErr) -> Result<(), ReportErr> {
        self.0.record_failure(err)?;
        self.1.record_failure(err)
    }

    fn finish(&mut self) -> Result<(), ReportErr> {
        self.0.finish()?;
        self.1.finish()
    }
}

///
/// Writes one line per game:
///
///   secret,number of guesses,guess coloring,guess coloring,...
///
/// for example "cigar,3,salet 00000,courd 10010,cigar 22222"
///
pub struct SequenceReport<W: Write> {
    out: W,
}

impl<W: Write> SequenceReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl SequenceReport<BufWriter<fs::File>> {
    /// Creates (or truncates) the file at `path`
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self::new(BufWriter::new(create_truncated(path)?)))
    }
}

impl<W: Write> ReportSink for SequenceReport<W> {
    fn record_game(&mut self, trace: &GameTrace) -> Result<(), ReportErr> {
        write!(self.out, "{},{}", trace.secret, trace.num_guesses())?;
        for record in &trace.records {
            write!(self.out, ",{} {}", record.guess, record.coloring)?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ReportErr> {
        self.out.flush()?;
        Ok(())
    }
}

///
/// Folds every game into a DecisionTree, and writes the rendered tree when the batch finishes.
///
pub struct TreeReport<W: Write> {
    tree: DecisionTree,
    out: W,
}

impl<W: Write> TreeReport<W> {
    pub fn new(out: W) -> Self {
        Self {
            tree: DecisionTree::new(),
            out,
        }
    }

    pub fn tree(&self) -> &DecisionTree {
        &self.tree
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl TreeReport<BufWriter<fs::File>> {
    /// Creates (or truncates) the file at `path`
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self::new(BufWriter::new(create_truncated(path)?)))
    }
}

impl<W: Write> ReportSink for TreeReport<W> {
    fn record_game(&mut self, trace: &GameTrace) -> Result<(), ReportErr> {
        self.tree.insert(trace.moves())?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ReportErr> {
        for line in self.tree.render() {
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()?;
        log::debug!("wrote decision tree with {} nodes", self.tree.len());
        Ok(())
    }
}

fn create_truncated(path: impl AsRef<Path>) -> io::Result<fs::File> {
    fs::File::options()
        .truncate(true)
        .create(true)
        .write(true)
        .open(path)
}
