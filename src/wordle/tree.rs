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
use std::iter::FusedIterator;
use thiserror::Error;
use super::{color::*, word::Word};

/// Index of a node in a DecisionTree
pub type NodeId = usize;

#[derive(Clone, Debug)]
struct Node {
    guess: Word,
    /// BTreeMap so children come out in Colorings order (== "01202" text order)
    children: BTreeMap<Colorings, NodeId>,
}

impl Node {
    fn new(guess: Word) -> Self {
        Self { guess, children: BTreeMap::new() }
    }
}

///
/// Every game of a batch folded into one tree: the root is the opening guess, and below a node the
/// edge for each coloring leads to the guess played after seeing it.
///
/// Nodes live in a Vec and point at each other by index. There are no cycles (every node has
/// exactly one parent), the Vec just keeps ownership simple.
///
#[derive(Clone, Debug, Default)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeErr {
    #[error("cannot insert an empty game")]
    EmptyTrace,
    #[error("after [{path}] the tree plays '{existing}' but the game played '{found}'")]
    ConflictingGuess {
        path: String,
        existing: Word,
        found: Word,
    },
}

const ROOT: NodeId = 0;

impl DecisionTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The number of nodes (guesses) in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn root(&self) -> Option<NodeId> {
        if self.is_empty() { None } else { Some(ROOT) }
    }

    /// The guess played at `id`, None if `id` isn't a node of this tree
    pub fn guess(&self, id: NodeId) -> Option<Word> {
        self.nodes.get(id).map(|node| node.guess)
    }

    /// The child reached by `coloring` from `id`, if any game has gone that way
    pub fn child(&self, id: NodeId, coloring: Colorings) -> Option<NodeId> {
        self.nodes.get(id)?.children.get(&coloring).copied()
    }

    /// The children of `id` in coloring order (nothing if `id` isn't a node of this tree)
    pub fn children(&self, id: NodeId) -> impl Iterator<Item=(Colorings, NodeId)> + '_ {
        self.nodes
            .get(id)
            .into_iter()
            .flat_map(|node| node.children.iter().map(|(c, n)| (*c, *n)))
    }

    ///
    /// Adds one game, given as its (guess, coloring) moves, to the tree.
    ///
    /// The walk starts at the root and follows each coloring, creating nodes that don't exist yet.
    /// It stops at the all-green coloring: the guess that solved the game is a node, but nothing
    /// hangs below it.
    ///
    /// A game whose guess disagrees with a guess already in the tree at the same position is
    /// rejected. The strategy is deterministic, so that only happens when mixing games from
    /// different runs. Nothing is modified in that case: conflicts can only be found on existing
    /// nodes, and those all come before the first new one.
    ///
    pub fn insert<I>(&mut self, moves: I) -> Result<(), TreeErr>
    where
        I: IntoIterator<Item=(Word, Colorings)>,
    {
        let mut moves = moves.into_iter();
        let (first, mut coloring) = moves.next().ok_or(TreeErr::EmptyTrace)?;
        let mut path: Vec<Colorings> = Vec::new();

        let mut current = match self.root() {
            Some(root) => self.check_guess(root, first, &path)?,
            None => self.push_node(first),
        };

        while !coloring.is_solved() {
            let (guess, next_coloring) = match moves.next() {
                Some(next) => next,
                // the game ended without being solved, keep what we have
                None => break,
            };
            path.push(coloring);

            current = match self.child(current, coloring) {
                Some(child) => self.check_guess(child, guess, &path)?,
                None => {
                    let child = self.push_node(guess);
                    self.nodes[current].children.insert(coloring, child);
                    child
                }
            };
            coloring = next_coloring;
        }

        Ok(())
    }

    ///
    /// Renders the tree as nested, collapsible HTML sections (which markdown viewers display as a
    /// clickable outline). The lines come out lazily.
    ///
    /// * the first line is just the opening guess
    /// * a node with children becomes a <details> block, summarized as "coloring guess"
    /// * a node without children is a single "coloring guess<br>" line
    /// * siblings are ordered by coloring, "00000" first
    /// * each level is indented two more spaces than its parent
    ///
    pub fn render(&self) -> RenderLines<'_> {
        RenderLines {
            tree: self,
            pending: self.root().map(RenderStep::Root).into_iter().collect(),
        }
    }

    fn push_node(&mut self, guess: Word) -> NodeId {
        self.nodes.push(Node::new(guess));
        self.nodes.len() - 1
    }

    fn check_guess(&self, id: NodeId, found: Word, path: &[Colorings]) -> Result<NodeId, TreeErr> {
        let existing = self.nodes[id].guess;
        if existing != found {
            return Err(TreeErr::ConflictingGuess {
                path: path.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" "),
                existing,
                found,
            });
        }

        Ok(id)
    }
}

enum RenderStep {
    Root(NodeId),
    Open { coloring: Colorings, id: NodeId, depth: usize },
    Summary { coloring: Colorings, id: NodeId, depth: usize },
    Close { depth: usize },
}

///
/// Lazy iterator over the lines of DecisionTree::render.
///
/// This is a depth first walk with an explicit stack of what's left to print. Steps are pushed in
/// reverse so they pop in order.
///
pub struct RenderLines<'a> {
    tree: &'a DecisionTree,
    pending: Vec<RenderStep>,
}

impl<'a> RenderLines<'a> {
    fn push_children(&mut self, id: NodeId, depth: usize) {
        let children: Vec<(Colorings, NodeId)> = self.tree.children(id).collect();
        for (coloring, child) in children.into_iter().rev() {
            self.pending.push(RenderStep::Open { coloring, id: child, depth });
        }
    }
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth.saturating_sub(1))
}

impl<'a> Iterator for RenderLines<'a> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let line = match self.pending.pop()? {
            RenderStep::Root(id) => {
                self.push_children(id, 1);
                self.tree.nodes[id].guess.to_string()
            }
            RenderStep::Open { coloring, id, depth } => {
                if self.tree.nodes[id].children.is_empty() {
                    format!("{}{} {}<br>", indent(depth), coloring, self.tree.nodes[id].guess)
                } else {
                    self.pending.push(RenderStep::Close { depth });
                    self.push_children(id, depth + 1);
                    self.pending.push(RenderStep::Summary { coloring, id, depth });
                    format!("{}<details>", indent(depth))
                }
            }
            RenderStep::Summary { coloring, id, depth } => {
                let guess = self.tree.nodes[id].guess;
                format!("{}<summary>{} {}</summary>", indent(depth), coloring, guess)
            }
            RenderStep::Close { depth } => format!("{}</details>", indent(depth)),
        };

        Some(line)
    }
}

impl<'a> FusedIterator for RenderLines<'a> {}
