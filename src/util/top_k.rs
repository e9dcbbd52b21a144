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

use std::iter::FusedIterator;
use std::ops::Range;

///
/// Keeps the K highest scored elements of an iterator, without allocating a Vec and sorting it.
///
/// Ties keep the element which was seen first: a later element has to be strictly greater than an
/// earlier one to be ranked above it. Combined with a deterministic input order, this makes the
/// output deterministic too.
///
/// Elements come out highest score first.
///
pub struct TopK<E, const K: usize> {
    items: [Option<E>; K],
    alive: Range<usize>,
}

impl<Element, const K: usize> TopK<Element, K> {
    pub fn new<Itr, Score, ScoringFunc>(iter: Itr, f: ScoringFunc) -> Self
    where
        Itr: Iterator<Item = Element>,
        ScoringFunc: Fn(&Element) -> Score,
        Score: PartialOrd<Score>,
        [Option<Element>; K]: Default,
        [Option<Score>; K]: Default,
    {
        // scores[x] is f(items[x]) and both arrays stay sorted from greatest -> least score
        let mut items: [Option<Element>; K] = Default::default();
        let mut scores: [Option<Score>; K] = Default::default();
        let mut size = 0;

        for next in iter {
            let score = f(&next);

            // the first slot which is empty or holds something strictly worse
            let slot = scores[..size]
                .iter()
                .position(|other| matches!(other, Some(other) if other < &score))
                .unwrap_or(size);

            if slot < K {
                shift_insert(&mut scores, Some(score), slot);
                shift_insert(&mut items, Some(next), slot);
                size = (size + 1).min(K);
            }
        }

        Self {
            items,
            alive: 0..size,
        }
    }
}

impl<Element, const K: usize> Iterator for TopK<Element, K> {
    type Item = Element;

    fn next(&mut self) -> Option<Self::Item> {
        self.alive.next().and_then(|idx| self.items[idx].take())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.alive.len();
        (remaining, Some(remaining))
    }
}

impl<Element, const K: usize> ExactSizeIterator for TopK<Element, K> {}
impl<Element, const K: usize> FusedIterator for TopK<Element, K> {}

/// Puts `tmp` at `idx`, pushing everything after it one slot to the right (the last one falls off)
#[inline]
fn shift_insert<E, const N: usize>(elems: &mut [E; N], mut tmp: E, idx: usize) {
    for elem in elems[idx..].iter_mut() {
        std::mem::swap(&mut tmp, elem);
    }
}

pub trait TopKExt: Iterator + Sized {
    fn top_k<Score, ScoreFn, const N: usize>(self, score_f: ScoreFn) -> TopK<Self::Item, N>
    where
        ScoreFn: Fn(&Self::Item) -> Score,
        Score: PartialOrd<Score>,
        [Option<Self::Item>; N]: Default,
        [Option<Score>; N]: Default,
    {
        TopK::new(self, score_f)
    }
}

impl<I> TopKExt for I where I: Iterator + Sized {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_highest_in_order() {
        let out: Vec<i32> = [5, 1, 9, 3, 7].into_iter().top_k::<_, _, 3>(|v| *v).collect();
        assert_eq!(out, vec![9, 7, 5]);
    }

    #[test]
    fn test_fewer_than_k() {
        let top = [2, 1].into_iter().top_k::<_, _, 4>(|v| *v);
        assert_eq!(top.len(), 2);
        assert_eq!(top.collect::<Vec<_>>(), vec![2, 1]);
    }

    #[test]
    fn test_ties_keep_first_seen() {
        let out: Vec<(char, i32)> = [('a', 1), ('b', 2), ('c', 2), ('d', 1)]
            .into_iter()
            .top_k::<_, _, 3>(|(_, v)| *v)
            .collect();
        assert_eq!(out, vec![('b', 2), ('c', 2), ('a', 1)]);
    }

    #[test]
    fn test_tuple_scores() {
        let out: Vec<&str> = [("x", 1.0, false), ("y", 1.0, true), ("z", 0.5, true)]
            .into_iter()
            .top_k::<_, _, 1>(|(_, score, flag)| (*score, *flag))
            .map(|(w, _, _)| w)
            .collect();
        assert_eq!(out, vec!["y"]);
    }
}
