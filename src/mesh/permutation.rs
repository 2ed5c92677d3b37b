// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::{FlatsurfError, Result};
use crate::mesh::half_edge::{Edge, HalfEdge};

/// Elements of a finite domain `0..n` that permutations and sets act on.
pub trait Indexed: Copy + Eq + fmt::Debug + fmt::Display {
    fn index(&self) -> usize;
    fn from_index(index: usize) -> Self;
    fn is_valid(&self) -> bool {
        true
    }
}

impl Indexed for HalfEdge {
    #[inline]
    fn index(&self) -> usize {
        HalfEdge::index(*self)
    }
    #[inline]
    fn from_index(index: usize) -> Self {
        HalfEdge::from_index(index)
    }
    #[inline]
    fn is_valid(&self) -> bool {
        HalfEdge::is_valid(*self)
    }
}

impl Indexed for Edge {
    #[inline]
    fn index(&self) -> usize {
        Edge::index(*self)
    }
    #[inline]
    fn from_index(index: usize) -> Self {
        Edge::from_index(index)
    }
}

/// A bijection of a finite domain together with its inverse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Permutation<K: Indexed> {
    image: Vec<K>,
    preimage: Vec<K>,
}

impl<K: Indexed> Permutation<K> {
    /// Builds the permutation mapping every element of a cycle to its
    /// successor. The cycles must cover `0..n` exactly once.
    pub fn from_cycles(cycles: &[Vec<K>]) -> Result<Self> {
        let size: usize = cycles.iter().map(Vec::len).sum();
        let mut image: Vec<Option<K>> = vec![None; size];
        for cycle in cycles {
            if cycle.is_empty() {
                return Err(FlatsurfError::InvalidPermutation {
                    message: "empty cycle".to_string(),
                });
            }
            for (i, &x) in cycle.iter().enumerate() {
                if !x.is_valid() || x.index() >= size {
                    return Err(FlatsurfError::InvalidPermutation {
                        message: format!("{x} is not in the domain of size {size}"),
                    });
                }
                if image[x.index()].is_some() {
                    return Err(FlatsurfError::InvalidPermutation {
                        message: format!("{x} appears more than once"),
                    });
                }
                image[x.index()] = Some(cycle[(i + 1) % cycle.len()]);
            }
        }
        // Every slot is filled: `size` distinct in-range elements were placed.
        let image: Vec<K> = image.into_iter().flatten().collect();
        Ok(Self::from_image(image))
    }

    /// A uniformly random permutation of `domain`.
    ///
    /// The indices of `domain` must be exactly `0..domain.len()` in some order.
    pub fn random<R: Rng + ?Sized>(domain: &[K], rng: &mut R) -> Self {
        let mut seen = vec![false; domain.len()];
        for x in domain {
            assert!(
                x.index() < domain.len() && !seen[x.index()],
                "{x} does not belong to a domain of size {}",
                domain.len()
            );
            seen[x.index()] = true;
        }
        let mut shuffled = domain.to_vec();
        shuffled.shuffle(rng);
        let mut image = domain.to_vec();
        for (x, y) in domain.iter().zip(shuffled) {
            image[x.index()] = y;
        }
        Self::from_image(image)
    }

    fn from_image(image: Vec<K>) -> Self {
        let mut preimage = image.clone();
        for (i, y) in image.iter().enumerate() {
            preimage[y.index()] = K::from_index(i);
        }
        Permutation { image, preimage }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.image.len()
    }

    pub fn domain(&self) -> impl Iterator<Item = K> + '_ {
        (0..self.size()).map(K::from_index)
    }

    #[inline]
    pub fn apply(&self, x: K) -> K {
        self.image[x.index()]
    }

    #[inline]
    pub fn preimage(&self, x: K) -> K {
        self.preimage[x.index()]
    }

    /// The cycle containing `x`, starting at `x`.
    pub fn cycle(&self, x: K) -> Vec<K> {
        let mut cycle = vec![x];
        let mut y = self.apply(x);
        while y != x {
            cycle.push(y);
            y = self.apply(y);
        }
        cycle
    }

    /// All cycles, each starting at its smallest element.
    pub fn cycles(&self) -> Vec<Vec<K>> {
        let mut seen = vec![false; self.size()];
        let mut cycles = Vec::new();
        for x in self.domain() {
            if seen[x.index()] {
                continue;
            }
            let cycle = self.cycle(x);
            for y in &cycle {
                seen[y.index()] = true;
            }
            cycles.push(cycle);
        }
        cycles
    }

    /// Appends `count` fixed points to the domain.
    pub(crate) fn grow(&mut self, count: usize) {
        let size = self.size();
        for i in size..size + count {
            self.image.push(K::from_index(i));
            self.preimage.push(K::from_index(i));
        }
    }

    /// Takes `x` out of its cycle and reinserts it right after `after`.
    pub(crate) fn relocate(&mut self, x: K, after: K) {
        assert!(x != after, "cannot place {x} after itself");
        let (p, n) = (self.preimage(x), self.apply(x));
        self.image[p.index()] = n;
        self.preimage[n.index()] = p;

        let n = self.apply(after);
        self.image[after.index()] = x;
        self.preimage[x.index()] = after;
        self.image[x.index()] = n;
        self.preimage[n.index()] = x;
    }
}

impl<K: Indexed> fmt::Display for Permutation<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cycle in self.cycles() {
            write!(f, "(")?;
            for (i, x) in cycle.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{x}")?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn he(ids: &[i32]) -> Vec<HalfEdge> {
        ids.iter().map(|&id| HalfEdge::new(id)).collect()
    }

    #[test]
    fn cycles_round_trip() {
        let p = Permutation::from_cycles(&[he(&[1, 3, 2, -1, -3, -2])]).unwrap();
        assert_eq!(p.apply(HalfEdge::new(-1)), HalfEdge::new(-3));
        assert_eq!(p.preimage(HalfEdge::new(1)), HalfEdge::new(-2));
        assert_eq!(Permutation::from_cycles(&p.cycles()).unwrap(), p);
        assert_eq!(p.to_string(), "(1, 3, 2, -1, -3, -2)");
    }

    #[test]
    fn invalid_cycles_are_rejected() {
        assert!(Permutation::from_cycles(&[he(&[1, 3, -1])]).is_err());
        assert!(Permutation::from_cycles(&[he(&[1, -1]), he(&[1])]).is_err());
        assert!(Permutation::from_cycles(&[he(&[1, -1]), vec![]]).is_err());
        assert!(Permutation::from_cycles(&[vec![HalfEdge::default(), HalfEdge::new(1)]]).is_err());
    }

    #[test]
    fn relocate_keeps_a_bijection() {
        let mut p = Permutation::from_cycles(&[he(&[1, 2, 3]), he(&[-1, -2, -3])]).unwrap();
        p.relocate(HalfEdge::new(1), HalfEdge::new(-2));
        assert_eq!(p.to_string(), "(1, -3, -1, -2)(2, 3)");
        for x in p.domain() {
            assert_eq!(p.preimage(p.apply(x)), x);
        }
        p.grow(2);
        assert_eq!(p.size(), 8);
        assert_eq!(p.apply(HalfEdge::new(-4)), HalfEdge::new(-4));
    }

    #[test]
    fn random_permutations_stay_on_their_domain() {
        use rand::SeedableRng;
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let domain: Vec<HalfEdge> = (0..6).rev().map(HalfEdge::from_index).collect();
        let p = Permutation::random(&domain, &mut rng);
        assert_eq!(p.size(), 6);
        for x in p.domain() {
            assert_eq!(p.preimage(p.apply(x)), x);
        }
    }

    #[test]
    #[should_panic(expected = "does not belong to a domain of size 2")]
    fn random_permutations_need_a_dense_domain() {
        let mut rng = rand::rng();
        Permutation::random(&he(&[1, 2]), &mut rng);
    }
}
