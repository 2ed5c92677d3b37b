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
use std::marker::PhantomData;

use crate::mesh::half_edge::{Edge, HalfEdge};
use crate::mesh::permutation::Indexed;

/// A subset of the (half-)edges of a triangulation, stored as a bitmap over
/// the index domain.
#[derive(Clone, Debug)]
pub struct IndexedSet<K: Indexed> {
    members: Vec<bool>,
    len: usize,
    _marker: PhantomData<K>,
}

pub type HalfEdgeSet = IndexedSet<HalfEdge>;
pub type EdgeSet = IndexedSet<Edge>;

impl<K: Indexed> IndexedSet<K> {
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
            len: 0,
            _marker: PhantomData,
        }
    }

    /// An empty set with room for the first `capacity` elements of the domain.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            members: vec![false; capacity],
            len: 0,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn contains(&self, x: K) -> bool {
        x.is_valid() && self.members.get(x.index()).copied().unwrap_or(false)
    }

    /// Returns whether `x` was newly added.
    pub fn insert(&mut self, x: K) -> bool {
        assert!(x.is_valid(), "cannot insert the invalid element {x}");
        let i = x.index();
        if i >= self.members.len() {
            self.members.resize(i + 1, false);
        }
        if self.members[i] {
            return false;
        }
        self.members[i] = true;
        self.len += 1;
        true
    }

    /// Returns whether `x` was present.
    pub fn erase(&mut self, x: K) -> bool {
        assert!(x.is_valid(), "cannot erase the invalid element {x}");
        match self.members.get_mut(x.index()) {
            Some(member) if *member => {
                *member = false;
                self.len -= 1;
                true
            }
            _ => false,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Members in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = K> + '_ {
        self.members
            .iter()
            .enumerate()
            .filter(|(_, member)| **member)
            .map(|(i, _)| K::from_index(i))
    }

    pub fn disjoint(&self, other: &Self) -> bool {
        self.members
            .iter()
            .zip(&other.members)
            .all(|(a, b)| !(*a && *b))
    }
}

impl<K: Indexed> Default for IndexedSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Indexed> PartialEq for IndexedSet<K> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().all(|x| other.contains(x))
    }
}

impl<K: Indexed> Eq for IndexedSet<K> {}

impl<K: Indexed> FromIterator<K> for IndexedSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<K: Indexed> Extend<K> for IndexedSet<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for x in iter {
            self.insert(x);
        }
    }
}

impl<K: Indexed> fmt::Display for IndexedSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, x) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{x}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_insertion_order_and_capacity() {
        let a: HalfEdgeSet = [-2, 1, 3].into_iter().map(HalfEdge::new).collect();
        let mut b = HalfEdgeSet::with_capacity(64);
        for id in [3, 1, -2] {
            assert!(b.insert(HalfEdge::new(id)));
        }
        assert!(!b.insert(HalfEdge::new(1)));
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "{1, -2, 3}");
    }

    #[test]
    fn erase_and_disjoint() {
        let mut a: EdgeSet = [1, 2].into_iter().map(Edge::new).collect();
        let b: EdgeSet = [3].into_iter().map(Edge::new).collect();
        assert!(a.disjoint(&b));
        assert!(a.erase(Edge::new(2)));
        assert!(!a.erase(Edge::new(2)));
        assert!(!a.erase(Edge::new(40)));
        assert_eq!(a.len(), 1);
        a.insert(Edge::new(3));
        assert!(!a.disjoint(&b));
    }

    #[test]
    #[should_panic(expected = "invalid")]
    fn invalid_half_edge_is_rejected() {
        HalfEdgeSet::new().insert(HalfEdge::default());
    }
}
