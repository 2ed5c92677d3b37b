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
use std::ops::Neg;

/// An oriented edge of a triangulation, identified by a non-zero signed id.
///
/// `-e` is the same edge with the opposite orientation. `HalfEdge::default()`
/// is the reserved invalid half-edge `0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct HalfEdge(i32);

impl HalfEdge {
    #[inline]
    pub fn new(id: i32) -> Self {
        assert!(id != 0, "half-edge 0 is reserved");
        HalfEdge(id)
    }

    #[inline]
    pub fn id(self) -> i32 {
        self.0
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.0 != 0
    }

    #[inline]
    pub fn edge(self) -> Edge {
        Edge::new(self.0.abs())
    }

    /// Position in the order `1, -1, 2, -2, ...`.
    #[inline]
    pub fn index(self) -> usize {
        debug_assert!(self.is_valid());
        let magnitude = self.0.unsigned_abs() as usize;
        if self.0 > 0 { 2 * (magnitude - 1) } else { 2 * (magnitude - 1) + 1 }
    }

    #[inline]
    pub fn from_index(index: usize) -> Self {
        let magnitude = (index / 2 + 1) as i32;
        if index % 2 == 0 { HalfEdge(magnitude) } else { HalfEdge(-magnitude) }
    }
}

impl Neg for HalfEdge {
    type Output = HalfEdge;
    #[inline]
    fn neg(self) -> HalfEdge {
        HalfEdge(-self.0)
    }
}

impl From<i32> for HalfEdge {
    fn from(id: i32) -> Self {
        HalfEdge::new(id)
    }
}

impl fmt::Display for HalfEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An unoriented edge; its positive half-edge has the same id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge(u32);

impl Edge {
    #[inline]
    pub fn new(id: i32) -> Self {
        assert!(id > 0, "edges are numbered from 1");
        Edge(id as u32)
    }

    #[inline]
    pub fn id(self) -> i32 {
        self.0 as i32
    }

    #[inline]
    pub fn positive(self) -> HalfEdge {
        HalfEdge(self.id())
    }

    #[inline]
    pub fn negative(self) -> HalfEdge {
        HalfEdge(-self.id())
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize - 1
    }

    #[inline]
    pub fn from_index(index: usize) -> Self {
        Edge(index as u32 + 1)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
