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

use crate::mesh::combinatorial::FlatTriangulationCombinatorial;
use crate::mesh::half_edge::HalfEdge;

/// A vertex of a triangulation: an orbit of `next_at_vertex`.
///
/// The orbit is identified by its smallest half-edge in the order
/// `1, -1, 2, -2, ...`, so a `Vertex` stays meaningful across flips as long
/// as that half-edge keeps its source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Vertex {
    representative: HalfEdge,
}

impl Vertex {
    /// The vertex `e` starts at.
    pub fn source(e: HalfEdge, surface: &FlatTriangulationCombinatorial) -> Self {
        let mut representative = e;
        let mut h = surface.next_at_vertex(e);
        while h != e {
            if h.index() < representative.index() {
                representative = h;
            }
            h = surface.next_at_vertex(h);
        }
        Vertex { representative }
    }

    /// The vertex `e` ends at.
    pub fn target(e: HalfEdge, surface: &FlatTriangulationCombinatorial) -> Self {
        Self::source(-e, surface)
    }

    pub fn representative(&self) -> HalfEdge {
        self.representative
    }

    pub(crate) fn from_representative(representative: HalfEdge) -> Self {
        Vertex { representative }
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vertex({})", self.representative)
    }
}
