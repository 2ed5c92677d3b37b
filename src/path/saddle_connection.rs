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
use std::hash::{Hash, Hasher};
use std::ops::Neg;

use crate::geometry::vector::Vector;
use crate::kernel::orientation::{Ccw, ccw};
use crate::mesh::half_edge::HalfEdge;
use crate::mesh::triangulation::FlatTriangulation;
use crate::mesh::vertex::Vertex;
use crate::numeric::scalar::Coordinate;

/// A straight segment between two vertices of a surface.
///
/// `source` is the sector it leaves its first vertex in, i.e., `vector`
/// lies between `source` (inclusive) and `next_at_vertex(source)`
/// (exclusive). `target` is the sector at the second vertex that `-vector`
/// leaves in.
pub struct SaddleConnection<'a, T: Coordinate> {
    surface: &'a FlatTriangulation<T>,
    source: HalfEdge,
    target: HalfEdge,
    vector: Vector<T>,
}

fn in_sector<T: Coordinate>(surface: &FlatTriangulation<T>, sector: HalfEdge, v: &Vector<T>) -> bool {
    ccw(&surface.from_half_edge(sector), v) != Ccw::Clockwise
        && ccw(&surface.from_half_edge(surface.next_at_vertex(sector)), v) == Ccw::Clockwise
}

impl<'a, T: Coordinate> SaddleConnection<'a, T> {
    pub fn new(surface: &'a FlatTriangulation<T>, source: HalfEdge, target: HalfEdge, vector: Vector<T>) -> Self {
        assert!(!vector.is_zero(), "saddle connections must not be trivial");
        assert!(
            in_sector(surface, source, &vector),
            "{vector} does not leave its source in the sector at {source}"
        );
        assert!(
            in_sector(surface, target, &-&vector),
            "{} does not leave its target in the sector at {target}",
            -&vector
        );
        SaddleConnection {
            surface,
            source,
            target,
            vector,
        }
    }

    /// The connection along the half-edge `e`.
    pub fn from_half_edge(surface: &'a FlatTriangulation<T>, e: HalfEdge) -> Self {
        SaddleConnection {
            surface,
            source: e,
            target: -e,
            vector: surface.from_half_edge(e),
        }
    }

    pub fn surface(&self) -> &'a FlatTriangulation<T> {
        self.surface
    }

    pub fn source(&self) -> HalfEdge {
        self.source
    }

    pub fn target(&self) -> HalfEdge {
        self.target
    }

    pub fn vector(&self) -> &Vector<T> {
        &self.vector
    }

    pub fn start(&self) -> Vertex {
        Vertex::source(self.source, self.surface)
    }

    pub fn end(&self) -> Vertex {
        Vertex::source(self.target, self.surface)
    }
}

impl<T: Coordinate> Clone for SaddleConnection<'_, T> {
    fn clone(&self) -> Self {
        SaddleConnection {
            surface: self.surface,
            source: self.source,
            target: self.target,
            vector: self.vector.clone(),
        }
    }
}

impl<'a, T: Coordinate> Neg for &SaddleConnection<'a, T> {
    type Output = SaddleConnection<'a, T>;

    fn neg(self) -> Self::Output {
        -self.clone()
    }
}

impl<'a, T: Coordinate> Neg for SaddleConnection<'a, T> {
    type Output = SaddleConnection<'a, T>;

    fn neg(self) -> Self::Output {
        SaddleConnection {
            surface: self.surface,
            source: self.target,
            target: self.source,
            vector: -self.vector,
        }
    }
}

impl<T: Coordinate> PartialEq for SaddleConnection<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.surface, other.surface)
            && self.source == other.source
            && self.target == other.target
            && self.vector == other.vector
    }
}

impl<T: Coordinate> Eq for SaddleConnection<'_, T> {}

impl<T: Coordinate> Hash for SaddleConnection<'_, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.hash(state);
        self.target.hash(state);
        self.vector.hash(state);
    }
}

impl<T: Coordinate> fmt::Display for SaddleConnection<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} from {} to {}", self.vector, self.source, self.target)
    }
}

impl<T: Coordinate> fmt::Debug for SaddleConnection<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
