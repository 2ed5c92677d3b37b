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

use crate::mesh::half_edge::HalfEdge;
use crate::mesh::half_edge_map::HalfEdgeMap;
use crate::mesh::triangulation::FlatTriangulation;
use crate::numeric::scalar::Coordinate;

/// The result of transforming a surface: the new surface and where each
/// half-edge of the old surface went.
pub struct Deformation<T: Coordinate> {
    surface: FlatTriangulation<T>,
    mapping: HalfEdgeMap<Option<HalfEdge>>,
}

impl<T: Coordinate> Deformation<T> {
    pub(crate) fn new(surface: FlatTriangulation<T>, mapping: HalfEdgeMap<Option<HalfEdge>>) -> Self {
        Deformation { surface, mapping }
    }

    /// The deformed surface.
    pub fn surface(&self) -> &FlatTriangulation<T> {
        &self.surface
    }

    pub fn into_surface(self) -> FlatTriangulation<T> {
        self.surface
    }

    /// The image of a half-edge of the original surface, if it survived
    /// as a half-edge.
    pub fn apply(&self, e: HalfEdge) -> Option<HalfEdge> {
        *self.mapping.get(e)
    }

    pub fn mapping(&self) -> &HalfEdgeMap<Option<HalfEdge>> {
        &self.mapping
    }
}

impl<T: Coordinate> fmt::Display for Deformation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.surface)
    }
}

impl<T: Coordinate> fmt::Debug for Deformation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deformation")
            .field("surface", &self.surface)
            .field("mapping", &self.mapping)
            .finish()
    }
}
