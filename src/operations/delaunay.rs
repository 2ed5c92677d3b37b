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

use tracing::debug;

use crate::kernel::predicates::{Delaunay, classify};
use crate::mesh::half_edge::{Edge, HalfEdge};
use crate::mesh::half_edge_set::EdgeSet;
use crate::mesh::triangulation::FlatTriangulation;
use crate::numeric::scalar::Coordinate;

impl<T: Coordinate> FlatTriangulation<T> {
    /// Classifies `edge` by whether the apex of the triangle on one side lies
    /// in the circumcircle of the triangle on the other side. Boundary edges
    /// are always Delaunay.
    pub fn delaunay_condition(&self, edge: Edge) -> Delaunay {
        let e = edge.positive();
        if self.boundary(e) || self.boundary(-e) {
            return Delaunay::Delaunay;
        }
        let p = self.from_half_edge(e);
        let q = -self.from_half_edge(self.previous_in_face(e));
        let r = self.from_half_edge(self.next_in_face(-e));
        classify(&p, &q, &r)
    }

    /// Flips edges until every edge satisfies the Delaunay condition.
    pub fn delaunay(&mut self) {
        let mut pending: Vec<Edge> = self.edges().collect();
        let mut queued: EdgeSet = pending.iter().copied().collect();
        let mut flips = 0usize;

        // --- process the worklist; each flip requeues the quadrilateral ---
        while let Some(edge) = pending.pop() {
            queued.erase(edge);
            if self.delaunay_condition(edge) != Delaunay::NonDelaunay {
                continue;
            }
            let e = edge.positive();
            let a = self.next_in_face(e);
            let b = self.next_in_face(a);
            let c = self.next_in_face(-e);
            let d = self.next_in_face(c);
            self.flip(e);
            flips += 1;
            for side in [a, b, c, d].map(HalfEdge::edge) {
                if queued.insert(side) {
                    pending.push(side);
                }
            }
        }

        debug!(flips, edges = self.size(), "delaunay triangulation");
        self.assert_valid();
    }

    /// Whether every edge satisfies the Delaunay condition.
    pub fn is_delaunay(&self) -> bool {
        self.edges()
            .all(|edge| self.delaunay_condition(edge) != Delaunay::NonDelaunay)
    }
}
