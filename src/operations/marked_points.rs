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

use std::cmp::Ordering;

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::error::Result;
use crate::geometry::vector::Vector;
use crate::kernel::orientation::{Ccw, ccw, dot_sign};
use crate::kernel::predicates::incircle_strict;
use crate::mesh::combinatorial::FlatTriangulationCombinatorial;
use crate::mesh::deformation::Deformation;
use crate::mesh::half_edge::{Edge, HalfEdge};
use crate::mesh::half_edge_map::HalfEdgeMap;
use crate::mesh::half_edge_set::{EdgeSet, HalfEdgeSet};
use crate::mesh::permutation::Permutation;
use crate::mesh::triangulation::FlatTriangulation;
use crate::mesh::vertex::Vertex;
use crate::numeric::scalar::Coordinate;

/// Twice the signed area of the triangle `(p, q, r)`.
fn area<T: Coordinate>(p: &Vector<T>, q: &Vector<T>, r: &Vector<T>) -> T {
    (q - p).cross(&(r - p))
}

impl<T: Coordinate> FlatTriangulation<T> {
    /// Whether `vertex` is an inner vertex of total angle 2π.
    pub fn is_marked(&self, vertex: Vertex) -> bool {
        let outgoing = self.outgoing(vertex);
        outgoing.iter().all(|&e| !self.boundary(e) && !self.boundary(-e)) && self.angle(vertex) == 1
    }

    /// Whether flipping `e` brings the surface closer to a triangulation
    /// without the vertex whose outgoing half-edges are `star`.
    ///
    /// Think of that vertex as lifted infinitely high: a flip must lower the
    /// area of the triangles it is a corner of, counted once per corner.
    /// Flips that keep that area are decided by the Delaunay condition, with
    /// cocircular quadrilaterals broken by a squeezed metric.
    fn lowers(&self, e: HalfEdge, star: &[HalfEdge]) -> bool {
        if !self.convex(e) {
            return false;
        }
        let a = self.next_in_face(e);
        let b = self.next_in_face(a);
        let c = self.next_in_face(-e);
        let d = self.next_in_face(c);
        let corners = |starts: &[HalfEdge]| {
            T::from_i64(starts.iter().filter(|&&h| star.contains(&h)).count() as i64)
        };

        let source = Vector::zero();
        let target = self.from_half_edge(e);
        let left = &target + &self.from_half_edge(a);
        let right = self.from_half_edge(c);
        let before = area(&source, &target, &left) * &corners(&[e, -e, b])
            + area(&target, &source, &right) * &corners(&[e, -e, d]);
        let after = area(&source, &right, &left) * &corners(&[e, d, b])
            + area(&target, &left, &right) * &corners(&[-e, b, d]);

        match after.cmp(&before) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => {
                let q = -self.from_half_edge(b);
                incircle_strict(&Vector::from_i64(3, 1), &target, &q, &right) == Ordering::Less
            }
        }
    }

    /// Flips until the vertex `h` leaves has degree three. Returns a
    /// half-edge still leaving it and records the flipped edges.
    fn isolate(&mut self, mut h: HalfEdge, flipped: &mut EdgeSet) -> HalfEdge {
        let mut pending: Vec<Edge> = self.edges().collect();
        let mut queued: EdgeSet = pending.iter().copied().collect();

        while let Some(edge) = pending.pop() {
            queued.erase(edge);
            let star = self.outgoing(Vertex::from_representative(h));
            if star.len() == 3 {
                break;
            }
            let e = edge.positive();
            if !self.lowers(e, &star) {
                continue;
            }
            let a = self.next_in_face(e);
            let b = self.next_in_face(a);
            let c = self.next_in_face(-e);
            let d = self.next_in_face(c);
            while h.edge() == edge {
                h = self.next_at_vertex(h);
            }
            self.flip(e);
            flipped.insert(edge);
            trace!(half_edge = e.id(), "flipped towards marked point removal");
            for side in [a, b, c, d].map(HalfEdge::edge) {
                if queued.insert(side) {
                    pending.push(side);
                }
            }
        }

        let star = self.outgoing(Vertex::from_representative(h));
        if star.len() == 4 {
            h = self.flatten(h, &star, flipped);
        }
        assert_eq!(
            self.outgoing(Vertex::from_representative(h)).len(),
            3,
            "marked point at {h} cannot be reduced to degree three"
        );
        h
    }

    /// A marked point of degree four that cannot be flipped away lies on the
    /// segment between two of its neighbours. Flips the spoke between them,
    /// which leaves a flat triangle that disappears with the point.
    fn flatten(&mut self, mut h: HalfEdge, star: &[HalfEdge], flipped: &mut EdgeSet) -> HalfEdge {
        assert!(
            star.iter().all(|e| !star.contains(&-*e)),
            "marked point at {h} has a loop but cannot be flipped further"
        );
        let k = star.len();
        let Some(spoke) = (0..k).find_map(|i| {
            let before = self.from_half_edge(star[(i + k - 1) % k]);
            let after = self.from_half_edge(star[(i + 1) % k]);
            (ccw(&before, &after) == Ccw::Collinear && dot_sign(&before, &after) == Ordering::Less)
                .then_some(star[i])
        }) else {
            panic!("marked point at {h} is in general position but cannot be flipped further");
        };
        while h.edge() == spoke.edge() {
            h = self.next_at_vertex(h);
        }
        self.flip_unchecked(spoke);
        flipped.insert(spoke.edge());
        h
    }

    /// Removes the vertex of degree three that `h` leaves and renumbers the
    /// edges so that they are `1, ..., n - 3` again.
    ///
    /// Returns the new surface and where each current half-edge went.
    fn remove_vertex(&self, h: HalfEdge) -> Result<(Self, HalfEdgeMap<Option<HalfEdge>>)> {
        let spokes = self.outgoing(Vertex::from_representative(h));
        assert_eq!(spokes.len(), 3, "only vertices of degree three can be removed");
        let n = self.size() as i32;

        // --- 1) move the highest edges into the gaps ---
        let mut removed: SmallVec<[i32; 3]> = spokes.iter().map(|e| e.edge().id()).collect();
        removed.sort_unstable();
        let mut rename = HalfEdgeMap::from_fn(self.size(), |e| {
            (!removed.contains(&e.edge().id())).then_some(e)
        });
        let holes = removed.iter().copied().filter(|&id| id <= n - 3);
        let movers = (n - 2..=n).filter(|id| !removed.contains(id));
        for (hole, mover) in holes.zip(movers) {
            rename.set(HalfEdge::new(mover), Some(HalfEdge::new(hole)));
            rename.set(HalfEdge::new(-mover), Some(HalfEdge::new(-hole)));
        }

        // --- 2) rebuild the rotations without the spokes ---
        let cycles: Vec<Vec<HalfEdge>> = self
            .vertex_permutation()
            .cycles()
            .into_iter()
            .map(|cycle| cycle.into_iter().filter_map(|e| *rename.get(e)).collect::<Vec<_>>())
            .filter(|cycle| !cycle.is_empty())
            .collect();
        let boundaries: HalfEdgeSet = self
            .boundaries()
            .iter()
            .filter_map(|e| *rename.get(e))
            .collect();
        let combinatorial =
            FlatTriangulationCombinatorial::from_parts(Permutation::from_cycles(&cycles)?, boundaries)?;

        // --- 3) carry over the vectors ---
        let mut vectors = vec![Vector::zero(); self.size() - 3];
        for edge in self.edges() {
            if let Some(image) = *rename.get(edge.positive()) {
                vectors[image.edge().index()] = self.from_half_edge(edge.positive());
            }
        }

        let surface = Self::from_combinatorial(combinatorial, vectors)?;
        Ok((surface, rename))
    }

    /// Removes vertices of total angle 2π, flipping until they have degree
    /// three and then dropping them together with their spokes.
    ///
    /// A surface without any singular vertex keeps its first marked point.
    pub fn eliminate_marked_points(&self) -> Result<Deformation<T>> {
        let mut surface = self.clone();
        let mut mapping = HalfEdgeMap::from_fn(self.size(), Some);
        let mut eliminated = 0usize;
        let mut flips = 0usize;

        loop {
            let vertices = surface.vertices();
            let marked: Vec<Vertex> = vertices
                .iter()
                .copied()
                .filter(|&vertex| surface.is_marked(vertex))
                .collect();
            let victim = match (marked.first(), marked.last()) {
                (None, _) => break,
                (Some(_), Some(&last)) if marked.len() == vertices.len() => {
                    if marked.len() == 1 {
                        break;
                    }
                    last
                }
                (Some(&first), _) => first,
            };

            let mut flipped = EdgeSet::with_capacity(surface.size());
            let h = surface.isolate(victim.representative(), &mut flipped);
            flips += flipped.len();

            let (smaller, rename) = surface.remove_vertex(h)?;
            mapping = HalfEdgeMap::from_fn(self.size(), |e| {
                (*mapping.get(e))
                    .filter(|image| !flipped.contains(image.edge()))
                    .and_then(|image| *rename.get(image))
            });
            surface = smaller;
            eliminated += 1;
        }

        surface.assert_valid();
        debug!(eliminated, flips, vertices = surface.vertices().len(), "eliminated marked points");
        Ok(Deformation::new(surface, mapping))
    }
}
