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

use crate::kernel::predicates::Delaunay;
use crate::mesh::deformation::Deformation;
use crate::mesh::half_edge::HalfEdge;
use crate::mesh::half_edge_map::HalfEdgeMap;
use crate::mesh::half_edge_set::HalfEdgeSet;
use crate::mesh::triangulation::FlatTriangulation;
use crate::numeric::scalar::Coordinate;

/// What an isomorphism needs to preserve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Isomorphism {
    /// Every triangle.
    Faces,
    /// Only the Delaunay cells, i.e., the triangles up to flips of edges
    /// whose Delaunay condition is ambiguous.
    DelaunayCells,
}

/// The linear map `(x, y) ↦ (a x + b y, c x + d y)`.
struct LinearMap<T> {
    a: T,
    b: T,
    c: T,
    d: T,
}

impl<T: Coordinate> FlatTriangulation<T> {
    fn in_domain(&self, e: HalfEdge, criterion: Isomorphism) -> bool {
        match criterion {
            Isomorphism::Faces => true,
            Isomorphism::DelaunayCells => self.delaunay_condition(e.edge()) != Delaunay::Ambiguous,
        }
    }

    /// The half-edge after `e` on the boundary of its face or cell.
    fn next_in_cell(&self, e: HalfEdge, criterion: Isomorphism) -> HalfEdge {
        match criterion {
            Isomorphism::Faces => self.next_in_face(e),
            Isomorphism::DelaunayCells => {
                let mut next = self.previous_at_vertex(-e);
                while !self.in_domain(next, criterion) {
                    next = self.previous_at_vertex(next);
                }
                next
            }
        }
    }

    /// Extends `x0 ↦ y0` to a map of all half-edges in the domain that
    /// commutes with reversal and with walking around faces or cells.
    fn extend(
        &self,
        other: &Self,
        criterion: Isomorphism,
        x0: HalfEdge,
        y0: HalfEdge,
    ) -> Option<HalfEdgeMap<Option<HalfEdge>>> {
        if self.boundary(x0) != other.boundary(y0) {
            return None;
        }
        let mut mapping = HalfEdgeMap::new(self.size(), None);
        let mut image = HalfEdgeSet::with_capacity(2 * other.size());
        let mut pending = vec![x0];
        mapping.set(x0, Some(y0));
        image.insert(y0);

        while let Some(x) = pending.pop() {
            let y = (*mapping.get(x))?;
            for (a, b) in [
                (-x, -y),
                (self.next_in_cell(x, criterion), other.next_in_cell(y, criterion)),
            ] {
                match *mapping.get(a) {
                    Some(existing) if existing != b => return None,
                    Some(_) => {}
                    None => {
                        if !image.insert(b) || self.boundary(a) != other.boundary(b) {
                            return None;
                        }
                        mapping.set(a, Some(b));
                        pending.push(a);
                    }
                }
            }
        }
        Some(mapping)
    }

    /// The linear map taking the vectors of `x0` and `x1` to the vectors of
    /// their images, if it maps all other vectors correctly as well.
    fn linear_map(
        &self,
        other: &Self,
        mapping: &HalfEdgeMap<Option<HalfEdge>>,
        x0: HalfEdge,
        x1: HalfEdge,
    ) -> Option<LinearMap<T>> {
        let v1 = self.from_half_edge(x0);
        let v2 = self.from_half_edge(x1);
        let w1 = other.from_half_edge((*mapping.get(x0))?);
        let w2 = other.from_half_edge((*mapping.get(x1))?);

        let det = v1.cross(&v2);
        let solve = |p: &T, q: &T, r: &T, s: &T| -> Option<T> {
            (p.clone() * q - r.clone() * s).exact_div(&det)
        };
        let map = LinearMap {
            a: solve(&w1.x, &v2.y, &w2.x, &v1.y)?,
            b: solve(&w2.x, &v1.x, &w1.x, &v2.x)?,
            c: solve(&w1.y, &v2.y, &w2.y, &v1.y)?,
            d: solve(&w2.y, &v1.x, &w1.y, &v2.x)?,
        };

        for (x, y) in mapping.iter() {
            let Some(y) = *y else { continue };
            let v = self.from_half_edge(x);
            let w = other.from_half_edge(y);
            if map.a.clone() * &v.x + map.b.clone() * &v.y != w.x
                || map.c.clone() * &v.x + map.d.clone() * &v.y != w.y
            {
                return None;
            }
        }
        Some(map)
    }

    /// Searches for a translation isomorphism from this surface to `other`.
    pub fn isomorphism(&self, other: &Self, criterion: Isomorphism) -> Option<Deformation<T>> {
        let one = T::from_i64(1);
        self.isomorphism_with(other, criterion, |a, b, c, d| {
            *a == one && b.is_zero() && c.is_zero() && *d == one
        })
    }

    /// Searches for an isomorphism from this surface to `other` whose linear
    /// part `(a, b, c, d)` is accepted by `filter`.
    ///
    /// The filter sees every candidate in turn, so rejecting the maps found
    /// so far enumerates the isomorphisms.
    pub fn isomorphism_with<F>(&self, other: &Self, criterion: Isomorphism, mut filter: F) -> Option<Deformation<T>>
    where
        F: FnMut(&T, &T, &T, &T) -> bool,
    {
        let domain: Vec<HalfEdge> = self
            .half_edges()
            .filter(|&e| self.in_domain(e, criterion))
            .collect();
        let codomain: Vec<HalfEdge> = other
            .half_edges()
            .filter(|&e| other.in_domain(e, criterion))
            .collect();
        if domain.len() != codomain.len() {
            return None;
        }
        if criterion == Isomorphism::Faces && self.size() != other.size() {
            return None;
        }
        let &x0 = domain.first()?;
        let x1 = self.next_in_cell(x0, criterion);

        for (tried, &y0) in codomain.iter().enumerate() {
            let Some(mapping) = self.extend(other, criterion, x0, y0) else {
                continue;
            };
            let Some(map) = self.linear_map(other, &mapping, x0, x1) else {
                continue;
            };
            if !filter(&map.a, &map.b, &map.c, &map.d) {
                continue;
            }
            debug!(candidates = tried + 1, ?criterion, "found isomorphism");
            return Some(Deformation::new(other.clone(), mapping));
        }
        debug!(candidates = codomain.len(), ?criterion, "no isomorphism");
        None
    }
}
