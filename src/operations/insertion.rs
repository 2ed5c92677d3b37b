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

use tracing::debug;

use crate::geometry::vector::Vector;
use crate::kernel::orientation::{Ccw, ccw, dot_sign};
use crate::kernel::predicates::{TriangleLocation, incircle_along, locate_in_triangle};
use crate::mesh::deformation::Deformation;
use crate::mesh::half_edge::{Edge, HalfEdge};
use crate::mesh::half_edge_map::HalfEdgeMap;
use crate::mesh::half_edge_set::EdgeSet;
use crate::mesh::triangulation::FlatTriangulation;
use crate::numeric::scalar::Coordinate;

/// The walk towards the point ran out of flips or met a degenerate
/// configuration.
struct Stalled;

/// Brings a point given relative to a vertex into a face and cones that face
/// to it.
struct Insertion<'p, T: Coordinate> {
    surface: FlatTriangulation<T>,
    point: &'p Vector<T>,
    flipped: EdgeSet,
    budget: usize,
}

impl<'p, T: Coordinate> Insertion<'p, T> {
    fn new(surface: &FlatTriangulation<T>, point: &'p Vector<T>, budget: usize) -> Self {
        Self {
            surface: surface.clone(),
            point,
            flipped: EdgeSet::with_capacity(surface.size()),
            budget,
        }
    }

    fn flip(&mut self, e: HalfEdge) {
        self.surface.flip(e);
        self.flipped.insert(e.edge());
    }

    fn spend(&mut self, e: HalfEdge) -> Result<(), Stalled> {
        self.budget = self.budget.checked_sub(1).ok_or(Stalled)?;
        self.flip(e);
        Ok(())
    }

    /// Flips edges of the fan beyond `f` until `f` itself can be flipped.
    /// `base` is the position of the source of `f` relative to the sector's
    /// vertex.
    fn make_flippable(&mut self, f: HalfEdge, base: &Vector<T>, depth: usize) -> Result<(), Stalled> {
        if depth > self.surface.size() {
            return Err(Stalled);
        }
        while !self.surface.convex(f) {
            if self.surface.boundary(f) || self.surface.boundary(-f) {
                return Err(Stalled);
            }
            let c = self.surface.next_in_face(-f);
            let d = self.surface.next_in_face(c);
            let corner = base + &self.surface.from_half_edge(c);
            match ccw(self.point, &corner) {
                Ccw::Counterclockwise => {
                    self.make_flippable(c, base, depth + 1)?;
                    self.spend(c)?;
                }
                Ccw::Clockwise => {
                    self.make_flippable(d, &corner, depth + 1)?;
                    self.spend(d)?;
                }
                Ccw::Collinear => return Err(Stalled),
            }
        }
        Ok(())
    }

    /// Flips until the face to the left of the returned half-edge contains
    /// the point.
    fn walk(&mut self, mut e: HalfEdge) -> Result<HalfEdge, Stalled> {
        loop {
            let a = self.surface.next_in_face(e);
            let start = self.surface.from_half_edge(e);
            if ccw(&self.surface.from_half_edge(a), &(self.point - &start)) == Ccw::Counterclockwise
                || ccw(&start, self.point) == Ccw::Collinear
            {
                break;
            }

            self.make_flippable(a, &start, 0)?;
            self.spend(a)?;

            let across = self.surface.from_half_edge(-a);
            match ccw(&across, self.point) {
                Ccw::Counterclockwise => e = -a,
                Ccw::Collinear => {
                    if dot_sign(&across, self.point) != Ordering::Greater
                        || self.point.norm_squared() >= across.norm_squared()
                    {
                        return Err(Stalled);
                    }
                    e = -a;
                }
                Ccw::Clockwise => {}
            }
        }

        let a = self.surface.next_in_face(e);
        let (side, next) = (self.surface.from_half_edge(e), self.surface.from_half_edge(a));
        let inside = locate_in_triangle(&side, &next, self.point) != TriangleLocation::Outside;
        if !inside || *self.point == side || *self.point == &side + &next {
            return Err(Stalled);
        }
        Ok(e)
    }

    /// Cones the face to the left of `e` to the point at `at`, relative to
    /// the source of `e`. The new edges `n+1, n+2, n+3` go from the point to
    /// the source of `e`, to its target and to the third corner. A point on a
    /// side leaves a flat triangle behind, which is flipped away.
    fn cone(&mut self, e: HalfEdge, at: &Vector<T>) {
        let a = self.surface.next_in_face(e);
        let g = self.surface.next_in_face(a);
        let location = locate_in_triangle(&self.surface.from_half_edge(e), &self.surface.from_half_edge(a), at);
        self.split_face(e, at);
        match location {
            TriangleLocation::OnFirstSide => self.flip(e),
            TriangleLocation::OnSecondSide => self.flip(a),
            TriangleLocation::OnThirdSide => self.flip(g),
            TriangleLocation::Inside | TriangleLocation::Outside => {}
        }
    }

    fn split_face(&mut self, e: HalfEdge, at: &Vector<T>) {
        let a = self.surface.next_in_face(e);
        let g = self.surface.next_in_face(a);
        let first = self.surface.from_half_edge(e);
        let second = &first + &self.surface.from_half_edge(a);

        let x = self.surface.push_edge(-at);
        let y = self.surface.push_edge(&first - at);
        let z = self.surface.push_edge(&second - at);

        let combinatorial = self.surface.combinatorial_mut();
        combinatorial.relocate(y, x);
        combinatorial.relocate(z, y);
        combinatorial.relocate(-x, e);
        combinatorial.relocate(-y, a);
        combinatorial.relocate(-z, g);
    }

    /// Whether `e` is not Delaunay in the metric squeezed along the point.
    fn squeezed(&self, e: HalfEdge) -> bool {
        if !self.surface.convex(e) {
            return false;
        }
        let p = self.surface.from_half_edge(e);
        let q = -self.surface.from_half_edge(self.surface.previous_in_face(e));
        let r = self.surface.from_half_edge(self.surface.next_in_face(-e));
        incircle_along(self.point, &p, &q, &r) == Ordering::Less
    }

    /// Flips to the Delaunay triangulation of the metric squeezed along the
    /// point, which contains the segment from the sector's vertex to the
    /// point. `anchor` leaves the inserted vertex. Returns the half-edge from
    /// the sector's vertex to the point.
    fn connect(&mut self, mut anchor: HalfEdge) -> HalfEdge {
        let mut pending: Vec<Edge> = self.surface.edges().collect();
        let mut queued: EdgeSet = pending.iter().copied().collect();

        while let Some(edge) = pending.pop() {
            queued.erase(edge);
            let e = edge.positive();
            if !self.squeezed(e) {
                continue;
            }
            let a = self.surface.next_in_face(e);
            let b = self.surface.next_in_face(a);
            let c = self.surface.next_in_face(-e);
            let d = self.surface.next_in_face(c);
            while anchor.edge() == edge {
                anchor = self.surface.next_at_vertex(anchor);
            }
            self.flip(e);
            for side in [a, b, c, d].map(HalfEdge::edge) {
                if queued.insert(side) {
                    pending.push(side);
                }
            }
        }

        let back = -self.point;
        let mut h = anchor;
        while self.surface.from_half_edge(h) != back {
            h = self.surface.next_at_vertex(h);
            assert!(
                h != anchor,
                "no edge joins {} to the vertex it was inserted from",
                self.point
            );
        }
        -h
    }
}

impl<T: Coordinate> FlatTriangulation<T> {
    /// Follows the segment from the source of `sector` to `point` through the
    /// faces it crosses. Returns a half-edge whose face contains the point,
    /// the position of its source and the number of edges crossed.
    pub(crate) fn locate(&self, sector: HalfEdge, point: &Vector<T>) -> (HalfEdge, Vector<T>, usize) {
        let mut h = sector;
        let mut base = Vector::zero();
        let mut crossings = 0usize;
        loop {
            let a = self.next_in_face(h);
            let b = self.next_in_face(a);
            let first = &base + &self.from_half_edge(h);
            let second = &first + &self.from_half_edge(a);
            let relative = point - &base;
            if locate_in_triangle(&self.from_half_edge(h), &self.from_half_edge(a), &relative)
                != TriangleLocation::Outside
            {
                return (h, base, crossings);
            }

            let side = ccw(point, &second);
            assert!(
                side != Ccw::Collinear && (crossings > 0 || ccw(point, &first) != Ccw::Collinear),
                "the segment to {point} passes through a vertex"
            );
            let (exit, source) = if crossings == 0 || ccw(point, &base) == side {
                (a, first)
            } else {
                (b, second)
            };
            assert!(
                !self.boundary(-exit),
                "cannot reach {point} without crossing the boundary edge {exit}"
            );
            base = &source + &self.from_half_edge(exit);
            h = -exit;
            crossings += 1;
        }
    }

    /// Inserts a vertex at `point`, given relative to the source of
    /// `sector`, which must lie in the sector from `sector` (inclusive) to
    /// `next_at_vertex(sector)` (exclusive).
    ///
    /// Returns the half-edge from the source of `sector` to the new vertex
    /// and the new surface. Afterwards `sector` is the half-edge preceding
    /// the returned one at that vertex. Edges that had to be flipped on the
    /// way are not tracked by the deformation.
    pub fn insert_at(&self, sector: &mut HalfEdge, point: &Vector<T>) -> (HalfEdge, Deformation<T>) {
        assert!(
            !self.boundary(*sector),
            "cannot insert into the boundary sector at {sector}"
        );
        assert!(
            ccw(&self.from_half_edge(*sector), point) != Ccw::Clockwise
                && ccw(&self.from_half_edge(self.next_at_vertex(*sector)), point) == Ccw::Clockwise,
            "{point} is not in the sector at {sector}"
        );
        let size = self.size();

        // 1) find the face of the point without touching the surface
        let (face, base, crossings) = self.locate(*sector, point);
        let local = point - &base;
        let side = self.from_half_edge(face);
        let far = &side + &self.from_half_edge(self.next_in_face(face));
        assert!(
            !local.is_zero() && local != side && local != far,
            "{point} is already a vertex"
        );

        // 2) flip the face towards the sector's vertex; if that takes too
        //    long, cone the face where it is and flip towards the segment
        let mut insertion = Insertion::new(self, point, size * (crossings + 1));
        let inserted = match insertion.walk(*sector) {
            Ok(e) => {
                insertion.cone(e, point);
                -HalfEdge::new(size as i32 + 1)
            }
            Err(Stalled) => {
                debug!(sector = sector.id(), crossings, "walk stalled, connecting through a squeezed metric");
                insertion = Insertion::new(self, point, 0);
                insertion.cone(face, &local);
                insertion.connect(HalfEdge::new(size as i32 + 1))
            }
        };

        let Insertion { surface, flipped, .. } = insertion;
        surface.assert_valid();
        debug!(
            sector = sector.id(),
            crossings,
            flips = flipped.len(),
            "inserted vertex"
        );

        *sector = surface.previous_at_vertex(inserted);
        let mapping = HalfEdgeMap::from_fn(size, |h| (!flipped.contains(h.edge())).then_some(h));
        (inserted, Deformation::new(surface, mapping))
    }

    /// Cuts the surface open along `e`: a copy `f` of the edge is glued in
    /// next to it and `e`, `-f` become boundary half-edges.
    pub fn slit(&self, e: HalfEdge) -> Deformation<T> {
        assert!(!self.boundary(e), "{e} is already a boundary half-edge");
        let size = self.size();
        let mut surface = self.clone();

        let f = surface.push_edge(self.from_half_edge(e));
        let combinatorial = surface.combinatorial_mut();
        combinatorial.relocate(f, e);
        let before = combinatorial.previous_at_vertex(-e);
        combinatorial.relocate(-f, before);
        combinatorial.set_boundary(e);
        combinatorial.set_boundary(-f);

        surface.assert_valid();
        debug!(half_edge = e.id(), "slit surface");
        Deformation::new(surface, HalfEdgeMap::from_fn(size, Some))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> FlatTriangulation<i64> {
        FlatTriangulation::new(
            &[vec![1, 3, 2, -1, -3, -2]],
            vec![
                Vector::from_i64(1, 0),
                Vector::from_i64(0, 1),
                Vector::from_i64(1, 1),
            ],
        )
        .unwrap()
    }

    #[test]
    fn insertion_into_a_face_needs_no_flips() {
        let surface = square().scale(&3);
        let mut sector = HalfEdge::new(1);
        let (inserted, deformation) = surface.insert_at(&mut sector, &Vector::from_i64(2, 1));
        assert_eq!(inserted, HalfEdge::new(-4));
        assert_eq!(sector, HalfEdge::new(1));
        assert_eq!(deformation.surface().size(), 6);
        assert_eq!(deformation.surface().from_half_edge(inserted), Vector::from_i64(2, 1));
        for e in surface.half_edges() {
            assert_eq!(deformation.apply(e), Some(e));
        }
        assert_eq!(deformation.surface().area(), surface.area());
    }

    #[test]
    fn locate_counts_crossed_edges() {
        let surface = square().scale(&3);
        let (face, base, crossings) = surface.locate(HalfEdge::new(1), &Vector::from_i64(4, 2));
        assert_eq!(face, HalfEdge::new(-2));
        assert_eq!(base, Vector::from_i64(3, 3));
        assert_eq!(crossings, 1);

        let (face, base, crossings) = surface.locate(HalfEdge::new(1), &Vector::from_i64(2, 1));
        assert_eq!((face, base, crossings), (HalfEdge::new(1), Vector::zero(), 0));
    }

    #[test]
    fn walk_without_budget_stalls() {
        let surface = square().scale(&3);
        let point = Vector::from_i64(4, 2);
        let mut insertion = Insertion::new(&surface, &point, 0);
        assert!(insertion.walk(HalfEdge::new(1)).is_err());
    }

    #[test]
    fn squeezed_metric_connects_the_point() {
        let surface = square().scale(&3);
        let point = Vector::from_i64(4, 2);
        let (face, base, _) = surface.locate(HalfEdge::new(1), &point);
        let mut insertion = Insertion::new(&surface, &point, 0);
        insertion.cone(face, &(&point - &base));
        let inserted = insertion.connect(HalfEdge::new(4));
        insertion.surface.check().unwrap();
        assert_eq!(insertion.surface.from_half_edge(inserted), point);
        assert_eq!(insertion.surface.vertices().len(), 2);
    }

    #[test]
    fn slit_creates_a_boundary() {
        let slit = square().slit(HalfEdge::new(3));
        let surface = slit.surface();
        assert_eq!(surface.size(), 4);
        assert!(surface.boundary(HalfEdge::new(3)));
        assert!(surface.boundary(HalfEdge::new(-4)));
        assert!(!surface.boundary(HalfEdge::new(-3)));
        assert_eq!(surface.faces().len(), 2);
    }

    #[test]
    #[should_panic(expected = "not in the sector")]
    fn insertion_outside_the_sector_is_rejected() {
        square().insert_at(&mut HalfEdge::new(1), &Vector::from_i64(-1, 1));
    }
}
