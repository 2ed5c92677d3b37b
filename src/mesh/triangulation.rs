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

use std::cell::{Ref, RefCell};
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use tracing::debug;

use crate::error::{FlatsurfError, Result};
use crate::geometry::vector::Vector;
use crate::kernel::orientation::{Ccw, ccw, dot_sign};
use crate::kernel::predicates::strictly_convex_at;
use crate::mesh::combinatorial::FlatTriangulationCombinatorial;
use crate::mesh::deformation::Deformation;
use crate::mesh::half_edge::HalfEdge;
use crate::mesh::half_edge_map::{FlipObserver, HalfEdgeMap, OddHalfEdgeMap};
use crate::mesh::vertex::Vertex;
use crate::numeric::scalar::Coordinate;

/// Edge vectors of a triangulation, kept consistent across flips.
pub type Vectors<T> = OddHalfEdgeMap<Vector<T>>;

fn update_vector_after_flip<T: Coordinate>(
    vectors: &mut Vectors<T>,
    surface: &FlatTriangulationCombinatorial,
    flip: HalfEdge,
) {
    // The flipped half-edge closes the triangle it now starts.
    let a = surface.next_in_face(flip);
    let b = surface.next_in_face(a);
    vectors.set(flip, -(vectors.get(a) + vectors.get(b)));
}

/// A translation surface glued from the triangles of a
/// [`FlatTriangulationCombinatorial`] with an exact vector on every edge.
pub struct FlatTriangulation<T: Coordinate> {
    combinatorial: FlatTriangulationCombinatorial,
    vectors: Rc<RefCell<Vectors<T>>>,
}

impl<T: Coordinate> FlatTriangulation<T> {
    /// `vectors[i]` is the vector of half-edge `i + 1`.
    pub fn new(vertices: &[Vec<i32>], vectors: Vec<Vector<T>>) -> Result<Self> {
        Self::with_boundaries(vertices, &[], vectors)
    }

    pub fn with_boundaries(vertices: &[Vec<i32>], boundaries: &[i32], vectors: Vec<Vector<T>>) -> Result<Self> {
        let combinatorial = FlatTriangulationCombinatorial::new(vertices, boundaries)?;
        Self::from_combinatorial(combinatorial, vectors)
    }

    pub fn from_combinatorial(combinatorial: FlatTriangulationCombinatorial, vectors: Vec<Vector<T>>) -> Result<Self> {
        if vectors.len() != combinatorial.size() {
            return Err(FlatsurfError::InvalidTriangulation {
                message: format!(
                    "expected {} vectors but got {}",
                    combinatorial.size(),
                    vectors.len()
                ),
            });
        }
        let surface = Self::assemble(combinatorial, OddHalfEdgeMap::from_values(vectors));
        surface.check()?;
        Ok(surface)
    }

    pub(crate) fn assemble(combinatorial: FlatTriangulationCombinatorial, vectors: Vectors<T>) -> Self {
        let vectors = combinatorial.track(vectors.with_update(update_vector_after_flip::<T>));
        FlatTriangulation {
            combinatorial,
            vectors,
        }
    }

    /// Verifies that every face closes up and is strictly counterclockwise.
    pub fn check(&self) -> Result<()> {
        self.combinatorial.check()?;
        for [a, b, c] in self.faces() {
            let (va, vb, vc) = (
                self.from_half_edge(a),
                self.from_half_edge(b),
                self.from_half_edge(c),
            );
            if !(&(&va + &vb) + &vc).is_zero() {
                return Err(FlatsurfError::FaceNotClosed {
                    a: a.id(),
                    b: b.id(),
                    c: c.id(),
                });
            }
            if ccw(&va, &vb) != Ccw::Counterclockwise {
                return Err(FlatsurfError::DegenerateFace {
                    a: a.id(),
                    b: b.id(),
                    c: c.id(),
                });
            }
        }
        Ok(())
    }

    #[cfg(any(debug_assertions, feature = "strict-checks"))]
    pub(crate) fn assert_valid(&self) {
        if let Err(err) = self.check() {
            panic!("{err}");
        }
    }

    #[cfg(not(any(debug_assertions, feature = "strict-checks")))]
    #[inline]
    pub(crate) fn assert_valid(&self) {}

    pub fn combinatorial(&self) -> &FlatTriangulationCombinatorial {
        &self.combinatorial
    }

    pub(crate) fn combinatorial_mut(&mut self) -> &mut FlatTriangulationCombinatorial {
        &mut self.combinatorial
    }

    pub fn from_half_edge(&self, e: HalfEdge) -> Vector<T> {
        self.vectors.borrow().get(e)
    }

    pub fn vectors(&self) -> Ref<'_, Vectors<T>> {
        self.vectors.borrow()
    }

    pub(crate) fn vectors_handle(&self) -> &Rc<RefCell<Vectors<T>>> {
        &self.vectors
    }

    /// Adds an edge with vector `vector`; its half-edges are not yet attached.
    pub(crate) fn push_edge(&mut self, vector: Vector<T>) -> HalfEdge {
        self.combinatorial.grow(1);
        self.vectors.borrow_mut().push(vector);
        HalfEdge::new(self.size() as i32)
    }

    /// Whether the quadrilateral around `e` is strictly convex, i.e., whether
    /// `e` can be flipped.
    pub fn convex(&self, e: HalfEdge) -> bool {
        if self.boundary(e) || self.boundary(-e) {
            return false;
        }
        let a = self.next_in_face(e);
        let b = self.next_in_face(a);
        let c = self.next_in_face(-e);
        let d = self.next_in_face(c);
        strictly_convex_at(
            &self.from_half_edge(c),
            &-self.from_half_edge(b),
            &self.from_half_edge(a),
            &-self.from_half_edge(d),
        )
    }

    /// Flips `e`, which must be [`convex`](Self::convex).
    pub fn flip(&mut self, e: HalfEdge) {
        assert!(self.convex(e), "cannot flip {e}, its quadrilateral is not strictly convex");
        self.combinatorial.flip(e);
        if cfg!(any(debug_assertions, feature = "strict-checks")) {
            self.assert_valid();
        }
    }

    /// Flips `e` without looking at the geometry. Faces may be degenerate
    /// until further flips repair them.
    pub(crate) fn flip_unchecked(&mut self, e: HalfEdge) {
        self.combinatorial.flip(e);
    }

    /// Total angle at `vertex` in multiples of 2π.
    pub fn angle(&self, vertex: Vertex) -> usize {
        let outgoing = self.outgoing(vertex);
        assert!(
            outgoing.iter().all(|&e| !self.boundary(e)),
            "angle is only defined at inner vertices"
        );
        let reference = self.from_half_edge(outgoing[0]);
        let mut turns = 0;
        for (i, &e) in outgoing.iter().enumerate() {
            let u = self.from_half_edge(e);
            let w = self.from_half_edge(outgoing[(i + 1) % outgoing.len()]);
            let crosses = ccw(&u, &reference) == Ccw::Counterclockwise
                && ccw(&reference, &w) == Ccw::Counterclockwise;
            let reaches = ccw(&reference, &w) == Ccw::Collinear
                && dot_sign(&reference, &w) == std::cmp::Ordering::Greater;
            if crosses || reaches {
                turns += 1;
            }
        }
        turns
    }

    /// Twice the area of the surface.
    pub fn area(&self) -> T {
        let mut area = T::zero();
        for [a, b, _] in self.faces() {
            area += &self.from_half_edge(a).cross(&self.from_half_edge(b));
        }
        area
    }

    /// The surface with every vector multiplied by `k`, which must be positive.
    pub fn scale(&self, k: &T) -> Self {
        assert!(*k > T::zero(), "scale factor {k} must be positive");
        let vectors = self
            .vectors()
            .values()
            .iter()
            .map(|v| v.scaled(k))
            .collect();
        Self::assemble(self.combinatorial.clone(), OddHalfEdgeMap::from_values(vectors))
    }

    /// Translates the vector of every edge by `shift`; fails if a face would
    /// become degenerate.
    pub fn deform(&self, shift: &OddHalfEdgeMap<Vector<T>>) -> Result<Deformation<T>> {
        if shift.len() != self.size() {
            return Err(FlatsurfError::InvalidDeformation {
                message: format!("expected a shift for each of the {} edges", self.size()),
            });
        }
        let vectors = self
            .vectors()
            .values()
            .iter()
            .zip(shift.values())
            .map(|(v, s)| v + s)
            .collect();
        let deformed = Self::assemble(self.combinatorial.clone(), OddHalfEdgeMap::from_values(vectors));
        deformed
            .check()
            .map_err(|err| FlatsurfError::InvalidDeformation {
                message: err.to_string(),
            })?;
        debug!(edges = self.size(), "deformed surface");
        let mapping = HalfEdgeMap::from_fn(self.size(), Some);
        Ok(Deformation::new(deformed, mapping))
    }

    /// Attaches `observer` to the combinatorics of this surface.
    pub fn track<M: FlipObserver + 'static>(&self, observer: M) -> Rc<RefCell<M>> {
        self.combinatorial.track(observer)
    }
}

impl<T: Coordinate> Deref for FlatTriangulation<T> {
    type Target = FlatTriangulationCombinatorial;

    fn deref(&self) -> &FlatTriangulationCombinatorial {
        &self.combinatorial
    }
}

impl<T: Coordinate> Clone for FlatTriangulation<T> {
    /// A deep copy; lengths and maps attached to `self` do not follow it.
    fn clone(&self) -> Self {
        let vectors = OddHalfEdgeMap::from_values(self.vectors().values().to_vec());
        Self::assemble(self.combinatorial.clone(), vectors)
    }
}

impl<T: Coordinate> PartialEq for FlatTriangulation<T> {
    fn eq(&self, other: &Self) -> bool {
        self.combinatorial == other.combinatorial && *self.vectors() == *other.vectors()
    }
}

impl<T: Coordinate> Eq for FlatTriangulation<T> {}

impl<T: Coordinate> fmt::Display for FlatTriangulation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} with vectors {{", self.combinatorial)?;
        for (i, (edge, v)) in self.vectors().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{edge}: {v}")?;
        }
        write!(f, "}}")
    }
}

impl<T: Coordinate> fmt::Debug for FlatTriangulation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
