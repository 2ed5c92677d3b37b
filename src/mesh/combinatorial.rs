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

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;
use tracing::trace;

use crate::error::{FlatsurfError, Result};
use crate::mesh::half_edge::{Edge, HalfEdge};
use crate::mesh::half_edge_map::{FlipObserver, Observers};
use crate::mesh::half_edge_set::HalfEdgeSet;
use crate::mesh::permutation::Permutation;
use crate::mesh::vertex::Vertex;

/// A triangulated surface described by the counterclockwise rotation of the
/// half-edges around each vertex.
///
/// Faces are not stored: the half-edge following `e` in its face is
/// `previous_at_vertex(-e)`. Boundary half-edges have no face to their left;
/// they form boundary cycles of the same rotation.
pub struct FlatTriangulationCombinatorial {
    vertices: Permutation<HalfEdge>,
    boundaries: HalfEdgeSet,
    observers: Rc<Observers>,
}

impl FlatTriangulationCombinatorial {
    /// Builds a triangulation from the cycles of half-edges around its
    /// vertices, e.g. `[[1, 3, 2, -1, -3, -2]]` for a torus made of two triangles.
    pub fn new(vertices: &[Vec<i32>], boundaries: &[i32]) -> Result<Self> {
        let mut cycles = Vec::with_capacity(vertices.len());
        for cycle in vertices {
            let mut half_edges = Vec::with_capacity(cycle.len());
            for &id in cycle {
                if id == 0 {
                    return Err(FlatsurfError::InvalidPermutation {
                        message: "half-edge 0 is reserved".to_string(),
                    });
                }
                half_edges.push(HalfEdge::new(id));
            }
            cycles.push(half_edges);
        }
        let vertices = Permutation::from_cycles(&cycles)?;
        let mut set = HalfEdgeSet::with_capacity(vertices.size());
        for &id in boundaries {
            if id == 0 || HalfEdge::new(id).index() >= vertices.size() {
                return Err(FlatsurfError::InvalidTriangulation {
                    message: format!("boundary half-edge {id} is not part of the surface"),
                });
            }
            set.insert(HalfEdge::new(id));
        }
        Self::from_parts(vertices, set)
    }

    pub(crate) fn from_parts(vertices: Permutation<HalfEdge>, boundaries: HalfEdgeSet) -> Result<Self> {
        let surface = FlatTriangulationCombinatorial {
            vertices,
            boundaries,
            observers: Rc::new(Observers::default()),
        };
        surface.check()?;
        Ok(surface)
    }

    /// Verifies that every face is a triangle and that boundary half-edges
    /// only border boundary half-edges.
    pub fn check(&self) -> Result<()> {
        if self.vertices.size() % 2 != 0 {
            return Err(FlatsurfError::InvalidTriangulation {
                message: "half-edges must come in pairs".to_string(),
            });
        }
        for e in self.half_edges() {
            if self.boundary(e) {
                if !self.boundary(self.next_in_face(e)) {
                    return Err(FlatsurfError::InvalidTriangulation {
                        message: format!("boundary half-edge {e} is followed by an inner half-edge"),
                    });
                }
                if self.boundary(-e) {
                    return Err(FlatsurfError::InvalidTriangulation {
                        message: format!("edge {} has no face on either side", e.edge()),
                    });
                }
                continue;
            }
            let a = self.next_in_face(e);
            let b = self.next_in_face(a);
            if self.next_in_face(b) != e || a == e || b == e {
                return Err(FlatsurfError::InvalidTriangulation {
                    message: format!("face of {e} is not a triangle"),
                });
            }
            if self.boundary(a) || self.boundary(b) {
                return Err(FlatsurfError::InvalidTriangulation {
                    message: format!("face of {e} contains a boundary half-edge"),
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

    /// Number of edges.
    #[inline]
    pub fn size(&self) -> usize {
        self.vertices.size() / 2
    }

    /// Half-edges in the order `1, -1, 2, -2, ...`.
    pub fn half_edges(&self) -> impl Iterator<Item = HalfEdge> + '_ {
        self.vertices.domain()
    }

    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        (0..self.size()).map(Edge::from_index)
    }

    #[inline]
    pub fn next_at_vertex(&self, e: HalfEdge) -> HalfEdge {
        self.vertices.apply(e)
    }

    #[inline]
    pub fn previous_at_vertex(&self, e: HalfEdge) -> HalfEdge {
        self.vertices.preimage(e)
    }

    #[inline]
    pub fn next_in_face(&self, e: HalfEdge) -> HalfEdge {
        self.vertices.preimage(-e)
    }

    #[inline]
    pub fn previous_in_face(&self, e: HalfEdge) -> HalfEdge {
        -self.vertices.apply(e)
    }

    #[inline]
    pub fn boundary(&self, e: HalfEdge) -> bool {
        self.boundaries.contains(e)
    }

    pub fn has_boundary(&self) -> bool {
        !self.boundaries.is_empty()
    }

    pub fn boundaries(&self) -> &HalfEdgeSet {
        &self.boundaries
    }

    pub fn vertex_permutation(&self) -> &Permutation<HalfEdge> {
        &self.vertices
    }

    pub fn vertices(&self) -> Vec<Vertex> {
        self.vertices
            .cycles()
            .into_iter()
            .map(|cycle| Vertex::from_representative(cycle[0]))
            .collect()
    }

    /// Half-edges leaving `vertex` in counterclockwise order, starting at its
    /// representative.
    pub fn outgoing(&self, vertex: Vertex) -> SmallVec<[HalfEdge; 8]> {
        let start = vertex.representative();
        let mut outgoing = SmallVec::new();
        outgoing.push(start);
        let mut e = self.next_at_vertex(start);
        while e != start {
            outgoing.push(e);
            e = self.next_at_vertex(e);
        }
        outgoing
    }

    /// The triangles, each starting at its smallest half-edge.
    pub fn faces(&self) -> Vec<[HalfEdge; 3]> {
        let mut seen = HalfEdgeSet::with_capacity(self.vertices.size());
        let mut faces = Vec::new();
        for e in self.half_edges() {
            if self.boundary(e) || seen.contains(e) {
                continue;
            }
            let a = self.next_in_face(e);
            let b = self.next_in_face(a);
            seen.extend([e, a, b]);
            faces.push([e, a, b]);
        }
        faces
    }

    pub fn observers(&self) -> &Rc<Observers> {
        &self.observers
    }

    /// Attaches `observer` to this triangulation; it is notified of every
    /// flip until the returned handle is dropped.
    pub fn track<M: FlipObserver + 'static>(&self, observer: M) -> Rc<RefCell<M>> {
        self.observers.track(observer)
    }

    /// Replaces the diagonal `e` of the quadrilateral formed by the faces on
    /// either side of `e` with the other diagonal, turning it
    /// counterclockwise. `e` keeps its name.
    pub fn flip(&mut self, e: HalfEdge) {
        // --- 1) validity checks ---
        assert!(
            !self.boundary(e) && !self.boundary(-e),
            "cannot flip the boundary edge {e}"
        );

        // --- 2) collect the quadrilateral around e ---
        let a = self.next_in_face(e);
        let b = self.next_in_face(a);
        let c = self.next_in_face(-e);
        let d = self.next_in_face(c);

        // --- 3) move both halves of the diagonal to the other corners ---
        self.vertices.relocate(e, d);
        self.vertices.relocate(-e, b);
        trace!(half_edge = e.id(), "flipped");

        // --- 4) let attached maps follow ---
        let observers = Rc::clone(&self.observers);
        observers.notify(self, e);

        if cfg!(any(debug_assertions, feature = "strict-checks")) {
            self.assert_valid();
        }
    }

    /// Adds `count` new edges, each half-edge its own vertex for now.
    pub(crate) fn grow(&mut self, count: usize) {
        self.vertices.grow(2 * count);
    }

    pub(crate) fn relocate(&mut self, e: HalfEdge, after: HalfEdge) {
        self.vertices.relocate(e, after);
    }

    pub(crate) fn set_boundary(&mut self, e: HalfEdge) {
        self.boundaries.insert(e);
    }

    fn fmt_cycles(
        f: &mut fmt::Formatter<'_>,
        cycles: impl IntoIterator<Item = SmallVec<[HalfEdge; 8]>>,
    ) -> fmt::Result {
        for cycle in cycles {
            write!(f, "(")?;
            for (i, e) in cycle.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{e}")?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl Clone for FlatTriangulationCombinatorial {
    /// Copies the combinatorics; observers stay with the original.
    fn clone(&self) -> Self {
        FlatTriangulationCombinatorial {
            vertices: self.vertices.clone(),
            boundaries: self.boundaries.clone(),
            observers: Rc::new(Observers::default()),
        }
    }
}

impl PartialEq for FlatTriangulationCombinatorial {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices && self.boundaries == other.boundaries
    }
}

impl Eq for FlatTriangulationCombinatorial {}

impl fmt::Debug for FlatTriangulationCombinatorial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for FlatTriangulationCombinatorial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FlatTriangulationCombinatorial(vertices = ")?;
        Self::fmt_cycles(
            f,
            self.vertices
                .cycles()
                .into_iter()
                .map(SmallVec::from_vec),
        )?;
        write!(f, ", faces = ")?;
        Self::fmt_cycles(f, self.faces().into_iter().map(|face| SmallVec::from_slice(&face)))?;
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn he(id: i32) -> HalfEdge {
        HalfEdge::new(id)
    }

    fn square() -> FlatTriangulationCombinatorial {
        FlatTriangulationCombinatorial::new(&[vec![1, 3, 2, -1, -3, -2]], &[]).unwrap()
    }

    #[test]
    fn faces_are_derived_from_vertices() {
        let surface = square();
        assert_eq!(surface.size(), 3);
        assert_eq!(surface.next_in_face(he(1)), he(2));
        assert_eq!(surface.previous_in_face(he(2)), he(1));
        assert_eq!(
            surface.to_string(),
            "FlatTriangulationCombinatorial(vertices = (1, 3, 2, -1, -3, -2), faces = (1, 2, -3)(-1, -2, 3))"
        );
        assert_eq!(surface.vertices().len(), 1);
        assert_eq!(surface.outgoing(surface.vertices()[0]).len(), 6);
    }

    #[test]
    fn non_triangular_faces_are_rejected() {
        assert!(FlatTriangulationCombinatorial::new(&[vec![1, 2, -1, -2]], &[]).is_err());
        assert!(FlatTriangulationCombinatorial::new(&[vec![1, 3, 2, -1, -3, -2]], &[7]).is_err());
    }

    #[test]
    fn four_flips_are_the_identity() {
        let original = square();
        let mut surface = original.clone();
        for e in original.half_edges() {
            for i in 0..4 {
                if i > 0 {
                    assert_ne!(surface, original);
                }
                surface.flip(e);
            }
            assert_eq!(surface, original);
        }
    }

    #[test]
    fn observers_see_every_flip() {
        struct Log(Vec<i32>);
        impl FlipObserver for Log {
            fn after_flip(&mut self, _: &FlatTriangulationCombinatorial, flip: HalfEdge) {
                self.0.push(flip.id());
            }
        }

        let mut surface = square();
        let log = surface.track(Log(Vec::new()));
        surface.flip(he(1));
        surface.flip(he(-3));
        assert_eq!(log.borrow().0, vec![1, -3]);
        drop(log);
        surface.flip(he(2));
        assert!(surface.observers().is_empty());
    }
}
