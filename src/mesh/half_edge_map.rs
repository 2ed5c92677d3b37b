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
use std::ops::{AddAssign, Neg};
use std::rc::{Rc, Weak};

use crate::mesh::combinatorial::FlatTriangulationCombinatorial;
use crate::mesh::half_edge::{Edge, HalfEdge};

/// Per-edge data that needs to be reinterpreted when the triangulation it is
/// attached to flips an edge.
pub trait FlipObserver {
    /// Called after `flip` has been flipped; `surface` is the new state.
    fn after_flip(&mut self, surface: &FlatTriangulationCombinatorial, flip: HalfEdge);
}

/// Subscribers of a triangulation, notified synchronously in registration
/// order. Subscribers that have been dropped are skipped and forgotten.
#[derive(Default)]
pub struct Observers {
    list: RefCell<Vec<Weak<RefCell<dyn FlipObserver>>>>,
}

impl Observers {
    pub fn register(&self, observer: &Rc<RefCell<dyn FlipObserver>>) {
        let mut list = self.list.borrow_mut();
        list.retain(|o| o.strong_count() > 0);
        list.push(Rc::downgrade(observer));
    }

    /// Registers `observer` and hands out the only strong reference to it;
    /// dropping that reference unregisters it.
    pub fn track<M: FlipObserver + 'static>(&self, observer: M) -> Rc<RefCell<M>> {
        let observer = Rc::new(RefCell::new(observer));
        let handle: Rc<RefCell<dyn FlipObserver>> = observer.clone();
        self.register(&handle);
        observer
    }

    pub fn len(&self) -> usize {
        self.list.borrow().iter().filter(|o| o.strong_count() > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn notify(&self, surface: &FlatTriangulationCombinatorial, flip: HalfEdge) {
        let live: Vec<Rc<RefCell<dyn FlipObserver>>> = {
            let mut list = self.list.borrow_mut();
            list.retain(|o| o.strong_count() > 0);
            list.iter().filter_map(Weak::upgrade).collect()
        };
        for observer in live {
            observer.borrow_mut().after_flip(surface, flip);
        }
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Observers({})", self.len())
    }
}

/// How a map reacts to a flip.
pub type FlipUpdate<M> = fn(&mut M, &FlatTriangulationCombinatorial, HalfEdge);

/// A value for every half-edge.
#[derive(Clone)]
pub struct HalfEdgeMap<V> {
    values: Vec<V>,
    on_flip: Option<FlipUpdate<HalfEdgeMap<V>>>,
}

impl<V: Clone> HalfEdgeMap<V> {
    /// A map over the half-edges of a triangulation with `edges` edges.
    pub fn new(edges: usize, value: V) -> Self {
        Self {
            values: vec![value; 2 * edges],
            on_flip: None,
        }
    }
}

impl<V> HalfEdgeMap<V> {
    pub fn from_fn(edges: usize, f: impl FnMut(HalfEdge) -> V) -> Self {
        Self {
            values: (0..2 * edges).map(HalfEdge::from_index).map(f).collect(),
            on_flip: None,
        }
    }

    pub fn with_update(mut self, on_flip: FlipUpdate<HalfEdgeMap<V>>) -> Self {
        self.on_flip = Some(on_flip);
        self
    }

    #[inline]
    pub fn get(&self, e: HalfEdge) -> &V {
        &self.values[e.index()]
    }

    #[inline]
    pub fn set(&mut self, e: HalfEdge, value: V) {
        self.values[e.index()] = value;
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (HalfEdge, &V)> + '_ {
        self.values.iter().enumerate().map(|(i, v)| (HalfEdge::from_index(i), v))
    }
}

impl<V> FlipObserver for HalfEdgeMap<V> {
    fn after_flip(&mut self, surface: &FlatTriangulationCombinatorial, flip: HalfEdge) {
        if let Some(update) = self.on_flip {
            update(self, surface, flip);
        }
    }
}

impl<V: PartialEq> PartialEq for HalfEdgeMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<V: fmt::Debug> fmt::Debug for HalfEdgeMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter().map(|(e, v)| (e.id(), v))).finish()
    }
}

/// A value for every edge, read as `value(-e) = -value(e)`.
#[derive(Clone)]
pub struct OddHalfEdgeMap<V> {
    values: Vec<V>,
    on_flip: Option<FlipUpdate<OddHalfEdgeMap<V>>>,
}

impl<V> OddHalfEdgeMap<V>
where
    V: Clone + Neg<Output = V>,
{
    pub fn new(edges: usize, value: V) -> Self {
        Self {
            values: vec![value; edges],
            on_flip: None,
        }
    }

    /// Values of the positive half-edges `1, 2, ...`.
    pub fn from_values(values: Vec<V>) -> Self {
        Self { values, on_flip: None }
    }

    pub fn with_update(mut self, on_flip: FlipUpdate<OddHalfEdgeMap<V>>) -> Self {
        self.on_flip = Some(on_flip);
        self
    }

    pub fn get(&self, e: HalfEdge) -> V {
        let value = self.values[e.edge().index()].clone();
        if e.id() > 0 { value } else { -value }
    }

    pub fn set(&mut self, e: HalfEdge, value: V) {
        self.values[e.edge().index()] = if e.id() > 0 { value } else { -value };
    }

    /// Adds `value` to the value of `e`.
    pub fn add(&mut self, e: HalfEdge, value: &V)
    where
        V: for<'a> AddAssign<&'a V>,
    {
        let oriented = if e.id() > 0 { value.clone() } else { -value.clone() };
        self.values[e.edge().index()] += &oriented;
    }

    pub(crate) fn push(&mut self, value: V) {
        self.values.push(value);
    }

    pub(crate) fn values(&self) -> &[V] {
        &self.values
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values of the positive half-edges.
    pub fn iter(&self) -> impl Iterator<Item = (Edge, &V)> + '_ {
        self.values.iter().enumerate().map(|(i, v)| (Edge::from_index(i), v))
    }
}

impl<V> FlipObserver for OddHalfEdgeMap<V> {
    fn after_flip(&mut self, surface: &FlatTriangulationCombinatorial, flip: HalfEdge) {
        if let Some(update) = self.on_flip {
            update(self, surface, flip);
        }
    }
}

impl<V: PartialEq> PartialEq for OddHalfEdgeMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<V: fmt::Debug> fmt::Debug for OddHalfEdgeMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.values.iter().enumerate().map(|(i, v)| (i + 1, v)))
            .finish()
    }
}
